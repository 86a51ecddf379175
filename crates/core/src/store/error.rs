use thiserror::Error;

/// # Summary
/// 存储层错误枚举，处理键值存储的读写与编解码故障。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// 底层存储读取失败
    #[error("Read error: {0}")]
    Read(String),
    /// 底层存储写入失败
    #[error("Write error: {0}")]
    Write(String),
    // 数据序列化失败
    #[error("Serialize error: {0}")]
    Serialize(String),
    // 数据反序列化失败
    #[error("Deserialize error: {0}")]
    Deserialize(String),
    /// 未知或未分类的错误
    #[error("Unknown error: {0}")]
    Unknown(String),
}
