use crate::store::error::StoreError;
use thiserror::Error;

/// # Summary
/// 价格台账错误枚举。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 读取类错误只在对账内部出现并被降级处理，不会从 `get_latest_series` 暴露。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// 存储不可读，或持久化内容格式损坏
    #[error("Store read error: {0}")]
    StoreRead(String),
    /// 存储写入失败
    #[error("Store write error: {0}")]
    StoreWrite(String),
    /// 日期或序列化数据解析失败
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Read(msg) | StoreError::Unknown(msg) => LedgerError::StoreRead(msg),
            StoreError::Deserialize(msg) => LedgerError::Parse(msg),
            StoreError::Write(msg) | StoreError::Serialize(msg) => LedgerError::StoreWrite(msg),
        }
    }
}
