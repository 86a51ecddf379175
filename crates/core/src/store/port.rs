use super::error::StoreError;
use serde::{Serialize, de::DeserializeOwned};

/// # Summary
/// 业务无关的同步 KV 存储接口 (Port)。
///
/// # Invariants
/// - 键和值均为字符串，Trait 保持对象安全 (Object Safe)，可以 `Arc<dyn KvStore>` 注入。
/// - `set_item` 要么整体落盘，要么视为失败，不暴露部分写入。
/// - 不提供任何锁语义：读-改-写不是原子的，同一时刻只允许一个逻辑写者。
pub trait KvStore: Send + Sync {
    /// # Summary
    /// 读取指定键的值。
    ///
    /// # Arguments
    /// * `key`: 唯一键。
    ///
    /// # Returns
    /// 存在则返回 `Some(String)`，不存在返回 `None`，存储故障返回 `StoreError`。
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Summary
    /// 整体写入指定键的值，若已存在则覆盖。
    ///
    /// # Arguments
    /// * `key`: 唯一键。
    /// * `value`: 序列化后的文本。
    ///
    /// # Returns
    /// 成功返回 Ok，失败返回 `StoreError`。
    fn set_item(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// # Summary
    /// 删除指定键。键不存在时同样返回 Ok。
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// # Summary
/// 存储泛型扩展接口，提供 JSON 编解码的便捷方法。
///
/// # Invariants
/// - 自动为所有实现 `KvStore` 的类型提供支持。
pub trait KvStoreExt: KvStore {
    /// # Summary
    /// 存入强类型对象。
    ///
    /// # Logic
    /// 1. 使用 JSON 序列化对象。
    /// 2. 调用底层 `set_item` 写入。
    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let text =
            serde_json::to_string(value).map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.set_item(key, text)
    }

    /// # Summary
    /// 取出强类型对象。
    ///
    /// # Logic
    /// 1. 调用底层 `get_item` 获取文本。
    /// 2. 使用 JSON 反序列化为目标类型。
    ///
    /// # Returns
    /// 反序列化后的对象，键不存在时为 None。
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get_item(key)? {
            Some(text) => {
                let val = serde_json::from_str(&text)
                    .map_err(|e| StoreError::Deserialize(e.to_string()))?;
                Ok(Some(val))
            }
            None => Ok(None),
        }
    }
}

impl<T: KvStore + ?Sized> KvStoreExt for T {}
