use beanprice_core::store::error::StoreError;
use beanprice_core::store::port::KvStore;
use dashmap::DashMap;

/// # Summary
/// 基于 DashMap 的内存 KV 存储实现。
///
/// # Invariants
/// - 所有操作均通过并发哈希表 `DashMap` 执行，保证多线程安全。
/// - 进程退出即丢失，用于测试替身或临时会话。
pub struct MemStore {
    // 线程安全的 KV 存储容器
    storage: DashMap<String, String>,
}

impl MemStore {
    /// # Summary
    /// 创建一个空的 MemStore 实例。
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// 当前保存的键数量
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for MemStore {
    /// # Summary
    /// 获取指定键的值。
    ///
    /// # Logic
    /// 从哈希表中检索 Key 对应的引用，并将其克隆为独立的所有权对象返回。
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.storage.get(key).map(|v| v.value().clone()))
    }

    /// # Summary
    /// 写入指定键的值。
    ///
    /// # Logic
    /// 将 Key 转换为 String 后与 Value 一并插入哈希表。若存在同名 Key 则覆盖。
    fn set_item(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.storage.insert(key.to_string(), value);
        Ok(())
    }

    /// # Summary
    /// 删除指定键，无论键是否存在均返回 Ok。
    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.storage.remove(key);
        Ok(())
    }
}
