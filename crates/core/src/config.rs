use serde::{Deserialize, Serialize};

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub ledger: LedgerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// 台账行为配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    // 持久化序列所在的固定键
    pub storage_key: String,
    // 新增记录后允许保留的最大条数
    pub max_entries: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    // EnvFilter 指令，RUST_LOG 优先
    pub filter: String,
    // 设置后按天滚动写入该目录
    pub dir: Option<String>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            storage_key: "priceData".to_string(),
            max_entries: 90,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            dir: None,
        }
    }
}
