use beanprice_core::config::AppConfig;
use config::{Config, Environment, File};
use std::path::Path;

/// 未指定 `--config` 时查找的配置文件名（不含扩展名）
const DEFAULT_CONFIG_NAME: &str = "beanprice";

/// # Summary
/// 分层加载应用配置。
///
/// # Logic
/// 1. 缺省字段取 `AppConfig::default()` 的值。
/// 2. 指定了路径则该文件必须存在；否则尝试可选的 `beanprice.{toml,json,...}`。
/// 3. 叠加 `BEANPRICE_` 前缀的环境变量，嵌套字段以 `__` 分隔，
///    例如 `BEANPRICE_LEDGER__MAX_ENTRIES=30`。
pub fn load(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };

    let config = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix("BEANPRICE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize::<AppConfig>()?;

    Ok(config)
}
