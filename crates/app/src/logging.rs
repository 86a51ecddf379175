use beanprice_core::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// # Summary
/// 初始化全局日志。
///
/// # Logic
/// 1. `RUST_LOG` 优先，否则使用配置中的过滤指令。
/// 2. 日志始终写到 stderr，保证 stdout 只有命令输出。
/// 3. 配置了 `dir` 时额外按天滚动写入 `beanprice.log`。
///
/// # Returns
/// 文件写入器的 guard，需持有到进程结束以便刷盘。
pub fn init(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.filter))?;
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    match &config.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "beanprice.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init()?;
            Ok(None)
        }
    }
}
