use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use beanprice_core::common::time::RealTimeProvider;
use beanprice_ledger::PriceLedger;
use beanprice_store::config::set_root_dir;
use beanprice_store::file::FileStore;
use clap::{Parser, Subcommand};
use tracing::info;

mod logging;
mod settings;

/// 咖啡豆每日价格台账
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// 配置文件路径，默认查找当前目录下的 beanprice.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 按日期降序列出当前价格序列
    List {
        /// 只显示最新的 N 条
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// 新增或更新某天的价格
    Save {
        /// 日期，格式 YYYY-MM-DD
        date: String,
        /// 价格文本，按原样保存
        price: String,
    },
    /// 删除已保存的记录，只保留内置基准数据
    Clear,
    /// 以 JSON 输出台账状态
    Status,
}

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
///
/// # Logic
/// 1. 解析命令行并分层加载配置。
/// 2. 初始化全局日志。
/// 3. 实例化文件存储并注入到 `PriceLedger`。
/// 4. 执行子命令，结果写到 stdout。
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = settings::load(cli.config.as_deref()).context("failed to load configuration")?;
    let _log_guard = logging::init(&config.logging)?;

    set_root_dir(PathBuf::from(&config.storage.data_dir));
    let store = Arc::new(FileStore::new()?);
    info!(
        data_dir = %store.root().display(),
        key = %config.ledger.storage_key,
        max_entries = config.ledger.max_entries,
        "Price ledger ready"
    );
    let ledger = PriceLedger::new(store, config.ledger);

    match cli.command {
        Command::List { limit } => {
            let series = ledger.get_latest_series();
            for obs in series.iter().take(limit.unwrap_or(series.len())) {
                println!("{}\t{}", obs.date, obs.price);
            }
        }
        Command::Save { date, price } => {
            let outcome = ledger.record(&date, &price)?;
            println!("{outcome:?}");
        }
        Command::Clear => {
            ledger.clear()?;
            println!("cleared");
        }
        Command::Status => {
            let status = ledger.status(&RealTimeProvider);
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }

    Ok(())
}
