use crate::reconciler::{get_latest_series, sort_descending};
use beanprice_core::config::LedgerConfig;
use beanprice_core::ledger::entity::{Observation, SaveOutcome, Series};
use beanprice_core::ledger::error::LedgerError;
use beanprice_core::store::port::{KvStore, KvStoreExt};
use tracing::info;

/// # Summary
/// 写入一条观测值并整体持久化序列。
///
/// # Logic
/// 1. 通过对账得到当前序列。
/// 2. 线性查找同日期记录：找到则原位替换（长度不变）。
/// 3. 未找到则插入到序列头部；若长度超过 `max_entries`，立即降序排列、截断并持久化后返回。
/// 4. 其余情况降序排列后整体持久化。
///
/// # Invariants
/// - 保留上限只在新增路径检查；更新路径从不截断，即使已有长度超过上限。
/// - 截断保留日期最新的 `max_entries` 条，其余永久丢弃。
/// - 存储写入是唯一的副作用，失败时调用方视为没有发生持久化变更。
///
/// # Arguments
/// * `store`: 注入的 KV 存储。
/// * `settings`: 存储键与保留上限。
/// * `baseline`: 基准数据。
/// * `observation`: 新观测值。
///
/// # Returns
/// 成功返回 `SaveOutcome`，写入失败返回 `LedgerError::StoreWrite`。
pub fn save(
    store: &dyn KvStore,
    settings: &LedgerConfig,
    baseline: &[Observation],
    observation: Observation,
) -> Result<SaveOutcome, LedgerError> {
    let key = settings.storage_key.as_str();
    let mut series = get_latest_series(store, key, baseline);

    let outcome = match series.iter().position(|o| o.date == observation.date) {
        Some(index) => {
            series[index] = observation;
            SaveOutcome::Updated
        }
        None => {
            series.insert(0, observation);

            if series.len() > settings.max_entries {
                sort_descending(&mut series);
                let evicted = series.len() - settings.max_entries;
                series.truncate(settings.max_entries);
                persist(store, key, &series)?;

                info!(
                    key = %key,
                    kept = series.len(),
                    evicted,
                    "Price history trimmed to retention cap"
                );
                return Ok(SaveOutcome::InsertedAndTrimmed { evicted });
            }
            SaveOutcome::Inserted
        }
    };

    sort_descending(&mut series);
    persist(store, key, &series)?;
    Ok(outcome)
}

fn persist(store: &dyn KvStore, key: &str, series: &Series) -> Result<(), LedgerError> {
    store.set_json(key, series).map_err(LedgerError::from)
}
