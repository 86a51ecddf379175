use beanprice_core::ledger::entity::{Observation, Series, StoreState};
use beanprice_core::ledger::error::LedgerError;
use beanprice_core::store::port::{KvStore, KvStoreExt};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, warn};

/// # Summary
/// 一次对账的完整结果。
#[derive(Debug, Clone)]
pub struct Reconciled {
    // 去重并按日期降序排列后的序列
    pub series: Series,
    // 持久化条目中的记录数
    pub persisted: usize,
    pub store_state: StoreState,
}

/// # Summary
/// 按日期严格降序（最新在前）排列序列。
///
/// # Invariants
/// - 稳定排序：日期相同的记录保持原有相对次序。
pub fn sort_descending(series: &mut [Observation]) {
    series.sort_by(|a, b| b.date.cmp(&a.date));
}

/// # Summary
/// 读取并解析持久化条目。
///
/// # Returns
/// 条目缺失返回 `Ok(None)`；存储故障为 `StoreRead`，内容损坏为 `Parse`。
pub fn read_persisted(store: &dyn KvStore, key: &str) -> Result<Option<Series>, LedgerError> {
    store.get_json::<Series>(key).map_err(LedgerError::from)
}

/// # Summary
/// 合并基准数据与持久化记录，得到当前权威序列。
///
/// # Logic
/// 1. 以日期为键，先放入全部基准记录。
/// 2. 读取并解析持久化条目，逐条放入映射，覆盖同日期的基准记录。
/// 3. 映射值按日期降序排列后返回。
/// 4. 读取或解析失败时不向上抛错，退回为仅含基准数据的降序序列，并标记为 `Corrupt`。
///
/// # Arguments
/// * `store`: 注入的 KV 存储。
/// * `key`: 持久化序列所在的键。
/// * `baseline`: 基准数据。
pub fn reconcile(store: &dyn KvStore, key: &str, baseline: &[Observation]) -> Reconciled {
    let mut by_date: HashMap<NaiveDate, Observation> =
        baseline.iter().map(|o| (o.date, o.clone())).collect();

    let (persisted, store_state) = match read_persisted(store, key) {
        Ok(None) => (0, StoreState::Empty),
        Ok(Some(saved)) => {
            let count = saved.len();
            // 同一日期出现多次时，后出现的记录生效
            by_date.extend(saved.into_iter().map(|o| (o.date, o)));
            (count, StoreState::Healthy)
        }
        Err(e) => {
            warn!(key = %key, error = %e, "Persisted price data unusable, falling back to baseline");
            (0, StoreState::Corrupt)
        }
    };

    let mut series: Series = by_date.into_values().collect();
    sort_descending(&mut series);

    debug!(
        key = %key,
        baseline = baseline.len(),
        persisted,
        merged = series.len(),
        "Price series reconciled"
    );

    Reconciled {
        series,
        persisted,
        store_state,
    }
}

/// # Summary
/// 返回当前权威序列，从不失败。
pub fn get_latest_series(store: &dyn KvStore, key: &str, baseline: &[Observation]) -> Series {
    reconcile(store, key, baseline).series
}
