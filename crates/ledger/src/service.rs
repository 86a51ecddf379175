use crate::baseline::base_price_data;
use crate::reconciler;
use crate::writer;
use beanprice_core::common::time::TimeProvider;
use beanprice_core::config::LedgerConfig;
use beanprice_core::ledger::entity::{Freshness, LedgerStatus, Observation, SaveOutcome, Series};
use beanprice_core::ledger::error::LedgerError;
use beanprice_core::store::port::KvStore;
use std::sync::Arc;
use tracing::{error, info};

/// # Summary
/// `PriceLedger` 是价格台账的入口，把注入的存储、基准数据和配置绑定在一起，
/// 对外提供读取、写入、清空与状态查询。
///
/// # Invariants
/// - 自身不持有任何可变状态，每次调用都从基准数据和存储重新构造序列。
/// - 读-改-写不是原子的：同一存储只允许一个逻辑写者，并发写入可能互相覆盖。
pub struct PriceLedger {
    store: Arc<dyn KvStore>,
    settings: LedgerConfig,
    baseline: Arc<[Observation]>,
}

impl PriceLedger {
    /// 使用内置的基准数据创建台账。
    pub fn new(store: Arc<dyn KvStore>, settings: LedgerConfig) -> Self {
        Self::with_baseline(store, settings, base_price_data())
    }

    /// 使用指定的基准数据创建台账。
    pub fn with_baseline(
        store: Arc<dyn KvStore>,
        settings: LedgerConfig,
        baseline: impl Into<Arc<[Observation]>>,
    ) -> Self {
        Self {
            store,
            settings,
            baseline: baseline.into(),
        }
    }

    pub fn settings(&self) -> &LedgerConfig {
        &self.settings
    }

    pub fn baseline(&self) -> &[Observation] {
        &self.baseline
    }

    /// # Summary
    /// 获取当前权威价格序列。
    ///
    /// # Returns
    /// 去重且按日期降序的序列。存储不可用时退回到基准数据，从不返回错误。
    pub fn get_latest_series(&self) -> Series {
        reconciler::get_latest_series(self.store.as_ref(), &self.settings.storage_key, &self.baseline)
    }

    /// # Summary
    /// 保存一条观测值。
    ///
    /// # Returns
    /// 成功返回 `SaveOutcome`；失败返回 `LedgerError`，此时不保证有任何持久化变更，调用方可以重试。
    pub fn save(&self, observation: Observation) -> Result<SaveOutcome, LedgerError> {
        let date = observation.date;
        let result = writer::save(
            self.store.as_ref(),
            &self.settings,
            &self.baseline,
            observation,
        );

        match &result {
            Ok(outcome) => info!(%date, ?outcome, "Price saved"),
            Err(e) => error!(%date, error = %e, "Failed to save price"),
        }
        result
    }

    /// # Summary
    /// 解析外部输入后保存。
    ///
    /// # Logic
    /// 1. 通过 `Observation::parse` 校验日期与价格文本。
    /// 2. 解析失败以 `LedgerError::Parse` 返回，不触及存储。
    /// 3. 解析成功则走 `save`。
    pub fn record(&self, date: &str, price: &str) -> Result<SaveOutcome, LedgerError> {
        let observation = Observation::parse(date, price).inspect_err(|e| {
            error!(date, error = %e, "Rejected price input");
        })?;
        self.save(observation)
    }

    /// # Summary
    /// 删除持久化条目，之后的读取只剩基准数据。
    pub fn clear(&self) -> Result<(), LedgerError> {
        let key = self.settings.storage_key.as_str();
        self.store.remove_item(key).map_err(|e| {
            error!(key = %key, error = %e, "Failed to clear price data");
            LedgerError::StoreWrite(e.to_string())
        })?;
        info!(key = %key, "Persisted price data cleared");
        Ok(())
    }

    /// # Summary
    /// 汇总台账状态。
    ///
    /// # Logic
    /// 1. 执行一次对账，记录持久化条目的条数与健康状态。
    /// 2. 取最新与最旧记录，并以 `clock` 的当天日期计算新鲜度。
    pub fn status(&self, clock: &dyn TimeProvider) -> LedgerStatus {
        let reconciled =
            reconciler::reconcile(self.store.as_ref(), &self.settings.storage_key, &self.baseline);
        let series = reconciled.series;

        let latest = series.first().cloned();
        let oldest = series.last().map(|o| o.date);
        let freshness = Freshness::classify(latest.as_ref().map(|o| o.date), clock.today());

        LedgerStatus {
            total: series.len(),
            persisted: reconciled.persisted,
            store_state: reconciled.store_state,
            latest,
            oldest,
            freshness,
        }
    }
}
