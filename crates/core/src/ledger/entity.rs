use super::error::LedgerError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 日期的规范文本格式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// # Summary
/// 单日价格观测值。
///
/// # Invariants
/// - `date` 是台账中的唯一键，序列化形式固定为 `YYYY-MM-DD`。
/// - `price` 以原始文本保存，保留书写格式，不做浮点转换和数值校验。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation {
    // 观测日期
    pub date: NaiveDate,
    // 价格文本
    pub price: String,
}

impl Observation {
    /// # Summary
    /// 直接由已解析的日期构造观测值。
    pub fn new(date: NaiveDate, price: impl Into<String>) -> Self {
        Self {
            date,
            price: price.into(),
        }
    }

    /// # Summary
    /// 从外部输入解析观测值。
    ///
    /// # Logic
    /// 1. 按 `YYYY-MM-DD` 解析日期。
    /// 2. 去掉价格两端空白，拒绝空文本。
    ///
    /// # Arguments
    /// * `date`: 日期文本。
    /// * `price`: 价格文本。
    ///
    /// # Returns
    /// 解析成功的观测值，否则返回 `LedgerError::Parse`。
    pub fn parse(date: &str, price: impl Into<String>) -> Result<Self, LedgerError> {
        let parsed = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
            .map_err(|e| LedgerError::Parse(format!("invalid date '{date}': {e}")))?;

        let price = price.into();
        let price = price.trim();
        if price.is_empty() {
            return Err(LedgerError::Parse(format!("empty price for {parsed}")));
        }

        Ok(Self::new(parsed, price))
    }
}

/// 价格序列。对外输出时按日期严格降序，且每个日期至多一条。
pub type Series = Vec<Observation>;

/// # Summary
/// 一次成功保存的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    // 覆盖了已有日期的记录，长度不变
    Updated,
    // 新增日期，未触发保留上限
    Inserted,
    // 新增日期并触发保留上限，`evicted` 为被丢弃的最旧记录数
    InsertedAndTrimmed { evicted: usize },
}

/// # Summary
/// 持久化条目的健康状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StoreState {
    // 尚未写入过
    Empty,
    // 可正常读取和解析
    Healthy,
    // 存在但无法读取或解析，对账结果已退回到基准数据
    Corrupt,
}

/// # Summary
/// 以最新观测日期相对今天的间隔划分的数据新鲜度。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Freshness {
    NoData,
    Fresh,
    Recent { days: i64 },
    Stale { days: i64 },
}

impl Freshness {
    /// 少于该天数视为 Recent，否则为 Stale
    pub const STALE_AFTER_DAYS: i64 = 5;

    /// # Summary
    /// 根据最新日期与今天的日期计算新鲜度。
    ///
    /// # Logic
    /// 间隔小于 1 天（含未来日期）为 Fresh，小于 5 天为 Recent，其余为 Stale。
    pub fn classify(latest: Option<NaiveDate>, today: NaiveDate) -> Self {
        let Some(latest) = latest else {
            return Freshness::NoData;
        };
        let days = (today - latest).num_days();
        if days < 1 {
            Freshness::Fresh
        } else if days < Self::STALE_AFTER_DAYS {
            Freshness::Recent { days }
        } else {
            Freshness::Stale { days }
        }
    }
}

/// # Summary
/// 台账状态快照。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerStatus {
    // 对账后序列长度
    pub total: usize,
    // 持久化条目中的记录数，条目缺失或损坏时为 0
    pub persisted: usize,
    pub store_state: StoreState,
    // 最新的一条观测
    pub latest: Option<Observation>,
    // 最旧的日期
    pub oldest: Option<NaiveDate>,
    pub freshness: Freshness,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_observation() {
        let obs = Observation::parse("2025-09-22", " 60000.50 ").unwrap();
        assert_eq!(obs.date, day(2025, 9, 22));
        assert_eq!(obs.price, "60000.50");

        assert!(matches!(
            Observation::parse("2025-13-01", "1"),
            Err(LedgerError::Parse(_))
        ));
        assert!(matches!(
            Observation::parse("yesterday", "1"),
            Err(LedgerError::Parse(_))
        ));
        assert!(matches!(
            Observation::parse("2025-09-22", "   "),
            Err(LedgerError::Parse(_))
        ));
    }

    #[test]
    fn test_wire_format_is_plain_date_and_price_text() {
        let obs = Observation::new(day(2025, 9, 2), "0320.00");
        let json = serde_json::to_string(&obs).unwrap();
        assert_eq!(json, r#"{"date":"2025-09-02","price":"0320.00"}"#);

        let back: Observation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, obs);
    }

    #[test]
    fn test_malformed_date_rejected_on_deserialize() {
        let res: Result<Observation, _> =
            serde_json::from_str(r#"{"date":"22/09/2025","price":"1"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_freshness_thresholds() {
        let today = day(2025, 9, 22);
        assert_eq!(Freshness::classify(None, today), Freshness::NoData);
        assert_eq!(Freshness::classify(Some(today), today), Freshness::Fresh);
        assert_eq!(
            Freshness::classify(Some(day(2025, 9, 23)), today),
            Freshness::Fresh
        );
        assert_eq!(
            Freshness::classify(Some(day(2025, 9, 18)), today),
            Freshness::Recent { days: 4 }
        );
        assert_eq!(
            Freshness::classify(Some(day(2025, 9, 17)), today),
            Freshness::Stale { days: 5 }
        );
    }
}
