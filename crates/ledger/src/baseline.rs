use beanprice_core::ledger::entity::{Observation, Series};
use chrono::NaiveDate;

// 随程序发布的咖啡豆价格种子数据，(年, 月, 日, 价格)
const BASE_PRICE_DATA: &[(i32, u32, u32, &str)] = &[
    (2025, 9, 8, "320"),
    (2025, 9, 7, "318"),
    (2025, 9, 6, "322"),
    (2025, 9, 5, "315"),
    (2025, 9, 4, "319"),
    (2025, 9, 3, "325"),
    (2025, 9, 2, "321"),
    (2025, 9, 1, "317"),
    (2025, 8, 31, "314"),
    (2025, 8, 30, "312"),
    (2025, 8, 29, "310"),
    (2025, 8, 28, "308"),
    (2025, 8, 27, "306"),
    (2025, 8, 26, "309"),
    (2025, 8, 25, "313"),
    (2025, 8, 24, "315"),
    (2025, 8, 23, "317"),
    (2025, 8, 22, "320"),
    (2025, 8, 21, "322"),
    (2025, 8, 20, "318"),
    (2025, 8, 19, "316"),
    (2025, 8, 18, "314"),
    (2025, 8, 17, "312"),
    (2025, 8, 16, "310"),
    (2025, 8, 15, "307"),
    (2025, 8, 14, "305"),
    (2025, 8, 13, "303"),
    (2025, 8, 12, "305"),
    (2025, 8, 11, "308"),
    (2025, 8, 10, "310"),
];

/// # Summary
/// 构造一份新的基准序列。
///
/// # Invariants
/// - 每次调用都返回独立的副本，基准数据本身从不被修改。
pub fn base_price_data() -> Series {
    BASE_PRICE_DATA
        .iter()
        .filter_map(|&(y, m, d, price)| {
            NaiveDate::from_ymd_opt(y, m, d).map(|date| Observation::new(date, price))
        })
        .collect()
}
