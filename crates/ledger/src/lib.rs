//! 价格台账：基准数据与持久化记录的对账、写入与保留上限。

pub mod baseline;
pub mod reconciler;
pub mod service;
pub mod writer;

pub use service::PriceLedger;
