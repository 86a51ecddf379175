//! 价格台账的领域核心：实体、存储端口、错误与配置。
//!
//! 本 crate 不做任何 I/O，具体存储由 `beanprice-store` 提供，业务流程由
//! `beanprice-ledger` 编排。

pub mod common;
pub mod config;
pub mod ledger;
pub mod store;
