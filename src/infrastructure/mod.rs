//! Infrastructure layer - storage, caching, services and observability

pub mod cache;
pub mod customer;
pub mod logging;
pub mod observability;
pub mod storage;
