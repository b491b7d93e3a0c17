//! Infrastructure layer - stores, gateways and runtime plumbing

pub mod logging;
pub mod notification;
pub mod observability;
pub mod storage;
pub mod user;
