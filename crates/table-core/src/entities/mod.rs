//! Domain entities

mod pool_status;
mod row;

pub use pool_status::PoolStatus;
pub use row::Row;
