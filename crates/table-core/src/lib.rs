//! # table-core
//!
//! Domain layer containing row values, pool status snapshots, and the
//! repository trait the HTTP layer reads rows through.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{PoolStatus, Row};
pub use error::RepositoryError;
pub use traits::{RepoResult, RowRepository};
pub use value_objects::ColumnValue;
