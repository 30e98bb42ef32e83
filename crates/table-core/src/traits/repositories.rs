//! Repository traits (ports) - define the interface for data access
//!
//! The HTTP layer depends only on these traits; the PostgreSQL
//! implementation lives in `table-db`.

use async_trait::async_trait;

use crate::entities::{PoolStatus, Row};
use crate::error::RepositoryError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait RowRepository: Send + Sync {
    /// Read every row of the backing table
    ///
    /// Implementations hold a pooled connection only for the duration of the
    /// call and must hand it back on both the success and the error path.
    async fn fetch_all(&self) -> RepoResult<Vec<Row>>;

    /// Round-trip to the database to prove a connection can be obtained
    async fn ping(&self) -> RepoResult<()>;

    /// Current connection pool occupancy
    fn pool_status(&self) -> PoolStatus;
}
