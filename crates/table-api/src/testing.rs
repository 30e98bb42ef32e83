//! In-memory repositories for handler tests

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use table_core::{PoolStatus, RepoResult, RepositoryError, Row, RowRepository};

use crate::server::create_app;
use crate::state::AppState;

/// Returns a fixed set of rows
pub struct StaticRows(pub Vec<Row>);

#[async_trait]
impl RowRepository for StaticRows {
    async fn fetch_all(&self) -> RepoResult<Vec<Row>> {
        Ok(self.0.clone())
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }

    fn pool_status(&self) -> PoolStatus {
        PoolStatus::new(10, 1, 1)
    }
}

/// Fails every call with the error produced by `make_error`
pub struct FailingRows(pub fn() -> RepositoryError);

#[async_trait]
impl RowRepository for FailingRows {
    async fn fetch_all(&self) -> RepoResult<Vec<Row>> {
        Err((self.0)())
    }

    async fn ping(&self) -> RepoResult<()> {
        Err((self.0)())
    }

    fn pool_status(&self) -> PoolStatus {
        PoolStatus::new(10, 0, 0)
    }
}

/// Bounded stand-in for a connection pool that records peak concurrent checkouts
pub struct BoundedRows {
    permits: Semaphore,
    max: u32,
    in_use: AtomicU32,
    peak: AtomicU32,
    fail_every: u32,
    calls: AtomicU32,
    rows: Vec<Row>,
}

impl BoundedRows {
    /// `fail_every = n` makes every n-th fetch fail after checkout; 0 never fails
    pub fn new(max: u32, fail_every: u32, rows: Vec<Row>) -> Self {
        Self {
            permits: Semaphore::new(max as usize),
            max,
            in_use: AtomicU32::new(0),
            peak: AtomicU32::new(0),
            fail_every,
            calls: AtomicU32::new(0),
            rows,
        }
    }

    pub fn peak(&self) -> u32 {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn in_use(&self) -> u32 {
        self.in_use.load(Ordering::SeqCst)
    }
}

/// Releases a checkout when dropped
struct Checkout<'a> {
    in_use: &'a AtomicU32,
    _permit: tokio::sync::SemaphorePermit<'a>,
}

impl Drop for Checkout<'_> {
    fn drop(&mut self) {
        self.in_use.fetch_sub(1, Ordering::SeqCst);
    }
}

impl BoundedRows {
    async fn checkout(&self) -> RepoResult<Checkout<'_>> {
        let permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        let now = self.in_use.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        Ok(Checkout {
            in_use: &self.in_use,
            _permit: permit,
        })
    }
}

#[async_trait]
impl RowRepository for BoundedRows {
    async fn fetch_all(&self) -> RepoResult<Vec<Row>> {
        let _checkout = self.checkout().await?;
        tokio::time::sleep(Duration::from_millis(5)).await;

        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_every > 0 && call % self.fail_every == 0 {
            return Err(RepositoryError::Query("relation \"sample_table\" does not exist".to_string()));
        }
        Ok(self.rows.clone())
    }

    async fn ping(&self) -> RepoResult<()> {
        let _checkout = self.checkout().await?;
        Ok(())
    }

    fn pool_status(&self) -> PoolStatus {
        let in_use = self.in_use();
        PoolStatus::new(self.max, in_use, 0)
    }
}

/// Build the full application around a repository
pub fn app_with(rows: Arc<dyn RowRepository>) -> axum::Router {
    create_app(AppState::new(rows))
}

/// The rows used across tests: `{id:1,name:"a"}`, `{id:2,name:"b"}`
pub fn sample_rows() -> Vec<Row> {
    vec![
        Row::new().with("id", 1).with("name", "a"),
        Row::new().with("id", 2).with("name", "b"),
    ]
}
