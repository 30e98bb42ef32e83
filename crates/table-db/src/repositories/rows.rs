//! PostgreSQL implementation of RowRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use table_core::{PoolStatus, RepoResult, Row, RowRepository};

use crate::mappers::decode_rows;
use crate::pool::pool_status;

use super::error::{map_connection_error, map_query_error};

/// Table served by the data endpoint; its schema is owned elsewhere
pub const SAMPLE_TABLE: &str = "sample_table";

const SELECT_ALL: &str = "SELECT * FROM sample_table";

/// PostgreSQL implementation of RowRepository
#[derive(Clone)]
pub struct PgRowRepository {
    pool: PgPool,
}

impl PgRowRepository {
    /// Create a new PgRowRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RowRepository for PgRowRepository {
    #[instrument(skip(self), fields(table = SAMPLE_TABLE))]
    async fn fetch_all(&self) -> RepoResult<Vec<Row>> {
        let pg_rows = {
            // Returned to the pool when `conn` goes out of scope, on every path
            let mut conn = self.pool.acquire().await.map_err(map_connection_error)?;
            // Simple protocol: values arrive as PostgreSQL's text output,
            // which every column type has
            // Called via `Executor` directly (what `RawSql::fetch_all` forwards to)
            // so the future stays provably `Send` under `async_trait`
            sqlx::Executor::fetch_all(&mut *conn, sqlx::raw_sql(SELECT_ALL))
                .await
                .map_err(map_query_error)?
        };

        let rows = decode_rows(&pg_rows)?;
        debug!(
            rows = rows.len(),
            columns = rows.first().map_or(0, Row::len),
            "Fetched rows"
        );
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> RepoResult<()> {
        let mut conn = self.pool.acquire().await.map_err(map_connection_error)?;
        sqlx::query("SELECT 1")
            .execute(&mut *conn)
            .await
            .map_err(map_query_error)?;
        Ok(())
    }

    fn pool_status(&self) -> PoolStatus {
        pool_status(&self.pool)
    }
}
