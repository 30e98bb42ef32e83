//! Database connection pool management

mod postgres;

pub use postgres::{create_pool, pool_status, DatabaseConfig};

// Re-export PgPool for convenience
pub use sqlx::postgres::PgPool;
