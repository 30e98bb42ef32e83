//! # table-db
//!
//! Database layer implementing [`table_core::RowRepository`] with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management
//! - Decoding untyped result rows into [`table_core::Row`]
//! - The repository serving the `sample_table` dump
//!
//! ## Usage
//!
//! ```rust,ignore
//! use table_db::{create_pool, DatabaseConfig, PgRowRepository};
//! use table_core::RowRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default());
//!     let repo = PgRowRepository::new(pool);
//!     let rows = repo.fetch_all().await?;
//!     println!("{}", serde_json::to_string(&rows)?);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, pool_status, DatabaseConfig, PgPool};
pub use repositories::{PgRowRepository, SAMPLE_TABLE};
