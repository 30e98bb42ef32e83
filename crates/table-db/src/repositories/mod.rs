//! PostgreSQL repository implementations

mod error;
mod rows;

pub use rows::{PgRowRepository, SAMPLE_TABLE};
