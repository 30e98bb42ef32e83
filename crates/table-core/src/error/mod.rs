//! Domain error types

mod repository_error;

pub use repository_error::RepositoryError;
