//! Repository traits

mod repositories;

pub use repositories::{RepoResult, RowRepository};
