//! PgRow -> domain row mappers

mod row;

pub use row::decode_rows;
