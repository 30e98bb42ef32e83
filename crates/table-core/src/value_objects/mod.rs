//! Value objects

mod column_value;

pub use column_value::ColumnValue;
