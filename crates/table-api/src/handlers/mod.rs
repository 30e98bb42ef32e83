//! Route handlers

pub mod data;
pub mod health;
