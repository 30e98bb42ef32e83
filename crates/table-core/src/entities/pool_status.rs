//! Pool status - point-in-time view of connection pool occupancy

use serde::Serialize;

/// Snapshot of connection pool bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolStatus {
    /// Upper bound on open connections
    pub max_connections: u32,
    /// Connections currently open (idle + checked out)
    pub size: u32,
    /// Open connections waiting in the idle set
    pub idle: u32,
    /// Connections currently checked out by requests
    pub in_use: u32,
}

impl PoolStatus {
    /// Build a snapshot from the pool's size and idle count
    #[must_use]
    pub fn new(max_connections: u32, size: u32, idle: u32) -> Self {
        Self {
            max_connections,
            size,
            idle,
            // size and idle are read separately, so idle may briefly exceed size
            in_use: size.saturating_sub(idle),
        }
    }
}
