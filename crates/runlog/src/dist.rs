//! Process-group identity for multi-process runs.

use serde::{Deserialize, Serialize};

/// Identity of this process within a training run.
///
/// Logging hooks only act on the master process; all other ranks see their
/// lifecycle calls return immediately without side effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributedInfo {
    /// This process's rank (0-indexed)
    pub rank: usize,
    /// Total number of processes
    pub world_size: usize,
}

impl Default for DistributedInfo {
    fn default() -> Self {
        Self {
            rank: 0,
            world_size: 1,
        }
    }
}

impl DistributedInfo {
    pub fn new(rank: usize, world_size: usize) -> Self {
        Self { rank, world_size }
    }

    /// Check if this is the master process
    pub fn is_master(&self) -> bool {
        self.rank == 0
    }
}
