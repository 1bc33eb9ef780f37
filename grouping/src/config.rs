use serde::{Deserialize, Serialize};

pub const DEFAULT_ITERATIONS: usize = 300;
pub const DEFAULT_ATTEMPTS_PER_GROUP: usize = 2;

/// Tunables for seeding and local search.
///
/// # Fields
/// - `iterations`: swap proposals the optimizer makes, all of them, every run
/// - `attempts_per_group`: random seeding tries `attempts_per_group × groups`
///   round-robin slots per student before leaving them unassigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingConfig {
    pub iterations: usize,
    pub attempts_per_group: usize,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            attempts_per_group: DEFAULT_ATTEMPTS_PER_GROUP,
        }
    }
}

impl GroupingConfig {
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Round-robin slots a student may try. Never less than one full lap, so
    /// no group is skipped while it still has room.
    pub fn attempt_budget(&self, num_groups: usize) -> usize {
        self.attempts_per_group.max(1) * num_groups
    }
}
