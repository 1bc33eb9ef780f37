use crate::config::GroupingConfig;
use crate::graph::MutualAdjacency;
use crate::happiness::{swap_gain, total_happiness};
use crate::model::Assignment;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

/// What one local search run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchSummary {
    pub iterations: usize,
    pub accepted_swaps: usize,
    pub initial_happiness: usize,
    pub final_happiness: usize,
}

impl Assignment {
    /// Hill-climbs on total happiness by random pairwise swaps.
    ///
    /// Each iteration draws two placed students uniformly at random. Pairs
    /// that are the same student or already share a group are skipped;
    /// otherwise the swap is made only when it strictly raises total
    /// happiness. The loop always spends the full `config.iterations`
    /// budget, with no restarts and no sideways moves, so it may settle in a
    /// local optimum. Unassigned students never take part.
    pub fn improve<R: Rng + ?Sized>(
        &mut self,
        adjacency: &MutualAdjacency,
        config: &GroupingConfig,
        rng: &mut R,
    ) -> SearchSummary {
        // Swaps never change who is placed, so the candidates are fixed
        let candidates = self.assigned_students();
        let initial_happiness = total_happiness(self, adjacency);

        let mut current_happiness = initial_happiness;
        let mut accepted_swaps = 0;
        for iteration in 0..config.iterations {
            let (Some(&a), Some(&b)) = (candidates.choose(rng), candidates.choose(rng)) else {
                continue;
            };
            if a == b || self.group_index_of(a) == self.group_index_of(b) {
                continue;
            }

            let gain = swap_gain(a, b, self, adjacency);
            if gain <= 0 {
                continue;
            }

            self.swap(a, b);
            current_happiness += gain.unsigned_abs() as usize;
            accepted_swaps += 1;
            tracing::trace!(iteration, a, b, gain, current_happiness, "accepted swap");
        }

        tracing::debug!(
            iterations = config.iterations,
            accepted_swaps,
            initial_happiness,
            final_happiness = current_happiness,
            "local search finished"
        );

        SearchSummary {
            iterations: config.iterations,
            accepted_swaps,
            initial_happiness,
            final_happiness: current_happiness,
        }
    }
}
