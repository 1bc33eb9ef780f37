use crate::config::GroupingConfig;
use crate::graph::MutualAdjacency;
use crate::model::Assignment;
use rand::Rng;
use rand::seq::SliceRandom;
use std::cmp::Reverse;
use std::collections::HashMap;

impl Assignment {
    /// Places the waiting students in a uniformly shuffled order, walking the
    /// groups round-robin.
    ///
    /// The round-robin cursor carries over from one student to the next. Each
    /// student gets `config.attempt_budget(groups)` slots to find a group
    /// with room; anyone who runs out stays on the unassigned list.
    ///
    /// Returns the number of students placed.
    pub fn randomly_fill<R: Rng + ?Sized>(&mut self, config: &GroupingConfig, rng: &mut R) -> usize {
        let mut waiting = std::mem::take(&mut self.unassigned);
        waiting.shuffle(rng);

        let num_groups = self.groups.len();
        let budget = config.attempt_budget(num_groups);
        let mut cursor = 0;
        let mut placed = 0;

        for student in waiting {
            let mut target = None;
            for _ in 0..budget {
                let idx = cursor;
                cursor = (cursor + 1) % num_groups;
                if self.groups[idx].has_room() {
                    target = Some(idx);
                    break;
                }
            }

            match target {
                Some(idx) => {
                    self.place_at(student, idx);
                    placed += 1;
                },
                None => {
                    tracing::trace!(student, "no group with room, leaving unassigned");
                    self.unassigned.push(student);
                },
            }
        }

        tracing::debug!(placed, unassigned = self.unassigned.len(), "random fill finished");
        placed
    }

    /// Places the waiting students best-connected first, each into the group
    /// that already holds the most of their mutual friends.
    ///
    /// Students with equal degree keep their roster order and equal group
    /// scores go to the earliest group, so the result is deterministic.
    /// Students that find every group full stay on the unassigned list.
    ///
    /// Returns the number of students placed.
    pub fn greedy_fill(&mut self, adjacency: &MutualAdjacency) -> usize {
        let mut waiting = std::mem::take(&mut self.unassigned);
        // Stable sort, ties stay in roster order
        waiting.sort_by_key(|student| Reverse(adjacency.degree(*student)));

        let mut placed = 0;
        for student in waiting {
            let mut friends_per_group: HashMap<usize, usize> = HashMap::new();
            for friend in adjacency.friends_of(student) {
                if let Some(idx) = self.group_index_of(friend) {
                    *friends_per_group.entry(idx).or_default() += 1;
                }
            }

            let mut best: Option<(usize, usize)> = None;
            for (idx, group) in self.groups.iter().enumerate() {
                if !group.has_room() {
                    continue;
                }
                let score = friends_per_group.get(&idx).copied().unwrap_or(0);
                if best.is_none_or(|(_, top)| score > top) {
                    best = Some((idx, score));
                }
            }

            match best {
                Some((idx, _)) => {
                    self.place_at(student, idx);
                    placed += 1;
                },
                None => {
                    tracing::trace!(student, "every group is full, leaving unassigned");
                    self.unassigned.push(student);
                },
            }
        }

        tracing::debug!(placed, unassigned = self.unassigned.len(), "greedy fill finished");
        placed
    }
}
