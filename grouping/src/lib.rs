//! Splits a class roster into capacity-limited groups, keeping students who
//! picked each other together where it can.
//!
//! Two entry points:
//! - [`reset_and_random_assign`] ignores preferences and deals students out
//!   at random.
//! - [`balanced_assign`] builds the mutual-friend graph, seeds greedily and
//!   then hill-climbs with random swaps.
//!
//! Both run synchronously on their own copies of the inputs and take the
//! random source as a parameter, so a seeded generator reproduces a run.

pub mod config;
pub mod error;
pub mod graph;
pub mod happiness;
pub mod model;
pub mod search;
pub mod seed;
pub mod utils;

pub use config::GroupingConfig;
pub use error::{validate_groups, GroupingErr};
pub use graph::MutualAdjacency;
pub use happiness::{happiness, swap_gain, total_happiness, GroupingStats};
pub use model::{Assignment, Capacity, Group, GroupId, GroupShell, PreferenceEdges, StudentId};
pub use search::SearchSummary;

use rand::Rng;

/// Deals the roster into fresh copies of `groups` in random order, without
/// looking at preferences and without any optimization pass.
pub fn reset_and_random_assign<R: Rng + ?Sized>(
    groups: &[GroupShell],
    roster: &[StudentId],
    rng: &mut R,
) -> Assignment {
    reset_and_random_assign_with(groups, roster, &GroupingConfig::default(), rng)
}

pub fn reset_and_random_assign_with<R: Rng + ?Sized>(
    groups: &[GroupShell],
    roster: &[StudentId],
    config: &GroupingConfig,
    rng: &mut R,
) -> Assignment {
    let mut assignment = Assignment::new(groups, roster);
    assignment.randomly_fill(config, rng);
    assignment
}

/// Groups the roster so that as many mutual friends as possible share a
/// group, using the default iteration budget.
pub fn balanced_assign<R: Rng + ?Sized>(
    groups: &[GroupShell],
    roster: &[StudentId],
    preferences: &PreferenceEdges,
    rng: &mut R,
) -> Assignment {
    balanced_assign_with(groups, roster, preferences, &GroupingConfig::default(), rng)
}

/// Builds the mutual graph, seeds greedily, then runs local search for
/// `config.iterations` proposals.
///
/// Students that don't fit anywhere end up on the unassigned list of the
/// returned assignment; that is a normal outcome, not an error.
pub fn balanced_assign_with<R: Rng + ?Sized>(
    groups: &[GroupShell],
    roster: &[StudentId],
    preferences: &PreferenceEdges,
    config: &GroupingConfig,
    rng: &mut R,
) -> Assignment {
    let adjacency = MutualAdjacency::build(roster, preferences);
    let mut assignment = Assignment::new(groups, roster);
    assignment.greedy_fill(&adjacency);
    let summary = assignment.improve(&adjacency, config, rng);

    tracing::debug!(
        groups = groups.len(),
        students = assignment.student_count(),
        unassigned = assignment.unassigned().len(),
        happiness = summary.final_happiness,
        "balanced assignment ready"
    );
    assignment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{make_clustered_class, make_test_roster, make_test_shells, mutual_pairs};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    mod common {
        use super::*;

        pub(crate) fn same_group(assignment: &Assignment, a: StudentId, b: StudentId) -> bool {
            match (assignment.group_of(a), assignment.group_of(b)) {
                (Some(first), Some(second)) => first.id == second.id,
                _ => false,
            }
        }

        pub(crate) fn assert_partition(assignment: &Assignment, roster: &[StudentId]) {
            let mut seen = HashSet::new();
            for group in assignment.groups() {
                if let Capacity::Limited(max) = group.capacity {
                    assert!(group.members().len() <= max, "Group {} over capacity", group.name);
                }
                for student in group.members() {
                    assert!(seen.insert(*student), "Duplicate placement {student}");
                }
            }
            for student in assignment.unassigned() {
                assert!(seen.insert(*student), "Duplicate placement {student}");
            }
            assert_eq!(seen, roster.iter().copied().collect::<HashSet<_>>());
        }
    }

    mod scenario_tests {
        use super::{common::*, *};

        #[test]
        fn test_pairs_end_up_together() {
            let roster = make_test_roster(6);
            let preferences = mutual_pairs(&[(1, 2), (3, 4)]);
            let groups = make_test_shells(2, Capacity::Limited(3));

            let assignment = balanced_assign(&groups, &roster, &preferences, &mut StdRng::seed_from_u64(42));

            assert!(same_group(&assignment, 1, 2));
            assert!(same_group(&assignment, 3, 4));
            assert_partition(&assignment, &roster);
        }

        #[test]
        fn test_single_seat_leaves_one_unassigned() {
            let roster = make_test_roster(2);
            let groups = make_test_shells(1, Capacity::Limited(1));

            let assignment = balanced_assign(&groups, &roster, &PreferenceEdges::new(), &mut StdRng::seed_from_u64(1));

            assert_eq!(assignment.len_assigned(), 1);
            assert_eq!(assignment.unassigned().len(), 1);
            assert_partition(&assignment, &roster);
        }

        #[test]
        fn test_random_assign_with_unlimited_groups_places_everyone() {
            let roster = make_test_roster(10);
            let groups = make_test_shells(2, Capacity::Unlimited);

            let assignment = reset_and_random_assign(&groups, &roster, &mut StdRng::seed_from_u64(10));

            assert!(assignment.unassigned().is_empty());
            assert_eq!(assignment.len_assigned(), 10);
        }

        #[test]
        fn test_friend_triangle_in_pairs_of_seats() {
            let roster = make_test_roster(3);
            let preferences = mutual_pairs(&[(1, 2), (2, 3), (1, 3)]);
            let groups = make_test_shells(2, Capacity::Limited(2));

            let assignment = balanced_assign(&groups, &roster, &preferences, &mut StdRng::seed_from_u64(3));

            let together = [(1, 2), (2, 3), (1, 3)]
                .iter()
                .filter(|(a, b)| same_group(&assignment, *a, *b))
                .count();
            assert!(together >= 1);
            assert_partition(&assignment, &roster);
        }
    }

    mod unit_tests {
        use super::{common::*, *};

        #[test]
        fn test_empty_inputs() {
            let mut rng = StdRng::seed_from_u64(0);

            let random = reset_and_random_assign(&[], &[], &mut rng);
            let balanced = balanced_assign(&[], &[], &PreferenceEdges::new(), &mut rng);

            assert!(random.groups().is_empty() && random.unassigned().is_empty());
            assert!(balanced.groups().is_empty() && balanced.unassigned().is_empty());
        }

        #[test]
        fn test_students_without_groups_stay_unassigned() {
            let roster = make_test_roster(4);
            let preferences = mutual_pairs(&[(1, 2)]);

            let assignment = balanced_assign(&[], &roster, &preferences, &mut StdRng::seed_from_u64(0));

            assert_eq!(assignment.unassigned().len(), 4);
        }

        #[test]
        fn test_groups_without_students_stay_empty() {
            let groups = make_test_shells(3, Capacity::Limited(2));

            let assignment = reset_and_random_assign(&groups, &[], &mut StdRng::seed_from_u64(0));

            assert_eq!(assignment.groups().len(), 3);
            assert!(assignment.groups().iter().all(|group| group.members().is_empty()));
        }

        #[test]
        fn test_partition_holds_under_shortage() {
            let roster = make_test_roster(25);
            let groups = vec![
                GroupShell::new(1, "Small", Capacity::Limited(2)),
                GroupShell::new(2, "Medium", Capacity::Limited(5)),
                GroupShell::new(3, "Large", Capacity::Limited(9)),
            ];
            let preferences = mutual_pairs(&[(1, 2), (2, 3), (4, 5), (6, 7), (8, 24), (9, 25)]);

            for seed in 0..20 {
                let mut rng = StdRng::seed_from_u64(seed);
                let random = reset_and_random_assign(&groups, &roster, &mut rng);
                let balanced = balanced_assign(&groups, &roster, &preferences, &mut rng);

                assert_partition(&random, &roster);
                assert_partition(&balanced, &roster);
                assert_eq!(random.unassigned().len(), 9);
                assert_eq!(balanced.unassigned().len(), 9);
            }
        }

        #[test]
        fn test_preferences_for_unknown_students_are_ignored() {
            let roster = make_test_roster(4);
            let preferences = mutual_pairs(&[(1, 2), (3, 99), (4, 100)]);
            let groups = make_test_shells(2, Capacity::Limited(2));

            let assignment = balanced_assign(&groups, &roster, &preferences, &mut StdRng::seed_from_u64(6));

            assert!(same_group(&assignment, 1, 2));
            assert_partition(&assignment, &roster);
        }

        #[test]
        fn test_balanced_is_reproducible() {
            let (groups, roster, preferences) = make_clustered_class(4, 4);

            let first = balanced_assign(&groups, &roster, &preferences, &mut StdRng::seed_from_u64(77));
            let second = balanced_assign(&groups, &roster, &preferences, &mut StdRng::seed_from_u64(77));

            assert_eq!(first.groups(), second.groups());
        }

        #[test]
        fn test_zero_iterations_returns_greedy_seed() {
            let (groups, roster, preferences) = make_clustered_class(3, 3);
            let config = GroupingConfig::default().with_iterations(0);

            let assignment = balanced_assign_with(&groups, &roster, &preferences, &config, &mut StdRng::seed_from_u64(0));

            let adjacency = MutualAdjacency::build(&roster, &preferences);
            let mut seeded = Assignment::new(&groups, &roster);
            seeded.greedy_fill(&adjacency);
            assert_eq!(assignment.groups(), seeded.groups());
        }
    }

    mod quality_tests {
        use super::*;

        #[test]
        fn test_balanced_beats_random_on_clustered_class() {
            let (groups, roster, preferences) = make_clustered_class(5, 4);
            let adjacency = MutualAdjacency::build(&roster, &preferences);

            let mut rng = StdRng::seed_from_u64(2024);
            let random = reset_and_random_assign(&groups, &roster, &mut rng);
            let balanced = balanced_assign(&groups, &roster, &preferences, &mut rng);

            assert!(total_happiness(&balanced, &adjacency) >= total_happiness(&random, &adjacency));
        }

        #[test]
        fn test_clustered_class_is_solved_by_greedy_seed() {
            // Circles are numbered consecutively, so the greedy seed already
            // fills each group with one whole circle
            let (groups, roster, preferences) = make_clustered_class(4, 3);
            let adjacency = MutualAdjacency::build(&roster, &preferences);

            let assignment = balanced_assign(&groups, &roster, &preferences, &mut StdRng::seed_from_u64(5));

            assert_eq!(total_happiness(&assignment, &adjacency), 24);
            assert!(GroupingStats::collect(&assignment, &adjacency).lonely.is_empty());
        }
    }
}
