//! Small class builders shared by the tests and the `grouping-eval` binary.

use crate::model::{Capacity, GroupShell, PreferenceEdges, StudentId};

/// Students `1..=num_of_students`.
pub fn make_test_roster(num_of_students: i32) -> Vec<StudentId> {
    (1..=num_of_students).collect()
}

/// Groups with ids `1..=num_of_groups`, all with the same capacity.
pub fn make_test_shells(num_of_groups: i32, capacity: Capacity) -> Vec<GroupShell> {
    (1..=num_of_groups)
        .map(|id| GroupShell::new(id, format!("Group {id}"), capacity))
        .collect()
}

/// Preference lists in which every given pair likes each other.
pub fn mutual_pairs(pairs: &[(StudentId, StudentId)]) -> PreferenceEdges {
    let mut preferences = PreferenceEdges::new();
    for &(a, b) in pairs {
        preferences.entry(a).or_default().push(b);
        preferences.entry(b).or_default().push(a);
    }
    preferences
}

/// A class made of `num_of_cliques` friend circles of `clique_size` students
/// each, with one group per circle sized to fit it exactly.
///
/// Students are numbered from 1, circle by circle, so the perfect grouping
/// puts students `1..=clique_size` together, and so on.
pub fn make_clustered_class(
    num_of_cliques: i32,
    clique_size: i32,
) -> (Vec<GroupShell>, Vec<StudentId>, PreferenceEdges) {
    let shells = make_test_shells(num_of_cliques, Capacity::Limited(clique_size as usize));
    let roster = make_test_roster(num_of_cliques * clique_size);

    let mut preferences = PreferenceEdges::new();
    for clique in roster.chunks(clique_size.max(1) as usize) {
        for &student in clique {
            let likes = clique.iter().copied().filter(|other| *other != student).collect();
            preferences.insert(student, likes);
        }
    }

    (shells, roster, preferences)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutual_pairs_lists_both_directions() {
        let preferences = mutual_pairs(&[(1, 2), (1, 3)]);

        assert_eq!(preferences[&1], vec![2, 3]);
        assert_eq!(preferences[&2], vec![1]);
        assert_eq!(preferences[&3], vec![1]);
    }

    #[test]
    fn test_make_clustered_class() {
        let (shells, roster, preferences) = make_clustered_class(3, 4);

        assert_eq!(shells.len(), 3);
        assert!(shells.iter().all(|shell| shell.capacity == Capacity::Limited(4)));
        assert_eq!(roster.len(), 12);
        assert_eq!(preferences[&5], vec![6, 7, 8]);
    }
}
