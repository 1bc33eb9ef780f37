use crate::model::{PreferenceEdges, StudentId};
use std::collections::{HashMap, HashSet};

/// Undirected graph of reciprocal likes between students on one roster.
///
/// Built once per run from a snapshot of the preference lists and thrown
/// away afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutualAdjacency {
    friends: HashMap<StudentId, HashSet<StudentId>>,
}

impl MutualAdjacency {
    /// Keeps an edge between `a` and `b` only when `a` lists `b` and `b`
    /// lists `a`. Self references and students missing from `roster` are
    /// dropped without complaint.
    pub fn build(roster: &[StudentId], preferences: &PreferenceEdges) -> Self {
        let on_roster: HashSet<StudentId> = roster.iter().copied().collect();

        // Directed likes, restricted to the roster
        let declared: HashMap<StudentId, HashSet<StudentId>> = preferences
            .iter()
            .filter(|(student, _)| on_roster.contains(student))
            .map(|(&student, likes)| {
                let likes = likes
                    .iter()
                    .copied()
                    .filter(|liked| *liked != student && on_roster.contains(liked))
                    .collect();
                (student, likes)
            })
            .collect();

        let mut friends: HashMap<StudentId, HashSet<StudentId>> = HashMap::new();
        for (&student, likes) in &declared {
            for &liked in likes {
                let reciprocated = declared
                    .get(&liked)
                    .is_some_and(|their_likes| their_likes.contains(&student));
                if reciprocated {
                    friends.entry(student).or_default().insert(liked);
                }
            }
        }

        tracing::debug!(
            students = on_roster.len(),
            mutual_pairs = friends.values().map(HashSet::len).sum::<usize>() / 2,
            "built mutual adjacency"
        );

        Self { friends }
    }

    pub fn friends_of(&self, student: StudentId) -> impl Iterator<Item = StudentId> + '_ {
        self.friends.get(&student).into_iter().flatten().copied()
    }

    pub fn are_mutual(&self, a: StudentId, b: StudentId) -> bool {
        self.friends.get(&a).is_some_and(|friends| friends.contains(&b))
    }

    pub fn degree(&self, student: StudentId) -> usize {
        self.friends.get(&student).map_or(0, HashSet::len)
    }

    pub fn pair_count(&self) -> usize {
        self.friends.values().map(HashSet::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.friends.is_empty()
    }
}
