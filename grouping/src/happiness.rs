use crate::graph::MutualAdjacency;
use crate::model::{Assignment, StudentId};
use serde::Serialize;
use std::collections::HashSet;

/// Number of `student`'s mutual friends sitting in the same group.
/// Zero for unassigned students.
pub fn happiness(student: StudentId, assignment: &Assignment, adjacency: &MutualAdjacency) -> usize {
    happiness_under(student, &|s| assignment.group_index_of(s), adjacency)
}

/// Net change in happiness if `a` and `b` traded groups. Positive means the
/// trade helps.
///
/// Besides `a` and `b` themselves, every friend of either who sits in one of
/// the two groups is counted, since those are the only students whose score
/// can move. Nothing is mutated; the post-swap layout is only looked up.
pub fn swap_gain(a: StudentId, b: StudentId, assignment: &Assignment, adjacency: &MutualAdjacency) -> i64 {
    let (Some(group_a), Some(group_b)) = (assignment.group_index_of(a), assignment.group_index_of(b)) else {
        return 0;
    };
    if a == b || group_a == group_b {
        return 0;
    }

    let current = |s: StudentId| assignment.group_index_of(s);
    let swapped = |s: StudentId| {
        if s == a {
            Some(group_b)
        } else if s == b {
            Some(group_a)
        } else {
            assignment.group_index_of(s)
        }
    };

    let mut affected: HashSet<StudentId> = HashSet::from([a, b]);
    affected.extend(
        adjacency
            .friends_of(a)
            .chain(adjacency.friends_of(b))
            .filter(|friend| matches!(current(*friend), Some(g) if g == group_a || g == group_b)),
    );

    let before: usize = affected
        .iter()
        .map(|s| happiness_under(*s, &current, adjacency))
        .sum();
    let after: usize = affected
        .iter()
        .map(|s| happiness_under(*s, &swapped, adjacency))
        .sum();

    after as i64 - before as i64
}

/// Sum of every student's happiness.
pub fn total_happiness(assignment: &Assignment, adjacency: &MutualAdjacency) -> usize {
    assignment
        .groups()
        .iter()
        .flat_map(|group| group.members())
        .map(|student| happiness(*student, assignment, adjacency))
        .sum()
}

fn happiness_under<F>(student: StudentId, locate: &F, adjacency: &MutualAdjacency) -> usize
where
    F: Fn(StudentId) -> Option<usize>,
{
    let Some(home) = locate(student) else {
        return 0;
    };
    adjacency
        .friends_of(student)
        .filter(|friend| locate(*friend) == Some(home))
        .count()
}

/// Summary of how well a finished assignment honours mutual preferences.
///
/// # Fields
/// - `total_happiness`: sum of every placed student's happiness
/// - `assigned` / `unassigned`: how many students landed in each place
/// - `lonely`: placed students with at least one mutual friend but none in their group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupingStats {
    pub total_happiness: usize,
    pub assigned: usize,
    pub unassigned: usize,
    pub lonely: Vec<StudentId>,
}

impl GroupingStats {
    pub fn collect(assignment: &Assignment, adjacency: &MutualAdjacency) -> Self {
        let mut total_happiness = 0;
        let mut lonely = Vec::new();

        for student in assignment.assigned_students() {
            let score = happiness(student, assignment, adjacency);
            if score == 0 && adjacency.degree(student) > 0 {
                lonely.push(student);
            }
            total_happiness += score;
        }

        Self {
            total_happiness,
            assigned: assignment.len_assigned(),
            unassigned: assignment.unassigned().len(),
            lonely,
        }
    }

    pub fn average_happiness(&self) -> f64 {
        if self.assigned == 0 {
            return 0.0;
        }
        self.total_happiness as f64 / self.assigned as f64
    }
}
