use fake::Fake;
use fake::faker::name::raw::Name;
use fake::locales::EN;
use grouping::{
    Assignment, Capacity, GroupShell, GroupingStats, MutualAdjacency, PreferenceEdges, StudentId, happiness,
};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub name: String,
    #[serde(default)]
    pub likes: Vec<StudentId>,
}

/// A class as read from (or written to) a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassFile {
    pub groups: Vec<GroupShell>,
    pub students: Vec<StudentRecord>,
}

/// Shape of a randomly generated class
///
/// # Fields
/// - `students`: class size
/// - `groups`: number of groups
/// - `capacity`: seats per group, `None` for unlimited
/// - `likes`: classmates each student names as liked
#[derive(Debug, Clone, Copy)]
pub struct GenerateParams {
    pub students: u32,
    pub groups: u32,
    pub capacity: Option<u32>,
    pub likes: u32,
}

impl ClassFile {
    pub fn roster(&self) -> Vec<StudentId> {
        self.students.iter().map(|student| student.id).collect()
    }

    pub fn preferences(&self) -> PreferenceEdges {
        self.students
            .iter()
            .map(|student| (student.id, student.likes.clone()))
            .collect()
    }

    /// Builds a class with fake names. Each student likes `params.likes`
    /// random classmates, and each of those likes them back half the time.
    pub fn generate<R: Rng + ?Sized>(params: &GenerateParams, rng: &mut R) -> Self {
        let capacity = match params.capacity {
            Some(seats) => Capacity::Limited(seats as usize),
            None => Capacity::Unlimited,
        };
        let groups = (1..=params.groups as i32)
            .map(|id| GroupShell::new(id, format!("Group {id}"), capacity))
            .collect();

        let ids: Vec<StudentId> = (1..=params.students as i32).collect();
        let mut likes: HashMap<StudentId, Vec<StudentId>> = HashMap::new();
        for &student in &ids {
            let classmates: Vec<StudentId> = ids.iter().copied().filter(|id| *id != student).collect();
            let picks: Vec<StudentId> = classmates
                .choose_multiple(rng, params.likes as usize)
                .copied()
                .collect();
            for liked in picks {
                likes.entry(student).or_default().push(liked);
                if rng.random_bool(0.5) {
                    likes.entry(liked).or_default().push(student);
                }
            }
        }

        let students = ids
            .iter()
            .map(|&id| {
                let name: String = Name(EN).fake_with_rng(rng);
                let mut liked = likes.remove(&id).unwrap_or_default();
                liked.sort_unstable();
                liked.dedup();
                StudentRecord { id, name, likes: liked }
            })
            .collect();

        Self { groups, students }
    }

    fn name_of(&self, id: StudentId) -> String {
        self.students
            .iter()
            .find(|student| student.id == id)
            .map_or_else(|| format!("#{id}"), |student| student.name.clone())
    }
}

#[derive(Debug, Serialize)]
pub struct GroupReport {
    pub name: String,
    pub capacity: Capacity,
    pub members: Vec<String>,
    pub happiness: usize,
}

/// Printable result of one run: names instead of ids plus the statistics.
#[derive(Debug, Serialize)]
pub struct ClassReport {
    pub groups: Vec<GroupReport>,
    pub unassigned: Vec<String>,
    pub stats: GroupingStats,
    pub average_happiness: f64,
}

impl ClassReport {
    pub fn new(class: &ClassFile, assignment: &Assignment, adjacency: &MutualAdjacency) -> Self {
        let groups = assignment
            .groups()
            .iter()
            .map(|group| GroupReport {
                name: group.name.clone(),
                capacity: group.capacity,
                members: group.members().iter().map(|id| class.name_of(*id)).collect(),
                happiness: group
                    .members()
                    .iter()
                    .map(|id| happiness(*id, assignment, adjacency))
                    .sum(),
            })
            .collect();
        let stats = GroupingStats::collect(assignment, adjacency);

        Self {
            groups,
            unassigned: assignment.unassigned().iter().map(|id| class.name_of(*id)).collect(),
            average_happiness: stats.average_happiness(),
            stats,
        }
    }
}
