use crate::error::GroupingErr;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub type StudentId = i32;
pub type GroupId = i32;

/// Directed "I like X" lists, keyed by the student who declared them.
///
/// Entries may name students that are not on the current roster; those are
/// ignored when the mutual graph is built.
pub type PreferenceEdges = HashMap<StudentId, Vec<StudentId>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capacity {
    Limited(usize),
    Unlimited,
}

impl Capacity {
    /// Seats left for a group currently holding `size` members, `None` when unbounded.
    pub fn remaining(self, size: usize) -> Option<usize> {
        match self {
            Capacity::Limited(max) => Some(max.saturating_sub(size)),
            Capacity::Unlimited => None,
        }
    }

    pub fn has_room(self, size: usize) -> bool {
        self.remaining(size) != Some(0)
    }
}

/// A group as supplied by the caller, before anyone is placed in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupShell {
    pub id: GroupId,
    pub name: String,
    pub capacity: Capacity,
}

impl GroupShell {
    pub fn new(id: GroupId, name: impl Into<String>, capacity: Capacity) -> Self {
        Self {
            id,
            name: name.into(),
            capacity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub capacity: Capacity,
    pub(crate) members: Vec<StudentId>,
}

impl Group {
    fn from_shell(shell: &GroupShell) -> Self {
        Self {
            id: shell.id,
            name: shell.name.clone(),
            capacity: shell.capacity,
            members: Vec::new(),
        }
    }

    pub fn members(&self) -> &[StudentId] {
        &self.members
    }

    pub fn remaining(&self) -> Option<usize> {
        self.capacity.remaining(self.members.len())
    }

    pub fn has_room(&self) -> bool {
        self.capacity.has_room(self.members.len())
    }
}

/// A partition of the roster into groups plus an explicit unassigned list.
///
/// Every roster student lives in exactly one place: one group's member list
/// or the unassigned list. `placement` indexes group membership so lookups
/// don't have to scan every group.
#[derive(Debug, Clone, Serialize)]
pub struct Assignment {
    pub(crate) groups: Vec<Group>,
    pub(crate) unassigned: Vec<StudentId>,
    #[serde(skip)]
    pub(crate) placement: HashMap<StudentId, usize>,
}

impl Assignment {
    /// Builds empty groups from copies of the shells and puts the whole
    /// roster on the unassigned list. Repeated roster entries are dropped.
    pub fn new(shells: &[GroupShell], roster: &[StudentId]) -> Self {
        let mut seen = HashSet::with_capacity(roster.len());
        let unassigned = roster
            .iter()
            .copied()
            .filter(|student| seen.insert(*student))
            .collect();

        Self {
            groups: shells.iter().map(Group::from_shell).collect(),
            unassigned,
            placement: HashMap::new(),
        }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn unassigned(&self) -> &[StudentId] {
        &self.unassigned
    }

    pub fn group_of(&self, student: StudentId) -> Option<&Group> {
        self.group_index_of(student).map(|idx| &self.groups[idx])
    }

    pub fn members(&self, group_id: GroupId) -> Option<&[StudentId]> {
        self.groups
            .iter()
            .find(|group| group.id == group_id)
            .map(Group::members)
    }

    /// Every placed student, in group order and then member order.
    pub fn assigned_students(&self) -> Vec<StudentId> {
        self.groups
            .iter()
            .flat_map(|group| group.members.iter().copied())
            .collect()
    }

    pub fn len_assigned(&self) -> usize {
        self.placement.len()
    }

    pub fn student_count(&self) -> usize {
        self.placement.len() + self.unassigned.len()
    }

    pub fn is_assigned(&self, student: StudentId) -> bool {
        self.placement.contains_key(&student)
    }

    /// Moves an unassigned student into the group with `group_id`.
    ///
    /// # Errors
    /// - `UnknownGroup` if no group has that id
    /// - `AlreadyPlaced` if the student already sits in a group
    /// - `UnknownStudent` if the student is not on the unassigned list
    /// - `GroupFull` if the group has no seat left
    pub fn place(&mut self, student: StudentId, group_id: GroupId) -> Result<(), GroupingErr> {
        let idx = self
            .groups
            .iter()
            .position(|group| group.id == group_id)
            .ok_or(GroupingErr::UnknownGroup(group_id))?;

        if self.is_assigned(student) {
            return Err(GroupingErr::AlreadyPlaced(student));
        }
        let pos = self
            .unassigned
            .iter()
            .position(|waiting| *waiting == student)
            .ok_or(GroupingErr::UnknownStudent(student))?;
        if !self.groups[idx].has_room() {
            return Err(GroupingErr::GroupFull(self.groups[idx].name.clone()));
        }

        self.unassigned.remove(pos);
        self.place_at(student, idx);
        Ok(())
    }

    /// Exchanges the groups of two placed students, each taking the other's
    /// slot in the member list. Group sizes never change.
    ///
    /// Returns `false` and leaves everything untouched when either student is
    /// unassigned or both already share a group.
    pub fn swap(&mut self, a: StudentId, b: StudentId) -> bool {
        let (Some(group_a), Some(group_b)) = (self.group_index_of(a), self.group_index_of(b)) else {
            return false;
        };
        if group_a == group_b {
            return false;
        }

        let (Some(slot_a), Some(slot_b)) = (
            self.groups[group_a].members.iter().position(|m| *m == a),
            self.groups[group_b].members.iter().position(|m| *m == b),
        ) else {
            return false;
        };

        self.groups[group_a].members[slot_a] = b;
        self.groups[group_b].members[slot_b] = a;
        self.placement.insert(a, group_b);
        self.placement.insert(b, group_a);
        true
    }

    pub(crate) fn group_index_of(&self, student: StudentId) -> Option<usize> {
        self.placement.get(&student).copied()
    }

    pub(crate) fn place_at(&mut self, student: StudentId, idx: usize) {
        debug_assert!(self.groups[idx].has_room());
        self.groups[idx].members.push(student);
        self.placement.insert(student, idx);
    }
}
