use crate::model::{Capacity, GroupId, GroupShell, StudentId};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, thiserror::Error, Serialize, PartialEq, Eq)]
pub enum GroupingErr {
    #[error("Group id {0} is used by more than one group")]
    DuplicateGroupId(GroupId),
    #[error("Group name '{0}' is used by more than one group")]
    DuplicateGroupName(String),
    #[error("Group '{0}' has a capacity of zero")]
    ZeroCapacity(String),
    #[error("Student {0} is not waiting to be placed")]
    UnknownStudent(StudentId),
    #[error("Group {0} doesn't exist")]
    UnknownGroup(GroupId),
    #[error("Student {0} is already placed in a group")]
    AlreadyPlaced(StudentId),
    #[error("Group '{0}' is full")]
    GroupFull(String),
}

/// Checks group shells before they are handed to the engine.
///
/// The engine respects capacities as given and never calls this itself;
/// callers run it on shells that came from outside.
///
/// # Errors
/// - `DuplicateGroupId` / `DuplicateGroupName` on the first repeated id or name
/// - `ZeroCapacity` for a group limited to zero seats
pub fn validate_groups(groups: &[GroupShell]) -> Result<(), GroupingErr> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();

    for group in groups {
        if !ids.insert(group.id) {
            return Err(GroupingErr::DuplicateGroupId(group.id));
        }
        if !names.insert(group.name.as_str()) {
            return Err(GroupingErr::DuplicateGroupName(group.name.clone()));
        }
        if group.capacity == Capacity::Limited(0) {
            return Err(GroupingErr::ZeroCapacity(group.name.clone()));
        }
    }

    Ok(())
}
