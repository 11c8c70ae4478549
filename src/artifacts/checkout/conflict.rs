use crate::errors::GitletError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConflictType {
    /// An untracked working file would be overwritten
    UntrackedOverwritten,
}

impl From<&ConflictType> for GitletError {
    fn from(value: &ConflictType) -> Self {
        match value {
            ConflictType::UntrackedOverwritten => GitletError::UntrackedFileWouldBeOverwritten,
        }
    }
}

impl ConflictType {
    /// Conflict caused by writing the target's version of a file, if any
    ///
    /// Only files the head commit does not track can be lost: tracked content
    /// is always recoverable from the head commit.
    pub fn get_conflict_type(
        tracked_by_head: bool,
        in_workspace: bool,
        tracked_by_target: bool,
    ) -> Option<ConflictType> {
        if !tracked_by_head && in_workspace && tracked_by_target {
            Some(ConflictType::UntrackedOverwritten)
        } else {
            None
        }
    }
}
