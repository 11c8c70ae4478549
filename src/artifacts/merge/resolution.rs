//! Three-way merge resolution
//!
//! Every file name present in the split point (S), the current head (C) or the
//! given head (O) gets exactly one [`MergeAction`]. Versions are compared by
//! blob id, so two versions are equal exactly when their content is. The first
//! matching rule wins:
//!
//! | S       | C       | O       | condition               | action    |
//! |---------|---------|---------|-------------------------|-----------|
//! | present | present | present | C = S, O ≠ S            | TakeGiven |
//! | absent  | absent  | present |                         | TakeGiven |
//! | present | present | absent  | C = S                   | Remove    |
//! | present | present | present | S, C, O pairwise differ | Conflict  |
//! | present | absent  | present | O ≠ S                   | Conflict  |
//! | present | present | absent  | C ≠ S                   | Conflict  |
//! | absent  | present | present | C ≠ O                   | Conflict  |
//! | *       | *       | *       | otherwise               | Keep      |

use crate::areas::workspace::WorkingTree;
use crate::artifacts::objects::commit::Snapshot;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use std::collections::{BTreeMap, BTreeSet};

/// Marker opening the current branch's side of a conflict
pub const CONFLICT_HEAD_MARKER: &str = "<<<<<<< HEAD\n";
/// Marker separating the two sides of a conflict
pub const CONFLICT_SEPARATOR: &str = "=======\n";
/// Marker closing a conflict
pub const CONFLICT_END_MARKER: &str = ">>>>>>>\n";

/// Outcome of the three-way comparison for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Check out the given branch's version and stage it
    TakeGiven(ObjectId),
    /// Stage the file for removal and delete it from the working tree
    Remove,
    /// Write conflict markers around both versions and stage the result
    Conflict {
        current: Option<ObjectId>,
        given: Option<ObjectId>,
    },
    /// Leave the current branch's state alone
    Keep,
}

impl MergeAction {
    pub fn classify(
        split: Option<&ObjectId>,
        current: Option<&ObjectId>,
        given: Option<&ObjectId>,
    ) -> MergeAction {
        match (split, current, given) {
            (Some(s), Some(c), Some(o)) if c == s && o != s => MergeAction::TakeGiven(o.clone()),
            (None, None, Some(o)) => MergeAction::TakeGiven(o.clone()),
            (Some(s), Some(c), None) if c == s => MergeAction::Remove,
            (Some(s), Some(c), Some(o)) if c != s && o != s && c != o => {
                Self::conflict(current, given)
            }
            (Some(s), None, Some(o)) if o != s => Self::conflict(current, given),
            (Some(s), Some(c), None) if c != s => Self::conflict(current, given),
            (None, Some(c), Some(o)) if c != o => Self::conflict(current, given),
            _ => MergeAction::Keep,
        }
    }

    fn conflict(current: Option<&ObjectId>, given: Option<&ObjectId>) -> MergeAction {
        MergeAction::Conflict {
            current: current.cloned(),
            given: given.cloned(),
        }
    }
}

/// Decisions for every file touched by any of the three snapshots
#[derive(Debug, Clone, Default)]
pub struct MergePlan {
    actions: BTreeMap<String, MergeAction>,
}

impl MergePlan {
    pub fn new(split: &Snapshot, current: &Snapshot, given: &Snapshot) -> Self {
        let names = split
            .keys()
            .chain(current.keys())
            .chain(given.keys())
            .collect::<BTreeSet<_>>();

        let actions = names
            .into_iter()
            .map(|name| {
                let action = MergeAction::classify(
                    split.get(name),
                    current.get(name),
                    given.get(name),
                );
                tracing::debug!(file = %name, ?action, "merge decision");

                (name.clone(), action)
            })
            .collect();

        Self { actions }
    }

    /// Decisions in file name order
    pub fn actions(&self) -> impl Iterator<Item = (&String, &MergeAction)> {
        self.actions.iter()
    }

    pub fn conflicts(&self) -> usize {
        self.actions
            .values()
            .filter(|action| matches!(action, MergeAction::Conflict { .. }))
            .count()
    }

    /// Refuse to merge over an untracked file holding content the merge would lose
    ///
    /// A file the current head does not track but the given head does is in the
    /// way when the working copy differs from the given head's version.
    pub fn verify_untracked(
        workspace: &dyn WorkingTree,
        current: &Snapshot,
        given: &Snapshot,
    ) -> anyhow::Result<()> {
        for (name, given_blob_id) in given {
            if current.contains_key(name) || !workspace.exists(name) {
                continue;
            }

            let working_blob_id = workspace.parse_blob(name)?.object_id()?;
            if &working_blob_id != given_blob_id {
                tracing::debug!(file = %name, "untracked file in the way of merge");
                return Err(GitletError::UntrackedFileWouldBeOverwritten.into());
            }
        }

        Ok(())
    }
}

/// Content written for a conflicted file; a missing side contributes nothing
pub fn conflict_content(current: Option<&[u8]>, given: Option<&[u8]>) -> Vec<u8> {
    let current = current.unwrap_or_default();
    let given = given.unwrap_or_default();

    [
        CONFLICT_HEAD_MARKER.as_bytes(),
        current,
        CONFLICT_SEPARATOR.as_bytes(),
        given,
        CONFLICT_END_MARKER.as_bytes(),
    ]
    .concat()
}
