//! Checkout migration and conflict detection
//!
//! Checking out a commit replaces the working tree's tracked files with the
//! target commit's snapshot:
//!
//! 1. Every file tracked by the target is written with the target's version
//! 2. Every file tracked by the head but not by the target is deleted
//! 3. The staging area is cleared
//!
//! ## Safety
//!
//! All operations are planned before execution. If any file tracked by the
//! target is sitting untracked in the working tree, the migration fails
//! before a single file is touched.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::workspace::WorkingTree;
use crate::artifacts::checkout::conflict::ConflictType;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::errors::GitletError;
use std::collections::HashMap;

/// Type of file system action required for checkout
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Create a file the head does not track
    Add,
    /// Delete a file the target does not track
    Delete,
    /// Overwrite a file tracked by both commits
    Modify,
}

/// Set of planned actions grouped by type
pub type ActionsSet = HashMap<ActionType, Vec<(String, Option<Blob>)>>;

/// Set of detected conflicts grouped by type
pub type ConflictsSet = HashMap<ConflictType, Vec<String>>;

/// Checkout migration planner and executor
pub struct Migration<'r> {
    database: &'r Database,
    workspace: &'r dyn WorkingTree,
    /// Staging area to clear once the working tree matches the target
    index: &'r mut Index,
    head: &'r Commit,
    target: &'r Commit,
    /// Planned file system actions
    actions: ActionsSet,
    /// Detected conflicts
    conflicts: ConflictsSet,
}

impl<'r> Migration<'r> {
    pub fn new(
        database: &'r Database,
        workspace: &'r dyn WorkingTree,
        index: &'r mut Index,
        head: &'r Commit,
        target: &'r Commit,
    ) -> Self {
        let actions = HashMap::from([
            (ActionType::Add, Vec::new()),
            (ActionType::Delete, Vec::new()),
            (ActionType::Modify, Vec::new()),
        ]);

        Self {
            database,
            workspace,
            index,
            head,
            target,
            actions,
            conflicts: HashMap::new(),
        }
    }

    pub fn actions(&self) -> &ActionsSet {
        &self.actions
    }

    /// Planned entries for one action type, in name order
    pub fn actions_of(
        &self,
        action_type: &ActionType,
    ) -> impl Iterator<Item = (&str, Option<&Blob>)> {
        self.actions
            .get(action_type)
            .into_iter()
            .flatten()
            .map(|(name, blob)| (name.as_str(), blob.as_ref()))
    }

    pub fn apply_changes(&mut self) -> anyhow::Result<()> {
        self.plan_changes()?;
        self.update_workspace()?;
        self.update_index();

        Ok(())
    }

    fn plan_changes(&mut self) -> anyhow::Result<()> {
        let (head, target) = (self.head, self.target);

        for (name, blob_id) in target.files() {
            self.check_for_conflict(name);

            let blob = self.database.blob(blob_id)?.clone();
            let action_type = if head.tracks(name) {
                ActionType::Modify
            } else {
                ActionType::Add
            };

            self.actions
                .entry(action_type)
                .or_default()
                .push((name.clone(), Some(blob)));
        }

        for name in head.files().keys() {
            if !target.tracks(name) {
                self.actions
                    .entry(ActionType::Delete)
                    .or_default()
                    .push((name.clone(), None));
            }
        }

        if let Some((conflict_type, names)) = self
            .conflicts
            .iter()
            .find(|(_, names)| !names.is_empty())
        {
            tracing::debug!(?conflict_type, ?names, "checkout aborted");
            return Err(GitletError::from(conflict_type).into());
        }

        Ok(())
    }

    fn check_for_conflict(&mut self, name: &str) {
        let conflict_type = ConflictType::get_conflict_type(
            self.head.tracks(name),
            self.workspace.exists(name),
            self.target.tracks(name),
        );

        if let Some(conflict_type) = conflict_type {
            self.conflicts
                .entry(conflict_type)
                .or_default()
                .push(name.to_string());
        }
    }

    fn update_workspace(&self) -> anyhow::Result<()> {
        self.workspace.apply_migration(self)
    }

    fn update_index(&mut self) {
        self.index.clear();
    }
}
