use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use crate::artifacts::status::inspector::Inspector;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

pub type ChangeSet = BTreeMap<String, WorkspaceChangeType>;
pub type FileSet = BTreeSet<String>;

#[derive(Debug, Clone)]
pub struct StatusInfo {
    pub(crate) branches: Vec<BranchName>,
    pub(crate) current_branch: BranchName,
    pub(crate) staged_files: FileSet,
    pub(crate) removed_files: FileSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked_files: FileSet,
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self, index: &Index) -> anyhow::Result<StatusInfo> {
        let refs = self.repository.refs();
        let head = self.repository.head_commit()?;
        let inspector = Inspector::new(self.repository.workspace());

        let workspace_changeset = self.check_tracked_files(head, index, &inspector)?;
        let untracked_files = self
            .repository
            .workspace()
            .list_files()?
            .into_iter()
            .filter(|name| inspector.is_untracked(name, head, index))
            .collect::<FileSet>();

        Ok(StatusInfo {
            branches: refs.list_branches().cloned().collect(),
            current_branch: refs.current_branch().clone(),
            staged_files: index.additions().keys().cloned().collect(),
            removed_files: index.removals().keys().cloned().collect(),
            workspace_changeset,
            untracked_files,
        })
    }

    /// Staged files are compared against their staged content, everything
    /// else the head tracks against the head's content
    fn check_tracked_files(
        &self,
        head: &Commit,
        index: &Index,
        inspector: &Inspector<'_>,
    ) -> anyhow::Result<ChangeSet> {
        let mut changeset = ChangeSet::new();

        for (name, blob) in index.additions() {
            let change = inspector.check_against_workspace(name, &blob.object_id()?)?;
            Self::record_workspace_change(name, change, &mut changeset);
        }

        for (name, blob_id) in head.files() {
            if index.staged_for_addition(name) || index.staged_for_removal(name) {
                continue;
            }

            let change = inspector.check_against_workspace(name, blob_id)?;
            Self::record_workspace_change(name, change, &mut changeset);
        }

        Ok(changeset)
    }

    fn record_workspace_change(
        name: &str,
        change: WorkspaceChangeType,
        changeset: &mut ChangeSet,
    ) {
        if change != WorkspaceChangeType::None {
            changeset.insert(name.to_string(), change);
        }
    }
}
