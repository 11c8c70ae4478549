use crate::areas::index::Index;
use crate::areas::workspace::WorkingTree;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;

#[derive(new)]
pub struct Inspector<'r> {
    workspace: &'r dyn WorkingTree,
}

impl<'r> Inspector<'r> {
    fn is_content_changed(&self, name: &str, expected: &ObjectId) -> anyhow::Result<bool> {
        let blob = self.workspace.parse_blob(name)?;
        let oid = blob.object_id()?;

        Ok(&oid != expected)
    }

    /// Compare a working file against the blob the next commit would record for it
    pub fn check_against_workspace(
        &self,
        name: &str,
        expected: &ObjectId,
    ) -> anyhow::Result<WorkspaceChangeType> {
        if !self.workspace.exists(name) {
            Ok(WorkspaceChangeType::Deleted)
        } else if self.is_content_changed(name, expected)? {
            Ok(WorkspaceChangeType::Modified)
        } else {
            Ok(WorkspaceChangeType::None)
        }
    }

    /// Working file the next commit would not record
    ///
    /// A file staged for removal but present again counts as untracked.
    pub fn is_untracked(&self, name: &str, head: &Commit, index: &Index) -> bool {
        self.workspace.exists(name)
            && (index.staged_for_removal(name)
                || (!index.staged_for_addition(name) && !head.tracks(name)))
    }
}
