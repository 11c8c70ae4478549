use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;

        self.write_commit(&mut index, message, None)?;

        Ok(())
    }

    /// Record the staged changes on top of the head and advance the current branch
    ///
    /// The new snapshot is the head's, overlaid with every staged addition and
    /// minus every staged removal. `merge_parent` is set for merge commits.
    pub(crate) fn write_commit(
        &mut self,
        index: &mut Index,
        message: &str,
        merge_parent: Option<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        if message.is_empty() {
            return Err(GitletError::EmptyMessage.into());
        }
        if index.is_empty() {
            return Err(GitletError::NoChanges.into());
        }

        let parent = self.refs().read_head().clone();
        let mut files = self.head_commit()?.files().clone();

        for (name, blob) in index.additions() {
            let blob_id = self.database_mut().put_blob(blob.clone())?;
            files.insert(name.clone(), blob_id);
        }
        for name in index.removals().keys() {
            files.remove(name);
        }

        let commit = Commit::child(parent, merge_parent, files, message.to_string());
        let commit_id = self.database_mut().put(commit)?;

        self.refs_mut().update_head(commit_id.clone());
        index.clear();

        tracing::debug!(oid = %commit_id, branch = %self.refs().current_branch(), "commit created");

        Ok(commit_id)
    }
}
