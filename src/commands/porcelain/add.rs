use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::errors::GitletError;

impl Repository {
    /// Stage the current content of `file` for the next commit
    ///
    /// Re-adding a file staged for removal only cancels the removal. A file
    /// whose content matches the head is not staged, and any earlier staged
    /// version of it is dropped.
    pub async fn add(&mut self, file: &str) -> anyhow::Result<()> {
        if !self.workspace().exists(file) {
            return Err(GitletError::FileNotFound.into());
        }

        let index = self.index();
        let mut index = index.lock().await;

        if index.cancel_removal(file) {
            tracing::debug!(file, "removal cancelled");
            return Ok(());
        }

        let blob = self.workspace().parse_blob(file)?;
        let blob_id = blob.object_id()?;

        if self.head_commit()?.blob_id(file) == Some(&blob_id) {
            index.unstage(file);
            tracing::debug!(file, "content matches head, not staged");
            return Ok(());
        }

        tracing::debug!(file, %blob_id, "staged for addition");
        index.stage_add(file, blob);

        Ok(())
    }
}
