use crate::areas::repository::Repository;
use crate::areas::workspace::is_valid_file_name;
use crate::errors::GitletError;

impl Repository {
    /// Unstage `file`, or stage it for removal if the head tracks it
    ///
    /// A tracked file is also deleted from the working tree.
    pub async fn rm(&mut self, file: &str) -> anyhow::Result<()> {
        if !is_valid_file_name(file) {
            return Err(GitletError::NothingToRemove.into());
        }

        let index = self.index();
        let mut index = index.lock().await;

        if index.unstage(file) {
            tracing::debug!(file, "unstaged");
            return Ok(());
        }

        let blob_id = self
            .head_commit()?
            .blob_id(file)
            .ok_or(GitletError::NothingToRemove)?;
        let blob = self.database().blob(blob_id)?.clone();

        index.stage_remove(file, blob);
        self.workspace().delete_file(file)?;
        tracing::debug!(file, "staged for removal");

        Ok(())
    }
}
