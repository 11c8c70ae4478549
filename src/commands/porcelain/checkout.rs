use crate::areas::repository::Repository;
use crate::areas::workspace::is_valid_file_name;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;

impl Repository {
    /// Dispatch the three forms of `checkout`
    ///
    /// - `checkout -- <file>`: restore `file` from the head commit
    /// - `checkout <commit-id> -- <file>`: restore `file` from a commit
    /// - `checkout <branch>`: switch branches
    pub async fn checkout(
        &mut self,
        target: Option<&str>,
        file: Option<&str>,
    ) -> anyhow::Result<()> {
        match (target, file) {
            (None, Some(file)) => self.checkout_file(None, file),
            (Some(commit_id), Some(file)) => self.checkout_file(Some(commit_id), file),
            (Some(branch), None) => self.checkout_branch(branch).await,
            (None, None) => Err(GitletError::IncorrectOperands.into()),
        }
    }

    /// Overwrite the working copy of `file` with its version in a commit
    ///
    /// The head commit is used when no id is given. Nothing is staged.
    pub fn checkout_file(&self, commit_id: Option<&str>, file: &str) -> anyhow::Result<()> {
        let commit = match commit_id {
            Some(prefix) => self.database().lookup_by_prefix(prefix)?.1,
            None => self.head_commit()?,
        };

        let blob_id = commit
            .blob_id(file)
            .filter(|_| is_valid_file_name(file))
            .ok_or(GitletError::FileNotInCommit)?;
        let blob = self.database().blob(blob_id)?;
        self.workspace().write_file(file, blob.content())?;

        tracing::debug!(file, %blob_id, "file restored");

        Ok(())
    }

    pub async fn checkout_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let (branch_name, tip) = self
            .refs()
            .find_branch(name)
            .ok_or(GitletError::NoSuchBranch)?;

        if self.refs().is_current_branch(&branch_name) {
            return Err(GitletError::AlreadyCurrent.into());
        }

        self.checkout_commit(&tip).await?;
        self.refs_mut().set_current_branch(&branch_name)?;

        tracing::debug!(branch = %branch_name, oid = %tip, "switched branch");

        Ok(())
    }

    /// Replace the tracked files of the working tree with `target`'s snapshot
    ///
    /// Refs are left alone; callers decide which pointer moves.
    pub(crate) async fn checkout_commit(&self, target: &ObjectId) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;

        let head = self.head_commit()?;
        let target = self.database().get(target)?;

        let mut migration =
            Migration::new(self.database(), self.workspace(), &mut index, head, target);
        migration.apply_changes()?;

        Ok(())
    }
}
