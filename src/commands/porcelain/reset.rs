use crate::areas::repository::Repository;

impl Repository {
    /// Check out an arbitrary commit and move the current branch to it
    pub async fn reset(&mut self, commit_id: &str) -> anyhow::Result<()> {
        let (target, _) = self.database().lookup_by_prefix(commit_id)?;
        let target = target.clone();

        self.checkout_commit(&target).await?;
        self.refs_mut().update_head(target.clone());

        tracing::debug!(oid = %target, branch = %self.refs().current_branch(), "branch reset");

        Ok(())
    }
}
