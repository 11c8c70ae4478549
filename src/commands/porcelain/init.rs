use crate::areas::refs::Refs;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::errors::GitletError;
use anyhow::Context;

impl Repository {
    pub async fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(GitletError::AlreadyInitialized.into());
        }

        self.storage()
            .initialize()
            .context("Failed to create the .gitlet directory")?;

        let initial_oid = self.database_mut().put(Commit::initial())?;
        *self.refs_mut() = Refs::initialize(initial_oid.clone());
        self.index().lock().await.clear();

        tracing::debug!(oid = %initial_oid, "repository initialized");

        Ok(())
    }
}
