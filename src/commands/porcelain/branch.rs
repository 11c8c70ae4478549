use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::GitletError;

impl Repository {
    /// Create a branch at the head commit without switching to it
    pub fn branch(&mut self, name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(name.to_string())?;
        let source_oid = self.refs().read_head().clone();

        self.refs_mut().create_branch(branch_name, source_oid)
    }

    /// Delete a branch pointer; its commits stay in the object store
    pub fn rm_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let branch_name =
            BranchName::try_parse(name.to_string()).map_err(|_| GitletError::BranchNotFound)?;

        self.refs_mut().delete_branch(&branch_name)?;

        Ok(())
    }
}
