//! Branch table
//!
//! Branches are human-readable names pointing to commits. Exactly one branch
//! is current; the head commit is the commit the current branch points to and
//! every command that moves the head moves the current branch with it.
//!
//! ## Persistence
//!
//! Three small text keys:
//! - `branches`: one `<oid> <name>` line per branch, sorted by name
//! - `HEAD`: the 40-character id of the head commit
//! - `current-branch`: the name of the current branch

use crate::areas::storage::{StateKey, Storage};
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;

/// Regex pattern for one line of the branch table
const BRANCH_LINE_REGEX: &str = r"^([0-9a-f]{40}) (.+)$";

#[derive(Debug, Clone, Default)]
pub struct Refs {
    branches: BTreeMap<BranchName, ObjectId>,
    current: BranchName,
    head: ObjectId,
    /// Flag indicating if the table changed since it was loaded
    changed: bool,
}

impl Refs {
    /// Table of a fresh repository: a single default branch at `head`
    pub fn initialize(head: ObjectId) -> Self {
        let current = BranchName::default_branch();

        Refs {
            branches: BTreeMap::from([(current.clone(), head.clone())]),
            current,
            head,
            changed: true,
        }
    }

    pub fn read_head(&self) -> &ObjectId {
        &self.head
    }

    pub fn current_branch(&self) -> &BranchName {
        &self.current
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> bool {
        &self.current == branch_name
    }

    /// Look a branch up by its raw name; names that cannot be valid never exist
    pub fn find_branch(&self, name: &str) -> Option<(BranchName, ObjectId)> {
        let branch_name = BranchName::try_parse(name.to_string()).ok()?;
        let oid = self.branches.get(&branch_name)?.clone();

        Some((branch_name, oid))
    }

    /// Branch names in lexicographic order
    pub fn list_branches(&self) -> impl Iterator<Item = &BranchName> {
        self.branches.keys()
    }

    pub fn create_branch(&mut self, name: BranchName, source_oid: ObjectId) -> anyhow::Result<()> {
        if self.branches.contains_key(&name) {
            return Err(GitletError::BranchExists.into());
        }

        tracing::debug!(branch = %name, oid = %source_oid, "branch created");
        self.branches.insert(name, source_oid);
        self.changed = true;

        Ok(())
    }

    /// Remove a branch pointer; the commits it pointed to stay in the store
    pub fn delete_branch(&mut self, name: &BranchName) -> anyhow::Result<ObjectId> {
        if self.is_current_branch(name) {
            return Err(GitletError::CannotRemoveCurrent.into());
        }

        match self.branches.remove(name) {
            Some(oid) => {
                tracing::debug!(branch = %name, %oid, "branch deleted");
                self.changed = true;
                Ok(oid)
            }
            None => Err(GitletError::BranchNotFound.into()),
        }
    }

    /// Move the head, and the current branch with it, to `oid`
    pub fn update_head(&mut self, oid: ObjectId) {
        self.branches.insert(self.current.clone(), oid.clone());
        self.head = oid;
        self.changed = true;
    }

    /// Make `name` the current branch; the head follows its tip
    pub fn set_current_branch(&mut self, name: &BranchName) -> anyhow::Result<()> {
        let oid = self
            .branches
            .get(name)
            .cloned()
            .ok_or(GitletError::NoSuchBranch)?;

        self.current = name.clone();
        self.head = oid;
        self.changed = true;

        Ok(())
    }

    pub fn rehydrate(&mut self, storage: &dyn Storage) -> anyhow::Result<()> {
        let branches = Self::load_text(storage, StateKey::Branches)?;
        let head = Self::load_text(storage, StateKey::Head)?;
        let current = Self::load_text(storage, StateKey::CurrentBranch)?;

        let re = regex::Regex::new(BRANCH_LINE_REGEX)
            .with_context(|| format!("invalid branch line regex: {BRANCH_LINE_REGEX}"))?;

        self.branches = branches
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| {
                let captures = re
                    .captures(line)
                    .with_context(|| format!("Corrupt branch table line: {line:?}"))?;
                Ok((
                    BranchName::try_parse(captures[2].to_string())?,
                    ObjectId::try_parse(captures[1].to_string())?,
                ))
            })
            .collect::<anyhow::Result<BTreeMap<_, _>>>()?;
        self.head = ObjectId::try_parse(head.trim().to_string()).context("Corrupt HEAD")?;
        self.current = BranchName::try_parse(current.trim().to_string())
            .context("Corrupt current branch")?;
        self.changed = false;

        if self.branches.get(&self.current) != Some(&self.head) {
            anyhow::bail!(
                "HEAD {} does not match the tip of the current branch {}",
                self.head,
                self.current
            );
        }

        Ok(())
    }

    pub fn write_updates(&mut self, storage: &dyn Storage) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let branches = self
            .branches
            .iter()
            .map(|(name, oid)| format!("{} {}\n", oid, name))
            .collect::<String>();

        storage.save(StateKey::Branches, Bytes::from(branches))?;
        storage.save(StateKey::Head, Bytes::from(self.head.to_string()))?;
        storage.save(StateKey::CurrentBranch, Bytes::from(self.current.to_string()))?;
        self.changed = false;

        Ok(())
    }

    fn load_text(storage: &dyn Storage, key: StateKey) -> anyhow::Result<String> {
        let bytes = storage
            .load(key)?
            .with_context(|| format!("Repository state is missing {}", key.file_name()))?;

        String::from_utf8(bytes.to_vec())
            .with_context(|| format!("Repository state {} is not UTF-8", key.file_name()))
    }
}
