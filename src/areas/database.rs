//! Object store
//!
//! Holds every commit ever made and every blob those commits reference,
//! keyed by object id. The store is append-only: objects are never replaced
//! or removed.
//!
//! ## Persistence
//!
//! The whole store is saved under the `objects` key as one stream of packed
//! objects (`<type> <size>\0<content>`), blobs first, then commits.

use crate::areas::storage::{StateKey, Storage};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::GitletError;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, Cursor, Read};

#[derive(Debug, Default, Clone)]
pub struct Database {
    commits: BTreeMap<ObjectId, Commit>,
    blobs: BTreeMap<ObjectId, Blob>,
    /// Whether anything was added since the store was loaded
    changed: bool,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a commit, returning its id; storing the same commit twice is a no-op
    pub fn put(&mut self, commit: Commit) -> anyhow::Result<ObjectId> {
        let oid = commit.object_id()?;

        if !self.commits.contains_key(&oid) {
            tracing::trace!(%oid, "storing commit");
            self.commits.insert(oid.clone(), commit);
            self.changed = true;
        }

        Ok(oid)
    }

    /// Register a blob, returning its id; equal content is stored once
    pub fn put_blob(&mut self, blob: Blob) -> anyhow::Result<ObjectId> {
        let oid = blob.object_id()?;

        if !self.blobs.contains_key(&oid) {
            tracing::trace!(%oid, "storing blob");
            self.blobs.insert(oid.clone(), blob);
            self.changed = true;
        }

        Ok(oid)
    }

    pub fn get(&self, oid: &ObjectId) -> anyhow::Result<&Commit> {
        self.commits
            .get(oid)
            .ok_or_else(|| GitletError::NoSuchCommit.into())
    }

    pub fn blob(&self, oid: &ObjectId) -> anyhow::Result<&Blob> {
        self.blobs
            .get(oid)
            .with_context(|| format!("Blob {} is missing from the object store", oid))
    }

    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.commits.contains_key(oid)
    }

    /// Resolve a possibly abbreviated commit id
    ///
    /// # Returns
    ///
    /// - the single commit whose id starts with `prefix`
    /// - `NoSuchCommit` if the prefix is malformed or matches nothing
    /// - `AmbiguousId` if the prefix matches more than one commit
    pub fn lookup_by_prefix(&self, prefix: &str) -> anyhow::Result<(&ObjectId, &Commit)> {
        if !ObjectId::is_valid_prefix(prefix) {
            return Err(GitletError::NoSuchCommit.into());
        }

        let mut matches = self
            .commits
            .iter()
            .filter(|(oid, _)| oid.starts_with(prefix));

        match (matches.next(), matches.next()) {
            (Some(found), None) => Ok(found),
            (None, _) => Err(GitletError::NoSuchCommit.into()),
            (Some(_), Some(_)) => Err(GitletError::AmbiguousId(prefix.to_string()).into()),
        }
    }

    /// All commits, ordered by id
    pub fn commits(&self) -> impl Iterator<Item = (&ObjectId, &Commit)> {
        self.commits.iter()
    }

    /// Parent links of a commit for the split point search
    pub fn slim_commit(&self, oid: &ObjectId) -> Option<SlimCommit> {
        self.commits.get(oid).map(|commit| SlimCommit {
            oid: oid.clone(),
            parents: commit.parents(),
        })
    }

    pub fn rehydrate(&mut self, storage: &dyn Storage) -> anyhow::Result<()> {
        *self = match storage.load(StateKey::Objects)? {
            Some(bytes) => Database::deserialize(Cursor::new(bytes))
                .context("Unable to load the object store")?,
            None => Database::new(),
        };

        Ok(())
    }

    pub fn write_updates(&mut self, storage: &dyn Storage) -> anyhow::Result<()> {
        if self.changed {
            storage.save(StateKey::Objects, self.serialize()?)?;
            self.changed = false;
        }

        Ok(())
    }
}

impl Packable for Database {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut pack = Vec::new();

        for blob in self.blobs.values() {
            pack.extend_from_slice(&blob.serialize()?);
        }
        for commit in self.commits.values() {
            pack.extend_from_slice(&commit.serialize()?);
        }

        Ok(Bytes::from(pack))
    }
}

impl Unpackable for Database {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut database = Database::new();

        while !reader.fill_buf()?.is_empty() {
            let (object_type, size) = ObjectType::parse_header(&mut reader)?;

            let mut content = vec![0; size];
            reader
                .read_exact(&mut content)
                .with_context(|| format!("Truncated {} object in pack", object_type))?;
            let content = Cursor::new(content);

            match object_type {
                ObjectType::Blob => {
                    database.put_blob(Blob::deserialize(content)?)?;
                }
                ObjectType::Commit => {
                    database.put(Commit::deserialize(content)?)?;
                }
            }
        }

        database.changed = false;
        Ok(database)
    }
}
