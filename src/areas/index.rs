//! Staging area
//!
//! The staging area holds the changes that the next commit will record on top
//! of the head commit: files staged for addition (with the blob captured at
//! `add` time) and files staged for removal. A name is never staged both ways
//! at once.
//!
//! ## Persistence
//!
//! Each half is persisted as its own staging file (see
//! [`crate::artifacts::index`]) under the `add-stage` and `rm-stage` keys:
//! header, entries sorted by name, then a SHA-1 checksum of everything before it.

use crate::areas::storage::{StateKey, Storage};
use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::{BLOB_LENGTH_SIZE, IndexEntry, NAME_LENGTH_SIZE};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::{Packable, Unpackable};
use anyhow::anyhow;
use byteorder::ReadBytesExt;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::Cursor;

pub type StagedFiles = BTreeMap<String, Blob>;

#[derive(Debug, Clone, Default)]
pub struct Index {
    /// Files staged for addition, with the content captured when staged
    additions: StagedFiles,
    /// Files staged for removal, with the content they had in the head commit
    removals: StagedFiles,
    /// Flag indicating if the staging area changed since it was loaded
    changed: bool,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage `name` for addition, cancelling a pending removal of it
    pub fn stage_add(&mut self, name: &str, blob: Blob) {
        self.removals.remove(name);
        self.additions.insert(name.to_string(), blob);
        self.changed = true;
    }

    /// Stage `name` for removal, cancelling a pending addition of it
    pub fn stage_remove(&mut self, name: &str, blob: Blob) {
        self.additions.remove(name);
        self.removals.insert(name.to_string(), blob);
        self.changed = true;
    }

    /// Drop a pending addition; returns whether there was one
    pub fn unstage(&mut self, name: &str) -> bool {
        let removed = self.additions.remove(name).is_some();
        self.changed |= removed;
        removed
    }

    /// Drop a pending removal; returns whether there was one
    pub fn cancel_removal(&mut self, name: &str) -> bool {
        let removed = self.removals.remove(name).is_some();
        self.changed |= removed;
        removed
    }

    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.additions.clear();
            self.removals.clear();
            self.changed = true;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn staged_for_addition(&self, name: &str) -> bool {
        self.additions.contains_key(name)
    }

    pub fn staged_for_removal(&self, name: &str) -> bool {
        self.removals.contains_key(name)
    }

    pub fn addition(&self, name: &str) -> Option<&Blob> {
        self.additions.get(name)
    }

    pub fn additions(&self) -> &StagedFiles {
        &self.additions
    }

    pub fn removals(&self) -> &StagedFiles {
        &self.removals
    }

    /// Load both halves of the staging area
    ///
    /// A half that was never saved is empty. A half whose checksum does not
    /// match is reported as an error.
    pub fn rehydrate(&mut self, storage: &dyn Storage) -> anyhow::Result<()> {
        self.additions = Self::load_staged(storage, StateKey::StagedAdditions)?;
        self.removals = Self::load_staged(storage, StateKey::StagedRemovals)?;
        self.changed = false;

        Ok(())
    }

    pub fn write_updates(&mut self, storage: &dyn Storage) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        storage.save(
            StateKey::StagedAdditions,
            Self::pack_staged(&self.additions)?,
        )?;
        storage.save(StateKey::StagedRemovals, Self::pack_staged(&self.removals)?)?;
        self.changed = false;

        Ok(())
    }

    fn load_staged(storage: &dyn Storage, key: StateKey) -> anyhow::Result<StagedFiles> {
        match storage.load(key)? {
            Some(bytes) if !bytes.is_empty() => Self::parse_staged(bytes),
            _ => Ok(StagedFiles::new()),
        }
    }

    fn parse_staged(bytes: Bytes) -> anyhow::Result<StagedFiles> {
        let mut reader = Checksum::new(Cursor::new(bytes));

        let entries_count = Self::parse_header(&mut reader)?;
        let mut staged = StagedFiles::new();

        for _ in 0..entries_count {
            let entry = Self::parse_entry(&mut reader)?;
            staged.insert(entry.name, entry.blob);
        }

        reader.verify()?;
        Ok(staged)
    }

    fn parse_header(reader: &mut Checksum<Cursor<Bytes>>) -> anyhow::Result<u32> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(Cursor::new(header_bytes))?;

        if header.marker != SIGNATURE {
            return Err(anyhow!("Invalid staging file signature"));
        }

        if header.version != VERSION {
            return Err(anyhow!(
                "Unsupported staging file version: {}",
                header.version
            ));
        }

        Ok(header.entries_count)
    }

    /// Parse one entry; both variable-length parts are preceded by their length
    fn parse_entry(reader: &mut Checksum<Cursor<Bytes>>) -> anyhow::Result<IndexEntry> {
        let name_length_bytes = reader.read(NAME_LENGTH_SIZE)?;
        let name_length = Cursor::new(&name_length_bytes).read_u16::<byteorder::NetworkEndian>()?;
        let name_bytes = reader.read(name_length as usize)?;

        let blob_length_bytes = reader.read(BLOB_LENGTH_SIZE)?;
        let blob_length = Cursor::new(&blob_length_bytes).read_u32::<byteorder::NetworkEndian>()?;
        let blob_bytes = reader.read(blob_length as usize)?;

        let entry_bytes = [
            name_length_bytes,
            name_bytes,
            blob_length_bytes,
            blob_bytes,
        ]
        .concat();

        IndexEntry::deserialize(Cursor::new(entry_bytes))
    }

    fn pack_staged(staged: &StagedFiles) -> anyhow::Result<Bytes> {
        let mut writer = Checksum::new(Vec::new());

        let header = IndexHeader {
            entries_count: u32::try_from(staged.len())?,
            ..IndexHeader::empty()
        };
        writer.write(&header.serialize()?)?;

        for (name, blob) in staged {
            let entry = IndexEntry::new(name.clone(), blob.clone());
            writer.write(&entry.serialize()?)?;
        }

        writer.write_checksum()?;
        Ok(Bytes::from(writer.into_inner()))
    }
}
