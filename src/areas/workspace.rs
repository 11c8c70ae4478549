//! Working tree access
//!
//! gitlet tracks plain files at the top level of the working directory. The
//! [`WorkingTree`] trait is everything the repository needs from it;
//! [`Workspace`] is the file system implementation and [`MemoryWorkspace`]
//! keeps files in memory for tests.

use crate::areas::storage::REPOSITORY_DIR;
use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use bytes::Bytes;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::rc::Rc;
use walkdir::WalkDir;

/// Whether `name` names a file gitlet can track
///
/// Only a single plain path component qualifies, and never the repository
/// directory itself. Absolute paths, `..` and nested names are rejected.
pub fn is_valid_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();

    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) => part.to_str() != Some(REPOSITORY_DIR),
        _ => false,
    }
}

fn ensure_valid_file_name(name: &str) -> anyhow::Result<()> {
    if !is_valid_file_name(name) {
        anyhow::bail!("File name outside the working tree: {:?}", name);
    }

    Ok(())
}

pub trait WorkingTree: std::fmt::Debug {
    fn exists(&self, name: &str) -> bool;

    fn read_file(&self, name: &str) -> anyhow::Result<Bytes>;

    /// Create or overwrite `name`
    fn write_file(&self, name: &str, data: &[u8]) -> anyhow::Result<()>;

    /// Delete `name`; deleting a missing file is not an error
    fn delete_file(&self, name: &str) -> anyhow::Result<()>;

    /// Names of all plain files, sorted
    fn list_files(&self) -> anyhow::Result<Vec<String>>;

    fn parse_blob(&self, name: &str) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(name)?))
    }

    // Deletions go first so a planned write never races a stale file.
    fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        for action in [ActionType::Delete, ActionType::Modify, ActionType::Add] {
            for (name, blob) in migration.actions_of(&action) {
                match (&action, blob) {
                    (ActionType::Delete, None) => self.delete_file(name)?,
                    (ActionType::Add | ActionType::Modify, Some(blob)) => {
                        self.write_file(name, blob.content())?
                    }
                    _ => anyhow::bail!("Invalid action and entry combination for {}", name),
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file_path(&self, name: &str) -> anyhow::Result<PathBuf> {
        ensure_valid_file_name(name)?;

        Ok(self.path.join(name))
    }
}

impl WorkingTree for Workspace {
    fn exists(&self, name: &str) -> bool {
        is_valid_file_name(name) && self.path.join(name).is_file()
    }

    fn read_file(&self, name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.file_path(name)?;

        let content = std::fs::read(&file_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(content.into())
    }

    fn write_file(&self, name: &str, data: &[u8]) -> anyhow::Result<()> {
        let file_path = self.file_path(name)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;

        file.write_all(data)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }

    fn delete_file(&self, name: &str) -> anyhow::Result<()> {
        let file_path = self.file_path(name)?;

        if file_path.is_file() {
            std::fs::remove_file(&file_path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        Ok(())
    }

    fn list_files(&self) -> anyhow::Result<Vec<String>> {
        if !self.path.is_dir() {
            anyhow::bail!("The working directory does not exist: {:?}", self.path);
        }

        let mut files = WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| entry.file_name().to_str().map(String::from))
            .filter(|name| is_valid_file_name(name))
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }
}

/// In-memory working tree; clones share the same files
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkspace {
    files: Rc<RefCell<BTreeMap<String, Bytes>>>,
}

impl MemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, name: &str, content: &str) -> Self {
        self.put(name, content);
        self
    }

    pub fn put(&self, name: &str, content: &str) {
        self.files
            .borrow_mut()
            .insert(name.to_string(), Bytes::copy_from_slice(content.as_bytes()));
    }

    /// Content of `name` as text, for assertions
    pub fn contents(&self, name: &str) -> Option<String> {
        self.files
            .borrow()
            .get(name)
            .map(|content| String::from_utf8_lossy(content).into_owned())
    }
}

impl WorkingTree for MemoryWorkspace {
    fn exists(&self, name: &str) -> bool {
        is_valid_file_name(name) && self.files.borrow().contains_key(name)
    }

    fn read_file(&self, name: &str) -> anyhow::Result<Bytes> {
        ensure_valid_file_name(name)?;
        self.files
            .borrow()
            .get(name)
            .cloned()
            .with_context(|| format!("Failed to read file: {:?}", name))
    }

    fn write_file(&self, name: &str, data: &[u8]) -> anyhow::Result<()> {
        ensure_valid_file_name(name)?;
        self.files
            .borrow_mut()
            .insert(name.to_string(), Bytes::copy_from_slice(data));
        Ok(())
    }

    fn delete_file(&self, name: &str) -> anyhow::Result<()> {
        ensure_valid_file_name(name)?;
        self.files.borrow_mut().remove(name);
        Ok(())
    }

    fn list_files(&self) -> anyhow::Result<Vec<String>> {
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|name| is_valid_file_name(name))
            .cloned()
            .collect())
    }
}
