//! Persistence of repository state between invocations
//!
//! The repository reads every piece of state once at the start of a command
//! and writes it back once at the end. Each piece lives under a [`StateKey`];
//! the backend decides where the bytes go.
//!
//! - [`FileStorage`]: one zlib-compressed file per key inside `.gitlet/`,
//!   replaced atomically (temp file + rename) under an exclusive lock
//! - [`MemoryStorage`]: a shared in-memory map, for tests

use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use file_guard::Lock;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Name of the repository directory
pub const REPOSITORY_DIR: &str = ".gitlet";

const LOCK_FILE: &str = "lock";

/// Logical names of the persisted pieces of state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateKey {
    Objects,
    Branches,
    StagedAdditions,
    StagedRemovals,
    Head,
    CurrentBranch,
}

impl StateKey {
    pub fn file_name(&self) -> &'static str {
        match self {
            StateKey::Objects => "objects",
            StateKey::Branches => "branches",
            StateKey::StagedAdditions => "add-stage",
            StateKey::StagedRemovals => "rm-stage",
            StateKey::Head => "HEAD",
            StateKey::CurrentBranch => "current-branch",
        }
    }
}

pub trait Storage: std::fmt::Debug {
    fn is_initialized(&self) -> bool;

    fn initialize(&self) -> anyhow::Result<()>;

    /// Bytes saved under `key`, or `None` if nothing was ever saved
    fn load(&self, key: StateKey) -> anyhow::Result<Option<Bytes>>;

    fn save(&self, key: StateKey, data: Bytes) -> anyhow::Result<()>;
}

#[derive(Debug)]
pub struct FileStorage {
    path: Box<Path>,
}

impl FileStorage {
    /// Storage rooted at `<root>/.gitlet`
    pub fn new(root: &Path) -> Self {
        FileStorage {
            path: root.join(REPOSITORY_DIR).into_boxed_path(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn key_path(&self, key: StateKey) -> PathBuf {
        self.path.join(key.file_name())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress repository state")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing repository state")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress repository state")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-state-{}", rand::random::<u32>())
    }
}

impl Storage for FileStorage {
    fn is_initialized(&self) -> bool {
        self.path.is_dir()
    }

    fn initialize(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.path).with_context(|| {
            format!(
                "Unable to create repository directory {}",
                self.path.display()
            )
        })
    }

    fn load(&self, key: StateKey) -> anyhow::Result<Option<Bytes>> {
        let key_path = self.key_path(key);
        if !key_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read(&key_path)
            .with_context(|| format!("Unable to read state file {}", key_path.display()))?;

        Self::decompress(content.into()).map(Some)
    }

    fn save(&self, key: StateKey, data: Bytes) -> anyhow::Result<()> {
        let key_path = self.key_path(key);
        let temp_path = self.path.join(Self::generate_temp_name());

        let mut lock_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.path.join(LOCK_FILE))
            .context("Unable to open repository lock file")?;
        let _lock = file_guard::lock(&mut lock_file, Lock::Exclusive, 0, 1)?;

        let data = Self::compress(data)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Unable to open state file {}", temp_path.display()))?;
        let mut file_lock = file_guard::lock(&mut file, Lock::Exclusive, 0, 1)?;

        file_lock
            .deref_mut()
            .write_all(&data)
            .with_context(|| format!("Unable to write state file {}", temp_path.display()))?;
        drop(file_lock);

        // rename the temp file over the key file to make the update atomic
        std::fs::rename(&temp_path, &key_path)
            .with_context(|| format!("Unable to rename state file to {}", key_path.display()))?;

        Ok(())
    }
}

/// In-memory storage; clones share the same state
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    initialized: Rc<Cell<bool>>,
    keys: Rc<RefCell<BTreeMap<StateKey, Bytes>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    fn initialize(&self) -> anyhow::Result<()> {
        self.initialized.set(true);
        Ok(())
    }

    fn load(&self, key: StateKey) -> anyhow::Result<Option<Bytes>> {
        Ok(self.keys.borrow().get(&key).cloned())
    }

    fn save(&self, key: StateKey, data: Bytes) -> anyhow::Result<()> {
        self.keys.borrow_mut().insert(key, data);
        Ok(())
    }
}
