use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::storage::{FileStorage, Storage};
use crate::areas::workspace::{WorkingTree, Workspace};
use crate::artifacts::objects::commit::Commit;
use crate::errors::GitletError;
use std::cell::{RefCell, RefMut};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handle on one repository for the duration of a single command
///
/// All state lives in memory between [`Repository::rehydrate`] and
/// [`Repository::persist`]; commands only touch the in-memory areas.
pub struct Repository {
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<Index>>,
    database: Database,
    refs: Refs,
    storage: Box<dyn Storage>,
    workspace: Box<dyn WorkingTree>,
}

impl Repository {
    /// Repository rooted at `path`, backed by the file system
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;

        Ok(Self::with_backends(
            Box::new(FileStorage::new(&path)),
            Box::new(Workspace::new(path.into_boxed_path())),
            writer,
        ))
    }

    pub fn with_backends(
        storage: Box<dyn Storage>,
        workspace: Box<dyn WorkingTree>,
        writer: Box<dyn std::io::Write>,
    ) -> Self {
        Repository {
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(Index::new())),
            database: Database::new(),
            refs: Refs::default(),
            storage,
            workspace,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.storage.is_initialized()
    }

    /// Load every area from storage
    pub async fn rehydrate(&mut self) -> anyhow::Result<()> {
        if !self.storage.is_initialized() {
            return Err(GitletError::NotInitialized.into());
        }

        self.database.rehydrate(self.storage.as_ref())?;
        self.refs.rehydrate(self.storage.as_ref())?;
        self.index.lock().await.rehydrate(self.storage.as_ref())?;

        tracing::debug!(
            head = %self.refs.read_head(),
            branch = %self.refs.current_branch(),
            "repository loaded"
        );

        Ok(())
    }

    /// Write back every area that changed
    pub async fn persist(&mut self) -> anyhow::Result<()> {
        self.database.write_updates(self.storage.as_ref())?;
        self.refs.write_updates(self.storage.as_ref())?;
        self.index.lock().await.write_updates(self.storage.as_ref())?;

        Ok(())
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn database_mut(&mut self) -> &mut Database {
        &mut self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn refs_mut(&mut self) -> &mut Refs {
        &mut self.refs
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn workspace(&self) -> &dyn WorkingTree {
        self.workspace.as_ref()
    }

    pub fn head_commit(&self) -> anyhow::Result<&Commit> {
        self.database.get(self.refs.read_head())
    }
}
