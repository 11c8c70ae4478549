use crate::areas::repository::Repository;
use crate::areas::storage::MemoryStorage;
use crate::areas::workspace::MemoryWorkspace;
use crate::artifacts::objects::object_id::ObjectId;
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

/// Writer whose clones share one buffer
#[derive(Debug, Clone, Default)]
pub struct SharedOutput(Rc<RefCell<Vec<u8>>>);

impl SharedOutput {
    /// Everything written so far; the buffer is emptied
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.0.borrow_mut());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// An initialized repository over in-memory backends
pub struct Sandbox {
    pub repository: Repository,
    pub workspace: MemoryWorkspace,
    pub storage: MemoryStorage,
    pub output: SharedOutput,
}

impl Sandbox {
    pub async fn initialized() -> Self {
        let workspace = MemoryWorkspace::new();
        let storage = MemoryStorage::new();
        let output = SharedOutput::default();

        let mut repository = Repository::with_backends(
            Box::new(storage.clone()),
            Box::new(workspace.clone()),
            Box::new(output.clone()),
        );
        repository.init().await.unwrap();

        Sandbox {
            repository,
            workspace,
            storage,
            output,
        }
    }

    /// Write, add and commit `files`, returning the new head
    pub async fn commit_files(&mut self, files: &[(&str, &str)], message: &str) -> ObjectId {
        for (name, content) in files {
            self.workspace.put(name, content);
            self.repository.add(name).await.unwrap();
        }
        self.repository.commit(message).await.unwrap();

        self.head()
    }

    pub fn head(&self) -> ObjectId {
        self.repository.refs().read_head().clone()
    }

    /// Persist, then open a fresh handle over the same backends
    pub async fn reopen(&mut self) -> Repository {
        self.repository.persist().await.unwrap();

        let mut repository = Repository::with_backends(
            Box::new(self.storage.clone()),
            Box::new(self.workspace.clone()),
            Box::new(self.output.clone()),
        );
        repository.rehydrate().await.unwrap();

        repository
    }
}
