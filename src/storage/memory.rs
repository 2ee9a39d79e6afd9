use std::{
    io,
    sync::{Arc, Mutex, MutexGuard},
};

use super::RecordStore;

/// In-memory store; clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contents: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemoryStore {
    /// A store that does not exist yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: Arc::new(Mutex::new(Some(contents.into()))),
        }
    }

    /// Snapshot of the current contents as text.
    pub fn contents(&self) -> Option<String> {
        self.guard()
            .as_deref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    fn guard(&self) -> MutexGuard<'_, Option<Vec<u8>>> {
        self.contents.lock().expect("memory store lock poisoned")
    }
}

impl RecordStore for MemoryStore {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        Ok(self.guard().clone())
    }

    fn write(&self, contents: &str) -> io::Result<()> {
        *self.guard() = Some(contents.as_bytes().to_vec());
        Ok(())
    }

    fn create(&self) -> io::Result<()> {
        self.guard().get_or_insert_with(Vec::new);
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
