use std::{collections::HashMap, sync::Mutex};

use super::{ReadBlobState, Storage, StorageResult};

/// Keeps blobs in process memory. Used by tests and the "memory:" engine,
/// contents do not survive a restart
pub struct MemoryStorage {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            blobs: Mutex::new(HashMap::new()),
        }
    }
}

impl Storage for MemoryStorage {
    fn init(&self) -> StorageResult<()> {
        Ok(())
    }

    fn write_blob(&self, path: String, bytes: Vec<u8>) -> StorageResult<()> {
        self.blobs
            .lock()
            .expect("Memory storage lock should not be poisoned")
            .insert(path, bytes);

        Ok(())
    }

    fn read_blob(&self, path: String) -> StorageResult<ReadBlobState> {
        let blobs = self
            .blobs
            .lock()
            .expect("Memory storage lock should not be poisoned");

        match blobs.get(&path) {
            Some(bytes) => Ok(ReadBlobState::Found(bytes.clone())),
            None => Ok(ReadBlobState::NotFound),
        }
    }
}
