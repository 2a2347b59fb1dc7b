use crate::persistence::storage::StorageEngine;

#[derive(Debug, Clone)]
pub struct DatabaseOptions {
    pub restore: bool,
    pub storage_engine: StorageEngine,
}

// Implements: https://rust-unofficial.github.io/patterns/patterns/creational/builder.html
impl DatabaseOptions {
    /// Defines whether we should attempt to restore the collection from storage
    /// on startup
    pub fn set_restore(mut self, restore: bool) -> Self {
        self.restore = restore;
        self
    }

    pub fn set_storage_engine(mut self, storage_engine: StorageEngine) -> Self {
        self.storage_engine = storage_engine;
        self
    }
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            storage_engine: StorageEngine::File(std::path::PathBuf::from("data")),
            restore: true,
        }
    }
}

impl DatabaseOptions {
    /// In-memory database with no restore, keeps tests independent of the filesystem
    pub fn new_test() -> Self {
        DatabaseOptions::default()
            .set_storage_engine(StorageEngine::Memory)
            .set_restore(false)
    }
}
