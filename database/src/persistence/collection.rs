use crate::{database::table::table::PersonTable, model::person::Person};

use super::storage::{
    file::FileStorage, memory::MemoryStorage, GenericStorageError, ReadBlobState, Storage,
    StorageEngine, StorageError, StorageResult,
};

/// The whole collection is stored as a single json array blob
const COLLECTION_BLOB: &str = "pessoas.json";

pub struct CollectionManager {
    storage: Box<dyn Storage + Send>,
}

impl CollectionManager {
    pub fn new(storage_engine: &StorageEngine) -> Self {
        let storage: Box<dyn Storage + Send> = match storage_engine {
            StorageEngine::File(base_path) => Box::new(FileStorage::new(base_path.clone())),
            StorageEngine::Memory => Box::new(MemoryStorage::new()),
        };

        Self { storage }
    }

    /// Restores the collection from storage into the table. A missing blob is an
    /// empty collection, a blob that cannot be parsed fails the restore
    #[tracing::instrument(skip(self, table))]
    pub fn restore_collection(&self, table: &mut PersonTable) -> StorageResult<usize> {
        self.storage.init()?;

        let people: Vec<Person> = match self.storage.read_blob(COLLECTION_BLOB.to_string())? {
            ReadBlobState::Found(file_contents) => serde_json::from_slice(&file_contents)
                .map_err(|e| StorageError::CorruptCollection(GenericStorageError(e.to_string())))?,
            ReadBlobState::NotFound => Vec::new(),
        };

        let document_count = people.len();

        table.restore_table(people);

        Ok(document_count)
    }

    /// Writes the collection, called after every committed mutation
    #[tracing::instrument(skip(self, table))]
    pub fn save_collection(&self, table: &PersonTable) -> StorageResult<()> {
        let serialized_data = serde_json::to_vec_pretty(&table.list_documents())
            .expect("Person documents should always serialize to json");

        self.storage
            .write_blob(COLLECTION_BLOB.to_string(), serialized_data)
    }
}
