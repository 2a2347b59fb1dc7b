use std::{fmt, path::PathBuf, str::FromStr};

use thiserror::Error;

pub mod file;
pub mod memory;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct GenericStorageError(pub String);

pub fn io_to_generic_error(error: std::io::Error) -> GenericStorageError {
    GenericStorageError(error.to_string())
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("Unable to initialize persistence: {0}")]
    UnableToInitializePersistence(GenericStorageError),

    #[error("Unable to write blob: {0}")]
    UnableToWriteBlob(GenericStorageError),

    #[error("Unable to read blob: {0}")]
    UnableToReadBlob(GenericStorageError),

    #[error("Collection cannot be parsed: {0}")]
    CorruptCollection(GenericStorageError),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A blob that does not exist yet is not an error, it is how a fresh
/// database starts
#[derive(Debug, Clone, PartialEq)]
pub enum ReadBlobState {
    Found(Vec<u8>),
    NotFound,
}

pub trait Storage {
    /// Called on database start-up, should be idempotent
    fn init(&self) -> StorageResult<()>;

    fn write_blob(&self, path: String, bytes: Vec<u8>) -> StorageResult<()>;

    fn read_blob(&self, path: String) -> StorageResult<ReadBlobState>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageEngine {
    File(PathBuf),
    Memory,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unsupported storage engine: {0}")]
pub struct ParseStorageEngineError(String);

/// Parses the database connection string. "file:<dir>" and bare paths map to
/// the file engine, "memory:" keeps everything in process. Any other scheme is
/// rejected so a misconfigured uri fails at startup instead of being treated
/// as a directory name
impl FromStr for StorageEngine {
    type Err = ParseStorageEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "memory:" || s == "memory" {
            return Ok(StorageEngine::Memory);
        }

        if let Some(path) = s.strip_prefix("file:") {
            return Ok(StorageEngine::File(PathBuf::from(path)));
        }

        if s.contains("://") {
            return Err(ParseStorageEngineError(s.to_string()));
        }

        Ok(StorageEngine::File(PathBuf::from(s)))
    }
}

impl fmt::Display for StorageEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageEngine::File(path) => write!(f, "file:{}", path.display()),
            StorageEngine::Memory => write!(f, "memory:"),
        }
    }
}
