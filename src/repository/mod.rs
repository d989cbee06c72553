use thiserror::Error;

use crate::domain::record::Record;

pub mod snapshot;

pub use snapshot::JsonSnapshotRepository;

/// Failures reading or writing the snapshot.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("failed to replace snapshot: {0}")]
    Persist(#[from] tempfile::PersistError),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

pub trait SnapshotReader {
    fn load(&self) -> RepositoryResult<Vec<Record>>;
}

pub trait SnapshotWriter {
    /// Replaces the stored snapshot with `records`. Readers never observe a
    /// partially written snapshot.
    fn save(&self, records: &[Record]) -> RepositoryResult<()>;
}
