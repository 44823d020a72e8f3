use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlbumError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Write failed: {0}")]
    WriteFailed(rusqlite::Error),

    #[error("Read failed: {0}")]
    ReadFailed(rusqlite::Error),

    #[error("Upload rejected: {0}")]
    UploadRejected(String),

    #[error("Network failure: {0}")]
    NetworkFailed(reqwest::Error),

    // The photo exists remotely but the local index missed it. There is no
    // retry or reconciliation; the user retries the whole operation.
    #[error("Photo uploaded but not recorded locally: {0}")]
    RecordPersistFailed(Box<AlbumError>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, AlbumError>;
