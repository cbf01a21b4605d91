use std::path::PathBuf;
use thiserror::Error;

/// Failure while writing the package. Always fatal for the run.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("collection database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("failed to serialize collection metadata: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to move package into place at {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
