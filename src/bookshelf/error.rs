use crate::model::BookId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Book with id {0} not found")]
    NotFound(BookId),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Mirror file {} is corrupt: {source}", .path.display())]
    MirrorCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not read mirror file {}: {source}", .path.display())]
    MirrorRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write mirror file {}: {source}", .path.display())]
    MirrorWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl CatalogError {
    /// True for failures of the JSON mirror, as opposed to the store or the input.
    pub fn is_mirror(&self) -> bool {
        matches!(
            self,
            CatalogError::MirrorCorrupt { .. }
                | CatalogError::MirrorRead { .. }
                | CatalogError::MirrorWrite { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
