//! Structural errors that abort a catalog run.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that make the whole catalog invalid.
///
/// Markup problems inside an artifact never show up here;
/// the extraction fallback chains absorb them.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("content directory `{}` does not exist", .0.display())]
    MissingContentRoot(PathBuf),

    #[error("content path `{}` is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to scan content directory `{}`", .0.display())]
    Scan(PathBuf, #[source] walkdir::Error),

    #[error("failed to read artifact `{}`", .0.display())]
    UnreadableArtifact(PathBuf, #[source] std::io::Error),
}
