//! Content hash and modification timestamp of an artifact.

use super::artifact::Artifact;
use crate::config::HashMode;
use chrono::{DateTime, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

/// Number of hex characters kept from the digest for display.
pub const HASH_DISPLAY_LEN: usize = 12;

/// Display format of `lastModified`, fixed and locale independent.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Shown when the platform reports no modification time.
pub const UNKNOWN: &str = "unknown";

/// Identity of one artifact for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    /// Short content digest, or an mtime-derived stand-in
    pub hash: String,
    /// UTC modification time, `YYYY-MM-DD HH:MM`
    pub last_modified: String,
}

/// Fingerprint an artifact. Never fails.
pub fn fingerprint(artifact: &Artifact, mode: HashMode) -> Fingerprint {
    let hash = match mode {
        HashMode::Blake3 => digest(&artifact.bytes),
        HashMode::Mtime => mtime_identity(artifact.modified),
    };

    Fingerprint {
        hash,
        last_modified: artifact.modified.map_or_else(|| UNKNOWN.to_owned(), format_timestamp),
    }
}

/// Truncated BLAKE3 hex digest.
fn digest(bytes: &[u8]) -> String {
    let hex = blake3::hash(bytes).to_hex();
    hex[..HASH_DISPLAY_LEN].to_owned()
}

/// Modification time as hex seconds and nanoseconds, e.g. `m6650f1a2.1dcd6500`.
fn mtime_identity(modified: Option<SystemTime>) -> String {
    modified
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map_or_else(
            || UNKNOWN.to_owned(),
            |d| format!("m{:x}.{:x}", d.as_secs(), d.subsec_nanos()),
        )
}

/// Format a timestamp as UTC `YYYY-MM-DD HH:MM`.
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(TIMESTAMP_FORMAT).to_string()
}
