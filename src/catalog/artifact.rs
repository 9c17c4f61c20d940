//! Artifact discovery and loading.
//!
//! An artifact is one html file under the content root. Discovery walks the
//! root once, applies the `[build]` filters and returns artifacts sorted by
//! relative path, which is the order every later stage relies on.

use super::error::CatalogError;
use crate::config::SiteConfig;
use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};
use walkdir::{DirEntry, WalkDir};

/// One source html file, read once and never mutated.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Absolute source path
    pub source: PathBuf,
    /// Path relative to the content root, `/`-separated, e.g. `games/snake.html`
    pub relative: String,
    /// Raw file bytes
    pub bytes: Vec<u8>,
    /// Filesystem modification time, if the platform reports one
    pub modified: Option<SystemTime>,
}

impl Artifact {
    /// Read an artifact from disk.
    pub fn load(source: PathBuf, content_root: &Path) -> Result<Self, CatalogError> {
        let relative = relative_path(&source, content_root);
        let bytes = fs::read(&source)
            .map_err(|err| CatalogError::UnreadableArtifact(source.clone(), err))?;
        let modified = fs::metadata(&source).and_then(|m| m.modified()).ok();

        Ok(Self {
            source,
            relative,
            bytes,
            modified,
        })
    }

    /// Build an artifact from memory, mostly for tests.
    #[cfg(test)]
    pub fn from_parts(relative: &str, content: &str, modified: Option<SystemTime>) -> Self {
        Self {
            source: PathBuf::from(relative),
            relative: relative.to_owned(),
            bytes: content.as_bytes().to_vec(),
            modified,
        }
    }

    /// Content as text. Invalid UTF-8 sequences are replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// File name without extension: `games/snake.html` → `snake`
    pub fn stem(&self) -> &str {
        let name = self.relative.rsplit('/').next().unwrap_or(&self.relative);
        name.rsplit_once('.').map_or(name, |(stem, _)| stem)
    }

    /// Name of the immediate parent directory, `None` at the content root.
    pub fn parent_dir(&self) -> Option<&str> {
        let (dirs, _) = self.relative.rsplit_once('/')?;
        dirs.rsplit('/').next().filter(|d| !d.is_empty())
    }
}

/// `/`-separated path of `source` relative to `root`.
fn relative_path(source: &Path, root: &Path) -> String {
    let relative = source.strip_prefix(root).unwrap_or(source);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// ============================================================================
// Discovery
// ============================================================================

/// Enumerate and read every artifact under `[build].content`.
///
/// Skips hidden entries, `[build].exclude` components, the output directory
/// when it lives inside the content root, and the root-level file named like
/// the generated catalog page. Any read failure aborts the run.
pub fn discover(config: &SiteConfig) -> Result<Vec<Artifact>, CatalogError> {
    let root = &config.build.content;
    if !root.exists() {
        return Err(CatalogError::MissingContentRoot(root.clone()));
    }
    if !root.is_dir() {
        return Err(CatalogError::NotADirectory(root.clone()));
    }

    let mut paths = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| keep_entry(entry, config));

    for entry in walker {
        let entry = entry.map_err(|err| CatalogError::Scan(root.clone(), err))?;
        if entry.file_type().is_file() && is_artifact(&entry, config) {
            paths.push(entry.into_path());
        }
    }

    let mut artifacts = paths
        .into_iter()
        .map(|path| Artifact::load(path, root))
        .collect::<Result<Vec<_>, _>>()?;
    artifacts.sort_by(|a, b| a.relative.cmp(&b.relative));
    Ok(artifacts)
}

/// Decide whether the walker descends into / yields an entry.
fn keep_entry(entry: &DirEntry, config: &SiteConfig) -> bool {
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') {
        return false;
    }
    if config.build.exclude.iter().any(|ex| *ex == name) {
        return false;
    }
    !(entry.file_type().is_dir() && entry.path() == config.build.output)
}

/// Whether a file entry is a catalog artifact.
fn is_artifact(entry: &DirEntry, config: &SiteConfig) -> bool {
    let path = entry.path();
    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            config
                .build
                .extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        });

    let is_generated_index = entry.depth() == 1 && entry.file_name() == config.build.index.as_str();

    has_extension && !is_generated_index
}
