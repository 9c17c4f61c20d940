//! `[build]` section configuration.
//!
//! Content root, output location and how artifacts are discovered and fingerprinted.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the content hash of an artifact is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashMode {
    /// BLAKE3 digest of the raw bytes (default).
    #[default]
    Blake3,
    /// No digest; derive the identity from the modification time.
    Mtime,
}

/// `[build]` section in toolshelf.toml.
///
/// # Example
/// ```toml
/// [build]
/// content = "tools"        # Directory holding the html pages
/// output = "public"        # Published tree
/// index = "index.html"     # Generated catalog page
/// exclude = ["drafts"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Content root holding the html artifacts.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Output directory the catalog (and copied artifacts) are written to.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// File name of the generated catalog page, relative to `output`.
    #[serde(default = "defaults::build::index")]
    #[educe(Default = defaults::build::index())]
    pub index: String,

    /// Minify the generated page.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub minify: bool,

    /// Remove the output directory before building.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,

    /// Copy artifacts into the output directory next to the catalog.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub copy: bool,

    /// File extensions treated as artifacts (without the dot, case-insensitive).
    #[serde(default = "defaults::build::extensions")]
    #[educe(Default = defaults::build::extensions())]
    pub extensions: Vec<String>,

    /// Path components to skip during discovery, e.g. `["drafts", "vendor"]`.
    #[serde(default = "defaults::build::exclude")]
    #[educe(Default = defaults::build::exclude())]
    pub exclude: Vec<String>,

    /// Content hash strategy.
    #[serde(default = "defaults::build::hash")]
    #[educe(Default = defaults::build::hash())]
    pub hash: HashMode,
}
