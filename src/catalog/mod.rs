//! Artifact cataloging: discovery, metadata, icons and grouping.
//!
//! - **artifact**: Find and read html files under the content root
//! - **extract**: Title / description / category fallback chains
//! - **classify**: Keyword → icon table
//! - **fingerprint**: Content hash and modification time
//!
//! # Flow
//!
//! ```text
//! discover() ──► [Artifact] ──► CatalogBuilder::add() ──► Catalog
//!                   (path order)      │
//!                                     ├── extract()
//!                                     ├── classify()
//!                                     └── fingerprint()
//! ```
//!
//! One `CatalogBuilder` owns all run state, so a run can be repeated in the
//! same process without leftovers.

pub mod artifact;
pub mod classify;
pub mod error;
pub mod extract;
pub mod fingerprint;

pub use artifact::{Artifact, discover};

use crate::{
    config::{HashMode, SiteConfig},
    logger::Progress,
    utils::url::join_url,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

// ============================================================================
// Record
// ============================================================================

/// Fully resolved metadata of one artifact.
///
/// Serialized field names are the page's embedded data format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: &'static str,
    pub category: String,
    /// Absolute URL of the published artifact
    #[serde(rename = "path")]
    pub url: String,
    #[serde(rename = "lastModified")]
    pub last_modified: String,
    #[serde(rename = "fileHash")]
    pub hash: String,
    /// Relative source path, for logging only
    #[serde(skip)]
    pub relative: String,
}

// ============================================================================
// Catalog
// ============================================================================

/// Records grouped by category.
///
/// Groups iterate in ascending category order (`BTreeMap`), records inside a
/// group in discovery order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    groups: BTreeMap<String, Vec<Record>>,
}

impl Catalog {
    /// Distinct categories, ascending.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// `(category, records)` pairs in render order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.groups
            .iter()
            .map(|(category, records)| (category.as_str(), records.as_slice()))
    }

    /// All records, flattened in render order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.groups.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Run context that turns artifacts into records.
///
/// Artifacts must be added in discovery order.
pub struct CatalogBuilder<'a> {
    base_url: Option<&'a str>,
    hash_mode: HashMode,
    groups: BTreeMap<String, Vec<Record>>,
    /// Every id handed out so far
    issued: HashSet<String>,
}

impl<'a> CatalogBuilder<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            base_url: config.base.url.as_deref(),
            hash_mode: config.build.hash,
            groups: BTreeMap::new(),
            issued: HashSet::new(),
        }
    }

    /// Extract, classify and fingerprint one artifact, then file it under its category.
    pub fn add(&mut self, artifact: &Artifact) -> &Record {
        let raw = extract::extract_artifact(artifact);
        let icon = classify::classify(&artifact.relative, &raw.category);
        let meta = raw.escaped();
        let print = fingerprint::fingerprint(artifact, self.hash_mode);

        let record = Record {
            id: self.unique_id(artifact.stem()),
            title: meta.title,
            description: meta.description,
            icon,
            category: meta.category.clone(),
            url: join_url(self.base_url, &artifact.relative),
            last_modified: print.last_modified,
            hash: print.hash,
            relative: artifact.relative.clone(),
        };

        let group = self.groups.entry(meta.category).or_default();
        group.push(record);
        &group[group.len() - 1]
    }

    /// `stem` if free, otherwise the first free `stem-2`, `stem-3`, ...
    fn unique_id(&mut self, stem: &str) -> String {
        let mut id = stem.to_owned();
        let mut n = 1;
        while self.issued.contains(&id) {
            n += 1;
            id = format!("{stem}-{n}");
        }
        self.issued.insert(id.clone());
        id
    }

    pub fn finish(self) -> Catalog {
        Catalog {
            groups: self.groups,
        }
    }
}

/// Build the catalog for a run, one artifact at a time.
pub fn build_catalog(artifacts: &[Artifact], config: &SiteConfig) -> Catalog {
    let progress = Progress::new("catalog", artifacts.len());
    let mut builder = CatalogBuilder::new(config);

    for artifact in artifacts {
        builder.add(artifact);
        progress.inc();
    }

    progress.finish();
    builder.finish()
}
