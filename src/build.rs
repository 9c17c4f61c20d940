//! Catalog build orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── discover()        ──► every artifact read up front, sorted
//!     │                         (any read failure aborts before output)
//!     ├── build_catalog()   ──► extract → classify → fingerprint per artifact
//!     ├── render()          ──► one self-contained page
//!     ├── prepare_output()  ──► optional clean, create directory
//!     ├── copy_artifacts()  ──► mirror artifacts into output (if enabled)
//!     └── write page        ──► minified unless disabled
//! ```
//!
//! Every run starts from nothing: no state survives between runs.

use crate::{
    catalog::{Artifact, Catalog, build_catalog, discover},
    config::SiteConfig,
    log,
    logger::Progress,
    render::render,
    utils::minify::minify_page,
};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Run the full pipeline and write the catalog page.
pub fn build_site(config: &SiteConfig) -> Result<Catalog> {
    let (artifacts, catalog) = collect_catalog(config)?;

    let page = render(&catalog, config)?;
    log!("render"; "{} records in {} categories", catalog.len(), catalog.categories().count());

    let output = &config.build.output;
    prepare_output(output, &config.build.content, config.build.clean)?;

    if config.build.copy {
        copy_artifacts(&artifacts, output, &config.build.content)?;
    }

    let index_path = config.index_path();
    let page = minify_page(page.as_bytes(), config);
    fs::write(&index_path, &*page)
        .with_context(|| format!("Failed to write {}", index_path.display()))?;

    log_build_result(&catalog, &index_path);
    Ok(catalog)
}

/// Print the catalog without writing anything.
///
/// Groups go to stdout as plain text, or as the embedded JSON with `json`.
pub fn list_catalog(config: &SiteConfig, json: bool) -> Result<()> {
    let (_, catalog) = collect_catalog(config)?;

    if json {
        let records: Vec<_> = catalog.records().collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print!("{}", format_listing(&catalog));
    }
    Ok(())
}

/// Discover artifacts and build the catalog, logging each stage.
fn collect_catalog(config: &SiteConfig) -> Result<(Vec<Artifact>, Catalog)> {
    let content = &config.build.content;
    log!("scan"; "{}", content.display());

    let artifacts = discover(config)?;
    if artifacts.is_empty() {
        log!("warn"; "no artifacts found in {}", content.display());
    } else {
        log!("scan"; "found {} artifacts", artifacts.len());
    }

    let catalog = build_catalog(&artifacts, config);
    log!("catalog"; "{} categories", catalog.categories().count());

    Ok((artifacts, catalog))
}

/// Plain-text listing: one header per category, one line per record.
fn format_listing(catalog: &Catalog) -> String {
    let mut out = String::new();
    for (category, records) in catalog.groups() {
        out.push_str(&format!("{category} ({})\n", records.len()));
        for record in records {
            out.push_str(&format!(
                "  {} {}  {}  [{}]\n",
                record.icon, record.title, record.relative, record.hash
            ));
        }
    }
    out
}

/// Create the output directory, removing it first when `clean` is set.
///
/// Refuses to clean an output directory that contains the content root.
fn prepare_output(output: &Path, content: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        if content.starts_with(output) {
            bail!(
                "Refusing to clean {}: it contains the content directory",
                output.display()
            );
        }
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

/// Mirror every artifact into the output directory under its relative path.
///
/// Skipped when output and content are the same directory.
fn copy_artifacts(artifacts: &[Artifact], output: &Path, content: &Path) -> Result<()> {
    if output == content {
        return Ok(());
    }

    let progress = Progress::new("copy", artifacts.len());
    for artifact in artifacts {
        let dest = output.join(&artifact.relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&dest, &artifact.bytes)
            .with_context(|| format!("Failed to copy {}", artifact.source.display()))?;
        progress.inc();
    }
    progress.finish();

    log!("copy"; "{} artifacts", artifacts.len());
    Ok(())
}

fn log_build_result(catalog: &Catalog, index_path: &Path) {
    if catalog.is_empty() {
        log!("warn"; "catalog is empty, wrote {}", index_path.display());
    } else {
        log!("build"; "done, wrote {}", index_path.display());
    }
}
