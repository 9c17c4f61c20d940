//! Catalog page rendering.
//!
//! The page is one self-contained html document built from an embedded
//! template. Records are embedded as a JSON array in group order; the
//! client script regroups, searches and filters them in the browser.
//!
//! # Placeholders
//!
//! | Placeholder          | Value                                         |
//! |----------------------|-----------------------------------------------|
//! | `{lang}`             | `[base].language`                             |
//! | `{title}`            | `[base].title`, escaped                       |
//! | `{description}`      | `[base].description`, escaped                 |
//! | `{count}`            | number of records                             |
//! | `{category_options}` | one `<option>` per distinct category          |
//! | `{empty_hidden}`     | `hidden` unless the catalog is empty          |
//! | `{records}`          | record JSON, safe inside `<script>`           |

use crate::{
    catalog::Catalog,
    config::SiteConfig,
    utils::escape::{escape_html, escape_script},
};
use anyhow::{Context, Result};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Catalog page template (embedded at compile time)
const CATALOG_TEMPLATE: &str = include_str!("embed/catalog.html");

static RE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").unwrap());

/// Render the catalog into a complete html page.
pub fn render(catalog: &Catalog, config: &SiteConfig) -> Result<String> {
    let records: Vec<_> = catalog.records().collect();
    let json = serde_json::to_string(&records).context("Failed to serialize catalog records")?;

    let title = escape_html(&config.base.title);
    let description = escape_html(&config.base.description);
    let language = escape_html(&config.base.language);
    let count = catalog.len().to_string();
    let options = category_options(catalog);
    let records = escape_script(&json);
    let empty_hidden = if catalog.is_empty() { "" } else { "hidden" };

    Ok(fill(CATALOG_TEMPLATE, |key| match key {
        "lang" => Some(language.as_ref()),
        "title" => Some(title.as_ref()),
        "description" => Some(description.as_ref()),
        "count" => Some(count.as_str()),
        "category_options" => Some(options.as_str()),
        "empty_hidden" => Some(empty_hidden),
        "records" => Some(records.as_str()),
        _ => None,
    }))
}

/// `<option>` elements for the category selector, in group order.
///
/// Category names are already escaped by the catalog builder.
fn category_options(catalog: &Catalog) -> String {
    catalog
        .categories()
        .map(|category| format!(r#"<option value="{category}">{category}</option>"#))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Substitute `{key}` placeholders in one pass.
///
/// Substituted text is never rescanned, and unknown keys are left as written.
fn fill<'v>(template: &str, lookup: impl Fn(&str) -> Option<&'v str>) -> String {
    RE_PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            lookup(&caps[1]).map_or_else(|| caps[0].to_owned(), str::to_owned)
        })
        .into_owned()
}
