//! Title, description and category extraction.
//!
//! Each field is resolved by a fallback chain: an ordered slice of pure rule
//! functions evaluated until one yields a non-empty value. The last link of
//! every chain is infallible, so extraction never fails.
//!
//! | Field       | Chain (first non-empty wins)                                           |
//! |-------------|------------------------------------------------------------------------|
//! | title       | `<title>` → `<meta name=description>` → `<h1>` → filename              |
//! | description | `<meta name=description>` → `<!-- desc: -->` → `<p>` → generic text    |
//! | category    | `<meta name=category>` → `<meta name=keywords>` → `<!-- category: -->` → parent dir → `Other` |
//!
//! Matching is pattern based, not a DOM parse: only the first occurrence in
//! document order is considered. Basic entities are decoded, so values are
//! plain text; [`Metadata::escaped`] gives the html-safe form. Descriptions
//! are capped at [`DESCRIPTION_MAX_CHARS`] whichever rule supplied them.

use super::artifact::Artifact;
use crate::utils::escape::{decode_entities, escape_html};
use regex::Regex;
use std::sync::LazyLock;

/// Description used when an artifact offers nothing better.
pub const DEFAULT_DESCRIPTION: &str = "click to view this project";

/// Category used when an artifact offers nothing better.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Maximum number of visible characters kept from a description.
pub const DESCRIPTION_MAX_CHARS: usize = 100;

/// Marker appended to a truncated description.
pub const ELLIPSIS: &str = "...";

// ============================================================================
// Patterns
// ============================================================================

static RE_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").unwrap());

static RE_H1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1\b[^>]*>(.*?)</h1\s*>").unwrap());

static RE_P: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p\b[^>]*>(.*?)</p\s*>").unwrap());

static RE_META: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").unwrap());

static RE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)([a-z][a-z0-9_:.-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).unwrap()
});

static RE_DESC_SENTINEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--\s*desc:\s*([^\n]*?)\s*-->").unwrap());

static RE_CATEGORY_SENTINEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--\s*category:\s*([^\n]*?)\s*-->").unwrap());

static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

// ============================================================================
// Types
// ============================================================================

/// Resolved plain-text metadata of one artifact. All fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub category: String,
}

impl Metadata {
    /// Html-escaped copy, ready to embed in the page.
    pub fn escaped(&self) -> Self {
        Self {
            title: escape_html(&self.title).into_owned(),
            description: escape_html(&self.description).into_owned(),
            category: escape_html(&self.category).into_owned(),
        }
    }
}

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct Source<'a> {
    /// Raw artifact text
    pub html: &'a str,
    /// File name without extension
    pub stem: &'a str,
    /// Immediate parent directory, `None` for files at the content root
    pub parent_dir: Option<&'a str>,
}

impl<'a> Source<'a> {
    pub fn new(html: &'a str, stem: &'a str, parent_dir: Option<&'a str>) -> Self {
        Self {
            html,
            stem,
            parent_dir,
        }
    }
}

/// One link of a fallback chain.
type Rule = fn(&Source<'_>) -> Option<String>;

const TITLE_CHAIN: &[Rule] = &[title_element, meta_description, first_heading];

const DESCRIPTION_CHAIN: &[Rule] = &[meta_description, desc_sentinel, first_paragraph];

const CATEGORY_CHAIN: &[Rule] = &[
    meta_category,
    first_keyword,
    category_sentinel,
    parent_directory,
];

// ============================================================================
// Public API
// ============================================================================

/// Extract metadata from a loaded artifact.
pub fn extract_artifact(artifact: &Artifact) -> Metadata {
    let html = artifact.text();
    extract(&Source::new(&html, artifact.stem(), artifact.parent_dir()))
}

/// Run all three fallback chains. Never fails.
pub fn extract(src: &Source<'_>) -> Metadata {
    let title = resolve(TITLE_CHAIN, src).unwrap_or_else(|| title_from_filename(src.stem));
    let description = resolve(DESCRIPTION_CHAIN, src).map_or_else(
        || DEFAULT_DESCRIPTION.to_owned(),
        |text| truncate_chars(&text, DESCRIPTION_MAX_CHARS),
    );
    let category = resolve(CATEGORY_CHAIN, src).unwrap_or_else(|| DEFAULT_CATEGORY.to_owned());

    Metadata {
        title,
        description,
        category,
    }
}

/// Evaluate rules in order, returning the first non-empty decoded result.
fn resolve(chain: &[Rule], src: &Source<'_>) -> Option<String> {
    chain.iter().find_map(|rule| {
        rule(src)
            .map(|value| decode_entities(&value).into_owned())
            .filter(|value| !value.is_empty())
    })
}

// ============================================================================
// Rules
// ============================================================================

fn title_element(src: &Source<'_>) -> Option<String> {
    first_capture(&RE_TITLE, src.html).map(|text| text.trim().to_owned())
}

fn meta_description(src: &Source<'_>) -> Option<String> {
    meta_content(src.html, "description")
}

fn first_heading(src: &Source<'_>) -> Option<String> {
    first_capture(&RE_H1, src.html).map(strip_tags)
}

fn desc_sentinel(src: &Source<'_>) -> Option<String> {
    first_capture(&RE_DESC_SENTINEL, src.html).map(str::to_owned)
}

fn first_paragraph(src: &Source<'_>) -> Option<String> {
    first_capture(&RE_P, src.html).map(strip_tags)
}

fn meta_category(src: &Source<'_>) -> Option<String> {
    meta_content(src.html, "category")
}

fn first_keyword(src: &Source<'_>) -> Option<String> {
    let keywords = meta_content(src.html, "keywords")?;
    keywords.split(',').next().map(|k| k.trim().to_owned())
}

fn category_sentinel(src: &Source<'_>) -> Option<String> {
    first_capture(&RE_CATEGORY_SENTINEL, src.html).map(|text| text.trim().to_owned())
}

fn parent_directory(src: &Source<'_>) -> Option<String> {
    src.parent_dir.map(capitalize_first)
}

// ============================================================================
// Helpers
// ============================================================================

/// First capture group of the first match.
fn first_capture<'h>(re: &Regex, html: &'h str) -> Option<&'h str> {
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Trimmed `content` of the first `<meta name="...">` with the given name.
///
/// Attribute order and quoting style do not matter; the name is compared
/// case-insensitively.
fn meta_content(html: &str, name: &str) -> Option<String> {
    RE_META.find_iter(html).find_map(|tag| {
        let mut tag_name = None;
        let mut content = None;
        for caps in RE_ATTR.captures_iter(tag.as_str()) {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());
            match caps[1].to_ascii_lowercase().as_str() {
                "name" => tag_name = Some(value),
                "content" => content = Some(value),
                _ => {}
            }
        }
        tag_name
            .filter(|n| n.trim().eq_ignore_ascii_case(name))
            .and(content)
            .map(|c| c.trim().to_owned())
    })
}

/// Remove nested markup and collapse whitespace.
///
/// Tags vanish without leaving a gap: `Uni<b>code</b>` → `Unicode`.
fn strip_tags(fragment: &str) -> String {
    RE_TAG
        .replace_all(fragment, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keep at most `max` characters, appending [`ELLIPSIS`] if anything was cut.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_owned(),
    }
}

/// Uppercase the first character, keep the rest.
fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `my-cool_tool` → `My Cool Tool`
fn title_from_filename(stem: &str) -> String {
    let title = stem
        .split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() {
        "Untitled".to_owned()
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(html: &str) -> Metadata {
        extract(&Source::new(html, "my-cool_tool", None))
    }

    fn run_in(html: &str, parent: &str) -> Metadata {
        extract(&Source::new(html, "page", Some(parent)))
    }

    // ------------------------------------------------------------------------
    // Title chain
    // ------------------------------------------------------------------------

    #[test]
    fn test_title_from_title_element() {
        let meta = run("<html><head><title>Pomodoro Timer</title></head><h1>Other</h1></html>");
        assert_eq!(meta.title, "Pomodoro Timer");
    }

    #[test]
    fn test_title_is_escaped() {
        let meta = run(r#"<title>Tom & Jerry's "<Game>"</title>"#);
        assert_eq!(meta.title, r#"Tom & Jerry's "<Game>""#);
        assert_eq!(
            meta.escaped().title,
            "Tom &amp; Jerry&#39;s &quot;&lt;Game&gt;&quot;"
        );
    }

    #[test]
    fn test_source_entities_decoded_once() {
        let meta = run("<title>Tom &amp; Jerry</title><p>a &lt;b&gt; tag</p>");
        assert_eq!(meta.title, "Tom & Jerry");
        assert_eq!(meta.description, "a <b> tag");

        let escaped = meta.escaped();
        assert_eq!(escaped.title, "Tom &amp; Jerry");
        assert_eq!(escaped.description, "a &lt;b&gt; tag");
    }

    #[test]
    fn test_title_first_match_only() {
        let meta = run("<title>First</title><title>Second</title>");
        assert_eq!(meta.title, "First");
    }

    #[test]
    fn test_title_case_insensitive_tag() {
        let meta = run("<TITLE lang=\"en\">Loud</TITLE>");
        assert_eq!(meta.title, "Loud");
    }

    #[test]
    fn test_empty_title_falls_through() {
        let meta = run("<title>   </title><h1>Heading</h1>");
        assert_eq!(meta.title, "Heading");
    }

    #[test]
    fn test_title_from_meta_description() {
        let meta = run(r#"<meta name="description" content="Converts units"><h1>Heading</h1>"#);
        assert_eq!(meta.title, "Converts units");
    }

    #[test]
    fn test_title_from_h1_with_attributes_and_markup() {
        let meta = run(r#"<h1 class="big" id="t">Unit <em>Converter</em></h1>"#);
        assert_eq!(meta.title, "Unit Converter");
    }

    #[test]
    fn test_title_from_filename() {
        let meta = run("<html><body>nothing here</body></html>");
        assert_eq!(meta.title, "My Cool Tool");
    }

    #[test]
    fn test_title_from_filename_keeps_rest_of_word() {
        assert_eq!(title_from_filename("json-to-CSV"), "Json To CSV");
        assert_eq!(title_from_filename("a--b"), "A B");
        assert_eq!(title_from_filename(""), "Untitled");
        assert_eq!(title_from_filename("über_tool"), "Über Tool");
    }

    // ------------------------------------------------------------------------
    // Description chain
    // ------------------------------------------------------------------------

    #[test]
    fn test_description_from_meta() {
        let meta = run(
            r#"<meta content="Track your habits" name="description"><!-- desc: ignored --><p>x</p>"#,
        );
        assert_eq!(meta.description, "Track your habits");
    }

    #[test]
    fn test_description_meta_single_quotes() {
        let meta = run("<meta name='Description' content='Quoted'>");
        assert_eq!(meta.description, "Quoted");
    }

    #[test]
    fn test_description_from_sentinel() {
        let meta = run("<!-- desc: A tiny drum machine --><p>Paragraph</p>");
        assert_eq!(meta.description, "A tiny drum machine");
    }

    #[test]
    fn test_description_sentinel_is_single_line() {
        let meta = run("<!-- desc: spans\nlines --><p>Paragraph</p>");
        assert_eq!(meta.description, "Paragraph");
    }

    #[test]
    fn test_description_from_paragraph_strips_markup() {
        let meta = run("<p class=\"lead\">Split <b>bills</b>\n   fairly</p>");
        assert_eq!(meta.description, "Split bills fairly");
    }

    #[test]
    fn test_description_truncated_paragraph() {
        let text: String = "abcdefghij".repeat(14);
        assert_eq!(text.chars().count(), 140);

        let meta = run(&format!("<p>{text}</p>"));
        assert_eq!(meta.description, format!("{}...", &text[..100]));
    }

    #[test]
    fn test_description_exactly_max_not_truncated() {
        let text = "x".repeat(100);
        let meta = run(&format!("<p>{text}</p>"));
        assert_eq!(meta.description, text);
    }

    #[test]
    fn test_description_truncation_counts_chars() {
        let text = "ñ".repeat(120);
        let meta = run(&format!("<p>{text}</p>"));
        assert_eq!(meta.description, format!("{}...", "ñ".repeat(100)));
    }

    #[test]
    fn test_description_meta_truncated() {
        let text = "m".repeat(180);
        let meta = run(&format!(r#"<meta name="description" content="{text}">"#));
        assert_eq!(meta.description, format!("{}...", "m".repeat(100)));
        assert_eq!(meta.description.chars().count(), 103);
    }

    #[test]
    fn test_description_sentinel_truncated() {
        let text = "s".repeat(150);
        let meta = run(&format!("<!-- desc: {text} -->"));
        assert_eq!(meta.description, format!("{}...", "s".repeat(100)));
    }

    #[test]
    fn test_description_truncation_counts_decoded_chars() {
        // 100 visible characters, 500 bytes of entities
        let text = "&amp;".repeat(100);
        let meta = run(&format!("<p>{text}</p>"));
        assert_eq!(meta.description, "&".repeat(100));
    }

    #[test]
    fn test_description_default() {
        let meta = run("<title>Only a title</title>");
        assert_eq!(meta.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_p_does_not_match_other_tags() {
        let meta = run("<pre>code</pre><param name=x>");
        assert_eq!(meta.description, DEFAULT_DESCRIPTION);
    }

    // ------------------------------------------------------------------------
    // Category chain
    // ------------------------------------------------------------------------

    #[test]
    fn test_category_from_meta() {
        let meta = run_in(
            r#"<meta name="keywords" content="x"><meta name="category" content=" Games ">"#,
            "misc",
        );
        assert_eq!(meta.category, "Games");
    }

    #[test]
    fn test_category_from_keywords() {
        let meta = run_in(r#"<meta name="keywords" content="  Finance , budget, money">"#, "misc");
        assert_eq!(meta.category, "Finance");
    }

    #[test]
    fn test_category_from_sentinel() {
        let meta = run_in("<!-- category: Health -->", "misc");
        assert_eq!(meta.category, "Health");
    }

    #[test]
    fn test_category_from_parent_dir() {
        let meta = run_in("<p>no hints</p>", "utilities");
        assert_eq!(meta.category, "Utilities");
    }

    #[test]
    fn test_category_default_at_root() {
        let meta = run("<p>no hints</p>");
        assert_eq!(meta.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_category_is_case_sensitive() {
        let meta = run(r#"<meta name="category" content="tools">"#);
        assert_eq!(meta.category, "tools");
    }

    #[test]
    fn test_empty_keywords_fall_through() {
        let meta = run_in(r#"<meta name="keywords" content=" , b">"#, "games");
        assert_eq!(meta.category, "Games");
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    #[test]
    fn test_strip_tags_joins_split_words() {
        assert_eq!(strip_tags("Uni<b>code</b>"), "Unicode");
        assert_eq!(strip_tags("<em> a </em>\n b"), "a b");
    }

    #[test]
    fn test_category_is_plain_text() {
        let meta = run(r#"<meta name="category" content="Food &amp; Drink">"#);
        assert_eq!(meta.category, "Food & Drink");
        assert_eq!(meta.escaped().category, "Food &amp; Drink");
    }

    #[test]
    fn test_meta_content_ignores_other_meta() {
        let html = r#"<meta charset="utf-8"><meta property="og:description" content="og"><meta name=description content=bare>"#;
        assert_eq!(meta_content(html, "description"), Some("bare".to_owned()));
    }

    #[test]
    fn test_meta_without_content() {
        assert_eq!(meta_content(r#"<meta name="description">"#, "description"), None);
    }

    #[test]
    fn test_extract_artifact() {
        let artifact = Artifact::from_parts(
            "finance/loan-calculator.html",
            "<body><p>Monthly payments</p></body>",
            None,
        );
        let meta = extract_artifact(&artifact);
        assert_eq!(meta.title, "Loan Calculator");
        assert_eq!(meta.description, "Monthly payments");
        assert_eq!(meta.category, "Finance");
    }
}
