//! Text escaping for generated HTML.

use regex::{Captures, Regex};
use std::{borrow::Cow, sync::LazyLock};

static RE_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(amp|lt|gt|quot|apos|#39|#x27);").unwrap());

/// Decode the basic named entities and the apostrophe forms, in one pass.
///
/// `&amp;lt;` becomes `&lt;`, never `<`. Anything else is left as written.
pub fn decode_entities(s: &str) -> Cow<'_, str> {
    RE_ENTITY.replace_all(s, |caps: &Captures| match &caps[1] {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        _ => "'",
    })
}

/// Escape the five HTML-significant characters.
///
/// Returns `Cow::Borrowed` when nothing needs escaping.
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Make serialized JSON safe to place inside a `<script>` element.
///
/// A literal `</` would close the script early, so it becomes `<\/`,
/// which every JSON parser reads back as the same string.
pub fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}
