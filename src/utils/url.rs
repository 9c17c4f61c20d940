//! URL construction for catalog links.

/// Join a base URL and a relative artifact path with exactly one `/`.
///
/// Path segments are percent-encoded; `/` between them is kept.
/// Without a base URL the encoded relative path is returned as-is,
/// which links relative to the generated page.
///
/// | base | relative | result |
/// |------|----------|--------|
/// | `https://x.io` | `a/b.html` | `https://x.io/a/b.html` |
/// | `https://x.io/` | `a/b.html` | `https://x.io/a/b.html` |
/// | none | `my tool.html` | `my%20tool.html` |
pub fn join_url(base: Option<&str>, relative: &str) -> String {
    let path = encode_path(relative.trim_start_matches('/'));
    match base.map(|b| b.trim_end_matches('/')) {
        Some(base) if !base.is_empty() => format!("{base}/{path}"),
        _ => path,
    }
}

/// Percent-encode each `/`-separated segment of a path.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
