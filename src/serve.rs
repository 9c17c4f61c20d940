//! Local preview server.
//!
//! Serves the build output with `tiny_http`:
//!
//! - Static files from `[build].output`
//! - The catalog page for directory requests
//! - Graceful shutdown on Ctrl+C
//!
//! The port is bound before building so catalog links can point at the
//! address actually in use.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, anyhow};
use std::{
    borrow::Cow,
    fs,
    io::Cursor,
    net::{IpAddr, SocketAddr},
    path::{Component, Path, PathBuf},
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

// ============================================================================
// Server Entry Point
// ============================================================================

/// Bind to the configured interface and port, retrying successive ports.
pub fn bind(config: &SiteConfig) -> Result<(Server, SocketAddr)> {
    let interface: IpAddr = config
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid interface `{}`", config.serve.interface))?;
    try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)
}

/// Serve the output directory until Ctrl+C.
pub fn serve_site(server: Server, addr: SocketAddr, config: &SiteConfig) -> Result<()> {
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, config) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(
    interface: IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map_or_else(|| "no attempts made".to_owned(), |e| e.to_string())
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

/// Handle a single HTTP request.
///
/// Resolution order:
/// 1. Exact file match → serve file
/// 2. Directory with the catalog page → serve it
/// 3. Anything else → 404
fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    match resolve_path(&config.build.output, request.url(), &config.build.index) {
        Some(path) => serve_file(request, &path),
        None => serve_not_found(request),
    }
}

/// Map a request URL to a file under `root`.
///
/// Query strings are ignored and `..` components are rejected.
fn resolve_path(root: &Path, url: &str, index: &str) -> Option<PathBuf> {
    let url_path = url.split(['?', '#']).next().unwrap_or_default();
    let decoded = urlencoding::decode(url_path).unwrap_or(Cow::Borrowed(url_path));
    let request_path = Path::new(decoded.trim_matches('/'));

    if request_path
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }

    let local_path = root.join(request_path);
    if local_path.is_file() {
        return Some(local_path);
    }

    let index_path = local_path.join(index);
    index_path.is_file().then_some(index_path)
}

// ============================================================================
// Response Helpers
// ============================================================================

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let header = Header::from_bytes("Content-Type", guess_content_type(path))
        .map_err(|()| anyhow!("Invalid content type header"))?;

    request.respond(Response::from_data(content).with_header(header))?;
    Ok(())
}

/// Serve 404 Not Found response.
fn serve_not_found(request: Request) -> Result<()> {
    let header = Header::from_bytes("Content-Type", "text/plain")
        .map_err(|()| anyhow!("Invalid content type header"))?;
    let response = Response::new(
        StatusCode(404),
        vec![header],
        Cursor::new("404 Not Found"),
        Some(13),
        None,
    );
    request.respond(response)?;
    Ok(())
}

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("games")).unwrap();
        fs::write(dir.path().join("index.html"), "catalog").unwrap();
        fs::write(dir.path().join("games/snake game.html"), "snake").unwrap();
        dir
    }

    #[test]
    fn test_resolve_root_serves_catalog() {
        let dir = site();
        let path = resolve_path(dir.path(), "/", "index.html").unwrap();
        assert_eq!(path, dir.path().join("index.html"));
    }

    #[test]
    fn test_resolve_decodes_and_strips_query() {
        let dir = site();
        let path = resolve_path(dir.path(), "/games/snake%20game.html?t=1", "index.html").unwrap();
        assert_eq!(path, dir.path().join("games/snake game.html"));
    }

    #[test]
    fn test_resolve_directory_without_index() {
        let dir = site();
        assert_eq!(resolve_path(dir.path(), "/games/", "index.html"), None);
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let dir = site();
        assert_eq!(resolve_path(dir.path(), "/../etc/passwd", "index.html"), None);
        assert_eq!(resolve_path(dir.path(), "/games/%2e%2e/index.html", "index.html"), None);
    }

    #[test]
    fn test_resolve_missing() {
        let dir = site();
        assert_eq!(resolve_path(dir.path(), "/nope.html", "index.html"), None);
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type(Path::new("a.HTML")), "text/html; charset=utf-8");
        assert_eq!(guess_content_type(Path::new("a.htm")), "text/html; charset=utf-8");
        assert_eq!(guess_content_type(Path::new("a.bin")), "application/octet-stream");
        assert_eq!(guess_content_type(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn test_try_bind_port_skips_busy_port() {
        let busy = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = busy.local_addr().unwrap().port();
        let localhost: IpAddr = "127.0.0.1".parse().unwrap();

        let (_server, addr) = try_bind_port(localhost, port, 5).unwrap();
        assert_ne!(addr.port(), port);
    }
}
