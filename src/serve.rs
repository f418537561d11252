//! Development server.
//!
//! Serves the build output with `tiny_http`:
//!
//! - static files with a content type guessed from the extension
//! - `index.html` resolution for directory routes
//! - a plain listing for directories without an index (e.g. `/images/`)
//! - the generated `404.html` with status 404 for everything else
//! - optional watcher thread that rebuilds on change
//! - Ctrl+C shutdown
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │   Main Thread   │     │  Watcher Thread  │
//! │  (HTTP Server)  │     │  (File Monitor)  │
//! └────────┬────────┘     └────────┬─────────┘
//!          ▼                       ▼
//!    serve requests          rebuild into
//!    from cfg().output       cfg().output
//! ```

use crate::{
    config::{SiteConfig, cfg},
    log,
    render::NOT_FOUND_ROUTE,
    watch::watch_for_changes_blocking,
};
use anyhow::{Context, Result, anyhow};
use std::{
    fs,
    net::{IpAddr, SocketAddr},
    path::{Component, Path, PathBuf},
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Directory listing HTML template (embedded at compile time)
const DIRECTORY_TEMPLATE: &str = include_str!("embed/serve/directory.html");

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Start the development server. Blocks until Ctrl+C.
pub fn serve_site() -> Result<()> {
    let c = cfg();
    let interface: IpAddr = c
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid [serve.interface] `{}`", c.serve.interface))?;

    let (server, addr) = try_bind_port(interface, c.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    if c.serve.watch {
        std::thread::spawn(move || {
            if let Err(err) = watch_for_changes_blocking() {
                log!("watch"; "{err}");
            }
        });
    }

    for request in server.incoming_requests() {
        // Fresh config per request to pick up hot reloads
        if let Err(e) = handle_request(request, &cfg()) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_err = None;
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
            Err(e) => last_err = Some(e),
        }
    }
    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_err.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

/// What a request path maps to under the output directory.
#[derive(Debug, PartialEq, Eq)]
enum Resolved {
    File(PathBuf),
    Listing(PathBuf),
    NotFound,
}

/// Resolution order: exact file, directory `index.html`, directory listing,
/// not found. Paths escaping the root are not found.
fn resolve(root: &Path, request_path: &str) -> Resolved {
    let relative = Path::new(request_path);
    if relative.components().any(|c| !matches!(c, Component::Normal(_))) {
        return Resolved::NotFound;
    }

    let local = root.join(relative);
    if local.is_file() {
        return Resolved::File(local);
    }
    if local.is_dir() {
        let index = local.join("index.html");
        return if index.is_file() {
            Resolved::File(index)
        } else {
            Resolved::Listing(local)
        };
    }
    Resolved::NotFound
}

/// Decoded request path without query string or surrounding slashes.
fn request_path(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let decoded = urlencoding::decode(path).map(|p| p.into_owned()).unwrap_or_default();
    decoded.trim_matches('/').to_owned()
}

fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    let root = &config.build.output;
    let path = request_path(request.url());

    match resolve(root, &path) {
        Resolved::File(file) => serve_file(request, &file, StatusCode(200)),
        Resolved::Listing(dir) => match directory_listing(&dir, &path) {
            Ok(html) => respond(request, html.into_bytes(), "text/html; charset=utf-8", StatusCode(200)),
            Err(_) => serve_not_found(request, root),
        },
        Resolved::NotFound => serve_not_found(request, root),
    }
}

// ============================================================================
// Response Helpers
// ============================================================================

fn respond(request: Request, body: Vec<u8>, content_type: &str, status: StatusCode) -> Result<()> {
    let header = Header::from_bytes("Content-Type", content_type)
        .map_err(|()| anyhow!("invalid content type `{content_type}`"))?;
    let response = Response::from_data(body).with_status_code(status).with_header(header);
    request.respond(response)?;
    Ok(())
}

fn serve_file(request: Request, path: &Path, status: StatusCode) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    respond(request, content, guess_content_type(path), status)
}

/// The generated not-found page, or plain text when it was never built.
fn serve_not_found(request: Request, root: &Path) -> Result<()> {
    let page = root.join(NOT_FOUND_ROUTE.trim_start_matches('/'));
    if page.is_file() {
        return serve_file(request, &page, StatusCode(404));
    }
    respond(request, b"404 Not Found".to_vec(), "text/plain", StatusCode(404))
}

/// Guess MIME content type from file extension.
fn guess_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "xml" => "application/xml; charset=utf-8",

        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "ico" => "image/x-icon",

        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",

        "woff" => "font/woff",
        "woff2" => "font/woff2",

        "pdf" => "application/pdf",
        "txt" => "text/plain; charset=utf-8",

        _ => "application/octet-stream",
    }
}

/// Browsable listing of a directory without an index page.
#[allow(clippy::literal_string_with_formatting_args)]
fn directory_listing(dir: &Path, request_path: &str) -> std::io::Result<String> {
    let mut names: Vec<(String, bool)> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_owned();
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            (!name.starts_with('.')).then_some((name, is_dir))
        })
        .collect();
    names.sort_unstable();

    let entries: Vec<String> = names
        .iter()
        .map(|(name, is_dir)| {
            let icon = if *is_dir { "📁" } else { "📄" };
            let href = format!("/{request_path}/{}", urlencoding::encode(name));
            format!(
                r#"<li><span class="icon">{icon}</span><a href="{href}">{}</a></li>"#,
                crate::render::html::esc(name)
            )
        })
        .collect();

    let parent = Path::new(request_path)
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent_link = format!(
        r#"<li class="parent"><span class="icon">📂</span><a href="/{parent}">..</a></li>"#
    );

    Ok(DIRECTORY_TEMPLATE
        .replace("{path}", request_path)
        .replace("{parent_link}", &parent_link)
        .replace("{entries}", &entries.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn output() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("projects/rover")).unwrap();
        fs::create_dir_all(dir.path().join("images")).unwrap();
        fs::write(dir.path().join("index.html"), "home").unwrap();
        fs::write(dir.path().join("projects/rover/index.html"), "rover").unwrap();
        fs::write(dir.path().join("images/me.jpg"), "jpg").unwrap();
        dir
    }

    #[test]
    fn test_request_path() {
        assert_eq!(request_path("/projects/rover/?t=1"), "projects/rover");
        assert_eq!(request_path("/resumes/My%20CV.pdf"), "resumes/My CV.pdf");
        assert_eq!(request_path("/"), "");
    }

    #[test]
    fn test_resolve() {
        let dir = output();
        let root = dir.path();

        assert_eq!(resolve(root, ""), Resolved::File(root.join("index.html")));
        assert_eq!(
            resolve(root, "projects/rover"),
            Resolved::File(root.join("projects/rover/index.html"))
        );
        assert_eq!(resolve(root, "images/me.jpg"), Resolved::File(root.join("images/me.jpg")));
        assert_eq!(resolve(root, "images"), Resolved::Listing(root.join("images")));
        assert_eq!(resolve(root, "projects/missing"), Resolved::NotFound);
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let dir = output();
        assert_eq!(resolve(&dir.path().join("projects"), "../index.html"), Resolved::NotFound);
    }

    #[test]
    fn test_content_type() {
        assert_eq!(guess_content_type(Path::new("a.PDF")), "application/pdf");
        assert_eq!(guess_content_type(Path::new("v.mp4")), "video/mp4");
        assert_eq!(guess_content_type(Path::new("x")), "application/octet-stream");
    }

    #[test]
    fn test_directory_listing() {
        let dir = output();
        fs::write(dir.path().join("images/.hidden"), "").unwrap();
        fs::write(dir.path().join("images/a b.png"), "").unwrap();

        let html = directory_listing(&dir.path().join("images"), "images").unwrap();
        assert!(html.contains(r#"href="/images/a%20b.png""#));
        assert!(html.contains(r#"href="/images/me.jpg""#));
        assert!(!html.contains(".hidden"));
        assert!(html.contains(r#"<a href="/">..</a>"#));
    }
}
