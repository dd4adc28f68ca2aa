//! Static HTTP server over the build output directory.
//!
//! Request resolution order: exact file, `dir/index.html`, directory
//! listing, 404. Content types come from the file extension; unknown
//! extensions fall back to `application/octet-stream`.

use std::fs;
use std::io::Cursor;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use tiny_http::{Header, Request, Response, Server, StatusCode};

use crate::config::{SiteConfig, cfg};
use crate::core::{is_shutdown, register_server};
use crate::embed::serve::{DIRECTORY_HTML, WELCOME_HTML};
use crate::log;

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Bind, register for graceful shutdown and handle requests until Ctrl+C.
pub fn run() -> Result<()> {
    let c = cfg();
    let (server, addr) = try_bind_port(c.serve.interface, c.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    // The Ctrl+C handler unblocks the accept loop through this handle.
    register_server(Arc::clone(&server));

    log!("serve"; "http://{addr}");

    for request in server.incoming_requests() {
        if is_shutdown() {
            break;
        }
        // Re-load config per request so watch-mode reloads take effect.
        if let Err(e) = handle_request(request, &cfg()) {
            log!("serve"; "request error: {e:#}");
        }
    }

    Ok(())
}

/// Try to bind to a port, walking upward when the port is taken.
fn try_bind_port(
    interface: IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr)> {
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {base_port} in use, using {port} instead");
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < max_retries => continue,
            Err(e) => {
                return Err(anyhow!(
                    "failed to bind after {max_retries} attempts (ports {base_port}-{port}): {e}"
                ));
            }
        }
    }
    unreachable!()
}

/// Handle a single HTTP request.
fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    let serve_root = &config.build.output;

    let url = request.url();
    let decoded = percent_encoding::percent_decode_str(url)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| url.to_string());

    // Strip the query string (cache busters like "?t=123") before resolving.
    let without_query = decoded.split('?').next().unwrap_or(&decoded);
    let request_path = without_query.trim_matches('/');
    let local_path = serve_root.join(request_path);

    if local_path.is_file() {
        return serve_file(request, &local_path);
    }

    if local_path.is_dir() {
        let index_path = local_path.join("index.html");
        if index_path.is_file() {
            return serve_file(request, &index_path);
        }
        if let Ok(listing) = directory_listing(&local_path, request_path) {
            return serve_html(request, listing);
        }
    }

    serve_not_found(request)
}

/// Serve a file with the content type its extension suggests.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let content_type = guess_content_type(path);

    let response = Response::from_data(content)
        .with_header(Header::from_bytes("Content-Type", content_type).unwrap());

    request.respond(response)?;
    Ok(())
}

fn serve_html(request: Request, content: String) -> Result<()> {
    let response = Response::from_string(content)
        .with_header(Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap());
    request.respond(response)?;
    Ok(())
}

fn serve_not_found(request: Request) -> Result<()> {
    let response = Response::new(
        StatusCode(404),
        vec![Header::from_bytes("Content-Type", "text/plain").unwrap()],
        Cursor::new("404 Not Found"),
        Some(13),
        None,
    );
    request.respond(response)?;
    Ok(())
}

/// Guess MIME content type from file extension.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        // Web content
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",

        // Images
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("ico") => "image/x-icon",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Documents
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",
        Some("md") => "text/markdown; charset=utf-8",

        _ => "application/octet-stream",
    }
}

/// Generate an HTML directory listing.
///
/// Shows directories and `.html` files, skips hidden entries, and links
/// back to the parent when not at the root. An empty output directory
/// renders the welcome page instead.
fn directory_listing(dir_path: &PathBuf, request_path: &str) -> std::io::Result<String> {
    let mut entries: Vec<(String, bool)> = fs::read_dir(dir_path)?
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            let visible = !name.starts_with('.') && (is_dir || name.ends_with(".html"));
            visible.then_some((name, is_dir))
        })
        .collect();
    entries.sort();

    if entries.is_empty() {
        return Ok(WELCOME_HTML.replace("{version}", env!("CARGO_PKG_VERSION")));
    }

    let items: Vec<String> = entries
        .iter()
        .map(|(name, is_dir)| {
            let icon = if *is_dir { "📁" } else { "📄" };
            let href = if request_path.is_empty() {
                format!("/{name}")
            } else {
                format!("/{request_path}/{name}")
            };
            format!(r#"<li><span class="icon">{icon}</span><a href="{href}">{name}</a></li>"#)
        })
        .collect();

    let parent_link = if request_path.is_empty() {
        String::new()
    } else {
        let parent = Path::new(request_path)
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        let href = if parent.is_empty() {
            "/".to_string()
        } else {
            format!("/{parent}")
        };
        format!(r#"<li class="parent"><span class="icon">📂</span><a href="{href}">..</a></li>"#)
    };

    Ok(DIRECTORY_HTML
        .replace("{path}", request_path)
        .replace("{parent_link}", &parent_link)
        .replace("{entries}", &items.join("\n    ")))
}
