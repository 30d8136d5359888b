//! Embedded UI assets
//!
//! Only files under `ui/` are served, looked up through `rust-embed`.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;
use std::path::Component;

#[derive(Embed)]
#[folder = "ui"]
struct Assets;

/// Serve a static UI asset by path
pub async fn serve_static(Path(path): Path<String>) -> Response {
    match embedded_asset(&path) {
        Some(bytes) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.to_string())], bytes).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// Look up an embedded file. Paths with anything but plain name segments
/// (`..`, a root, a drive prefix) never match.
fn embedded_asset(path: &str) -> Option<Vec<u8>> {
    let relative = std::path::Path::new(path);
    let plain = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if path.is_empty() || !plain {
        return None;
    }
    Assets::get(path).map(|file| file.data.into_owned())
}

/// The embedded index.html
pub fn get_index_html() -> Option<String> {
    let content = Assets::get("index.html")?;
    String::from_utf8(content.data.into_owned()).ok()
}
