use std::fs;
use std::path::{Component, Path, PathBuf};

use axum::extract::{Path as UrlPath, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::config::AppConfig;
use crate::routes::pages;

/// GET /static/*path
///
/// Serves a file from `<assets_dir>/static` with a Content-Type guessed
/// from the file extension (text/plain when unrecognized). Anything that
/// does not resolve to a plain file below the static root gets the 404
/// page.
pub async fn asset(State(cfg): State<AppConfig>, UrlPath(rest): UrlPath<String>) -> Response {
    let Some(path) = resolve(&cfg.assets_dir, &rest) else {
        tracing::warn!("Rejecting static path {rest:?}");
        return pages::not_found(&cfg);
    };

    match fs::read(&path) {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&path)
                .first_raw()
                .unwrap_or("text/plain");

            ([(header::CONTENT_TYPE, mime)], bytes).into_response()
        }
        Err(_) => pages::not_found(&cfg),
    }
}

/// Join the request path onto the static root. Only plain relative
/// components are accepted, so the request cannot escape the root.
fn resolve(assets_dir: &str, rest: &str) -> Option<PathBuf> {
    let rel = Path::new(rest);

    if rel.components().any(|c| !matches!(c, Component::Normal(_))) {
        return None;
    }

    Some(Path::new(assets_dir).join("static").join(rel))
}
