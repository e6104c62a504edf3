use std::fs;
use std::path::Path;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use crate::config::AppConfig;
use crate::routes::submit;

/// Served when error.html itself cannot be read, so the server always
/// has a 404 body to answer with.
const FALLBACK_ERROR_PAGE: &str =
    "<!DOCTYPE html><html><head><title>Not Found</title></head>\
     <body><h1>404 Not Found</h1></body></html>";

/// GET /
pub async fn index(State(cfg): State<AppConfig>) -> Response {
    page(&cfg, "index.html", StatusCode::OK)
}

/// GET /message.html
pub async fn message(State(cfg): State<AppConfig>) -> Response {
    page(&cfg, "message.html", StatusCode::OK)
}

/// Router fallback: POST to any path is a form submission, everything
/// else gets the 404 page.
pub async fn unmatched(State(cfg): State<AppConfig>, method: Method, body: Bytes) -> Response {
    if method == Method::POST {
        return submit::submit(State(cfg), body).await;
    }

    not_found(&cfg)
}

/// Serve one HTML page from the assets directory, falling back to the
/// 404 page when it cannot be read.
pub(crate) fn page(cfg: &AppConfig, file: &str, status: StatusCode) -> Response {
    let path = Path::new(&cfg.assets_dir).join(file);

    match fs::read_to_string(&path) {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            tracing::warn!("Cannot read page {}: {e}", path.display());
            not_found(cfg)
        }
    }
}

/// The 404 response with the error page body.
pub(crate) fn not_found(cfg: &AppConfig) -> Response {
    let path = Path::new(&cfg.assets_dir).join("error.html");
    let body = fs::read_to_string(&path).unwrap_or_else(|_| FALLBACK_ERROR_PAGE.to_string());

    (StatusCode::NOT_FOUND, Html(body)).into_response()
}
