use axum::routing::get;
use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::AppConfig;
use crate::routes::{pages, statics, submit};

/// Build the complete Axum application:
/// - GET /              landing page
/// - GET /message.html  confirmation page
/// - GET /static/*path  static assets
/// - POST anywhere      form submission, relayed to the socket server
/// - anything else      404 error page
///
/// `cfg` is the router state; every handler reads paths and the socket
/// endpoint from it.
pub fn build_app(cfg: AppConfig) -> Router {
    Router::new()
        .route("/", get(pages::index).post(submit::submit))
        .route("/message.html", get(pages::message).post(submit::submit))
        .route("/static/*path", get(statics::asset).post(submit::submit))
        .fallback(pages::unmatched)
        .with_state(cfg)
        // Logging middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
