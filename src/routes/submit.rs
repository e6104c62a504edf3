use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tokio::net::UdpSocket;

use crate::config::AppConfig;

/// POST handler for every path.
///
/// The raw body is forwarded unmodified as a single datagram to the
/// socket server, fire-and-forget: a relay failure is logged and the
/// client is redirected either way.
pub async fn submit(State(cfg): State<AppConfig>, body: Bytes) -> Response {
    if let Err(e) = relay(&cfg, &body).await {
        tracing::warn!("Failed to relay submission to socket server: {e}");
    }

    (StatusCode::FOUND, [(header::LOCATION, "/message.html")]).into_response()
}

/// Send one datagram from a throwaway local socket.
async fn relay(cfg: &AppConfig, data: &[u8]) -> std::io::Result<()> {
    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    socket
        .send_to(data, (cfg.socket_host.as_str(), cfg.socket_port))
        .await?;
    Ok(())
}
