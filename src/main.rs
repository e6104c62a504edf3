/*****************************************************************************************
 *
 *  Guestbook – form site with a datagram-fed JSON message store
 *  ------------------------------------------------------------
 *
 *  Two servers share one process: an HTTP server for the pages and a UDP
 *  socket server that persists relayed form submissions to storage/data.json.
 *
 *****************************************************************************************/

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::serve;
use tokio::net::{TcpListener, UdpSocket};
use tokio::task;

use tracing_subscriber::FmtSubscriber;

use guestbook::app;
use guestbook::config::AppConfig;
use guestbook::persistence;
use guestbook::services::receiver;

#[tokio::main]
async fn main() {
    //
    // ────────────────────────────────────────────────────────
    //  Load configuration and configure logging
    // ────────────────────────────────────────────────────────
    //
    let cfg = AppConfig::load_or_default();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cfg.log_filter())
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    tracing::info!("Starting guestbook…");
    tracing::info!("Loaded configuration: {:?}", cfg);

    //
    // ────────────────────────────────────────────────────────
    //  Ensure the data file exists (fatal if it cannot)
    // ────────────────────────────────────────────────────────
    //
    let storage_path = PathBuf::from(&cfg.storage_path);
    persistence::ensure_store(&storage_path).expect("Cannot initialize the data file");

    //
    // ────────────────────────────────────────────────────────
    //  Start the socket server
    // ────────────────────────────────────────────────────────
    //
    let socket = UdpSocket::bind((cfg.socket_host.as_str(), cfg.socket_port))
        .await
        .expect("Failed to bind socket server address");

    {
        let buffer_size = cfg.buffer_size;
        let storage_path = storage_path.clone();

        task::spawn(async move {
            receiver::run_socket_server(socket, buffer_size, storage_path).await;
        });
    }

    //
    // ────────────────────────────────────────────────────────
    //  Build the Axum app, bind and start listening
    // ────────────────────────────────────────────────────────
    //
    let app = app::build_app(cfg.clone());

    let addr: SocketAddr = format!("{}:{}", cfg.http_host, cfg.http_port)
        .parse()
        .expect("Invalid HTTP listen address");
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    tracing::info!("Listening on http://{}", addr);

    serve(listener, app)
        .with_graceful_shutdown(shutdown())
        .await
        .expect("Server error");
}

//
// ─────────────────────────────────────────────────────────────
//  Graceful shutdown handler
// ─────────────────────────────────────────────────────────────
//
async fn shutdown() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");

    tracing::warn!("CTRL+C received — shutting down. Goodbye.");
}
