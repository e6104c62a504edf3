use std::path::{Path, PathBuf};

use tokio::net::UdpSocket;

use crate::errors::GuestbookError;
use crate::persistence;
use crate::services::form;

/// Receive loop of the socket server. One datagram is one submission:
/// parse it, merge it into the data file, keep listening. Errors are
/// logged and the datagram is dropped; nothing is ever sent back.
///
/// The socket is bound by the caller, so the loop can run against any
/// address (tests use an ephemeral port).
pub async fn run_socket_server(socket: UdpSocket, buffer_size: usize, storage_path: PathBuf) {
    if let Ok(addr) = socket.local_addr() {
        tracing::info!("Socket server listening on {addr}");
    }

    let mut buf = vec![0u8; buffer_size];

    loop {
        let (len, addr) = match socket.recv_from(&mut buf).await {
            Ok(received) => received,
            Err(e) => {
                tracing::error!("Failed to receive datagram: {e}");
                continue;
            }
        };

        tracing::info!("Received {len} bytes from {addr}");
        tracing::debug!("Payload: {:?}", String::from_utf8_lossy(&buf[..len]));

        match store_submission(&buf[..len], &storage_path) {
            Ok(key) => tracing::info!("Stored submission under {key:?}"),
            Err(e) => tracing::error!("Dropping datagram from {addr}: {e}"),
        }
    }
}

/// Parse one datagram body and append it to the data file.
pub fn store_submission(data: &[u8], storage_path: &Path) -> Result<String, GuestbookError> {
    let record = form::parse_submission(data)?;
    persistence::append_record(storage_path, record)
}
