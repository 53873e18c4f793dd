// Connection handling module
// Serves HTTP/1.1 on a single accepted TCP connection

use std::net::SocketAddr;
use std::sync::Arc;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Handle a single connection in a spawned task.
///
/// This function:
/// 1. Wraps the TCP stream in `TokioIo`
/// 2. Serves HTTP/1.1 with keep-alive, one handler call per request
/// 3. Logs connection-level errors
///
/// Each connection runs on its own task; requests only share the read-only
/// configuration and the picker.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - Client address, recorded in the access log
/// * `state` - Shared application state
pub fn spawn_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new()
            .keep_alive(true)
            .serve_connection(
                io,
                service_fn(move |req| handler::handle_request(req, peer_addr, Arc::clone(&state))),
            );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
