//! `serve`: run the HTTP gateway.

use std::net::SocketAddr;

use crate::handler::ReachabilityService;
use crate::server;

/// Serves until interrupted.
///
/// # Errors
///
/// Returns an error string if the server cannot bind or fails while running.
pub async fn run(addr: SocketAddr, service: ReachabilityService) -> Result<(), String> {
    server::serve(addr, service).await.map_err(|e| format!("Server error on {addr}: {e}"))
}
