use std::net::SocketAddr;

/// Parse the listen address from the `IP` and `PORT` environment variables.
pub fn parse_server_address() -> Result<SocketAddr, String> {
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let ip = std::env::var("IP").unwrap_or_else(|_| "0.0.0.0".to_string());

    format!("{ip}:{port}")
        .parse()
        .map_err(|e| format!("Invalid IP or PORT environment variables: {e}"))
}
