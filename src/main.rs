use ddareungi_rebalance::data::{BikeListClient, BikeListConfig, StationService};
use ddareungi_rebalance::{parse_server_address, Server};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse server address from environment variables
    let addr = parse_server_address()
        .expect("Failed to parse server address from IP and PORT environment variables");

    let config = BikeListConfig::from_env();
    if config.api_key.is_empty() {
        warn!("SEOUL_OPENAPI_KEY is not set; live fetches will fail and the sample set is served");
    }
    let client = BikeListClient::new(config)?;
    let service = StationService::new(client);

    // Load an initial snapshot before accepting requests.
    let snapshot = service.refresh().await;
    info!(
        stations = snapshot.station_count,
        source = ?snapshot.source,
        "initial snapshot loaded"
    );

    let server = Server::new(addr, service);
    server.run().await?;

    Ok(())
}
