use ddareungi_rebalance::data::{BikeListClient, BikeListConfig, StationService};
use ddareungi_rebalance::types::{DataSource, StationRecord};
use ddareungi_rebalance::Server;

/// Service whose live feed is unreachable, so every refresh takes the
/// sample-set fallback path.
fn offline_service() -> StationService {
    let config = BikeListConfig::new("test-key")
        .with_base_url("http://127.0.0.1:9")
        .with_timeout_secs(2);
    StationService::new(BikeListClient::new(config).expect("client build"))
}

/// Serve the router on an ephemeral port, in-process.
async fn spawn_server(service: StationService) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let app = Server::new(addr, service).router();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    format!("http://{addr}")
}

fn station(id: &str, lat: f64, lon: f64, occupancy_percent: i32) -> StationRecord {
    StationRecord {
        station_id: id.to_string(),
        name: format!("station {id}"),
        latitude: lat,
        longitude: lon,
        rack_count: 10,
        bikes_parked: 5,
        occupancy_percent,
    }
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let base = spawn_server(offline_service()).await;

    let response = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "ddareungi-rebalance");
}

#[tokio::test]
async fn refresh_takes_the_fallback_path_when_the_feed_is_down() {
    let base = spawn_server(offline_service()).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{base}/stations/refresh"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["station_count"], 5);
}

#[tokio::test]
async fn stations_endpoint_lists_the_snapshot() {
    let service = offline_service();
    service.refresh().await;
    let base = spawn_server(service).await;

    let response = reqwest::get(format!("{base}/stations")).await.unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["snapshot"]["source"], "fallback");
    let stations = body["stations"].as_array().unwrap();
    assert_eq!(stations.len(), 5);
    assert_eq!(stations[0]["station_id"], "ST-4");
}

#[tokio::test]
async fn nearby_returns_ranked_stations_with_map_links() {
    let service = offline_service();
    service.refresh().await;
    let base = spawn_server(service).await;

    // Standing at Mangwon station exit 1.
    let response = reqwest::get(format!(
        "{base}/stations/nearby?location=37.55564880,126.91062927"
    ))
    .await
    .unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    let stations = body["stations"].as_array().unwrap();
    assert_eq!(stations.len(), 5);
    assert_eq!(stations[0]["station_id"], "ST-4");
    assert_eq!(stations[0]["distance_from_origin_km"], 0.0);
    assert_eq!(
        stations[0]["maps_url"],
        "https://www.google.com/maps/place/37%C2%B033'20\"N+126%C2%B054'38\"E"
    );
}

#[tokio::test]
async fn recommendation_pairs_mangwon_with_hapjeong_over_the_sample_set() {
    let service = offline_service();
    service.refresh().await;
    let base = spawn_server(service).await;

    let response = reqwest::get(format!(
        "{base}/rebalance/recommendation?location=37.55564880,126.91062927"
    ))
    .await
    .unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["source"]["station_id"], "ST-4");
    assert_eq!(body["destination"]["station_id"], "ST-6");
    let distance = body["transfer_distance_km"].as_f64().unwrap();
    assert!(distance > 0.5 && distance < 1.0);
    assert!(body["source"]["maps_url"].as_str().unwrap().contains("maps"));
}

#[tokio::test]
async fn malformed_location_is_a_400_with_a_stable_code() {
    let service = offline_service();
    service.refresh().await;
    let base = spawn_server(service).await;

    let response = reqwest::get(format!(
        "{base}/rebalance/recommendation?location=abc,def"
    ))
    .await
    .unwrap();
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "invalid_coordinate");
}

#[tokio::test]
async fn recommendation_404s_when_no_station_crosses_the_threshold() {
    let service = offline_service();
    // A snapshot where everything sits at exactly 100%.
    service
        .repository()
        .replace_all(
            vec![
                station("ST-1", 37.55, 126.91, 100),
                station("ST-2", 37.56, 126.92, 100),
            ],
            DataSource::SeoulOpenData,
        )
        .await;
    let base = spawn_server(service).await;

    let response = reqwest::get(format!(
        "{base}/rebalance/recommendation?location=37.55,126.91"
    ))
    .await
    .unwrap();
    assert_eq!(response.status(), 404);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "no_source_candidate");
}

#[tokio::test]
async fn recommendation_404s_when_only_the_high_side_exists() {
    let service = offline_service();
    service
        .repository()
        .replace_all(
            vec![station("ST-1", 37.55, 126.91, 150)],
            DataSource::SeoulOpenData,
        )
        .await;
    let base = spawn_server(service).await;

    let response = reqwest::get(format!(
        "{base}/rebalance/recommendation?location=37.55,126.91"
    ))
    .await
    .unwrap();
    assert_eq!(response.status(), 404);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "no_destination_candidate");
}

#[tokio::test]
async fn nearby_over_an_empty_snapshot_is_an_empty_list() {
    // No refresh: nothing has been loaded yet.
    let base = spawn_server(offline_service()).await;

    let response = reqwest::get(format!("{base}/stations/nearby?location=37.55,126.91"))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["stations"].as_array().unwrap().is_empty());
}
