use crate::api::types::{
    ApiError, LocationQuery, NearbyResponse, RecommendationResponse, StationsResponse,
};
use crate::data::StationService;
use crate::geo::Coordinates;
use crate::planner;
use crate::types::SnapshotInfo;
use axum::extract::{Query, State};
use axum::response::Json;
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now(),
        "service": "ddareungi-rebalance"
    }))
}

/// Re-fetch the snapshot. Never fails: an unreachable feed falls back to
/// the built-in sample set.
pub async fn refresh_stations(State(service): State<StationService>) -> Json<SnapshotInfo> {
    Json(service.refresh().await)
}

pub async fn list_stations(State(service): State<StationService>) -> Json<StationsResponse> {
    let stations = service.stations().await.to_vec();
    Json(StationsResponse {
        snapshot: service.snapshot_info().await,
        stations,
    })
}

pub async fn nearby_stations(
    State(service): State<StationService>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<NearbyResponse>, ApiError> {
    let origin = Coordinates::parse(&query.location)?;
    let stations = service.stations().await;

    let stations = planner::find_nearby_stations(&stations, &origin)
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(NearbyResponse { origin, stations }))
}

pub async fn rebalancing_recommendation(
    State(service): State<StationService>,
    Query(query): Query<LocationQuery>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let origin = Coordinates::parse(&query.location)?;
    let stations = service.stations().await;

    let recommendation = planner::compute_recommendation(&stations, &origin)?;

    Ok(Json(RecommendationResponse {
        origin,
        source: recommendation.source.into(),
        destination: recommendation.destination.into(),
        transfer_distance_km: recommendation.transfer_distance_km,
    }))
}
