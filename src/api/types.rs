use crate::geo::{maps_place_url, Coordinates};
use crate::types::{RankedStation, SnapshotInfo, StationRecord};
use crate::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    /// Free-text "lat,lon" in decimal degrees.
    pub location: String,
}

/// A station plus the map link the presentation layer renders.
#[derive(Debug, Serialize)]
pub struct StationView {
    #[serde(flatten)]
    pub station: StationRecord,
    pub maps_url: String,
}

impl From<StationRecord> for StationView {
    fn from(station: StationRecord) -> Self {
        let maps_url = maps_place_url(station.latitude, station.longitude);
        Self { station, maps_url }
    }
}

#[derive(Debug, Serialize)]
pub struct RankedStationView {
    #[serde(flatten)]
    pub station: StationView,
    pub distance_from_origin_km: f64,
}

impl From<RankedStation> for RankedStationView {
    fn from(ranked: RankedStation) -> Self {
        Self {
            station: ranked.station.into(),
            distance_from_origin_km: ranked.distance_from_origin_km,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub snapshot: Option<SnapshotInfo>,
    pub stations: Vec<StationRecord>,
}

#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    pub origin: Coordinates,
    pub stations: Vec<RankedStationView>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub origin: Coordinates,
    pub source: StationView,
    pub destination: StationView,
    pub transfer_distance_km: f64,
}

/// Wraps the crate error for axum; handlers return `Result<_, ApiError>`.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::InvalidCoordinate { .. } => StatusCode::BAD_REQUEST,
            // Informational: the snapshot has no station on that side of
            // the threshold, not a server fault.
            Error::NoSourceCandidate | Error::NoDestinationCandidate => StatusCode::NOT_FOUND,
            Error::DataSourceUnavailable { .. }
            | Error::MalformedRecord { .. }
            | Error::Request(_) => StatusCode::BAD_GATEWAY,
            Error::Json(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("request failed: {}", self.0);
        }

        let body = json!({
            "error": {
                "code": self.0.error_code(),
                "message": self.0.to_string(),
            }
        });
        (status, Json(body)).into_response()
    }
}
