use crate::geo::Coordinates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One bike-share station from the current snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub station_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Total dock capacity.
    pub rack_count: u16,
    /// Bikes currently docked; may exceed `rack_count` transiently per feed
    /// semantics.
    pub bikes_parked: u16,
    /// The feed's own saturation percentage (`shared`). Authoritative even
    /// when inconsistent with `rack_count`/`bikes_parked`; never derived.
    pub occupancy_percent: i32,
}

impl StationRecord {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Rebalancing source candidate: more bikes than the docks want.
    pub fn is_oversaturated(&self) -> bool {
        self.occupancy_percent > 100
    }

    /// Rebalancing destination candidate. Exactly 100 is neither over- nor
    /// under-saturated.
    pub fn is_undersaturated(&self) -> bool {
        self.occupancy_percent < 100
    }
}

/// A station annotated with its distance from a reference coordinate.
/// Derived view, recomputed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedStation {
    #[serde(flatten)]
    pub station: StationRecord,
    pub distance_from_origin_km: f64,
}

/// A single recommended rebalancing move. Valid only for the snapshot and
/// user coordinate it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalancingRecommendation {
    pub source: StationRecord,
    pub destination: StationRecord,
    pub transfer_distance_km: f64,
}

/// Which path the refresh policy took to produce the current snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Live rows from the Seoul Open Data bikeList dataset.
    SeoulOpenData,
    /// The built-in sample set, loaded because the live source was
    /// unavailable.
    Fallback,
}

/// Metadata carried with every snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotInfo {
    pub station_count: usize,
    pub source: DataSource,
    pub refreshed_at: DateTime<Utc>,
}
