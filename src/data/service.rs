use crate::data::client::{sample_stations, BikeListClient};
use crate::data::repository::StationRepository;
use crate::types::{DataSource, SnapshotInfo, StationRecord};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Owns the refresh policy: fetch the live feed, fall back to the built-in
/// sample set when the source is unavailable.
#[derive(Debug, Clone)]
pub struct StationService {
    client: Arc<BikeListClient>,
    repository: StationRepository,
    refresh_gate: Arc<Mutex<()>>,
}

impl StationService {
    pub fn new(client: BikeListClient) -> Self {
        Self {
            client: Arc::new(client),
            repository: StationRepository::new(),
            refresh_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Replace the snapshot from the live feed, or from the sample set if
    /// the feed is unavailable. Always leaves a usable snapshot behind.
    ///
    /// Concurrent refreshes are serialized through the gate so a stale
    /// fetch can never overwrite a newer snapshot.
    pub async fn refresh(&self) -> SnapshotInfo {
        let _gate = self.refresh_gate.lock().await;

        match self.client.fetch_all().await {
            Ok(records) => {
                let info = self
                    .repository
                    .replace_all(records, DataSource::SeoulOpenData)
                    .await;
                info!(stations = info.station_count, "snapshot refreshed from live feed");
                info
            }
            Err(err) => {
                warn!("live fetch failed, loading built-in sample set: {err}");
                let info = self
                    .repository
                    .replace_all(sample_stations(), DataSource::Fallback)
                    .await;
                info!(stations = info.station_count, "snapshot loaded from sample set");
                info
            }
        }
    }

    pub async fn stations(&self) -> Arc<[StationRecord]> {
        self.repository.all().await
    }

    pub async fn snapshot_info(&self) -> Option<SnapshotInfo> {
        self.repository.info().await
    }

    pub fn repository(&self) -> &StationRepository {
        &self.repository
    }
}
