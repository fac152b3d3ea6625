use crate::types::{DataSource, SnapshotInfo, StationRecord};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct Snapshot {
    records: Arc<[StationRecord]>,
    info: SnapshotInfo,
}

/// Holds the current immutable station snapshot.
///
/// Cheap to clone; all clones share the same snapshot. Each refresh replaces
/// the snapshot wholesale, never merging with the previous one. No
/// validation happens here; ingestion validates before records arrive.
#[derive(Debug, Clone, Default)]
pub struct StationRepository {
    inner: Arc<RwLock<Option<Snapshot>>>,
}

impl StationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically swap in a new snapshot built from `records`.
    pub async fn replace_all(&self, records: Vec<StationRecord>, source: DataSource) -> SnapshotInfo {
        let info = SnapshotInfo {
            station_count: records.len(),
            source,
            refreshed_at: Utc::now(),
        };
        let snapshot = Snapshot {
            records: records.into(),
            info: info.clone(),
        };
        *self.inner.write().await = Some(snapshot);
        info
    }

    /// The current records; empty if nothing has been loaded yet.
    pub async fn all(&self) -> Arc<[StationRecord]> {
        match self.inner.read().await.as_ref() {
            Some(snapshot) => Arc::clone(&snapshot.records),
            None => Vec::new().into(),
        }
    }

    /// Metadata of the current snapshot, if one has been loaded.
    pub async fn info(&self) -> Option<SnapshotInfo> {
        self.inner.read().await.as_ref().map(|s| s.info.clone())
    }

    pub async fn len(&self) -> usize {
        self.inner
            .read()
            .await
            .as_ref()
            .map_or(0, |s| s.records.len())
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
