use crate::types::StationRecord;
use crate::{Error, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

// Seoul Open Data "bikeList" dataset. One request covers at most 1000 rows,
// so a full snapshot is paged in windows of `page_size`.
const DEFAULT_BASE_URL: &str = "http://openapi.seoul.go.kr:8088";
const DEFAULT_PAGE_SIZE: usize = 1000;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Upper bound on a single snapshot, guarding against a runaway feed.
const MAX_SNAPSHOT_RECORDS: usize = 50_000;

const RESULT_OK: &str = "INFO-000";
const RESULT_EMPTY_RANGE: &str = "INFO-200";

#[derive(Debug, Clone)]
pub struct BikeListConfig {
    pub api_key: String,
    pub base_url: String,
    pub page_size: usize,
    pub timeout_secs: u64,
}

impl BikeListConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read the API key from `SEOUL_OPENAPI_KEY`. An unset key is tolerated
    /// here; fetches will fail and the service falls back to the sample set.
    pub fn from_env() -> Self {
        Self::new(std::env::var("SEOUL_OPENAPI_KEY").unwrap_or_default())
    }

    /// Point the client at a different host, for tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// HTTP client for the bikeList dataset.
#[derive(Debug)]
pub struct BikeListClient {
    client: Client,
    config: BikeListConfig,
}

impl BikeListClient {
    pub fn new(config: BikeListConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Fetch the complete current station list, paging through the dataset.
    ///
    /// Rows whose numeric fields do not parse are skipped and logged; they
    /// never enter the snapshot.
    pub async fn fetch_all(&self) -> Result<Vec<StationRecord>> {
        let mut records = Vec::new();
        let mut skipped = 0usize;
        let mut start = 1usize;

        loop {
            let end = start + self.config.page_size - 1;
            let rows = match self.fetch_page(start, end).await? {
                Some(rows) => rows,
                None => break, // past the end of the dataset
            };
            let page_len = rows.len();
            debug!(start, end, rows = page_len, "fetched bikeList page");

            for row in rows {
                match StationRecord::try_from(row) {
                    Ok(record) => records.push(record),
                    Err(err) => {
                        skipped += 1;
                        warn!("skipping malformed feed row: {err}");
                    }
                }
            }

            if page_len < self.config.page_size {
                break; // short page, last one
            }
            if records.len() >= MAX_SNAPSHOT_RECORDS {
                warn!(
                    limit = MAX_SNAPSHOT_RECORDS,
                    "snapshot record bound reached, stopping pagination"
                );
                break;
            }
            start = end + 1;
        }

        if records.is_empty() {
            return Err(Error::DataSourceUnavailable {
                message: "bikeList returned no usable station rows".to_string(),
            });
        }

        info!(
            stations = records.len(),
            skipped, "fetched bikeList snapshot"
        );
        Ok(records)
    }

    /// Fetch one `start..=end` window. `Ok(None)` means the range lies past
    /// the end of the dataset.
    async fn fetch_page(&self, start: usize, end: usize) -> Result<Option<Vec<StationRow>>> {
        let url = format!(
            "{}/{}/json/bikeList/{}/{}/",
            self.config.base_url, self.config.api_key, start, end
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(Error::DataSourceUnavailable {
                message: format!("bikeList request failed with status {}", response.status()),
            });
        }

        let envelope: BikeListEnvelope = response.json().await?;

        // Inside the data range the result code rides inside rentBikeStatus;
        // past the end the API answers with a bare top-level RESULT instead.
        if let Some(status) = envelope.rent_bike_status {
            return match status.result.code.as_str() {
                RESULT_OK => Ok(Some(status.rows)),
                RESULT_EMPTY_RANGE => Ok(None),
                _ => Err(Error::DataSourceUnavailable {
                    message: format!(
                        "bikeList error {}: {}",
                        status.result.code, status.result.message
                    ),
                }),
            };
        }
        if let Some(result) = envelope.result {
            return match result.code.as_str() {
                RESULT_EMPTY_RANGE => Ok(None),
                _ => Err(Error::DataSourceUnavailable {
                    message: format!("bikeList error {}: {}", result.code, result.message),
                }),
            };
        }
        Err(Error::DataSourceUnavailable {
            message: "bikeList response missing rentBikeStatus".to_string(),
        })
    }
}

/// The fixed built-in sample set: five stations around Mangwon and Hapjeong,
/// served when the live source is unreachable.
pub fn sample_stations() -> Vec<StationRecord> {
    let rows = [
        ("ST-4", "102. 망원역 1번출구 앞", 37.55564880, 126.91062927, 15, 53, 353),
        ("ST-5", "103. 망원역 2번출구 앞", 37.55495071, 126.91083527, 14, 27, 193),
        ("ST-6", "104. 합정역 1번출구 앞", 37.55073929, 126.91508484, 13, 6, 46),
        ("ST-7", "105. 합정역 5번출구 앞", 37.55000687, 126.91482544, 5, 6, 120),
        ("ST-8", "106. 합정역 7번출구 앞", 37.54864502, 126.91282654, 12, 10, 83),
    ];

    rows.iter()
        .map(
            |&(station_id, name, latitude, longitude, rack_count, bikes_parked, occupancy)| {
                StationRecord {
                    station_id: station_id.to_string(),
                    name: name.to_string(),
                    latitude,
                    longitude,
                    rack_count,
                    bikes_parked,
                    occupancy_percent: occupancy,
                }
            },
        )
        .collect()
}

#[derive(Debug, Deserialize)]
struct BikeListEnvelope {
    #[serde(rename = "rentBikeStatus")]
    rent_bike_status: Option<RentBikeStatus>,
    #[serde(rename = "RESULT")]
    result: Option<FeedResult>,
}

#[derive(Debug, Deserialize)]
struct RentBikeStatus {
    #[serde(rename = "RESULT")]
    result: FeedResult,
    #[serde(rename = "row", default)]
    rows: Vec<StationRow>,
}

#[derive(Debug, Deserialize)]
struct FeedResult {
    #[serde(rename = "CODE")]
    code: String,
    #[serde(rename = "MESSAGE", default)]
    message: String,
}

/// One raw feed row. Every field arrives as a string, numbers included.
#[derive(Debug, Clone, Deserialize)]
pub struct StationRow {
    #[serde(rename = "stationId")]
    pub station_id: String,
    #[serde(rename = "stationName")]
    pub station_name: String,
    #[serde(rename = "stationLatitude")]
    pub station_latitude: String,
    #[serde(rename = "stationLongitude")]
    pub station_longitude: String,
    #[serde(rename = "rackTotCnt")]
    pub rack_tot_cnt: String,
    #[serde(rename = "parkingBikeTotCnt")]
    pub parking_bike_tot_cnt: String,
    #[serde(rename = "shared")]
    pub shared: String,
}

impl TryFrom<StationRow> for StationRecord {
    type Error = Error;

    fn try_from(row: StationRow) -> Result<Self> {
        let latitude: f64 = parse_field(&row.station_latitude, &row.station_id, "stationLatitude")?;
        let longitude: f64 =
            parse_field(&row.station_longitude, &row.station_id, "stationLongitude")?;
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(Error::MalformedRecord {
                message: format!("station {}: non-finite coordinates", row.station_id),
            });
        }

        Ok(StationRecord {
            rack_count: parse_field(&row.rack_tot_cnt, &row.station_id, "rackTotCnt")?,
            bikes_parked: parse_field(&row.parking_bike_tot_cnt, &row.station_id, "parkingBikeTotCnt")?,
            occupancy_percent: parse_field(&row.shared, &row.station_id, "shared")?,
            station_id: row.station_id,
            name: row.station_name,
            latitude,
            longitude,
        })
    }
}

fn parse_field<T: std::str::FromStr>(raw: &str, station_id: &str, field: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| Error::MalformedRecord {
        message: format!("station {station_id}: {field} = {raw:?}"),
    })
}
