use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Data source unavailable: {message}")]
    DataSourceUnavailable { message: String },

    #[error("Invalid coordinate input: {input:?} (expected \"lat,lon\" in decimal degrees)")]
    InvalidCoordinate { input: String },

    #[error("No over-saturated station available as a rebalancing source")]
    NoSourceCandidate,

    #[error("No under-saturated station available as a rebalancing destination")]
    NoDestinationCandidate,

    #[error("Malformed station record: {message}")]
    MalformedRecord { message: String },

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Stable machine-readable code, used in API error bodies.
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::DataSourceUnavailable { .. } => "data_source_unavailable",
            Error::InvalidCoordinate { .. } => "invalid_coordinate",
            Error::NoSourceCandidate => "no_source_candidate",
            Error::NoDestinationCandidate => "no_destination_candidate",
            Error::MalformedRecord { .. } => "malformed_record",
            Error::Request(_) => "request_error",
            Error::Json(_) => "json_error",
            Error::Internal(_) => "internal_error",
        }
    }
}
