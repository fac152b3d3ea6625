use crate::{Error, Result};
use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components are finite numbers (not NaN, not infinite).
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Great-circle distance to another coordinate in kilometers (haversine).
    ///
    /// Identical points return exactly 0. NaN inputs propagate NaN; callers
    /// validate upstream.
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let delta_lat = to_radians(other.latitude - self.latitude);
        let delta_lon = to_radians(other.longitude - self.longitude);

        let a = (delta_lat / 2.0).sin().powi(2)
            + to_radians(self.latitude).cos()
                * to_radians(other.latitude).cos()
                * (delta_lon / 2.0).sin().powi(2);

        // Float error can push a fractionally outside [0, 1] for antipodal
        // points, which would make sqrt(1 - a) NaN.
        let a = a.clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// Parse free-text "lat,lon" input, trimming whitespace around the comma.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || Error::InvalidCoordinate {
            input: input.to_string(),
        };

        let (lat, lon) = input.split_once(',').ok_or_else(invalid)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let longitude: f64 = lon.trim().parse().map_err(|_| invalid())?;

        let coordinates = Self::new(latitude, longitude);
        if !coordinates.is_finite() {
            return Err(invalid());
        }
        Ok(coordinates)
    }
}

pub fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Convert a signed decimal-degree value to a DMS token for map URLs.
///
/// Minutes and seconds are truncated, not rounded, matching conventional DMS
/// display. The degree sign is pre-encoded as `%C2%B0` so the token can be
/// embedded in a URL as-is. Presentation only; never used for geolocation
/// logic.
pub fn to_dms(coordinate: f64, is_latitude: bool) -> String {
    let absolute = coordinate.abs();
    let degrees = absolute.floor();
    let minutes_full = (absolute - degrees) * 60.0;
    let minutes = minutes_full.floor();
    let seconds = ((minutes_full - minutes) * 60.0).floor();

    let direction = match (is_latitude, coordinate >= 0.0) {
        (true, true) => "N",
        (true, false) => "S",
        (false, true) => "E",
        (false, false) => "W",
    };

    format!(
        "{}%C2%B0{}'{}\"{}",
        degrees as i64, minutes as i64, seconds as i64, direction
    )
}

/// Google Maps place URL for a coordinate, built from the DMS tokens.
pub fn maps_place_url(latitude: f64, longitude: f64) -> String {
    format!(
        "https://www.google.com/maps/place/{}+{}",
        to_dms(latitude, true),
        to_dms(longitude, false)
    )
}
