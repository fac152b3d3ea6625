use crate::geo::Coordinates;
use crate::types::{RankedStation, RebalancingRecommendation, StationRecord};
use crate::{Error, Result};
use std::cmp::Ordering;

/// How many stations the nearby list surfaces.
pub const NEARBY_STATION_LIMIT: usize = 10;

/// Rank every station by distance from `origin`, ascending.
///
/// The sort is stable, so stations at equal distance keep their snapshot
/// order. NaN distances (from malformed data deliberately let through)
/// compare as equal and keep their position rather than panicking.
pub fn rank_stations_by_distance(
    stations: &[StationRecord],
    origin: &Coordinates,
) -> Vec<RankedStation> {
    let mut ranked: Vec<RankedStation> = stations
        .iter()
        .map(|station| RankedStation {
            distance_from_origin_km: origin.distance_km(&station.coordinates()),
            station: station.clone(),
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.distance_from_origin_km
            .partial_cmp(&b.distance_from_origin_km)
            .unwrap_or(Ordering::Equal)
    });

    ranked
}

/// The ranked sequence truncated to the closest [`NEARBY_STATION_LIMIT`]
/// stations. Empty input gives an empty result.
pub fn find_nearby_stations(
    stations: &[StationRecord],
    origin: &Coordinates,
) -> Vec<RankedStation> {
    let mut ranked = rank_stations_by_distance(stations, origin);
    ranked.truncate(NEARBY_STATION_LIMIT);
    ranked
}

/// Compute the single recommended rebalancing move for `origin`.
///
/// Two-stage greedy heuristic: the source is the over-saturated station
/// closest to the user, the destination is the under-saturated station
/// closest to that source. This keeps the source relevant to where the user
/// is and only then shortens the bike-transport leg; it is not a global
/// optimum across all high/low pairs, by design.
pub fn compute_recommendation(
    stations: &[StationRecord],
    origin: &Coordinates,
) -> Result<RebalancingRecommendation> {
    if !origin.is_finite() {
        return Err(Error::InvalidCoordinate {
            input: format!("{},{}", origin.latitude, origin.longitude),
        });
    }

    let ranked = rank_stations_by_distance(stations, origin);

    // Partition by saturation, preserving the distance-from-user order.
    // Stations at exactly 100% join neither side.
    let oversaturated: Vec<&RankedStation> = ranked
        .iter()
        .filter(|r| r.station.is_oversaturated())
        .collect();
    let undersaturated: Vec<&RankedStation> = ranked
        .iter()
        .filter(|r| r.station.is_undersaturated())
        .collect();

    let source = oversaturated
        .first()
        .copied()
        .ok_or(Error::NoSourceCandidate)?;
    if undersaturated.is_empty() {
        return Err(Error::NoDestinationCandidate);
    }

    // Nearest under-saturated station to the source. Strict `<` so the
    // first-encountered candidate wins ties; the partition order
    // (distance-from-user) is the tie-break, never re-sorted.
    let source_coordinates = source.station.coordinates();
    let mut destination: Option<&RankedStation> = None;
    let mut min_distance = f64::INFINITY;
    for &candidate in &undersaturated {
        let distance = source_coordinates.distance_km(&candidate.station.coordinates());
        if distance < min_distance {
            min_distance = distance;
            destination = Some(candidate);
        }
    }
    let destination = destination.ok_or(Error::NoDestinationCandidate)?;

    Ok(RebalancingRecommendation {
        source: source.station.clone(),
        destination: destination.station.clone(),
        transfer_distance_km: min_distance,
    })
}
