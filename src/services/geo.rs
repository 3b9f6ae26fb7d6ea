//! Geographic calculations

use crate::types::{BoundingBox, GeoPoint};

/// Earth radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers per degree of latitude (and of longitude at the equator)
const KM_PER_DEGREE: f64 = 111.0;

/// Calculate Haversine distance between two points in kilometers
pub fn haversine_distance(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lon - from.lon).to_radians();

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Minimum Haversine distance from a point to any vertex of a track, in
/// kilometers. Returns infinity for an empty track.
///
/// This is vertex sampling, not point-to-segment geometry: a point close to
/// the line between two distant vertices is NOT considered close. Recorded
/// GPS tracks are densely sampled, so the vertex minimum is a good proxy.
pub fn min_distance_to_track(point: &GeoPoint, track: &[GeoPoint]) -> f64 {
    track
        .iter()
        .map(|vertex| haversine_distance(point, vertex))
        .fold(f64::INFINITY, f64::min)
}

/// Rectangular region covering roughly `radius_km` around a center point.
///
/// The degree conversion is the flat-earth approximation (111 km per degree,
/// scaled by cos(lat) for longitude), so the box is only an estimate: near
/// the poles it can clip points that are actually within the radius. It is
/// therefore a storage query hint, never a correctness-bearing filter.
pub fn bounding_box(center: &GeoPoint, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / KM_PER_DEGREE;
    let lon_delta = radius_km / (KM_PER_DEGREE * center.lat.to_radians().cos());

    BoundingBox {
        min_lat: center.lat - lat_delta,
        max_lat: center.lat + lat_delta,
        min_lon: center.lon - lon_delta,
        max_lon: center.lon + lon_delta,
    }
}
