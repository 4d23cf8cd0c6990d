//! Great-circle distance for "near me" sorting.

use crate::domain::Coordinates;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometres.
pub fn distance_km(from: Coordinates, to: Coordinates) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Distance when both ends are known and on the globe.
pub fn distance_between(from: Option<Coordinates>, to: Option<Coordinates>) -> Option<f64> {
    let from = from.filter(Coordinates::is_valid)?;
    let to = to.filter(Coordinates::is_valid)?;
    Some(distance_km(from, to)).filter(|d| d.is_finite())
}

pub fn format_distance(km: f64) -> String {
    format!("{:.1} km away", km)
}

/// Stable sort by distance, nearest first.
///
/// Entries whose distance is unknown (or not a finite number) are not ranked;
/// they follow the ranked entries in their original relative order.
pub fn sort_by_distance<T>(items: &mut Vec<T>, distance: impl Fn(&T) -> Option<f64>) {
    let known_distance = |item: &T| distance(item).filter(|d| d.is_finite());
    let (mut known, unknown): (Vec<T>, Vec<T>) = items.drain(..).partition(|item| known_distance(item).is_some());
    known.sort_by(|a, b| {
        let (a, b) = (known_distance(a).unwrap_or_default(), known_distance(b).unwrap_or_default());
        a.total_cmp(&b)
    });
    items.extend(known);
    items.extend(unknown);
}
