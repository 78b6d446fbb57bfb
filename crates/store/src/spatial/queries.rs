//! Distance helpers for station queries.
//!
//! The R-tree prefilter works in raw degrees; results are refined with the
//! Haversine formula, which stays accurate at the radii we query.

use geo::{HaversineDistance, Point};

/// Calculate Haversine distance between two points in meters
pub fn haversine_distance(p1: Point, p2: Point) -> f64 {
    p1.haversine_distance(&p2)
}

/// Convert meters to degrees at the equator (for bounding box queries).
///
/// This underestimates degrees of longitude away from the equator, so the
/// prefilter radius must be padded before use (see `FeatureStore::stations_near`).
pub fn meters_to_degrees_approx(meters: f64) -> f64 {
    meters / 111_320.0 // meters per degree at equator
}
