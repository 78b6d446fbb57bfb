//! R-tree nodes for the station index.
//!
//! Queries run in two stages: a fast Euclidean prefilter in the R-tree
//! (raw degrees), then an accurate Haversine pass on the survivors.

use std::sync::Arc;

use rstar::{PointDistance, RTreeObject, AABB};

use crate::models::types::Station;

#[derive(Clone)]
pub struct StationNode {
    pub station: Arc<Station>,
    point: [f64; 2],
}

impl StationNode {
    pub fn new(station: Arc<Station>) -> Self {
        let point = [station.location.x(), station.location.y()];
        Self { station, point }
    }
}

impl RTreeObject for StationNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StationNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}
