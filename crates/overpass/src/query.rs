//! Overpass QL query builders.

use std::fmt;

/// Bounding box in Overpass `(south, west, north, east)` order
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Central Glasgow, the original survey area
    pub const GLASGOW: Self = Self {
        south: 55.8,
        west: -4.4,
        north: 55.9,
        east: -4.1,
    };
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.south, self.west, self.north, self.east)
    }
}

/// Query for candidate vacant/disused land ways: disused railway land,
/// brownfield/vacant land use, and Network Rail owned or operated property.
pub fn vacant_land_query(bbox: &BoundingBox) -> String {
    format!(
        r#"[out:json];
(
  way["railway"]["disused"="yes"]({bbox});
  way["landuse"="railway"]({bbox});
  way["landuse"="brownfield"]({bbox});
  way["landuse"="vacant"]({bbox});
  way["operator"~"Network Rail|network rail"]({bbox});
  way["owner"~"Network Rail|network rail"]({bbox});
);
out geom;"#
    )
}

/// Query for railway station nodes (stations, subway entrances, halts,
/// tram stops)
pub fn railway_station_query(bbox: &BoundingBox) -> String {
    format!(
        r#"[out:json];
(
  node["railway"="station"]({bbox});
  node["railway"="subway_entrance"]({bbox});
  node["railway"="halt"]({bbox});
  node["railway"="tram_stop"]({bbox});
);
out geom;"#
    )
}
