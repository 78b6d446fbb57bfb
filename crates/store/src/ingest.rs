//! Ingestion of raw geodata elements into typed land features.
//!
//! The input shape mirrors what the geodata query returns: "way" elements
//! with an ordered vertex geometry (polygon candidates) and "node" elements
//! with a single coordinate (stations). Malformed way geometry is expected
//! and is dropped silently rather than surfaced as an error.

use std::collections::HashMap;
use std::sync::Arc;

use geo::{Coord, LineString, Point};

use crate::geometry::{close_ring, spherical_ring_area, vertex_centroid};
use crate::identifiers::*;
use crate::models::types::*;

/// Tag map attached to a source element
pub type Tags = HashMap<String, String>;

/// A raw element from the geodata query, before normalization
#[derive(Clone, Debug)]
pub enum SourceElement {
    Way {
        id: Option<i64>,
        geometry: Vec<Coord>,
        tags: Tags,
    },
    Node {
        id: Option<i64>,
        lon: f64,
        lat: f64,
        tags: Tags,
    },
}

/// Substitute values for missing optional source tags.
///
/// Kept as explicit configuration rather than inline fallbacks so the
/// permissive-defaults policy is visible and overridable per store.
#[derive(Clone, Debug)]
pub struct TagDefaults {
    pub parcel_owner: Arc<str>,
    pub parcel_description: Arc<str>,
    pub station_name: Arc<str>,
    pub station_operator: Arc<str>,
}

impl Default for TagDefaults {
    fn default() -> Self {
        Self {
            parcel_owner: "Network Rail".into(),
            parcel_description: "Potential development site".into(),
            station_name: "Unnamed Station".into(),
            station_operator: "Unknown".into(),
        }
    }
}

/// Normalize way elements into parcels.
///
/// A way is accepted only if its vertex list, after auto-closing, contains
/// at least 4 points; anything else is dropped. Node elements are ignored.
/// Synthetic ids are positional over the *accepted* parcels.
pub fn parcels_from_elements(elements: Vec<SourceElement>, defaults: &TagDefaults) -> Vec<Parcel> {
    let mut parcels = Vec::new();

    for element in elements {
        let SourceElement::Way { id, geometry, tags } = element else {
            continue;
        };

        let coords = close_ring(geometry);
        if coords.len() < 4 {
            continue;
        }
        let boundary = LineString::new(coords);

        let id = match id {
            Some(id) => ParcelIdentifier::new(id.to_string()),
            None => ParcelIdentifier::synthetic(parcels.len()),
        };

        let owner: Arc<str> = tags
            .get("owner")
            .or_else(|| tags.get("operator"))
            .map(|s| Arc::from(s.as_str()))
            .unwrap_or_else(|| defaults.parcel_owner.clone());

        parcels.push(Parcel {
            id,
            area_m2: spherical_ring_area(&boundary),
            centroid: vertex_centroid(&boundary),
            boundary,
            owner,
            description: assemble_description(&tags, defaults),
            selected: false,
        });
    }

    parcels
}

/// Normalize node elements into stations. Nodes are always accepted;
/// missing tags are filled from `defaults`. Way elements are ignored.
pub fn stations_from_elements(
    elements: Vec<SourceElement>,
    defaults: &TagDefaults,
) -> Vec<Station> {
    let mut stations = Vec::new();

    for element in elements {
        let SourceElement::Node { id, lon, lat, tags } = element else {
            continue;
        };

        let id = match id {
            Some(id) => StationIdentifier::new(id.to_string()),
            None => StationIdentifier::synthetic(stations.len()),
        };

        let kind = tags
            .get("railway")
            .and_then(|v| StationKind::from_tag(v))
            .unwrap_or(StationKind::Station);

        stations.push(Station {
            id,
            location: Point::new(lon, lat),
            name: tag_or_default(&tags, "name", &defaults.station_name),
            kind,
            operator: tag_or_default(&tags, "operator", &defaults.station_operator),
        });
    }

    stations
}

fn tag_or_default(tags: &Tags, key: &str, default: &Arc<str>) -> Arc<str> {
    tags.get(key)
        .map(|s| Arc::from(s.as_str()))
        .unwrap_or_else(|| default.clone())
}

/// Assemble the parcel description from available tags in a fixed order:
/// name, land use, railway type, disused flag. Absent tags contribute
/// nothing; an empty result falls back to the configured generic label.
fn assemble_description(tags: &Tags, defaults: &TagDefaults) -> Arc<str> {
    let mut description = String::new();

    if let Some(name) = tags.get("name") {
        description.push_str(name);
        description.push_str(": ");
    }
    if let Some(landuse) = tags.get("landuse") {
        description.push_str("Land use: ");
        description.push_str(landuse);
        description.push_str(". ");
    }
    if let Some(railway) = tags.get("railway") {
        description.push_str("Railway: ");
        description.push_str(railway);
        description.push_str(". ");
    }
    if let Some(disused) = tags.get("disused") {
        description.push_str("Disused: ");
        description.push_str(disused);
        description.push_str(". ");
    }

    if description.is_empty() {
        defaults.parcel_description.clone()
    } else {
        description.into()
    }
}
