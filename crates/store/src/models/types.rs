//! Core data types for land features.

use std::sync::Arc;

use geo::{LineString, Point};

use crate::identifiers::*;

// ============================================================================
// Enums
// ============================================================================

/// Railway station categories surfaced by the geodata query
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StationKind {
    Station,
    Halt,
    TramStop,
    SubwayEntrance,
}

impl StationKind {
    pub fn from_tag(value: &str) -> Option<Self> {
        match value {
            "station" => Some(Self::Station),
            "halt" => Some(Self::Halt),
            "tram_stop" => Some(Self::TramStop),
            "subway_entrance" => Some(Self::SubwayEntrance),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Station => "station",
            Self::Halt => "halt",
            Self::TramStop => "tram_stop",
            Self::SubwayEntrance => "subway_entrance",
        }
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// A candidate vacant/disused land parcel derived from a closed way boundary.
///
/// The boundary is a single closed outer ring (holes unsupported). Area is a
/// spherical-surface measure in square meters; the centroid is the unweighted
/// mean of the boundary vertices, which downstream camera-centering depends on.
#[derive(Clone, Debug)]
pub struct Parcel {
    pub id: ParcelIdentifier,
    pub boundary: LineString,
    pub area_m2: f64,
    pub centroid: Point,
    pub owner: Arc<str>,
    pub description: Arc<str>,
    pub selected: bool,
}

/// A railway station, immutable after ingestion
#[derive(Clone, Debug)]
pub struct Station {
    pub id: StationIdentifier,
    pub location: Point,
    pub name: Arc<str>,
    pub kind: StationKind,
    pub operator: Arc<str>,
}

impl Station {
    /// Popup label, e.g. `"Queen Street (station)"`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.kind.as_str())
    }
}

/// Payload emitted to observers on every successful selection transition.
///
/// `parcel` is the newly selected parcel on select, and `None` on deselect.
#[derive(Clone, Debug)]
pub struct SelectionChange {
    pub is_selected: bool,
    pub parcel: Option<Parcel>,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Parcel not found: {0}")]
    ParcelNotFound(ParcelIdentifier),

    #[error("Station not found: {0}")]
    StationNotFound(StationIdentifier),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_kind_from_tag() {
        assert_eq!(StationKind::from_tag("halt"), Some(StationKind::Halt));
        assert_eq!(
            StationKind::from_tag("subway_entrance"),
            Some(StationKind::SubwayEntrance)
        );
        assert_eq!(StationKind::from_tag("platform"), None);
    }

    #[test]
    fn test_station_label() {
        let station = Station {
            id: StationIdentifier::new("node_1"),
            location: Point::new(-4.2518, 55.8642),
            name: "Queen Street".into(),
            kind: StationKind::Station,
            operator: "ScotRail".into(),
        };

        assert_eq!(station.label(), "Queen Street (station)");
    }
}
