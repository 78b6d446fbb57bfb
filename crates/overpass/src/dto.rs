//! DTOs for decoding Overpass JSON responses.
//!
//! The client decodes into these transport DTOs first, then maps them into
//! the store's `SourceElement` ingestion shape in one pass. Elements with a
//! shape we cannot use (ways without geometry, nodes without coordinates)
//! are skipped here; geometric validity is the store's concern.

use std::collections::HashMap;

use serde::Deserialize;

use landbank_store::ingest::SourceElement;

#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub element_type: String,
    pub id: Option<i64>,
    pub lon: Option<f64>,
    pub lat: Option<f64>,
    #[serde(default)]
    pub geometry: Option<Vec<OverpassVertex>>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct OverpassVertex {
    pub lon: f64,
    pub lat: f64,
}

impl OverpassResponse {
    pub fn into_source_elements(self) -> Vec<SourceElement> {
        self.elements
            .into_iter()
            .filter_map(OverpassElement::into_source_element)
            .collect()
    }
}

impl OverpassElement {
    fn into_source_element(self) -> Option<SourceElement> {
        match self.element_type.as_str() {
            "way" => {
                let geometry = self.geometry?;
                Some(SourceElement::Way {
                    id: self.id,
                    geometry: geometry
                        .into_iter()
                        .map(|v| geo::Coord { x: v.lon, y: v.lat })
                        .collect(),
                    tags: self.tags,
                })
            }
            "node" => Some(SourceElement::Node {
                id: self.id,
                lon: self.lon?,
                lat: self.lat?,
                tags: self.tags,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_way_with_geometry() {
        let json = r#"{
            "elements": [{
                "type": "way",
                "id": 123,
                "geometry": [
                    {"lat": 55.86, "lon": -4.25},
                    {"lat": 55.861, "lon": -4.25},
                    {"lat": 55.861, "lon": -4.249},
                    {"lat": 55.86, "lon": -4.25}
                ],
                "tags": {"landuse": "brownfield"}
            }]
        }"#;

        let response: OverpassResponse = serde_json::from_str(json).unwrap();
        let elements = response.into_source_elements();
        assert_eq!(elements.len(), 1);

        match &elements[0] {
            SourceElement::Way { id, geometry, tags } => {
                assert_eq!(*id, Some(123));
                assert_eq!(geometry.len(), 4);
                assert_eq!(geometry[0].x, -4.25);
                assert_eq!(geometry[0].y, 55.86);
                assert_eq!(tags.get("landuse").map(String::as_str), Some("brownfield"));
            }
            other => panic!("expected way, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_node_and_skip_unusable_elements() {
        let json = r#"{
            "elements": [
                {"type": "node", "id": 7, "lat": 55.8642, "lon": -4.2518,
                 "tags": {"railway": "station", "name": "Queen Street"}},
                {"type": "way", "id": 8, "tags": {}},
                {"type": "relation", "id": 9}
            ]
        }"#;

        let response: OverpassResponse = serde_json::from_str(json).unwrap();
        let elements = response.into_source_elements();
        assert_eq!(elements.len(), 1);

        match &elements[0] {
            SourceElement::Node { id, lon, lat, tags } => {
                assert_eq!(*id, Some(7));
                assert_eq!(*lon, -4.2518);
                assert_eq!(*lat, 55.8642);
                assert_eq!(tags.get("name").map(String::as_str), Some("Queen Street"));
            }
            other => panic!("expected node, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_response_decodes_to_no_elements() {
        let response: OverpassResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_source_elements().is_empty());
    }
}
