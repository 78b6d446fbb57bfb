//! Accessibility scoring from isochrone geometry.
//!
//! The isochrone polygon is large and irregular, and the score only needs a
//! coarse monotonic proxy for reachable area, so this uses a planar shoelace
//! with a per-ring equirectangular degree-to-meter conversion — deliberately
//! cheaper than the spherical formula the store uses for parcel boundaries.
//! Keep the two separate.

use geojson::{Feature, FeatureCollection, Geometry, PolygonType, Value};

const EARTH_RADIUS_M: f64 = 6_371_000.0;
const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Score the reachable area of an isochrone on a bounded 1-100 scale.
///
/// `sqrt` compression keeps city-scale differences visible without letting
/// large contours saturate immediately; the clamp floor means any non-empty
/// geometry scores at least 1. An empty collection yields no score at all,
/// which is distinct from a score of zero.
pub fn accessibility_score(isochrone: &FeatureCollection) -> Option<u8> {
    if isochrone.features.is_empty() {
        return None;
    }

    let total_m2: f64 = isochrone.features.iter().map(feature_area_m2).sum();
    let score = (total_m2.sqrt() / 100.0).round().clamp(1.0, 100.0);
    Some(score as u8)
}

fn feature_area_m2(feature: &Feature) -> f64 {
    feature.geometry.as_ref().map_or(0.0, geometry_area_m2)
}

/// Planar area of a polygon or multi-polygon geometry in square meters.
/// Other geometry kinds contribute nothing.
pub fn geometry_area_m2(geometry: &Geometry) -> f64 {
    match &geometry.value {
        Value::Polygon(polygon) => polygon_area_m2(polygon),
        Value::MultiPolygon(polygons) => polygon_area_m2_sum(polygons),
        _ => 0.0,
    }
}

fn polygon_area_m2_sum(polygons: &[PolygonType]) -> f64 {
    polygons.iter().map(|p| polygon_area_m2(p)).sum()
}

/// Shoelace area of the outer ring, converted from square degrees to square
/// meters with the ring's mean latitude. Holes are ignored; rings with fewer
/// than 4 positions are degenerate and contribute nothing.
fn polygon_area_m2(polygon: &PolygonType) -> f64 {
    let Some(ring) = polygon.first() else {
        return 0.0;
    };
    if ring.len() < 4 {
        return 0.0;
    }

    let mut area_deg2 = 0.0;
    let mut lat_sum = 0.0;

    for pair in ring.windows(2) {
        let (Some((lon1, lat1)), Some((lon2, lat2))) = (lon_lat(&pair[0]), lon_lat(&pair[1]))
        else {
            return 0.0;
        };
        area_deg2 += lon1 * lat2 - lon2 * lat1;
        lat_sum += lat1;
    }
    // windows(2) visits every vertex but the last as pair[0]; fold the
    // closing vertex back in so the mean matches the full ring.
    match lon_lat(&ring[ring.len() - 1]) {
        Some((_, last_lat)) => lat_sum += last_lat,
        None => return 0.0,
    }

    let mean_lat_rad = lat_sum / ring.len() as f64 * DEG_TO_RAD;
    let meters_per_deg_lat = EARTH_RADIUS_M * DEG_TO_RAD;
    let meters_per_deg_lon = EARTH_RADIUS_M * mean_lat_rad.cos() * DEG_TO_RAD;

    area_deg2.abs() * meters_per_deg_lat * meters_per_deg_lon / 2.0
}

fn lon_lat(position: &[f64]) -> Option<(f64, f64)> {
    match position {
        [lon, lat, ..] => Some((*lon, *lat)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ring(coords: &[(f64, f64)]) -> Vec<Vec<f64>> {
        coords.iter().map(|(lon, lat)| vec![*lon, *lat]).collect()
    }

    fn collection(values: Vec<Value>) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: values
                .into_iter()
                .map(|value| Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(value)),
                    id: None,
                    properties: None,
                    foreign_members: None,
                })
                .collect(),
            foreign_members: None,
        }
    }

    fn glasgow_contour() -> Vec<Vec<Vec<f64>>> {
        // ~0.1 degree square around the city center
        vec![ring(&[
            (-4.3, 55.8),
            (-4.3, 55.9),
            (-4.2, 55.9),
            (-4.2, 55.8),
            (-4.3, 55.8),
        ])]
    }

    #[test]
    fn test_polygon_area_oracle() {
        // Oracle computed once from the shoelace + equirectangular formula
        let area = polygon_area_m2(&glasgow_contour());
        assert_relative_eq!(area, 69_426_331.07, max_relative = 1e-9);
    }

    #[test]
    fn test_score_for_city_scale_contour() {
        let fc = collection(vec![Value::Polygon(glasgow_contour())]);
        // sqrt(69.4 km^2) / 100 ≈ 83
        assert_eq!(accessibility_score(&fc), Some(83));
    }

    #[test]
    fn test_multi_polygon_areas_are_summed() {
        let single = collection(vec![Value::Polygon(glasgow_contour())]);
        let multi = collection(vec![Value::MultiPolygon(vec![
            glasgow_contour(),
            glasgow_contour(),
        ])]);

        let single_area = geometry_area_m2(single.features[0].geometry.as_ref().unwrap());
        let multi_area = geometry_area_m2(multi.features[0].geometry.as_ref().unwrap());
        assert_relative_eq!(multi_area, single_area * 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_holes_are_ignored() {
        let mut with_hole = glasgow_contour();
        with_hole.push(ring(&[
            (-4.28, 55.82),
            (-4.28, 55.84),
            (-4.26, 55.84),
            (-4.26, 55.82),
            (-4.28, 55.82),
        ]));

        assert_relative_eq!(
            polygon_area_m2(&with_hole),
            polygon_area_m2(&glasgow_contour()),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_score_clamps_at_100() {
        // A continent-sized contour: sqrt(area)/100 far exceeds 100
        let huge = collection(vec![Value::Polygon(vec![ring(&[
            (0.0, 0.0),
            (0.0, 30.0),
            (30.0, 30.0),
            (30.0, 0.0),
            (0.0, 0.0),
        ])])]);

        assert_eq!(accessibility_score(&huge), Some(100));
    }

    #[test]
    fn test_empty_collection_yields_no_score() {
        let empty = FeatureCollection {
            bbox: None,
            features: vec![],
            foreign_members: None,
        };

        assert_eq!(accessibility_score(&empty), None);
    }

    #[test]
    fn test_degenerate_geometry_scores_floor_not_none() {
        // A feature is present but its ring is too short to enclose area:
        // that is a (clamped) score of 1, not "no score".
        let degenerate = collection(vec![Value::Polygon(vec![ring(&[
            (0.0, 0.0),
            (1.0, 1.0),
            (0.0, 0.0),
        ])])]);

        assert_eq!(accessibility_score(&degenerate), Some(1));
    }

    #[test]
    fn test_score_from_wire_format() {
        // Shape of a real Isochrone API response (properties trimmed)
        let json = r##"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"contour": 8, "color": "#5a3fc0"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [-4.3, 55.8], [-4.3, 55.9], [-4.2, 55.9],
                        [-4.2, 55.8], [-4.3, 55.8]
                    ]]
                }
            }]
        }"##;

        let fc: FeatureCollection = serde_json::from_str(json).unwrap();
        assert_eq!(accessibility_score(&fc), Some(83));
    }

    #[test]
    fn test_feature_without_geometry_contributes_nothing() {
        let mut fc = collection(vec![Value::Polygon(glasgow_contour())]);
        fc.features.push(Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: None,
            foreign_members: None,
        });

        assert_eq!(accessibility_score(&fc), Some(83));
    }
}
