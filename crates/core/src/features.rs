//! Building the display and export geometry.
//!
//! Engine responses become GeoJSON features: one LineString per route
//! leg, one Polygon per reachability area, always in the response's
//! coordinate order.

use geo::Coord;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use waymark_routing::crs::CrsCode;

use crate::engine::RouteLeg;
use crate::host::{LayerDescriptor, LayerRole, Rgba, StyleOptions};

/// Id of the single geometry layer this system writes.
pub const ROUTE_LAYER_ID: &str = "routing-geometries";

/// Suggested filename for route exports.
pub const ROUTE_EXPORT_FILENAME: &str = "route.json";

const STROKE: Rgba = Rgba(10, 10, 255, 1.0);
const FILL: Rgba = Rgba(10, 10, 255, 0.5);

/// Layer descriptor for route line geometry.
pub fn route_layer() -> LayerDescriptor {
    LayerDescriptor {
        id: ROUTE_LAYER_ID,
        role: LayerRole::Selection,
        crs: CrsCode::geographic(),
        style: StyleOptions {
            stroke_color: STROKE,
            fill_color: None,
            stroke_width: 4.0,
            stroke_dash: Vec::new(),
        },
    }
}

/// Layer descriptor for isochrone polygon geometry.
pub fn isochrone_layer() -> LayerDescriptor {
    LayerDescriptor {
        id: ROUTE_LAYER_ID,
        role: LayerRole::Selection,
        crs: CrsCode::geographic(),
        style: StyleOptions {
            stroke_color: STROKE,
            fill_color: Some(FILL),
            stroke_width: 4.0,
            stroke_dash: Vec::new(),
        },
    }
}

fn positions(coordinates: &[Coord]) -> Vec<Vec<f64>> {
    coordinates.iter().map(|c| vec![c.x, c.y]).collect()
}

fn line_feature(coordinates: &[Coord]) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(positions(coordinates)))),
        id: None,
        properties: None,
        foreign_members: None,
    }
}

/// One LineString feature per route leg.
pub fn leg_features(legs: &[RouteLeg]) -> Vec<Feature> {
    legs.iter().map(|leg| line_feature(&leg.coordinates)).collect()
}

/// One single-ring Polygon feature per reachability area.
pub fn area_features(areas: &[Vec<Coord>]) -> Vec<Feature> {
    areas
        .iter()
        .map(|ring| Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Polygon(vec![positions(ring)]))),
            id: None,
            properties: None,
            foreign_members: None,
        })
        .collect()
}

/// The export payload: route legs as a GeoJSON FeatureCollection.
pub fn route_export_payload(legs: &[RouteLeg]) -> String {
    let collection = FeatureCollection {
        bbox: None,
        features: leg_features(legs),
        foreign_members: None,
    };
    GeoJson::FeatureCollection(collection).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn leg(coords: &[(f64, f64)]) -> RouteLeg {
        RouteLeg {
            coordinates: coords.iter().map(|&(x, y)| Coord { x, y }).collect(),
        }
    }

    #[test]
    fn test_leg_features_preserve_coordinate_order() {
        let features = leg_features(&[leg(&[(7.0, 46.0), (7.5, 46.5), (8.0, 47.0)])]);
        assert_eq!(features.len(), 1);

        let Some(Geometry { value: Value::LineString(line), .. }) = &features[0].geometry else {
            panic!("expected a LineString");
        };
        assert_eq!(line, &vec![vec![7.0, 46.0], vec![7.5, 46.5], vec![8.0, 47.0]]);
    }

    #[test]
    fn test_area_features_are_single_ring_polygons() {
        let ring = vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 },
            Coord { x: 0.0, y: 0.0 },
        ];
        let features = area_features(&[ring]);
        assert_eq!(features.len(), 1);

        let Some(Geometry { value: Value::Polygon(rings), .. }) = &features[0].geometry else {
            panic!("expected a Polygon");
        };
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 4);
    }

    #[test]
    fn test_export_payload_round_trips_as_geojson() {
        let payload = route_export_payload(&[leg(&[(7.0, 46.0), (8.0, 47.0)]), leg(&[(8.0, 47.0), (9.0, 47.5)])]);

        let GeoJson::FeatureCollection(collection) = GeoJson::from_str(&payload).unwrap() else {
            panic!("expected a FeatureCollection");
        };
        assert_eq!(collection.features.len(), 2);
    }

    #[test]
    fn test_layer_descriptors_share_the_layer_slot() {
        assert_eq!(route_layer().id, isochrone_layer().id);
        assert!(route_layer().style.fill_color.is_none());
        assert!(isochrone_layer().style.fill_color.is_some());
    }
}
