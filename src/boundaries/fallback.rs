//! Simplified boundaries used when no real boundary data can be loaded.

use crate::boundaries::types::{BoundaryCollection, BoundaryFeature, BoundaryKind, Geometry};
use serde_json::{json, Map, Value};

const INDIA_WEST: f64 = 68.1766;
const INDIA_SOUTH: f64 = 7.9655;
const INDIA_EAST: f64 = 97.4026;
const INDIA_NORTH: f64 = 37.6017;

/// (name, west, south, east, north)
const STATE_RECTANGLES: [(&str, f64, f64, f64, f64); 3] = [
    ("Jammu and Kashmir", 72.5, 32.0, 80.0, 37.3),
    ("Himachal Pradesh", 76.0, 28.4, 81.0, 33.0),
    ("West Bengal", 88.0, 21.5, 97.5, 29.0),
];

/// Side of a generated district cell, in degrees.
const DISTRICT_STEP: usize = 2;

fn polygon(name: String, ring: Value) -> BoundaryFeature {
    let mut properties = Map::new();
    properties.insert("name".to_string(), Value::String(name));
    BoundaryFeature {
        kind: "Feature".to_string(),
        properties,
        geometry: Some(Geometry {
            kind: "Polygon".to_string(),
            coordinates: json!([ring]),
        }),
    }
}

/// Closed ring of `[lng, lat]` positions, counter-clockwise from the south-west corner.
fn rectangle(name: &str, west: f64, south: f64, east: f64, north: f64) -> BoundaryFeature {
    polygon(
        name.to_string(),
        json!([
            [west, south],
            [east, south],
            [east, north],
            [west, north],
            [west, south]
        ]),
    )
}

fn district_grid() -> Vec<BoundaryFeature> {
    let mut features = Vec::new();
    for lat in (20..38).step_by(DISTRICT_STEP) {
        for lng in (70..98).step_by(DISTRICT_STEP) {
            let (north, east) = (lat + DISTRICT_STEP, lng + DISTRICT_STEP);
            features.push(polygon(
                format!("District {lat}-{lng}"),
                json!([[lng, lat], [east, lat], [east, north], [lng, north], [lng, lat]]),
            ));
        }
    }
    features
}

/// Generated stand-in boundaries for `kind`: the bounding rectangle of India,
/// three coarse state rectangles, or a 2° district grid.
pub fn fallback_boundaries(kind: BoundaryKind) -> BoundaryCollection {
    let features = match kind {
        BoundaryKind::Country => vec![rectangle("India", INDIA_WEST, INDIA_SOUTH, INDIA_EAST, INDIA_NORTH)],
        BoundaryKind::States => STATE_RECTANGLES
            .iter()
            .map(|&(name, west, south, east, north)| rectangle(name, west, south, east, north))
            .collect(),
        BoundaryKind::Districts => district_grid(),
    };
    BoundaryCollection::new(features)
}
