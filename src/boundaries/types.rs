//! GeoJSON shapes for administrative boundary overlays.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Administrative level of a boundary overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryKind {
    Country,
    States,
    Districts,
}

impl BoundaryKind {
    /// All kinds, in the order they are loaded.
    pub const ALL: [BoundaryKind; 3] = [
        BoundaryKind::Country,
        BoundaryKind::States,
        BoundaryKind::Districts,
    ];

    /// Path of the remote GeoJSON file relative to the boundary base URL.
    pub fn remote_path(&self) -> &'static str {
        match self {
            BoundaryKind::Country => "country/india.geojson",
            BoundaryKind::States => "state/india_state.geojson",
            BoundaryKind::Districts => "district/india_district.geojson",
        }
    }

    /// Name of the GeoJSON file looked up in the offline directory.
    pub fn offline_file_name(&self) -> &'static str {
        match self {
            BoundaryKind::Country => "gadm41_IND_0.geojson",
            BoundaryKind::States => "gadm41_IND_1.geojson",
            BoundaryKind::Districts => "gadm41_IND_2.geojson",
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            BoundaryKind::Country => "country",
            BoundaryKind::States => "states",
            BoundaryKind::Districts => "districts",
        }
    }
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryFeature {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl BoundaryFeature {
    /// Display name of the feature. GADM files name features by level
    /// (`NAME_2`, `NAME_1`, `NAME_0`), other sources use `name`.
    pub fn name(&self) -> Option<&str> {
        ["name", "NAME_2", "NAME_1", "NAME_0"]
            .iter()
            .find_map(|key| self.properties.get(*key).and_then(Value::as_str))
    }
}

/// A GeoJSON `FeatureCollection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<BoundaryFeature>,
}

impl BoundaryCollection {
    pub fn new(features: Vec<BoundaryFeature>) -> Self {
        Self {
            kind: "FeatureCollection".to_string(),
            features,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().filter_map(BoundaryFeature::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn feature_names_prefer_plain_name_then_finest_gadm_level() {
        let plain: BoundaryFeature = serde_json::from_value(json!({
            "type": "Feature",
            "properties": { "name": "Sikkim", "NAME_1": "ignored" },
            "geometry": null
        }))
        .unwrap();
        assert_eq!(plain.name(), Some("Sikkim"));

        let gadm: BoundaryFeature = serde_json::from_value(json!({
            "type": "Feature",
            "properties": { "NAME_0": "India", "NAME_1": "Uttarakhand", "NAME_2": "Chamoli" },
            "geometry": { "type": "Polygon", "coordinates": [] }
        }))
        .unwrap();
        assert_eq!(gadm.name(), Some("Chamoli"));
    }

    #[test]
    fn features_without_properties_have_no_name() {
        let feature: BoundaryFeature = serde_json::from_value(json!({ "type": "Feature" })).unwrap();
        assert!(feature.properties.is_empty());
        assert!(feature.geometry.is_none());
        assert_eq!(feature.name(), None);
    }

    #[test]
    fn kinds_map_to_files() {
        assert_eq!(BoundaryKind::States.remote_path(), "state/india_state.geojson");
        assert_eq!(BoundaryKind::Districts.offline_file_name(), "gadm41_IND_2.geojson");
        assert_eq!(BoundaryKind::Country.to_string(), "country");
    }
}
