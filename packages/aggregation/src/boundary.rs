//! Boundary feature extraction from the district `GeoJSON` asset.

use geojson::{FeatureCollection, GeoJson};
use gorod_geometry::Shape;

use crate::AggregationError;

/// Feature property holding the raw municipal-area name in the shipped
/// boundary asset.
pub const DEFAULT_NAME_PROPERTY: &str = "name";

/// A named boundary polygon as found in the asset.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    /// Raw municipal-area name, empty when the feature had none.
    pub raw_name: String,
    /// Boundary geometry.
    pub shape: Shape,
}

impl BoundaryFeature {
    /// Creates a boundary feature.
    #[must_use]
    pub fn new(raw_name: impl Into<String>, shape: Shape) -> Self {
        Self {
            raw_name: raw_name.into(),
            shape,
        }
    }
}

/// Extracts boundary features from a `FeatureCollection`.
///
/// Features without geometry, with unsupported geometry or with no
/// vertices at all are skipped with a warning. A missing name is kept as
/// an empty string so the feature still renders (it resolves to no
/// district and a zero count).
#[must_use]
pub fn parse_boundaries(collection: &FeatureCollection, name_property: &str) -> Vec<BoundaryFeature> {
    collection
        .features
        .iter()
        .enumerate()
        .filter_map(|(idx, feature)| {
            let raw_name = feature
                .property(name_property)
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string();

            let Some(geometry) = feature.geometry.as_ref() else {
                log::warn!("Boundary feature #{idx} ('{raw_name}') has no geometry, skipping");
                return None;
            };

            let shape = match Shape::try_from(geometry) {
                Ok(shape) => shape,
                Err(e) => {
                    log::warn!("Boundary feature #{idx} ('{raw_name}'): {e}, skipping");
                    return None;
                }
            };

            if shape.is_empty() {
                log::warn!("Boundary feature #{idx} ('{raw_name}') has empty geometry, skipping");
                return None;
            }

            Some(BoundaryFeature { raw_name, shape })
        })
        .collect()
}

/// Parses `GeoJSON` text and extracts its boundary features.
///
/// # Errors
///
/// Returns [`AggregationError`] if the text is not `GeoJSON` or not a
/// `FeatureCollection`.
pub fn parse_boundaries_str(
    text: &str,
    name_property: &str,
) -> Result<Vec<BoundaryFeature>, AggregationError> {
    match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(parse_boundaries(&collection, name_property)),
        GeoJson::Feature(_) => Err(AggregationError::NotAFeatureCollection { kind: "Feature" }),
        GeoJson::Geometry(_) => Err(AggregationError::NotAFeatureCollection { kind: "Geometry" }),
    }
}
