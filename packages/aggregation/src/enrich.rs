//! Count attachment and label-point derivation.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use gorod_district::DistrictTable;
use gorod_district_models::{District, DistrictCounts};
use gorod_geometry::{BoundingBox, CentroidStrategy, Coord, Shape, bounds_all};

use crate::BoundaryFeature;

/// A boundary with its resolved district and joined count.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedFeature {
    /// Raw municipal-area name from the asset.
    pub raw_name: String,
    /// Boundary geometry.
    pub shape: Shape,
    /// Resolved district, `None` when the name is not in the table.
    pub district: Option<District>,
    /// Joined count, `0` when unresolved or absent from the counts.
    pub value: u64,
    /// Label text: the district name, or the raw name when unresolved.
    pub display_name: String,
}

/// Representative point of an enriched boundary, used for labels and the
/// heatmap.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPoint {
    /// `[longitude, latitude]`.
    pub coord: Coord,
    /// Same `value` as the source boundary.
    pub value: u64,
    /// Same `displayName` as the source boundary.
    pub display_name: String,
}

/// Joins boundaries with counts, 1:1 and order-preserving.
#[must_use]
pub fn enrich(
    table: &DistrictTable,
    boundaries: &[BoundaryFeature],
    counts: &DistrictCounts,
) -> Vec<EnrichedFeature> {
    boundaries
        .iter()
        .map(|boundary| {
            let (resolution, value) = table.count_for(&boundary.raw_name, counts);
            let district = resolution.district();
            let display_name = district.map_or_else(
                || boundary.raw_name.clone(),
                |d| d.display_name().to_string(),
            );

            EnrichedFeature {
                raw_name: boundary.raw_name.clone(),
                shape: boundary.shape.clone(),
                district,
                value,
                display_name,
            }
        })
        .collect()
}

/// One label point per enriched boundary. Boundaries whose representative
/// point cannot be computed are skipped.
#[must_use]
pub fn label_points(enriched: &[EnrichedFeature], strategy: CentroidStrategy) -> Vec<LabelPoint> {
    enriched
        .iter()
        .filter_map(|feature| {
            let Some(coord) = strategy.apply(&feature.shape) else {
                log::debug!("No label point for '{}', skipping", feature.raw_name);
                return None;
            };
            Some(LabelPoint {
                coord,
                value: feature.value,
                display_name: feature.display_name.clone(),
            })
        })
        .collect()
}

/// Output of a completed join: enriched boundaries and their label points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichedLayers {
    /// Enriched boundaries, same order as the input.
    pub enriched: Vec<EnrichedFeature>,
    /// Label/heatmap points.
    pub labels: Vec<LabelPoint>,
}

impl EnrichedLayers {
    /// Runs enrichment and label derivation.
    #[must_use]
    pub fn build(
        table: &DistrictTable,
        boundaries: &[BoundaryFeature],
        counts: &DistrictCounts,
        strategy: CentroidStrategy,
    ) -> Self {
        let enriched = enrich(table, boundaries, counts);
        let labels = label_points(&enriched, strategy);
        Self { enriched, labels }
    }

    /// Bounding box of every boundary coordinate.
    #[must_use]
    pub fn bounds(&self) -> Option<BoundingBox> {
        bounds_all(self.enriched.iter().map(|f| &f.shape))
    }

    /// Largest joined count, used to scale the colour ramps.
    #[must_use]
    pub fn max_value(&self) -> u64 {
        self.enriched.iter().map(|f| f.value).max().unwrap_or(0)
    }

    /// Enriched boundaries as a `GeoJSON` `FeatureCollection`.
    #[must_use]
    pub fn boundaries_collection(&self) -> FeatureCollection {
        collection(self.enriched.iter().map(|f| {
            let mut props = properties(f.value, &f.display_name);
            props.insert("name".to_string(), f.raw_name.clone().into());
            props.insert(
                "district".to_string(),
                f.district.map(District::slug).map_or(serde_json::Value::Null, Into::into),
            );
            feature(&f.shape, props)
        }))
    }

    /// Label points as a `GeoJSON` `FeatureCollection` of points.
    #[must_use]
    pub fn labels_collection(&self) -> FeatureCollection {
        collection(self.labels.iter().map(|p| {
            feature(
                &Shape::Point(p.coord),
                properties(p.value, &p.display_name),
            )
        }))
    }
}

/// Plain boundaries (no counts) as a `GeoJSON` `FeatureCollection`.
#[must_use]
pub fn boundaries_only_collection(boundaries: &[BoundaryFeature]) -> FeatureCollection {
    collection(boundaries.iter().map(|b| {
        let mut props = JsonObject::new();
        props.insert("name".to_string(), b.raw_name.clone().into());
        feature(&b.shape, props)
    }))
}

fn properties(value: u64, display_name: &str) -> JsonObject {
    let mut props = JsonObject::new();
    props.insert("value".to_string(), value.into());
    props.insert("displayName".to_string(), display_name.into());
    props
}

fn feature(shape: &Shape, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(shape.into())),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn collection(features: impl Iterator<Item = Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: features.collect(),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(offset: f64) -> Shape {
        Shape::Polygon(vec![vec![
            [offset, offset],
            [offset, offset + 2.0],
            [offset + 2.0, offset + 2.0],
            [offset + 2.0, offset],
        ]])
    }

    fn counts() -> DistrictCounts {
        [(District::Tsentralny, 10), (District::Nevsky, 5)]
            .into_iter()
            .collect()
    }

    #[test]
    fn resolved_gets_count_unmapped_gets_zero() {
        let table = DistrictTable::builtin();
        let boundaries = vec![
            BoundaryFeature::new("Литейный округ", square(0.0)),
            BoundaryFeature::new("Нет такого округа", square(5.0)),
        ];

        let enriched = enrich(&table, &boundaries, &counts());

        assert_eq!(enriched[0].value, 10);
        assert_eq!(enriched[0].district, Some(District::Tsentralny));
        assert_eq!(enriched[0].display_name, "Центральный");
        assert_eq!(enriched[1].value, 0);
        assert_eq!(enriched[1].district, None);
        assert_eq!(enriched[1].display_name, "Нет такого округа");
    }

    #[test]
    fn cardinality_and_order_are_preserved() {
        let table = DistrictTable::builtin();
        let names = ["Рыбацкое", "???", "Коломна", "Рыбацкое", ""];
        let boundaries: Vec<_> = names
            .iter()
            .enumerate()
            .map(|(i, n)| {
                #[allow(clippy::cast_precision_loss)]
                let offset = i as f64;
                BoundaryFeature::new(*n, square(offset))
            })
            .collect();

        let enriched = enrich(&table, &boundaries, &counts());

        assert_eq!(enriched.len(), boundaries.len());
        for (b, e) in boundaries.iter().zip(&enriched) {
            assert_eq!(b.raw_name, e.raw_name);
            assert_eq!(b.shape, e.shape);
        }
        assert_eq!(enriched[0].value, 5);
        assert_eq!(enriched[3].value, 5);
    }

    #[test]
    fn injected_table_drives_resolution() {
        let table = DistrictTable::from_entries([("X".to_string(), District::Tsentralny)]);
        let boundaries = vec![
            BoundaryFeature::new("X", square(0.0)),
            BoundaryFeature::new("Литейный округ", square(0.0)),
        ];
        let enriched = enrich(&table, &boundaries, &counts());
        assert_eq!(enriched[0].value, 10);
        assert_eq!(enriched[1].value, 0);
    }

    #[test]
    fn label_points_carry_value_and_name() {
        let table = DistrictTable::builtin();
        let boundaries = vec![
            BoundaryFeature::new("Литейный округ", square(0.0)),
            BoundaryFeature::new("Пусто", Shape::Polygon(vec![Vec::new()])),
        ];
        let layers =
            EnrichedLayers::build(&table, &boundaries, &counts(), CentroidStrategy::VertexMean);

        assert_eq!(layers.enriched.len(), 2);
        assert_eq!(
            layers.labels,
            vec![LabelPoint {
                coord: [1.0, 1.0],
                value: 10,
                display_name: "Центральный".to_string(),
            }]
        );
        assert_eq!(layers.max_value(), 10);
    }

    #[test]
    fn collections_expose_value_and_display_name() {
        let table = DistrictTable::builtin();
        let boundaries = vec![BoundaryFeature::new("Литейный округ", square(0.0))];
        let layers =
            EnrichedLayers::build(&table, &boundaries, &counts(), CentroidStrategy::default());

        let fc = layers.boundaries_collection();
        let props = fc.features[0].properties.as_ref().unwrap();
        assert_eq!(props["value"], 10);
        assert_eq!(props["displayName"], "Центральный");
        assert_eq!(props["district"], "tsentralny");

        let labels = layers.labels_collection();
        assert_eq!(labels.features.len(), 1);
        assert_eq!(
            labels.features[0].geometry.as_ref().unwrap().value,
            geojson::Value::Point(vec![1.0, 1.0])
        );
    }

    #[test]
    fn bounds_span_all_boundaries() {
        let table = DistrictTable::builtin();
        let boundaries = vec![
            BoundaryFeature::new("a", square(0.0)),
            BoundaryFeature::new("b", square(5.0)),
        ];
        let layers =
            EnrichedLayers::build(&table, &boundaries, &counts(), CentroidStrategy::default());
        assert_eq!(layers.bounds(), Some(BoundingBox::new(0.0, 0.0, 7.0, 7.0)));
    }
}
