//! `gorod map`: exports the district map for a `MapLibre` viewer.

use std::path::Path;
use std::sync::Arc;

use gorod_aggregation::DistrictTable;
use gorod_cli_utils::{MultiProgress, spinner};
use gorod_client::{GorodApi, MapLoad, load_map};
use gorod_geometry::CentroidStrategy;
use gorod_map::{LayerController, MapData, MapError, StyleSurface, VisualizationMode};

/// Style name written into `style.json`.
const STYLE_NAME: &str = "gorod-districts";

/// Loads boundaries and counts, builds the layers in `mode` and writes
/// `style.json` plus the `GeoJSON` sources into `out`.
///
/// # Errors
///
/// * If the boundaries could not be loaded
/// * If the layers cannot be built or written
pub async fn run<A: GorodApi + ?Sized>(
    api: &A,
    multi: &MultiProgress,
    out: &Path,
    mode: VisualizationMode,
    area_weighted: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let strategy = if area_weighted {
        CentroidStrategy::AreaWeighted
    } else {
        CentroidStrategy::VertexMean
    };

    let bar = spinner(multi, "Loading district boundaries and counts...");
    let load = load_map(api, Arc::new(DistrictTable::builtin()), strategy).await;
    bar.finish_and_clear();

    let Some(surface) = render(&load, mode)? else {
        return Err("district boundaries are unavailable".into());
    };
    surface.write_dir(out, STYLE_NAME)?;
    println!(
        "Wrote {} layers to {}",
        surface.layers().len(),
        out.display()
    );
    Ok(())
}

/// Runs the layer controller against a fresh [`StyleSurface`]. `None`
/// when there is nothing to draw.
fn render(load: &MapLoad, mode: VisualizationMode) -> Result<Option<StyleSurface>, MapError> {
    let data = match load {
        MapLoad::Enriched(layers) => MapData::Enriched(layers),
        MapLoad::BoundariesOnly(boundaries) => MapData::BoundariesOnly(boundaries),
        MapLoad::Unavailable => return Ok(None),
    };

    let mut surface = StyleSurface::default();
    let mut controller = LayerController::default();
    controller.set_mode(&mut surface, mode)?;
    controller.on_load(&mut surface, data)?;
    Ok(Some(surface))
}

#[cfg(test)]
mod tests {
    use gorod_aggregation::{DEFAULT_NAME_PROPERTY, EnrichedLayers, parse_boundaries_str};
    use gorod_district_models::{District, DistrictCounts};
    use gorod_map::{LayerId, Visibility};

    use super::*;

    const ASSET: &str = include_str!("../../server/public/districts.geojson");

    fn enriched() -> EnrichedLayers {
        let boundaries = parse_boundaries_str(ASSET, DEFAULT_NAME_PROPERTY).unwrap();
        let counts: DistrictCounts = [(District::Tsentralny, 7), (District::Nevsky, 2)]
            .into_iter()
            .collect();
        EnrichedLayers::build(
            &DistrictTable::builtin(),
            &boundaries,
            &counts,
            CentroidStrategy::default(),
        )
    }

    #[test]
    fn bundled_boundaries_join_against_builtin_table() {
        let layers = enriched();
        assert_eq!(layers.enriched.len(), 7);
        assert_eq!(layers.max_value(), 7);
        let unmapped: Vec<_> = layers
            .enriched
            .iter()
            .filter(|f| f.district.is_none())
            .map(|f| f.raw_name.as_str())
            .collect();
        assert_eq!(unmapped, ["Новые Территории"]);
    }

    #[test]
    fn heatmap_export_hides_points() {
        let surface = render(&MapLoad::Enriched(enriched()), VisualizationMode::Heatmap)
            .unwrap()
            .unwrap();
        let visibility = |id| {
            surface
                .layers()
                .iter()
                .find(|l| l.id == id)
                .map(gorod_map::LayerSpec::visibility)
        };
        assert_eq!(surface.layers().len(), 5);
        assert_eq!(visibility(LayerId::Heatmap), Some(Visibility::Visible));
        assert_eq!(visibility(LayerId::Point), Some(Visibility::Hidden));
        assert_eq!(visibility(LayerId::Label), Some(Visibility::Hidden));
        assert!(surface.viewport().is_some());
    }

    #[test]
    fn nothing_to_draw_without_boundaries() {
        assert!(
            render(&MapLoad::Unavailable, VisualizationMode::Point)
                .unwrap()
                .is_none()
        );
    }
}
