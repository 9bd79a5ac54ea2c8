//! In-memory map surface rendering a `MapLibre` style document.

use std::path::Path;

use geojson::FeatureCollection;
use gorod_geometry::BoundingBox;
use serde_json::{Map, Value, json};

use crate::{LayerId, LayerSpec, MapError, MapSurface, Visibility};

/// City centre used when no bounds were fitted.
pub const DEFAULT_CENTER: [f64; 2] = [30.3609, 59.9311];

/// Zoom used when no bounds were fitted.
pub const DEFAULT_ZOOM: f64 = 10.0;

/// Glyph endpoint for the label layer's text.
pub const DEFAULT_GLYPHS: &str = "https://demotiles.maplibre.org/font/{fontstack}/{range}.pbf";

/// Last viewport fit requested by the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Area to show.
    pub bounds: BoundingBox,
    /// Padding around the bounds, in pixels.
    pub padding: u32,
    /// Zoom the fit may not exceed.
    pub max_zoom: f64,
}

/// Records sources, layers and the viewport in add order.
#[derive(Debug, Clone, Default)]
pub struct StyleSurface {
    sources: Vec<(String, FeatureCollection)>,
    layers: Vec<LayerSpec>,
    viewport: Option<Viewport>,
}

impl StyleSurface {
    /// Layers in add order.
    #[must_use]
    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    /// Sources as `(id, data)` in add order.
    #[must_use]
    pub fn sources(&self) -> &[(String, FeatureCollection)] {
        &self.sources
    }

    /// The last fitted viewport, if any.
    #[must_use]
    pub const fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    fn layer_mut(&mut self, id: LayerId) -> Option<&mut LayerSpec> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    /// Renders a version 8 style document. Sources are inlined as `GeoJSON`
    /// data; the fitted bounds are kept under `metadata`.
    #[must_use]
    pub fn to_style(&self, name: &str) -> Value {
        let sources: Map<String, Value> = self
            .sources
            .iter()
            .map(|(id, data)| {
                (
                    id.clone(),
                    json!({ "type": "geojson", "data": data }),
                )
            })
            .collect();

        let (center, metadata) = self.viewport.map_or_else(
            || (DEFAULT_CENTER, json!({})),
            |v| {
                let [w, s, e, n] = [v.bounds.west, v.bounds.south, v.bounds.east, v.bounds.north];
                (
                    [w.midpoint(e), s.midpoint(n)],
                    json!({
                        "gorod:bounds": [w, s, e, n],
                        "gorod:padding": v.padding,
                        "gorod:maxZoom": v.max_zoom,
                    }),
                )
            },
        );

        json!({
            "version": 8,
            "name": name,
            "glyphs": DEFAULT_GLYPHS,
            "center": center,
            "zoom": DEFAULT_ZOOM,
            "sources": sources,
            "layers": self.layers,
            "metadata": metadata,
        })
    }

    /// Writes `style.json` plus one `<source>.geojson` per source into
    /// `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// * If the directory or a file cannot be written
    /// * If serialization fails
    pub fn write_dir(&self, dir: &Path, name: &str) -> Result<(), MapError> {
        std::fs::create_dir_all(dir)?;
        for (id, data) in &self.sources {
            let path = dir.join(format!("{id}.geojson"));
            std::fs::write(&path, serde_json::to_string(data)?)?;
            log::info!("Wrote {}", path.display());
        }
        let path = dir.join("style.json");
        std::fs::write(&path, serde_json::to_string_pretty(&self.to_style(name))?)?;
        log::info!("Wrote {}", path.display());
        Ok(())
    }
}

impl MapSurface for StyleSurface {
    fn add_source(&mut self, id: &str, data: FeatureCollection) -> Result<(), MapError> {
        if self.sources.iter().any(|(existing, _)| existing == id) {
            return Err(MapError::DuplicateSource(id.to_string()));
        }
        self.sources.push((id.to_string(), data));
        Ok(())
    }

    fn add_layer(&mut self, layer: LayerSpec) -> Result<(), MapError> {
        if self.layers.iter().any(|l| l.id == layer.id) {
            return Err(MapError::DuplicateLayer(layer.id));
        }
        if !self.sources.iter().any(|(id, _)| *id == layer.source) {
            return Err(MapError::UnknownSource {
                layer: layer.id,
                source_id: layer.source,
            });
        }
        self.layers.push(layer);
        Ok(())
    }

    fn set_visibility(&mut self, layer: LayerId, visibility: Visibility) -> Result<(), MapError> {
        self.layer_mut(layer)
            .ok_or(MapError::UnknownLayer(layer))?
            .set_visibility(visibility);
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: BoundingBox, padding: u32, max_zoom: f64) {
        self.viewport = Some(Viewport {
            bounds,
            padding,
            max_zoom,
        });
    }
}
