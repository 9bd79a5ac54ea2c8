//! Layer identities and their style definitions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::{ColorRamp, VisualizationMode};

/// Source holding the district boundary polygons.
pub const BOUNDARY_SOURCE: &str = "districts";

/// Source holding one label point per district.
pub const POINT_SOURCE: &str = "district-points";

/// Heatmap weight at the lowest and highest district count.
pub const HEAT_WEIGHT: (f64, f64) = (1.0, 10.0);

/// Heatmap radius in pixels at the lowest and highest district count.
pub const HEAT_RADIUS: (f64, f64) = (60.0, 10.0);

/// The layers of the district map, in the order they are added.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum LayerId {
    /// Choropleth fill.
    #[serde(rename = "districts-fill")]
    #[strum(serialize = "districts-fill")]
    Fill,
    /// Boundary outline.
    #[serde(rename = "districts-outline")]
    #[strum(serialize = "districts-outline")]
    Outline,
    /// Count heatmap over label points.
    #[serde(rename = "districts-heat")]
    #[strum(serialize = "districts-heat")]
    Heatmap,
    /// Marker circles over label points.
    #[serde(rename = "districts-point")]
    #[strum(serialize = "districts-point")]
    Point,
    /// District name and count text.
    #[serde(rename = "districts-label")]
    #[strum(serialize = "districts-label")]
    Label,
}

impl LayerId {
    /// Every layer, in add order.
    pub const ALL: [Self; 5] = [
        Self::Fill,
        Self::Outline,
        Self::Heatmap,
        Self::Point,
        Self::Label,
    ];

    /// Visibility of this layer under `mode`. Boundary layers are always
    /// visible.
    #[must_use]
    pub const fn visibility_in(self, mode: VisualizationMode) -> Visibility {
        match (self, mode) {
            (Self::Fill | Self::Outline, _)
            | (Self::Heatmap, VisualizationMode::Heatmap)
            | (Self::Point | Self::Label, VisualizationMode::Point) => Visibility::Visible,
            (Self::Heatmap, VisualizationMode::Point)
            | (Self::Point | Self::Label, VisualizationMode::Heatmap) => Visibility::Hidden,
        }
    }
}

/// Render type of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LayerKind {
    /// Filled polygons.
    Fill,
    /// Polygon outlines.
    Line,
    /// Density heatmap.
    Heatmap,
    /// Point markers.
    Circle,
    /// Text labels.
    Symbol,
}

/// Layout `visibility` value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Visibility {
    /// Drawn.
    #[default]
    #[serde(rename = "visible")]
    #[strum(serialize = "visible")]
    Visible,
    /// Present but not drawn.
    #[serde(rename = "none")]
    #[strum(serialize = "none")]
    Hidden,
}

/// A layer as it appears in a style document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    /// Layer id, unique within a style.
    pub id: LayerId,
    /// Render type, serialized as `type`.
    #[serde(rename = "type")]
    pub kind: LayerKind,
    /// Id of the source the layer draws from.
    pub source: String,
    /// Layout properties, `visibility` among them.
    pub layout: Map<String, Value>,
    /// Paint properties.
    pub paint: Map<String, Value>,
}

impl LayerSpec {
    fn new(id: LayerId, kind: LayerKind, source: &str, visibility: Visibility) -> Self {
        let mut layout = Map::new();
        layout.insert("visibility".to_string(), json!(visibility));
        Self {
            id,
            kind,
            source: source.to_string(),
            layout,
            paint: Map::new(),
        }
    }

    fn paint(mut self, key: &str, value: Value) -> Self {
        self.paint.insert(key.to_string(), value);
        self
    }

    fn layout(mut self, key: &str, value: Value) -> Self {
        self.layout.insert(key.to_string(), value);
        self
    }

    /// Current layout visibility.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.layout
            .get("visibility")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }

    /// Sets layout visibility.
    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.layout
            .insert("visibility".to_string(), json!(visibility));
    }
}

/// Choropleth fill. Without counts the fill is a flat neutral colour.
#[must_use]
pub fn fill_layer(ramp: Option<(&ColorRamp, u64)>) -> LayerSpec {
    let color = ramp.map_or_else(|| json!("#c9d8ff"), |(ramp, max)| ramp.fill_color(max));
    LayerSpec::new(LayerId::Fill, LayerKind::Fill, BOUNDARY_SOURCE, Visibility::Visible)
        .paint("fill-color", color)
        .paint("fill-opacity", json!(0.6))
}

/// Thin district boundary lines.
#[must_use]
pub fn outline_layer() -> LayerSpec {
    LayerSpec::new(LayerId::Outline, LayerKind::Line, BOUNDARY_SOURCE, Visibility::Visible)
        .paint("line-color", json!("#3760bf"))
        .paint("line-width", json!(1))
}

/// Heatmap over label points, weighted by count.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn heatmap_layer(ramp: &ColorRamp, max_value: u64, mode: VisualizationMode) -> LayerSpec {
    let max = max_value.max(1) as f64;
    let by_value = |(lo, hi): (f64, f64)| {
        json!(["interpolate", ["linear"], ["get", "value"], 0, lo, max, hi])
    };
    LayerSpec::new(
        LayerId::Heatmap,
        LayerKind::Heatmap,
        POINT_SOURCE,
        LayerId::Heatmap.visibility_in(mode),
    )
    .paint("heatmap-weight", by_value(HEAT_WEIGHT))
    .paint("heatmap-radius", by_value(HEAT_RADIUS))
    .paint("heatmap-color", ramp.heatmap_color())
}

/// Grey marker circle at each label point.
#[must_use]
pub fn point_layer(mode: VisualizationMode) -> LayerSpec {
    LayerSpec::new(
        LayerId::Point,
        LayerKind::Circle,
        POINT_SOURCE,
        LayerId::Point.visibility_in(mode),
    )
    .paint("circle-color", json!("gray"))
    .paint("circle-opacity", json!(0.5))
    .paint("circle-radius", json!(10))
}

/// `displayName` with the count underneath.
#[must_use]
pub fn label_layer(mode: VisualizationMode) -> LayerSpec {
    LayerSpec::new(
        LayerId::Label,
        LayerKind::Symbol,
        POINT_SOURCE,
        LayerId::Label.visibility_in(mode),
    )
    .layout(
        "text-field",
        json!(["format", ["get", "displayName"], {}, "\n", {}, ["to-string", ["get", "value"]], {}]),
    )
    .layout("text-size", json!(10))
    .paint("text-color", json!("black"))
}
