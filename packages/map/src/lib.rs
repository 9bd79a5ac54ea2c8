#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! District map layer control.
//!
//! A [`LayerController`] drives any [`MapSurface`]: once the surface has
//! loaded it adds the boundary, heatmap, point and label layers in a fixed
//! order and fits the viewport to the district bounds. Switching between
//! the point and heatmap visualisations only flips layer visibility.
//!
//! [`StyleSurface`] is an in-memory surface that records what was added
//! and renders it as a `MapLibre` style document, so the map can be
//! exported without a browser.

pub mod controller;
pub mod layer;
pub mod ramp;
pub mod style;

pub use controller::{ControllerState, LayerController, MapData};
pub use layer::{BOUNDARY_SOURCE, LayerId, LayerKind, LayerSpec, POINT_SOURCE, Visibility};
pub use ramp::{ColorRamp, Rgb};
pub use style::StyleSurface;

use geojson::FeatureCollection;
use gorod_geometry::BoundingBox;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Viewport padding in pixels when fitting to the district bounds.
pub const FIT_PADDING: u32 = 40;

/// Maximum zoom when fitting to the district bounds.
pub const FIT_MAX_ZOOM: f64 = 12.0;

/// Errors raised by a [`MapSurface`].
#[derive(Debug, Error)]
pub enum MapError {
    /// A source with this id was already added.
    #[error("Source '{0}' already exists")]
    DuplicateSource(String),
    /// The layer was already added.
    #[error("Layer '{0}' already exists")]
    DuplicateLayer(LayerId),
    /// The layer's source has not been added.
    #[error("Layer '{layer}' references unknown source '{source_id}'")]
    UnknownSource {
        /// Layer being added.
        layer: LayerId,
        /// Missing source id.
        source_id: String,
    },
    /// The layer has not been added.
    #[error("Layer '{0}' does not exist")]
    UnknownLayer(LayerId),
    /// Writing the exported style failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Serializing the exported style failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Which of the two mutually exclusive visualisations is shown.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VisualizationMode {
    /// Markers and labels.
    #[default]
    Point,
    /// Count heatmap.
    Heatmap,
}

impl VisualizationMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Point => Self::Heatmap,
            Self::Heatmap => Self::Point,
        }
    }
}

/// The operations a map widget exposes to the layer controller.
pub trait MapSurface {
    /// Registers a `GeoJSON` source.
    ///
    /// # Errors
    ///
    /// * If a source with the same id already exists
    fn add_source(&mut self, id: &str, data: FeatureCollection) -> Result<(), MapError>;

    /// Adds a layer on top of the existing ones.
    ///
    /// # Errors
    ///
    /// * If the layer already exists or its source does not
    fn add_layer(&mut self, layer: LayerSpec) -> Result<(), MapError>;

    /// Sets a layer's layout visibility.
    ///
    /// # Errors
    ///
    /// * If the layer does not exist
    fn set_visibility(&mut self, layer: LayerId, visibility: Visibility) -> Result<(), MapError>;

    /// Moves the viewport to show `bounds`.
    fn fit_bounds(&mut self, bounds: BoundingBox, padding: u32, max_zoom: f64);
}
