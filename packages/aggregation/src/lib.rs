#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! District aggregation pipeline.
//!
//! Joins the district boundary `GeoJSON` with the per-district counts
//! served by the backend. Each boundary's raw municipal-area name is
//! resolved through an injected [`DistrictTable`], its count attached as
//! `value`, and a parallel collection of label points (one representative
//! point per boundary) is produced for label and heatmap rendering.
//!
//! The two inputs arrive independently. [`join::DistrictJoin`] gates the
//! merge on both being present, and [`sequence::Sequencer`] lets callers
//! drop responses that were overtaken by a newer request.

pub mod boundary;
pub mod enrich;
pub mod join;
pub mod sequence;

pub use boundary::{
    BoundaryFeature, DEFAULT_NAME_PROPERTY, parse_boundaries, parse_boundaries_str,
};
pub use enrich::{
    EnrichedFeature, EnrichedLayers, LabelPoint, boundaries_only_collection, enrich, label_points,
};
pub use gorod_district::DistrictTable;
pub use join::{DistrictJoin, JoinGate, JoinState};
pub use sequence::{Sequencer, Ticket};

use thiserror::Error;

/// Errors that can occur while loading boundary data.
#[derive(Debug, Error)]
pub enum AggregationError {
    /// The boundary document is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The boundary document parsed but is not a `FeatureCollection`.
    #[error("Expected a FeatureCollection, found {kind}")]
    NotAFeatureCollection {
        /// What was found instead.
        kind: &'static str,
    },
}
