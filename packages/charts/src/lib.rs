#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Chart series for the analytics dashboard.
//!
//! Turns the backend's count mappings into chart-ready series: monthly
//! bars from date-keyed counts ([`bar`]), a per-district line in canonical
//! district order ([`line`]) and category slices with the dashboard
//! palette ([`donut`]).

pub mod bar;
pub mod donut;
pub mod line;

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use bar::{MonthRange, YearMonth, monthly_series};
pub use donut::{PALETTE, Slice, category_slices};
pub use line::{DistrictSeries, district_series};

/// Counts keyed by ISO date (`YYYY-MM-DD`).
pub type PeriodCounts = BTreeMap<String, u64>;

/// Errors building chart input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartError {
    /// A month bound that is not `YYYY-MM`.
    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
}

/// One labelled data series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Legend text.
    pub label: String,
    /// One value per series label.
    pub data: Vec<u64>,
    /// Line colour, for line charts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}

/// Category labels plus one or more datasets aligned with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    /// Chart title.
    pub title: String,
    /// Axis labels.
    pub labels: Vec<String>,
    /// Data aligned with `labels`.
    pub datasets: Vec<Dataset>,
}

impl Series {
    /// Whether there is nothing to plot.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Renders the first dataset as horizontal text bars, scaled so the
    /// largest value spans `width` cells.
    #[must_use]
    pub fn render_text(&self, width: usize) -> String {
        let mut out = format!("{}\n", self.title);
        let Some(dataset) = self.datasets.first() else {
            return out;
        };
        let max = dataset.data.iter().copied().max().unwrap_or(0).max(1);
        let scale = u64::try_from(width).unwrap_or(u64::MAX);
        let label_width = self.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        for (label, value) in self.labels.iter().zip(&dataset.data) {
            let cells = usize::try_from(value.saturating_mul(scale) / max).unwrap_or(width);
            let pad = label_width - label.chars().count();
            let _ = writeln!(
                out,
                "  {label}{:pad$} │{} {value}",
                "",
                "█".repeat(cells)
            );
        }
        out
    }
}
