//! Per-district line series.

use gorod_district_models::{District, DistrictCounts};

use crate::{Dataset, Series};

/// Line colour of the district series.
pub const LINE_COLOR: &str = "#3760BF";

/// District series and the total it plots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictSeries {
    /// One point per district.
    pub series: Series,
    /// Sum over all districts.
    pub total: u64,
}

/// One point per district in canonical order, zero where the counts have
/// no entry. Keys that are not district names are logged and left out of
/// both the series and the total.
#[must_use]
pub fn district_series(counts: &DistrictCounts) -> DistrictSeries {
    for key in counts.0.keys() {
        if District::from_display_name(key).is_none() {
            log::warn!("Ignoring count for unknown district '{key}'");
        }
    }

    let data: Vec<u64> = District::ALL.iter().map(|d| counts.count_for(*d)).collect();
    let total = data.iter().sum();

    DistrictSeries {
        series: Series {
            title: "Проблемы по районам".to_string(),
            labels: District::ALL
                .iter()
                .map(|d| d.display_name().to_string())
                .collect(),
            datasets: vec![Dataset {
                label: "Районы".to_string(),
                data,
                border_color: Some(LINE_COLOR.to_string()),
            }],
        },
        total,
    }
}
