//! Category slices.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Slice colours, lightest first. Reused cyclically past seven slices.
pub const PALETTE: [&str; 7] = [
    "#EAF0FF", "#C9D8FF", "#A9C1FF", "#87ABFE", "#6F95F0", "#4F75D6", "#3760BF",
];

/// One category of the donut chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    /// Category label.
    pub label: String,
    /// Statement count.
    pub value: u64,
    /// Fill colour from [`PALETTE`].
    pub color: String,
}

/// One slice per category, in key order.
#[must_use]
pub fn category_slices(counts: &BTreeMap<String, u64>) -> Vec<Slice> {
    counts
        .iter()
        .zip(PALETTE.iter().cycle())
        .map(|((label, value), color)| Slice {
            label: label.clone(),
            value: *value,
            color: (*color).to_string(),
        })
        .collect()
}

/// Renders slices as `label: value (percent%)` lines.
#[must_use]
pub fn render_text(slices: &[Slice]) -> String {
    let total: u128 = slices.iter().map(|s| u128::from(s.value)).sum();
    slices
        .iter()
        .map(|s| {
            let pct = if total == 0 {
                0
            } else {
                u128::from(s.value) * 100 / total
            };
            format!("  {}: {} ({pct}%)\n", s.label, s.value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles_past_seven() {
        let counts: BTreeMap<String, u64> = (0..9).map(|i| (format!("c{i}"), i)).collect();
        let slices = category_slices(&counts);
        assert_eq!(slices.len(), 9);
        assert_eq!(slices[0].color, PALETTE[0]);
        assert_eq!(slices[6].color, "#3760BF");
        assert_eq!(slices[7].color, PALETTE[0]);
        assert_eq!(slices[8].color, PALETTE[1]);
    }

    #[test]
    fn text_shows_percentages() {
        let counts: BTreeMap<String, u64> =
            [("Мусор".to_string(), 3), ("Шум".to_string(), 1)].into_iter().collect();
        assert_eq!(
            render_text(&category_slices(&counts)),
            "  Мусор: 3 (75%)\n  Шум: 1 (25%)\n"
        );
        assert_eq!(render_text(&[]), "");
    }

    #[test]
    fn text_handles_counts_near_u64_max() {
        let counts: BTreeMap<String, u64> =
            [("a".to_string(), u64::MAX), ("b".to_string(), u64::MAX)].into_iter().collect();
        let text = render_text(&category_slices(&counts));
        assert_eq!(
            text,
            format!("  a: {max} (50%)\n  b: {max} (50%)\n", max = u64::MAX)
        );
    }

    #[test]
    fn slices_serialize_for_the_chart_widget() {
        let counts: BTreeMap<String, u64> = [("Мусор".to_string(), 3)].into_iter().collect();
        let json = serde_json::to_value(category_slices(&counts)).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "label": "Мусор", "value": 3, "color": "#EAF0FF" }])
        );
        let back: Vec<Slice> = serde_json::from_value(json).unwrap();
        assert_eq!(back, category_slices(&counts));
    }
}
