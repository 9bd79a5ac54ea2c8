//! Aggregate counts over stored statements.
//!
//! All statements count, whether or not they have been reviewed.

use gorod_api_models::{Category, CategoryCounts, PeriodCounts, Statement};
use gorod_district_models::{District, DistrictCounts};

/// Counts keyed by district display name. Every district is present.
#[must_use]
pub fn by_district(statements: &[Statement]) -> DistrictCounts {
    let mut counts: DistrictCounts = District::ALL.iter().map(|d| (*d, 0)).collect();
    for statement in statements {
        match statement.district() {
            Some(district) => counts.add(district, 1),
            None => log::warn!(
                "Statement #{} has unknown district {:?}",
                statement.id,
                statement.district
            ),
        }
    }
    counts
}

/// Counts keyed by creation date, `YYYY-MM-DD`.
#[must_use]
pub fn by_period(statements: &[Statement]) -> PeriodCounts {
    let mut counts = PeriodCounts::new();
    for statement in statements {
        let day = statement.created_at.format("%Y-%m-%d").to_string();
        *counts.entry(day).or_insert(0) += 1;
    }
    counts
}

/// Counts of `district`'s statements keyed by category label. Every
/// category is present.
#[must_use]
pub fn by_category(statements: &[Statement], district: District) -> CategoryCounts {
    let mut counts: CategoryCounts = Category::ALL
        .into_iter()
        .map(|c| (c.label().to_string(), 0))
        .collect();
    for statement in statements
        .iter()
        .filter(|s| s.district() == Some(district))
    {
        if let Some(category) = statement.category() {
            *counts.entry(category.label().to_string()).or_insert(0) += 1;
        }
    }
    counts
}
