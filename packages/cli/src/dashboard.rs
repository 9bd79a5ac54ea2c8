//! `gorod dashboard`: the analytics panels as text.

use std::fmt::Write as _;

use gorod_charts::{MonthRange, category_slices, district_series, donut, monthly_series};
use gorod_cli_utils::{MultiProgress, spinner};
use gorod_client::{Dashboard, GorodApi};
use gorod_district_models::District;

/// Loads the three panels and prints whichever arrived.
pub async fn run<A: GorodApi + ?Sized>(
    api: &A,
    multi: &MultiProgress,
    district_id: u8,
    range: MonthRange,
    width: usize,
) {
    let bar = spinner(multi, "Loading analytics...");
    let dashboard = Dashboard::load(api, district_id).await;
    bar.finish_and_clear();

    print!("{}", render(&dashboard, district_id, range, width));
}

fn render(dashboard: &Dashboard, district_id: u8, range: MonthRange, width: usize) -> String {
    let mut out = String::new();

    match &dashboard.periods {
        Some(periods) => {
            let series = monthly_series(periods, range);
            if series.is_empty() {
                out.push_str("Обращения по месяцам: нет данных\n");
            } else {
                out.push_str(&series.render_text(width));
            }
        }
        None => out.push_str("Обращения по месяцам: недоступно\n"),
    }
    out.push('\n');

    match &dashboard.districts {
        Some(districts) => {
            let line = district_series(districts);
            out.push_str(&line.series.render_text(width));
            let _ = writeln!(out, "  Всего: {}", line.total);
        }
        None => out.push_str("Проблемы по районам: недоступно\n"),
    }
    out.push('\n');

    let district = District::from_id(district_id).map_or("?", District::display_name);
    match &dashboard.categories {
        Some(categories) => {
            let _ = writeln!(out, "Категории: {district}");
            out.push_str(&donut::render_text(&category_slices(categories)));
        }
        None => {
            let _ = writeln!(out, "Категории: {district}: недоступно");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use gorod_district_models::DistrictCounts;

    use super::*;

    #[test]
    fn missing_panels_are_marked_unavailable() {
        let dashboard = Dashboard {
            districts: Some([(District::Nevsky, 4)].into_iter().collect::<DistrictCounts>()),
            periods: None,
            categories: Some(BTreeMap::from([("Шум".to_string(), 3)])),
        };
        let text = render(&dashboard, District::Nevsky.id(), MonthRange::all(), 10);

        assert!(text.contains("Обращения по месяцам: недоступно"));
        assert!(text.contains("Всего: 4"));
        assert!(text.contains("Категории: Невский"));
        assert!(text.contains("Шум: 3 (100%)"));
    }
}
