//! Monthly bar series from date-keyed counts.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike as _, NaiveDate};

use crate::{ChartError, Dataset, PeriodCounts, Series};

/// Short Russian month names, January first.
pub const MONTHS: [&str; 12] = [
    "Янв", "Фев", "Мар", "Апр", "Май", "Июн", "Июл", "Авг", "Сен", "Окт", "Ноя", "Дек",
];

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    /// Calendar year.
    pub year: i32,
    /// 1-based.
    pub month: u32,
}

impl YearMonth {
    /// The month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The following month, rolling over into January.
    #[must_use]
    pub const fn next(self) -> Self {
        if self.month >= 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Bar label, e.g. `Мар 2024`.
    #[must_use]
    pub fn label(self) -> String {
        let idx = usize::try_from(self.month.clamp(1, 12) - 1).unwrap_or_default();
        format!("{} {}", MONTHS[idx], self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 7 {
            return Err(ChartError::InvalidMonth(s.to_string()));
        }
        NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .map(Self::of)
            .map_err(|_| ChartError::InvalidMonth(s.to_string()))
    }
}

/// Inclusive month range. An open end is taken from the data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthRange {
    /// First month shown.
    pub from: Option<YearMonth>,
    /// Last month shown.
    pub to: Option<YearMonth>,
}

impl MonthRange {
    /// Every month present in the data.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            from: None,
            to: None,
        }
    }

    /// Parses optional `YYYY-MM` bounds. Empty strings count as open.
    ///
    /// # Errors
    ///
    /// * If a bound is not a valid `YYYY-MM` month
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self, ChartError> {
        let bound = |s: Option<&str>| {
            s.filter(|s| !s.trim().is_empty())
                .map(str::parse::<YearMonth>)
                .transpose()
        };
        Ok(Self {
            from: bound(from)?,
            to: bound(to)?,
        })
    }
}

/// Parses a date key. Accepts `YYYY-MM-DD` and RFC 3339 timestamps.
fn parse_date(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(key).ok().map(|dt| dt.date_naive()))
}

/// Buckets date-keyed counts by month.
///
/// Every month between the range bounds is present, zero-filled where the
/// data has none. Keys that are not dates are logged and skipped.
#[must_use]
pub fn monthly_series(counts: &PeriodCounts, range: MonthRange) -> Series {
    let mut buckets: BTreeMap<YearMonth, u64> = BTreeMap::new();
    for (key, count) in counts {
        let Some(date) = parse_date(key) else {
            log::warn!("Skipping period count with unparseable date '{key}'");
            continue;
        };
        *buckets.entry(YearMonth::of(date)).or_default() += count;
    }

    let mut series = Series {
        title: "Обращения по месяцам".to_string(),
        labels: Vec::new(),
        datasets: vec![Dataset {
            label: "Проблемы".to_string(),
            data: Vec::new(),
            border_color: None,
        }],
    };

    let start = range.from.or_else(|| buckets.keys().next().copied());
    let end = range.to.or_else(|| buckets.keys().next_back().copied());
    let (Some(start), Some(end)) = (start, end) else {
        return series;
    };
    if start > end {
        log::warn!("Month range {start}..{end} is empty");
        return series;
    }

    let mut month = start;
    while month <= end {
        series.labels.push(month.label());
        series.datasets[0]
            .data
            .push(buckets.get(&month).copied().unwrap_or(0));
        month = month.next();
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(entries: &[(&str, u64)]) -> PeriodCounts {
        entries.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
    }

    #[test]
    fn buckets_by_month_and_fills_gaps() {
        let counts = counts(&[
            ("2024-01-05", 2),
            ("2024-01-20", 3),
            ("2024-03-01", 4),
        ]);
        let series = monthly_series(&counts, MonthRange::all());
        assert_eq!(series.labels, ["Янв 2024", "Фев 2024", "Мар 2024"]);
        assert_eq!(series.datasets[0].data, [5, 0, 4]);
    }

    #[test]
    fn range_clamps_inclusively_across_years() {
        let counts = counts(&[("2023-11-30", 1), ("2024-01-01", 7), ("2024-02-10", 9)]);
        let range = MonthRange::parse(Some("2023-12"), Some("2024-01")).unwrap();
        let series = monthly_series(&counts, range);
        assert_eq!(series.labels, ["Дек 2023", "Янв 2024"]);
        assert_eq!(series.datasets[0].data, [0, 7]);
    }

    #[test]
    fn unparseable_keys_are_skipped() {
        let counts = counts(&[("вчера", 10), ("2024-05-02T10:00:00+03:00", 1)]);
        let series = monthly_series(&counts, MonthRange::all());
        assert_eq!(series.labels, ["Май 2024"]);
        assert_eq!(series.datasets[0].data, [1]);
    }

    #[test]
    fn empty_inputs_give_empty_series() {
        assert!(monthly_series(&PeriodCounts::new(), MonthRange::all()).is_empty());
        let reversed = MonthRange::parse(Some("2024-05"), Some("2024-01")).unwrap();
        assert!(monthly_series(&counts(&[("2024-03-01", 1)]), reversed).is_empty());
    }

    #[test]
    fn month_parsing() {
        assert_eq!(
            "2024-09".parse::<YearMonth>().unwrap(),
            YearMonth {
                year: 2024,
                month: 9
            }
        );
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("2024".parse::<YearMonth>().is_err());
        assert_eq!(MonthRange::parse(Some(""), None).unwrap(), MonthRange::all());
        assert_eq!(YearMonth { year: 2024, month: 12 }.next().to_string(), "2025-01");
    }
}
