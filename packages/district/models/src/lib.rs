#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical district types for the Saint Petersburg complaint dashboard.
//!
//! The city is divided into 18 administrative districts. Every analytic
//! keyed by district uses the Russian display name (e.g. `"Центральный"`),
//! statements store the ASCII slug (e.g. `"tsentralny"`), and the category
//! analytics endpoint addresses a district by its 1-based numeric id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

/// One of the 18 canonical districts of Saint Petersburg.
///
/// Variant order is significant: it defines the numeric district id used by
/// `GET /analitic/categories/{districtId}` and the order of district series
/// in charts.
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
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum District {
    /// Адмиралтейский
    Admiralteysky,
    /// Василеостровский
    Vasileostrovsky,
    /// Выборгский
    Vyborgsky,
    /// Калининский
    Kalininsky,
    /// Кировский
    Kirovsky,
    /// Колпинский
    Kolpinsky,
    /// Красногвардейский
    Krasnogvardeysky,
    /// Красносельский
    Krasnoselsky,
    /// Кронштадтский
    Kronshtadtsky,
    /// Курортный
    Kurortny,
    /// Московский
    Moskovsky,
    /// Невский
    Nevsky,
    /// Петроградский
    Petrogradsky,
    /// Петродворцовый
    Petrodvortsovy,
    /// Приморский
    Primorsky,
    /// Пушкинский
    Pushkinsky,
    /// Фрунзенский
    Frunzensky,
    /// Центральный
    Tsentralny,
}

impl District {
    /// All districts in canonical order.
    pub const ALL: &[Self] = &[
        Self::Admiralteysky,
        Self::Vasileostrovsky,
        Self::Vyborgsky,
        Self::Kalininsky,
        Self::Kirovsky,
        Self::Kolpinsky,
        Self::Krasnogvardeysky,
        Self::Krasnoselsky,
        Self::Kronshtadtsky,
        Self::Kurortny,
        Self::Moskovsky,
        Self::Nevsky,
        Self::Petrogradsky,
        Self::Petrodvortsovy,
        Self::Primorsky,
        Self::Pushkinsky,
        Self::Frunzensky,
        Self::Tsentralny,
    ];

    /// Russian display name, used as the key of district analytics.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Admiralteysky => "Адмиралтейский",
            Self::Vasileostrovsky => "Василеостровский",
            Self::Vyborgsky => "Выборгский",
            Self::Kalininsky => "Калининский",
            Self::Kirovsky => "Кировский",
            Self::Kolpinsky => "Колпинский",
            Self::Krasnogvardeysky => "Красногвардейский",
            Self::Krasnoselsky => "Красносельский",
            Self::Kronshtadtsky => "Кронштадтский",
            Self::Kurortny => "Курортный",
            Self::Moskovsky => "Московский",
            Self::Nevsky => "Невский",
            Self::Petrogradsky => "Петроградский",
            Self::Petrodvortsovy => "Петродворцовый",
            Self::Primorsky => "Приморский",
            Self::Pushkinsky => "Пушкинский",
            Self::Frunzensky => "Фрунзенский",
            Self::Tsentralny => "Центральный",
        }
    }

    /// ASCII slug stored in statement records (e.g. `"nevsky"`).
    #[must_use]
    pub fn slug(self) -> &'static str {
        self.into()
    }

    /// 1-based numeric id in canonical order.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8 + 1
    }

    /// Looks a district up by its Russian display name.
    #[must_use]
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.display_name() == name)
    }

    /// Looks a district up by its ASCII slug.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        slug.parse().ok()
    }

    /// Looks a district up by its 1-based numeric id.
    #[must_use]
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id).checked_sub(1)?).copied()
    }
}

/// Outcome of resolving a raw municipal-area name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The name maps to a canonical district.
    Resolved(District),
    /// The name is absent from the lookup table.
    Unresolved,
}

impl Resolution {
    /// Returns the resolved district, if any.
    #[must_use]
    pub const fn district(self) -> Option<District> {
        match self {
            Self::Resolved(d) => Some(d),
            Self::Unresolved => None,
        }
    }
}

/// Per-district incident counts as served by `GET /analitic/district`.
///
/// Keys are district display names. The backend is trusted to send only
/// canonical names; unknown keys are kept but never matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistrictCounts(pub BTreeMap<String, u64>);

impl DistrictCounts {
    /// Count for a district, `0` when the backend sent no entry.
    #[must_use]
    pub fn count_for(&self, district: District) -> u64 {
        self.0.get(district.display_name()).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Adds `delta` to a district's count.
    pub fn add(&mut self, district: District, delta: u64) {
        *self
            .0
            .entry(district.display_name().to_string())
            .or_insert(0) += delta;
    }
}

impl FromIterator<(District, u64)> for DistrictCounts {
    fn from_iter<T: IntoIterator<Item = (District, u64)>>(iter: T) -> Self {
        let mut counts = Self::default();
        for (district, n) in iter {
            counts.add(district, n);
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eighteen_districts() {
        assert_eq!(District::ALL.len(), 18);
    }

    #[test]
    fn slug_roundtrip() {
        for district in District::ALL {
            assert_eq!(District::from_slug(district.slug()), Some(*district));
            assert_eq!(district.to_string(), district.slug());
        }
    }

    #[test]
    fn ids_are_one_based_and_ordered() {
        assert_eq!(District::Admiralteysky.id(), 1);
        assert_eq!(District::Tsentralny.id(), 18);
        for district in District::ALL {
            assert_eq!(District::from_id(district.id()), Some(*district));
        }
        assert_eq!(District::from_id(0), None);
        assert_eq!(District::from_id(19), None);
    }

    #[test]
    fn display_names_are_unique() {
        for district in District::ALL {
            assert_eq!(
                District::from_display_name(district.display_name()),
                Some(*district)
            );
        }
    }

    #[test]
    fn counts_default_to_zero() {
        let counts: DistrictCounts = serde_json::from_str(r#"{"Центральный": 10}"#).unwrap();
        assert_eq!(counts.count_for(District::Tsentralny), 10);
        assert_eq!(counts.count_for(District::Nevsky), 0);
        assert_eq!(counts.total(), 10);
    }

    #[test]
    fn serde_uses_slug() {
        let json = serde_json::to_string(&District::Petrodvortsovy).unwrap();
        assert_eq!(json, "\"petrodvortsovy\"");
    }
}
