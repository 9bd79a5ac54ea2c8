#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! District name normalization.
//!
//! Resolves the fine-grained municipal-area names carried by the boundary
//! `GeoJSON` to one of the 18 canonical districts. Lookups are exact string
//! matches against an immutable [`DistrictTable`]; there is no fuzzy
//! matching and no case or whitespace folding.
//!
//! The built-in table is the single source of truth for the shipped
//! boundary asset. Consumers take a `&DistrictTable` so tests can inject a
//! smaller one.

pub mod table;

use std::collections::{BTreeMap, BTreeSet};

pub use gorod_district_models::{District, DistrictCounts, Resolution};

/// Immutable lookup from raw municipal-area names to districts.
#[derive(Debug, Clone, Default)]
pub struct DistrictTable {
    entries: BTreeMap<String, District>,
}

impl DistrictTable {
    /// Builds the table from [`table::MUNICIPAL_AREAS`].
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_entries(
            table::MUNICIPAL_AREAS
                .iter()
                .map(|(name, district)| ((*name).to_string(), *district)),
        )
    }

    /// Builds a table from arbitrary `(name, district)` pairs.
    ///
    /// Later duplicates overwrite earlier ones.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (String, District)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Resolves a raw municipal-area name.
    #[must_use]
    pub fn resolve(&self, raw: &str) -> Resolution {
        self.entries
            .get(raw)
            .copied()
            .map_or(Resolution::Unresolved, Resolution::Resolved)
    }

    /// Resolves a raw name and looks up its count, logging a warning and
    /// returning `0` for names missing from the table.
    #[must_use]
    pub fn count_for(&self, raw: &str, counts: &DistrictCounts) -> (Resolution, u64) {
        let resolution = self.resolve(raw);
        match resolution {
            Resolution::Resolved(district) => (resolution, counts.count_for(district)),
            Resolution::Unresolved => {
                log::warn!("No district mapping for municipal area '{raw}', using 0");
                (resolution, 0)
            }
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Districts reachable from at least one entry.
    #[must_use]
    pub fn districts_covered(&self) -> BTreeSet<District> {
        self.entries.values().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_resolves_to_a_canonical_district() {
        let table = DistrictTable::builtin();
        for (name, district) in table::MUNICIPAL_AREAS {
            assert_eq!(
                table.resolve(name),
                Resolution::Resolved(*district),
                "entry {name}"
            );
            assert!(District::ALL.contains(district));
        }
    }

    #[test]
    fn builtin_has_no_duplicate_names() {
        assert_eq!(DistrictTable::builtin().len(), table::MUNICIPAL_AREAS.len());
    }

    #[test]
    fn builtin_covers_all_districts() {
        assert_eq!(DistrictTable::builtin().districts_covered().len(), 18);
    }

    #[test]
    fn unknown_name_is_unresolved() {
        let table = DistrictTable::builtin();
        assert_eq!(table.resolve("Атлантида"), Resolution::Unresolved);
        assert_eq!(table.resolve(""), Resolution::Unresolved);
    }

    #[test]
    fn matching_is_exact() {
        let table = DistrictTable::builtin();
        assert_eq!(table.resolve("коломна"), Resolution::Unresolved);
        assert_eq!(table.resolve(" Коломна"), Resolution::Unresolved);
        assert_eq!(
            table.resolve("Коломна"),
            Resolution::Resolved(District::Admiralteysky)
        );
    }

    #[test]
    fn unresolved_counts_zero() {
        let table = DistrictTable::builtin();
        let counts: DistrictCounts = [(District::Tsentralny, 10)].into_iter().collect();
        assert_eq!(
            table.count_for("Литейный округ", &counts),
            (Resolution::Resolved(District::Tsentralny), 10)
        );
        assert_eq!(
            table.count_for("Неизвестный", &counts),
            (Resolution::Unresolved, 0)
        );
    }

    #[test]
    fn injected_table_replaces_builtin() {
        let table = DistrictTable::from_entries([("A".to_string(), District::Nevsky)]);
        assert_eq!(table.resolve("A"), Resolution::Resolved(District::Nevsky));
        assert_eq!(table.resolve("Коломна"), Resolution::Unresolved);
        assert_eq!(table.len(), 1);
    }
}
