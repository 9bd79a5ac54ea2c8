//! Readiness-gated join of the boundary and count inputs.
//!
//! Boundaries come from a static asset and counts from the backend; both
//! are fetched concurrently and may resolve in either order. The merge
//! runs when the last of the pair arrives, and again whenever either side
//! is replaced, always with the freshest pair.

use std::sync::Arc;

use gorod_district::DistrictTable;
use gorod_district_models::DistrictCounts;
use gorod_geometry::CentroidStrategy;

use crate::{BoundaryFeature, EnrichedLayers};

enum Slot<T> {
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> Slot<T> {
    const fn get(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending | Self::Failed(_) => None,
        }
    }

    fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            Self::Pending | Self::Ready(_) => None,
        }
    }
}

/// Progress of a [`JoinGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinState {
    /// At least one side has not resolved yet and none failed.
    Waiting,
    /// Both sides are present.
    Ready,
    /// A side failed; the join will not produce output until it is
    /// offered again.
    Degraded,
}

/// A readiness pair over two independently resolving inputs.
pub struct JoinGate<L, R> {
    left: Slot<L>,
    right: Slot<R>,
}

impl<L, R> Default for JoinGate<L, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L, R> JoinGate<L, R> {
    /// Creates a gate with both sides pending.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            left: Slot::Pending,
            right: Slot::Pending,
        }
    }

    /// Stores the left input. Returns both inputs if the right one is
    /// already present.
    pub fn offer_left(&mut self, value: L) -> Option<(&L, &R)> {
        self.left = Slot::Ready(value);
        self.both()
    }

    /// Stores the right input. Returns both inputs if the left one is
    /// already present.
    pub fn offer_right(&mut self, value: R) -> Option<(&L, &R)> {
        self.right = Slot::Ready(value);
        self.both()
    }

    /// Marks the left input as failed, discarding any earlier value.
    pub fn fail_left(&mut self, reason: impl Into<String>) {
        self.left = Slot::Failed(reason.into());
    }

    /// Marks the right input as failed, discarding any earlier value.
    pub fn fail_right(&mut self, reason: impl Into<String>) {
        self.right = Slot::Failed(reason.into());
    }

    /// Both inputs, if both are present.
    #[must_use]
    pub const fn both(&self) -> Option<(&L, &R)> {
        match (self.left.get(), self.right.get()) {
            (Some(l), Some(r)) => Some((l, r)),
            _ => None,
        }
    }

    /// The left input, if present.
    #[must_use]
    pub const fn left(&self) -> Option<&L> {
        self.left.get()
    }

    /// The right input, if present.
    #[must_use]
    pub const fn right(&self) -> Option<&R> {
        self.right.get()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> JoinState {
        if self.both().is_some() {
            JoinState::Ready
        } else if self.failure().is_some() {
            JoinState::Degraded
        } else {
            JoinState::Waiting
        }
    }

    /// The first recorded failure reason (left before right).
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        self.left.failure().or_else(|| self.right.failure())
    }
}

/// Boundary/count join producing [`EnrichedLayers`].
pub struct DistrictJoin {
    table: Arc<DistrictTable>,
    strategy: CentroidStrategy,
    gate: JoinGate<Vec<BoundaryFeature>, DistrictCounts>,
    merges: usize,
}

impl DistrictJoin {
    /// Creates a join resolving names through `table`.
    #[must_use]
    pub const fn new(table: Arc<DistrictTable>) -> Self {
        Self {
            table,
            strategy: CentroidStrategy::VertexMean,
            gate: JoinGate::new(),
            merges: 0,
        }
    }

    /// Sets how label points are computed.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: CentroidStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Offers the boundary input. Returns the merged layers when the
    /// counts are already present.
    pub fn offer_boundaries(&mut self, boundaries: Vec<BoundaryFeature>) -> Option<EnrichedLayers> {
        self.gate.offer_left(boundaries);
        self.merge()
    }

    /// Offers the count input. Returns the merged layers when the
    /// boundaries are already present.
    pub fn offer_counts(&mut self, counts: DistrictCounts) -> Option<EnrichedLayers> {
        self.gate.offer_right(counts);
        self.merge()
    }

    /// Records that the boundary fetch failed.
    pub fn fail_boundaries(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        log::error!("District boundaries unavailable: {reason}");
        self.gate.fail_left(reason);
    }

    /// Records that the count fetch failed. Boundaries, if present, still
    /// render without colour or heat.
    pub fn fail_counts(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        log::error!("District counts unavailable: {reason}");
        self.gate.fail_right(reason);
    }

    /// Boundaries received so far.
    #[must_use]
    pub fn boundaries(&self) -> Option<&[BoundaryFeature]> {
        self.gate.left().map(Vec::as_slice)
    }

    /// Current join state.
    #[must_use]
    pub fn state(&self) -> JoinState {
        self.gate.state()
    }

    /// Number of merges performed.
    #[must_use]
    pub const fn merges(&self) -> usize {
        self.merges
    }

    fn merge(&mut self) -> Option<EnrichedLayers> {
        let (boundaries, counts) = self.gate.both()?;
        let layers = EnrichedLayers::build(&self.table, boundaries, counts, self.strategy);
        self.merges += 1;
        log::debug!(
            "Joined {} boundaries with {} district counts",
            layers.enriched.len(),
            counts.0.len()
        );
        Some(layers)
    }
}

#[cfg(test)]
mod tests {
    use gorod_district_models::District;
    use gorod_geometry::Shape;

    use super::*;

    fn boundaries() -> Vec<BoundaryFeature> {
        vec![
            BoundaryFeature::new(
                "Литейный округ",
                Shape::Polygon(vec![vec![[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0]]]),
            ),
            BoundaryFeature::new(
                "Неизвестно",
                Shape::Polygon(vec![vec![[3.0, 3.0], [3.0, 4.0], [4.0, 4.0]]]),
            ),
        ]
    }

    fn counts(n: u64) -> DistrictCounts {
        [(District::Tsentralny, n), (District::Nevsky, 5)]
            .into_iter()
            .collect()
    }

    fn join() -> DistrictJoin {
        DistrictJoin::new(Arc::new(DistrictTable::builtin()))
    }

    #[test]
    fn merges_only_when_both_present_boundaries_first() {
        let mut join = join();
        assert!(join.offer_boundaries(boundaries()).is_none());
        assert_eq!(join.state(), JoinState::Waiting);
        assert_eq!(join.merges(), 0);

        let layers = join.offer_counts(counts(10)).unwrap();
        assert_eq!(join.merges(), 1);
        assert_eq!(layers.enriched[0].value, 10);
        assert_eq!(layers.enriched[1].value, 0);
        assert_eq!(join.state(), JoinState::Ready);
    }

    #[test]
    fn merges_only_when_both_present_counts_first() {
        let mut join = join();
        assert!(join.offer_counts(counts(10)).is_none());
        let layers = join.offer_boundaries(boundaries()).unwrap();
        assert_eq!(layers.enriched.len(), 2);
        assert_eq!(join.merges(), 1);
    }

    #[test]
    fn replacing_a_side_remerges_with_fresh_values() {
        let mut join = join();
        join.offer_boundaries(boundaries());
        join.offer_counts(counts(10));
        let layers = join.offer_counts(counts(42)).unwrap();
        assert_eq!(layers.enriched[0].value, 42);
        assert_eq!(join.merges(), 2);
    }

    #[test]
    fn failed_counts_keep_boundaries_without_output() {
        let mut join = join();
        join.offer_boundaries(boundaries());
        join.fail_counts("connection refused");
        assert_eq!(join.state(), JoinState::Degraded);
        assert_eq!(join.boundaries().map(<[_]>::len), Some(2));
        assert_eq!(join.merges(), 0);
    }

    #[test]
    fn gate_reports_first_failure() {
        let mut gate: JoinGate<u8, u8> = JoinGate::new();
        gate.fail_right("right down");
        assert_eq!(gate.failure(), Some("right down"));
        assert_eq!(gate.offer_left(1), None);
        assert_eq!(gate.state(), JoinState::Degraded);
        assert_eq!(gate.offer_right(2), Some((&1, &2)));
        assert_eq!(gate.state(), JoinState::Ready);
    }
}
