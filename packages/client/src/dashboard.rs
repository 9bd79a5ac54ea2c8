//! Dashboard data loading.

use std::sync::{Arc, Mutex, PoisonError};

use futures::StreamExt as _;
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use gorod_aggregation::{
    BoundaryFeature, DistrictJoin, DistrictTable, EnrichedLayers, Sequencer, Ticket,
};
use gorod_api_models::{CategoryCounts, PeriodCounts};
use gorod_district_models::DistrictCounts;
use gorod_geometry::CentroidStrategy;

use crate::{ClientError, GorodApi};

/// Analytics panels. A panel whose fetch failed stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dashboard {
    /// Counts per district.
    pub districts: Option<DistrictCounts>,
    /// Counts per day.
    pub periods: Option<PeriodCounts>,
    /// Counts per category in the selected district.
    pub categories: Option<CategoryCounts>,
}

fn panel<T>(name: &str, result: Result<T, ClientError>) -> Option<T> {
    result
        .inspect_err(|e| log::error!("Failed to load {name}: {e}"))
        .ok()
}

impl Dashboard {
    /// Fetches the three analytics panels concurrently. Categories are for
    /// `district_id`.
    pub async fn load<A: GorodApi + ?Sized>(api: &A, district_id: u8) -> Self {
        let (districts, periods, categories) = futures::join!(
            api.district_counts(),
            api.period_counts(),
            api.category_counts(district_id),
        );
        Self {
            districts: panel("district counts", districts),
            periods: panel("period counts", periods),
            categories: panel("category counts", categories),
        }
    }
}

/// Outcome of loading the map inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum MapLoad {
    /// Both inputs arrived and were joined.
    Enriched(EnrichedLayers),
    /// Counts failed; boundaries render without colour or heat.
    BoundariesOnly(Vec<BoundaryFeature>),
    /// No boundaries, nothing to draw.
    Unavailable,
}

enum Arrival {
    Boundaries(Result<Vec<BoundaryFeature>, ClientError>),
    Counts(Result<DistrictCounts, ClientError>),
}

/// Fetches boundaries and district counts concurrently and joins them as
/// they arrive; the second arrival triggers the merge.
pub async fn load_map<A: GorodApi + ?Sized>(
    api: &A,
    table: Arc<DistrictTable>,
    strategy: CentroidStrategy,
) -> MapLoad {
    let mut join = DistrictJoin::new(table).with_strategy(strategy);

    let mut pending: FuturesUnordered<BoxFuture<'_, Arrival>> = FuturesUnordered::new();
    pending.push(Box::pin(async { Arrival::Boundaries(api.boundaries().await) }));
    pending.push(Box::pin(async { Arrival::Counts(api.district_counts().await) }));

    let mut merged = None;
    while let Some(arrival) = pending.next().await {
        let layers = match arrival {
            Arrival::Boundaries(Ok(boundaries)) => join.offer_boundaries(boundaries),
            Arrival::Counts(Ok(counts)) => join.offer_counts(counts),
            Arrival::Boundaries(Err(e)) => {
                join.fail_boundaries(e.to_string());
                None
            }
            Arrival::Counts(Err(e)) => {
                join.fail_counts(e.to_string());
                None
            }
        };
        if layers.is_some() {
            merged = layers;
        }
    }

    match (merged, join.boundaries()) {
        (Some(layers), _) => MapLoad::Enriched(layers),
        (None, Some(boundaries)) => MapLoad::BoundariesOnly(boundaries.to_vec()),
        (None, None) => MapLoad::Unavailable,
    }
}

/// Category panel filtered by district.
///
/// Every selection issues a fresh fetch; a response is only applied if no
/// newer selection was made in the meantime.
#[derive(Debug, Default)]
pub struct CategoryFilter {
    sequencer: Sequencer,
    current: Mutex<Option<(u8, CategoryCounts)>>,
}

impl CategoryFilter {
    /// A filter with no district selected yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a selection.
    pub fn begin(&self) -> Ticket {
        self.sequencer.issue()
    }

    /// Applies the response to the selection started with `ticket`.
    /// Returns whether it was applied.
    pub fn complete(
        &self,
        ticket: Ticket,
        district_id: u8,
        result: Result<CategoryCounts, ClientError>,
    ) -> bool {
        let counts = match result {
            Ok(counts) => counts,
            Err(e) => {
                log::error!("Failed to load categories for district {district_id}: {e}");
                return false;
            }
        };
        let Some(counts) = self.sequencer.accept(ticket, counts) else {
            return false;
        };
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some((district_id, counts));
        true
    }

    /// Selects `district_id` and fetches its categories.
    pub async fn select<A: GorodApi + ?Sized>(&self, api: &A, district_id: u8) -> bool {
        let ticket = self.begin();
        let result = api.category_counts(district_id).await;
        self.complete(ticket, district_id, result)
    }

    /// The applied selection and its counts.
    #[must_use]
    pub fn current(&self) -> Option<(u8, CategoryCounts)> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
