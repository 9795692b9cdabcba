//! Query service: the read interface the dashboard talks to.
//!
//! RULES:
//!   - Read-only. The store sits behind an Arc and is never mutated,
//!     so any number of queries may run concurrently.
//!   - Every operation waits out its simulated round-trip before
//!     answering. Latency is cosmetic, never a correctness input.

use crate::{
    analytics::{monthly_series, Analytics, AnalyticsOverview},
    borrower::BorrowerRecord,
    clock::DeskClock,
    config::{DeskConfig, LatencyConfig},
    error::{DeskError, DeskResult},
    query::{list_page, ListCriteria, QueryResult},
    rng::{RngBank, StreamRng, StreamSlot},
    store::BorrowerStore,
    types::BorrowerId,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct QueryService {
    store:           Arc<BorrowerStore>,
    latency:         LatencyConfig,
    clock:           DeskClock,
    trailing_months: u32,
    /// Filler for the monthly chart. Each call draws fresh values.
    analytics_rng:   Arc<Mutex<StreamRng>>,
}

impl QueryService {
    pub fn new(store: BorrowerStore, config: &DeskConfig, clock: DeskClock) -> Self {
        let analytics_rng = RngBank::new(config.seed).for_stream(StreamSlot::Analytics);
        Self {
            store: Arc::new(store),
            latency: config.latency,
            clock,
            trailing_months: config.trailing_months,
            analytics_rng: Arc::new(Mutex::new(analytics_rng)),
        }
    }

    /// Generate the store from `config` and wrap it.
    pub fn from_config(config: &DeskConfig, clock: DeskClock) -> Self {
        Self::new(BorrowerStore::from_config(config, &clock), config, clock)
    }

    pub fn store(&self) -> &BorrowerStore {
        &self.store
    }

    /// Filtered, sorted page of borrowers. Never fails: an empty or
    /// out-of-range result is still a result.
    pub async fn list(&self, criteria: &ListCriteria) -> QueryResult<BorrowerRecord> {
        simulate_latency(self.latency.list()).await;
        let result = list_page(self.store.records(), criteria);
        log::debug!(
            "list: page={} limit={} search={:?} sort={:?}/{:?} -> {} of {}",
            result.page,
            result.limit,
            criteria.search,
            criteria.sort_by,
            criteria.sort_order,
            result.data.len(),
            result.total
        );
        result
    }

    pub async fn get_by_id(&self, id: BorrowerId) -> DeskResult<BorrowerRecord> {
        simulate_latency(self.latency.get()).await;
        self.store.get(id).cloned().ok_or_else(|| {
            log::debug!("get: borrower {id} not found");
            DeskError::not_found(id)
        })
    }

    /// Resolve a textual id (as it arrives from a route or a command)
    /// and look it up. Text that is not an id is simply not found.
    pub async fn get_by_raw_id(&self, raw: &str) -> DeskResult<BorrowerRecord> {
        match raw.trim().parse::<BorrowerId>() {
            Ok(id) => self.get_by_id(id).await,
            Err(_) => {
                simulate_latency(self.latency.get()).await;
                log::debug!("get: '{raw}' is not a borrower id");
                Err(DeskError::not_found(raw))
            }
        }
    }

    /// Aggregates over the whole store plus the monthly filler series.
    pub async fn analytics(&self) -> Analytics {
        simulate_latency(self.latency.analytics()).await;
        let overview = AnalyticsOverview::compute(self.store.records());
        let monthly_data = {
            let mut rng = self.analytics_rng.lock().await;
            monthly_series(&mut rng, self.clock.today(), self.trailing_months)
        };
        log::debug!(
            "analytics: total={} overdue={}% recovered={} due={}",
            overview.total,
            overview.overdue_percentage,
            overview.total_recovered,
            overview.total_due
        );
        Analytics { overview, monthly_data }
    }
}

async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
