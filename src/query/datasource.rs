use std::time::Duration;

use ahash::AHashMap;

use crate::common::current_time_millis;
use crate::common::types::Timestamp;
use crate::error::StatsResult;
use crate::query::types::{Alert, LabelSet, QueryResult};

/// Querier trait wraps the read operations of the stats database.
///
/// The transport (HTTP, in-process, ...) is an implementation concern;
/// the resampler and the chart layer only depend on the returned shapes.
pub trait Querier {
    /// Executes an instant request with the given query at the given ts.
    fn instant_query(&self, query: &str, ts: Timestamp) -> StatsResult<QueryResult>;

    /// Executes a range request with the given query on the given time range,
    /// sampled at `step` intervals.
    fn range_query(
        &self,
        query: &str,
        start: Timestamp,
        end: Timestamp,
        step: Duration,
    ) -> StatsResult<QueryResult>;

    /// Lists the label sets of series matching the given selectors.
    fn series(
        &self,
        matchers: &[String],
        start: Timestamp,
        end: Timestamp,
    ) -> StatsResult<Vec<LabelSet>>;

    /// Lists the currently known alerts.
    fn alerts(&self) -> StatsResult<Vec<Alert>>;

    /// Executes an instant request at the current wall-clock time.
    fn instant_query_now(&self, query: &str) -> StatsResult<QueryResult> {
        self.instant_query(query, current_time_millis())
    }
}

/// QuerierParams params for Querier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerierParams {
    /// How far to look into the past when no explicit range is given.
    pub look_back: Duration,
    /// Extra query params attached to each request.
    pub query_params: AHashMap<String, String>,
    /// Extra headers attached to each request.
    pub headers: AHashMap<String, String>,
    /// Whether to log each request.
    pub debug: bool,
}

/// QuerierBuilder builds a Querier with the given params.
pub trait QuerierBuilder {
    fn build_with_params(&self, params: QuerierParams) -> Box<dyn Querier>;
}
