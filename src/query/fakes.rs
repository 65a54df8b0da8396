use std::sync::Mutex;
use std::time::Duration;

use tracing::debug;

use crate::common::types::Timestamp;
use crate::error::{StatsError, StatsResult};
use crate::query::datasource::{Querier, QuerierBuilder, QuerierParams};
use crate::query::types::{Alert, LabelSet, QueryResult};

#[derive(Default)]
struct QuerierInner {
    result: QueryResult,
    series: Vec<LabelSet>,
    alerts: Vec<Alert>,
    err: Option<StatsError>,
}

/// In-memory Querier returning canned responses, for tests and wiring
/// the dashboard without a running database.
#[derive(Default)]
pub struct FakeQuerier {
    params: QuerierParams,
    inner: Mutex<QuerierInner>,
}

impl FakeQuerier {
    pub fn new(result: QueryResult) -> Self {
        let inner = QuerierInner {
            result,
            ..Default::default()
        };
        Self {
            params: QuerierParams::default(),
            inner: Mutex::new(inner),
        }
    }

    pub fn with_params(mut self, params: QuerierParams) -> Self {
        self.params = params;
        self
    }

    pub fn set_result(&self, result: QueryResult) {
        let mut inner = self.inner.lock().unwrap();
        inner.result = result;
    }

    pub fn set_series(&self, series: Vec<LabelSet>) {
        let mut inner = self.inner.lock().unwrap();
        inner.series = series;
    }

    pub fn set_alerts(&self, alerts: Vec<Alert>) {
        let mut inner = self.inner.lock().unwrap();
        inner.alerts = alerts;
    }

    pub fn set_err(&self, err: Option<StatsError>) {
        let mut inner = self.inner.lock().unwrap();
        inner.err = err;
    }

    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.result = QueryResult::default();
        inner.series.clear();
        inner.alerts.clear();
        inner.err = None;
    }

    fn respond(&self, query: &str) -> StatsResult<QueryResult> {
        if self.params.debug {
            debug!("fake querier serving {query}");
        }
        let inner = self.inner.lock().unwrap();
        if let Some(err) = &inner.err {
            return Err(err.clone());
        }
        Ok(inner.result.clone())
    }
}

impl Querier for FakeQuerier {
    fn instant_query(&self, query: &str, _ts: Timestamp) -> StatsResult<QueryResult> {
        self.respond(query)
    }

    fn range_query(
        &self,
        query: &str,
        _start: Timestamp,
        _end: Timestamp,
        _step: Duration,
    ) -> StatsResult<QueryResult> {
        self.respond(query)
    }

    fn series(
        &self,
        _matchers: &[String],
        _start: Timestamp,
        _end: Timestamp,
    ) -> StatsResult<Vec<LabelSet>> {
        let inner = self.inner.lock().unwrap();
        if let Some(err) = &inner.err {
            return Err(err.clone());
        }
        Ok(inner.series.clone())
    }

    fn alerts(&self) -> StatsResult<Vec<Alert>> {
        let inner = self.inner.lock().unwrap();
        if let Some(err) = &inner.err {
            return Err(err.clone());
        }
        Ok(inner.alerts.clone())
    }
}

impl QuerierBuilder for FakeQuerier {
    fn build_with_params(&self, params: QuerierParams) -> Box<dyn Querier> {
        let inner = self.inner.lock().unwrap();
        let fake = FakeQuerier::new(inner.result.clone()).with_params(params);
        Box::new(fake)
    }
}
