use std::time::Duration;

use serde::{Serialize, Serializer};
use tracing::warn;

use crate::common::parse::{parse_sample_value, parse_timestamp_secs};
use crate::common::types::{Sample, Timestamp};
use crate::common::SERIES_NAME_LABEL;
use crate::error::{StatsError, StatsResult};
use crate::query::types::{QueryResult, Series};

/// A single charted point.
///
/// Serializes as a `[timestamp, value]` pair, the shape the chart
/// frontend plots directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputPoint {
    pub timestamp: Timestamp,
    pub value: f64,
}

impl Serialize for OutputPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.timestamp, self.value).serialize(serializer)
    }
}

/// A dense fixed-interval series ready for charting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedSeries {
    pub name: String,
    pub points: Vec<OutputPoint>,
}

/// Rounding applied to aligned values before charting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Round to the nearest integer.
    #[default]
    Nearest,
    /// Keep the given number of significant digits.
    Significant(u8),
    /// Keep full precision.
    Disabled,
}

impl Rounding {
    fn apply(&self, value: f64) -> f64 {
        match self {
            Rounding::Nearest => value.round(),
            Rounding::Significant(digits) => {
                round_to_significant_digits(value, *digits as u32)
            }
            Rounding::Disabled => value,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResampleOptions {
    pub rounding: Rounding,
}

/// Resamples a range-query result onto the fixed grid defined by
/// `[start_time, end_time]` and `step`, with nearest-integer rounding.
///
/// See [`resample_with_options`].
pub fn resample(
    result: &QueryResult,
    start_time: Timestamp,
    end_time: Timestamp,
    step: Duration,
) -> StatsResult<Vec<NamedSeries>> {
    resample_with_options(result, start_time, end_time, step, &ResampleOptions::default())
}

/// Resamples a range-query result onto a fixed grid.
///
/// For every grid timestamp the nearest sample of a series is looked up;
/// it counts as aligned when it lies within half a step of the grid point,
/// which tolerates clock drift between the requested grid and the actual
/// sample cadence. Grid points with no sample in tolerance are filled
/// with `0`, so a gap is indistinguishable from a true zero reading.
///
/// `start_time` and `end_time` are in milliseconds. `start_time` past
/// `end_time` yields zero-point series. Output length per series always
/// equals the grid length. A `step` under one millisecond is rejected.
pub fn resample_with_options(
    result: &QueryResult,
    start_time: Timestamp,
    end_time: Timestamp,
    step: Duration,
    options: &ResampleOptions,
) -> StatsResult<Vec<NamedSeries>> {
    let step_ms = step.as_millis() as i64;
    if step_ms <= 0 {
        return Err(StatsError::InvalidConfiguration(format!(
            "step must be at least 1ms, got {:?}",
            step
        )));
    }

    let grid = build_grid(start_time, end_time, step_ms);
    let tolerance = step_ms / 2;

    let series = result
        .result
        .iter()
        .map(|series| {
            let samples = normalize_samples(series);
            let points = grid
                .iter()
                .map(|&timestamp| OutputPoint {
                    timestamp,
                    value: aligned_value(&samples, timestamp, tolerance, options.rounding),
                })
                .collect();
            NamedSeries {
                name: series_name(series),
                points,
            }
        })
        .collect();

    Ok(series)
}

/// Grid timestamps from `start_time` to `end_time` inclusive, `step_ms` apart.
fn build_grid(start_time: Timestamp, end_time: Timestamp, step_ms: i64) -> Vec<Timestamp> {
    if start_time > end_time {
        return Vec::new();
    }
    let capacity = ((end_time - start_time) / step_ms + 1) as usize;
    let mut grid = Vec::with_capacity(capacity);
    let mut t = start_time;
    while t <= end_time {
        grid.push(t);
        t = match t.checked_add(step_ms) {
            Some(next) => next,
            None => break,
        };
    }
    grid
}

/// Converts a series' raw samples to `(ms, f64)`, sorted by timestamp with
/// duplicate timestamps collapsed to the last value.
///
/// Unparsable or non-finite values degrade to `0` so one bad sample cannot
/// take the whole chart down; non-finite timestamps are dropped since they
/// cannot be placed on the axis.
fn normalize_samples(series: &Series) -> Vec<Sample> {
    let raw = series.samples();
    let mut samples = Vec::with_capacity(raw.len());
    for (secs, value) in raw {
        let timestamp = match parse_timestamp_secs(*secs) {
            Ok(ts) => ts,
            Err(_) => {
                warn!("dropping sample with non-finite timestamp {secs}");
                continue;
            }
        };
        let value = match parse_sample_value(value) {
            Ok(v) => v,
            Err(_) => {
                warn!("substituting 0 for unparsable sample value {value:?}");
                0.0
            }
        };
        samples.push(Sample::new(timestamp, value));
    }
    samples.sort_by_key(|s| s.timestamp);
    samples.dedup_by(|a, b| {
        if a.timestamp == b.timestamp {
            // last write wins
            b.value = a.value;
            true
        } else {
            false
        }
    });
    samples
}

/// Returns the index of the sample whose timestamp is closest to `target`.
///
/// Ties between two equidistant neighbors resolve to the earlier sample;
/// targets outside the sampled range clamp to the boundary sample.
pub(crate) fn closest_sample_index(samples: &[Sample], target: Timestamp) -> Option<usize> {
    if samples.is_empty() {
        return None;
    }
    match samples.binary_search_by(|s| s.timestamp.cmp(&target)) {
        Ok(idx) => Some(idx),
        Err(0) => Some(0),
        Err(idx) if idx == samples.len() => Some(idx - 1),
        Err(idx) => {
            let prior = target - samples[idx - 1].timestamp;
            let next = samples[idx].timestamp - target;
            if prior <= next {
                Some(idx - 1)
            } else {
                Some(idx)
            }
        }
    }
}

fn aligned_value(
    samples: &[Sample],
    target: Timestamp,
    tolerance: i64,
    rounding: Rounding,
) -> f64 {
    match closest_sample_index(samples, target) {
        Some(idx) => {
            let sample = samples[idx];
            if (sample.timestamp - target).abs() <= tolerance {
                rounding.apply(sample.value)
            } else {
                0.0
            }
        }
        None => 0.0,
    }
}

fn series_name(series: &Series) -> String {
    match series.display_name() {
        Some(name) => name.to_string(),
        None => {
            warn!(
                "series {} is missing the {SERIES_NAME_LABEL} label",
                series.metric_name()
            );
            String::new()
        }
    }
}

fn round_to_significant_digits(x: f64, n: u32) -> f64 {
    if x == 0.0 || x.is_infinite() || x.is_nan() {
        return x;
    }
    if n == 0 || n >= 18 {
        return x;
    }
    let magnitude = x.abs().log10().floor();
    let power = 10.0_f64.powi(n as i32 - 1 - magnitude as i32);
    (x * power).round() / power
}
