use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::chart::resample::{resample_with_options, NamedSeries, OutputPoint, ResampleOptions};
use crate::common::types::Timestamp;
use crate::error::{StatsError, StatsResult};
use crate::query::types::QueryResult;

/// Declarative chart configuration consumed by the dashboard frontend.
///
/// Field names follow the frontend's charting library, hence the
/// camelCase serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub background_color: String,
    pub title: Title,
    pub tooltip: Tooltip,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series: Vec<LineSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub trigger: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    #[serde(rename = "type")]
    pub axis_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Timestamp>,
}

impl Axis {
    fn time(min: Timestamp, max: Timestamp) -> Self {
        Axis {
            axis_type: "time".to_string(),
            min: Some(min),
            max: Some(max),
        }
    }

    fn value() -> Self {
        Axis {
            axis_type: "value".to_string(),
            min: None,
            max: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub name: String,
    #[serde(rename = "type")]
    pub series_type: String,
    pub data: Vec<OutputPoint>,
}

impl From<NamedSeries> for LineSeries {
    fn from(series: NamedSeries) -> Self {
        LineSeries {
            name: series.name,
            series_type: "line".to_string(),
            data: series.points,
        }
    }
}

impl ChartOptions {
    pub fn to_value(&self) -> StatsResult<Value> {
        serde_json::to_value(self).map_err(|e| StatsError::General(e.to_string()))
    }
}

/// Builds the chart configuration for a range-query result: resampled
/// line series on a time axis pinned to `[start_time, end_time]`.
pub fn generate_chart_options(
    result: &QueryResult,
    name: &str,
    start_time: Timestamp,
    end_time: Timestamp,
    step: Duration,
) -> StatsResult<ChartOptions> {
    generate_chart_options_with(result, name, start_time, end_time, step, &ResampleOptions::default())
}

pub fn generate_chart_options_with(
    result: &QueryResult,
    name: &str,
    start_time: Timestamp,
    end_time: Timestamp,
    step: Duration,
    options: &ResampleOptions,
) -> StatsResult<ChartOptions> {
    let series = resample_with_options(result, start_time, end_time, step, options)?
        .into_iter()
        .map(LineSeries::from)
        .collect();

    Ok(ChartOptions {
        background_color: "white".to_string(),
        title: Title {
            text: name.to_string(),
        },
        tooltip: Tooltip {
            trigger: "axis".to_string(),
        },
        x_axis: Axis::time(start_time, end_time),
        y_axis: Axis::value(),
        series,
    })
}
