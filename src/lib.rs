pub mod chart;
pub mod common;
pub mod config;
pub mod error;
pub mod query;

pub use chart::{
    generate_chart_options, generate_chart_options_with, resample, resample_with_options,
    ChartOptions, LineSeries, NamedSeries, OutputPoint, ResampleOptions, Rounding,
};
pub use config::Settings;
pub use error::{StatsError, StatsResult};
pub use query::{Alert, LabelSet, Querier, QueryResponse, QueryResult, Series};

pub const PLUGIN_NAME: &str = "stats";
