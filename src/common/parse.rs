use crate::common::types::Timestamp;
use crate::error::{StatsError, StatsResult};

/// Parses a sample value string as returned by the query endpoint.
///
/// The wire format carries values as decimal strings. Non-numeric and
/// non-finite values ("NaN", "+Inf") are rejected so the caller can apply
/// its own fallback.
pub fn parse_sample_value(arg: &str) -> StatsResult<f64> {
    match arg.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(StatsError::InvalidNumber(arg.to_string())),
    }
}

/// Converts a raw timestamp in fractional seconds to milliseconds.
pub fn parse_timestamp_secs(secs: f64) -> StatsResult<Timestamp> {
    if !secs.is_finite() {
        return Err(StatsError::InvalidTimestamp(secs.to_string()));
    }
    Ok((secs * 1000.0).round() as Timestamp)
}
