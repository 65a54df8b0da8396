use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::chart::{ResampleOptions, Rounding};

/// Default address of the query endpoint the provisioning layer starts.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8428";

/// Default step used if not set.
pub const DEFAULT_STEP: Duration = Duration::from_secs(5 * 60);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the query endpoint.
    pub endpoint: String,

    /// Step applied when a chart request does not specify one.
    pub default_step: Duration,

    /// Limits the number of significant digits kept in charted values.
    /// `None` keeps the frontend's nearest-integer display rounding.
    pub round_digits: Option<u8>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            default_step: DEFAULT_STEP,
            round_digits: None,
        }
    }
}

impl Settings {
    /// Settings with environment overrides applied on top of the defaults.
    pub fn from_env() -> Self {
        let mut settings = Settings::default();
        if let Some(endpoint) = get_setting_from_env::<String>("STATS_ENDPOINT") {
            settings.endpoint = endpoint;
        }
        if let Some(secs) = get_setting_from_env::<u64>("STATS_DEFAULT_STEP_SECS") {
            settings.default_step = Duration::from_secs(secs);
        }
        if let Some(digits) = get_setting_from_env::<u8>("STATS_ROUND_DIGITS") {
            settings.round_digits = Some(digits);
        }
        settings
    }

    /// Resample options derived from these settings.
    pub fn resample_options(&self) -> ResampleOptions {
        let rounding = match self.round_digits {
            Some(digits) => Rounding::Significant(digits),
            None => Rounding::Nearest,
        };
        ResampleOptions { rounding }
    }
}

fn get_setting_from_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
}
