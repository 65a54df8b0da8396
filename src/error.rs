use thiserror::Error;

#[derive(Debug, Error, Clone, Eq, PartialEq)]
/// Enum for various errors in the stats core.
pub enum StatsError {
  #[error("Invalid configuration. {0}")]
  InvalidConfiguration(String),

  #[error("Invalid timestamp. {0}")]
  InvalidTimestamp(String),

  #[error("Invalid number. {0}")]
  InvalidNumber(String),

  #[error("Query execution error. {0}")]
  QueryExecution(String),

  #[error("{0}")]
  General(String)
}

pub type StatsResult<T> = Result<T, StatsError>;
