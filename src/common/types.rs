use std::cmp::Ordering;

/// Milliseconds since the UNIX epoch.
pub type Timestamp = i64;

/// A normalized sample: timestamp in milliseconds, value parsed to f64.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: Timestamp,
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: Timestamp, value: f64) -> Self {
        Sample { timestamp, value }
    }
}

impl PartialOrd for Sample {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.timestamp.cmp(&other.timestamp))
    }
}
