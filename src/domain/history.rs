// History record domain model
use chrono::{DateTime, Utc};

/// One immutable telemetry sample for one vessel.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub id: String,
    pub vessel_id: String,
    pub vessel_name: String,
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
    pub heading: f64,
    pub rpm_portside: f64,
    pub rpm_starboard: f64,
    pub rpm_center: f64,
}

impl HistoryRecord {
    pub fn record_id(vessel_id: &str, index: usize) -> String {
        format!("{}-{}", vessel_id, index)
    }
}
