// Telemetry rollup domain models

pub const HOURS_PER_DAY: usize = 24;

/// Hourly chart data for one vessel. All four sequences are parallel and
/// always `HOURS_PER_DAY` long.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyReport {
    pub vessel_id: String,
    pub hours: Vec<String>,
    pub speed: Vec<f64>,
    pub rpm: Vec<f64>,
    pub fuel: Vec<f64>,
}

impl HourlyReport {
    pub fn with_capacity(vessel_id: String) -> Self {
        Self {
            vessel_id,
            hours: Vec::with_capacity(HOURS_PER_DAY),
            speed: Vec::with_capacity(HOURS_PER_DAY),
            rpm: Vec::with_capacity(HOURS_PER_DAY),
            fuel: Vec::with_capacity(HOURS_PER_DAY),
        }
    }

    pub fn hour_label(index: usize) -> String {
        format!("{:02}:00", index)
    }
}
