// Vessel domain model
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum VesselStatus {
    Active,
    Inactive,
    Warning,
    Critical,
}

impl VesselStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VesselStatus::Active => "Active",
            VesselStatus::Inactive => "Inactive",
            VesselStatus::Warning => "Warning",
            VesselStatus::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Static attributes of a fleet unit plus the base values the simulator
/// perturbs around.
#[derive(Debug, Clone, Deserialize)]
pub struct VesselProfile {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub vessel_type: String,
    pub status: VesselStatus,
    pub owner: String,
    #[serde(default)]
    pub vts_active: bool,
    #[serde(default)]
    pub ems_active: bool,
    #[serde(default)]
    pub fms_active: bool,
    pub vessel_key: String,
    pub base_position: Position,
    pub base_speed: f64,
    pub base_heading: f64,
    pub base_rpm_portside: f64,
    pub base_rpm_starboard: f64,
    pub base_rpm_center: f64,
    pub base_fuel_consumption: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vessel {
    pub id: String,
    pub name: String,
    pub vessel_type: String,
    pub status: VesselStatus,
    pub owner: String,
    pub vts_active: bool,
    pub ems_active: bool,
    pub fms_active: bool,
    pub vessel_key: String,
    pub position: Position,
    pub speed: f64,
    pub heading: f64,
    pub rpm_portside: f64,
    pub rpm_starboard: f64,
    pub rpm_center: f64,
    pub fuel_consumption: f64,
    pub last_update: DateTime<Utc>,
}

/// Wrap a heading in degrees into `[0, 360)`.
pub fn normalize_heading(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
