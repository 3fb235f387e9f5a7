// Shared fixtures for unit tests
use crate::domain::history::HistoryRecord;
use crate::domain::vessel::{Position, Vessel, VesselProfile, VesselStatus};
use chrono::{DateTime, TimeZone, Utc};

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub fn profile(id: &str, name: &str) -> VesselProfile {
    VesselProfile {
        id: id.to_string(),
        name: name.to_string(),
        vessel_type: "Cargo".to_string(),
        status: VesselStatus::Active,
        owner: format!("PT {}", name),
        vts_active: true,
        ems_active: true,
        fms_active: false,
        vessel_key: format!("{}-2024-CARGO", id),
        base_position: Position::new(-6.7, 113.8),
        base_speed: 12.5,
        base_heading: 135.0,
        base_rpm_portside: 1850.0,
        base_rpm_starboard: 1820.0,
        base_rpm_center: 1835.0,
        base_fuel_consumption: 45.2,
    }
}

pub fn vessel(id: &str, status: VesselStatus) -> Vessel {
    Vessel {
        id: id.to_string(),
        name: format!("Vessel {}", id),
        vessel_type: "Cargo".to_string(),
        status,
        owner: "PT Test".to_string(),
        vts_active: true,
        ems_active: true,
        fms_active: true,
        vessel_key: format!("{}-KEY", id),
        position: Position::new(-6.7, 113.8),
        speed: 10.0,
        heading: 90.0,
        rpm_portside: 1500.0,
        rpm_starboard: 1480.0,
        rpm_center: 1490.0,
        fuel_consumption: 40.0,
        last_update: at(2024, 5, 1, 0, 0),
    }
}

pub fn record(
    vessel_id: &str,
    vessel_name: &str,
    index: usize,
    timestamp: DateTime<Utc>,
    speed: f64,
) -> HistoryRecord {
    HistoryRecord {
        id: HistoryRecord::record_id(vessel_id, index),
        vessel_id: vessel_id.to_string(),
        vessel_name: vessel_name.to_string(),
        timestamp,
        latitude: -6.7 + index as f64 * 0.01,
        longitude: 113.8 + index as f64 * 0.01,
        speed,
        heading: (index as f64 * 45.0) % 360.0,
        rpm_portside: 1500.0 + index as f64 * 10.0,
        rpm_starboard: 1480.0 + index as f64 * 10.0,
        rpm_center: 1490.0 + index as f64 * 10.0,
    }
}

/// Two vessels with three records each, one per hour on 2024-05-01.
pub fn two_vessel_day() -> Vec<HistoryRecord> {
    vec![
        record("V001", "Sinar Bahari", 0, at(2024, 5, 1, 8, 0), 3.0),
        record("V001", "Sinar Bahari", 1, at(2024, 5, 1, 9, 0), 12.5),
        record("V001", "Sinar Bahari", 2, at(2024, 5, 1, 10, 0), 21.0),
        record("V002", "Maritim Jaya", 0, at(2024, 5, 1, 8, 30), 7.0),
        record("V002", "Maritim Jaya", 1, at(2024, 5, 1, 9, 30), 15.0),
        record("V002", "Maritim Jaya", 2, at(2024, 5, 1, 10, 30), 19.9),
    ]
}
