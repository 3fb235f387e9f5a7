// Latest-state reducer - Fold history into one current snapshot per vessel
use crate::application::error::{FleetError, FleetResult};
use crate::domain::history::HistoryRecord;
use crate::domain::vessel::{Position, Vessel, VesselProfile};
use std::collections::HashMap;

/// Latest record per vessel id. On equal timestamps the last one seen wins.
pub fn latest_records(records: &[HistoryRecord]) -> HashMap<&str, &HistoryRecord> {
    let mut latest: HashMap<&str, &HistoryRecord> = HashMap::new();

    for record in records {
        let newer = latest
            .get(record.vessel_id.as_str())
            .map_or(true, |current| record.timestamp >= current.timestamp);
        if newer {
            latest.insert(record.vessel_id.as_str(), record);
        }
    }

    latest
}

/// Build one vessel per profile, in profile order, with dynamic fields taken
/// from that vessel's newest record. A profile without records is a
/// configuration error.
pub fn reduce_latest(
    records: &[HistoryRecord],
    profiles: &[VesselProfile],
) -> FleetResult<Vec<Vessel>> {
    let latest = latest_records(records);

    profiles
        .iter()
        .map(|profile| -> FleetResult<Vessel> {
            let record = latest
                .get(profile.id.as_str())
                .ok_or_else(|| FleetError::MissingHistory {
                    vessel_id: profile.id.clone(),
                })?;

            Ok(Vessel {
                id: profile.id.clone(),
                name: record.vessel_name.clone(),
                vessel_type: profile.vessel_type.clone(),
                status: profile.status,
                owner: profile.owner.clone(),
                vts_active: profile.vts_active,
                ems_active: profile.ems_active,
                fms_active: profile.fms_active,
                vessel_key: profile.vessel_key.clone(),
                position: Position::new(record.latitude, record.longitude),
                speed: record.speed,
                heading: record.heading,
                rpm_portside: record.rpm_portside,
                rpm_starboard: record.rpm_starboard,
                rpm_center: record.rpm_center,
                fuel_consumption: profile.base_fuel_consumption,
                last_update: record.timestamp,
            })
        })
        .collect()
}
