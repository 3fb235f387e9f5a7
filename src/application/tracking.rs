// Daily track - One vessel's records for one calendar day, oldest first
use crate::application::error::{FleetError, FleetResult};
use crate::application::history_query::day_start;
use crate::domain::history::HistoryRecord;
use chrono::{Duration, FixedOffset, NaiveDate};

/// Fails with `InvalidDate` when the day's bounds are not representable.
pub fn daily_track(
    vessel_id: &str,
    records: &[HistoryRecord],
    date: NaiveDate,
    offset: FixedOffset,
) -> FleetResult<Vec<HistoryRecord>> {
    let invalid = || FleetError::InvalidDate(date.to_string());
    let start = day_start(date, offset).ok_or_else(invalid)?;
    let next_day = start.checked_add_signed(Duration::days(1)).ok_or_else(invalid)?;

    let mut track: Vec<HistoryRecord> = records
        .iter()
        .filter(|r| r.vessel_id == vessel_id && r.timestamp >= start && r.timestamp < next_day)
        .cloned()
        .collect();
    track.sort_by_key(|r| r.timestamp);
    Ok(track)
}
