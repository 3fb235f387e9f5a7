// Hourly aggregator - 24 one-hour buckets over the last day for charting
use crate::application::simulation::centered_jitter;
use crate::domain::history::HistoryRecord;
use crate::domain::telemetry::{HourlyReport, HOURS_PER_DAY};
use crate::domain::vessel::Vessel;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

const SPEED_FALLBACK_SPAN: f64 = 4.0;
const RPM_FALLBACK_SPAN: f64 = 200.0;
const FUEL_SPAN: f64 = 10.0;

/// Bucket the vessel's records from the last 24 hours into hourly averages.
///
/// Buckets without records fall back to the vessel's current values plus
/// jitter. Fuel is always simulated from `vessel.fuel_consumption` and never
/// read from history.
pub fn hourly_report<R: Rng + ?Sized>(
    vessel: &Vessel,
    records: &[HistoryRecord],
    now: DateTime<Utc>,
    rng: &mut R,
) -> HourlyReport {
    let window_start = now - Duration::hours(HOURS_PER_DAY as i64);

    let mut recent: Vec<&HistoryRecord> = records
        .iter()
        .filter(|r| r.vessel_id == vessel.id && r.timestamp >= window_start)
        .collect();
    recent.sort_by_key(|r| r.timestamp);

    let mut report = HourlyReport::with_capacity(vessel.id.clone());

    for hour in 0..HOURS_PER_DAY {
        let hour_start = window_start + Duration::hours(hour as i64);
        let hour_end = hour_start + Duration::hours(1);

        report.hours.push(HourlyReport::hour_label(hour));

        let bucket: Vec<&HistoryRecord> = recent
            .iter()
            .copied()
            .filter(|r| r.timestamp >= hour_start && r.timestamp < hour_end)
            .collect();

        if bucket.is_empty() {
            report.speed.push(vessel.speed + centered_jitter(rng, SPEED_FALLBACK_SPAN));
            report.rpm.push(vessel.rpm_portside + centered_jitter(rng, RPM_FALLBACK_SPAN));
        } else {
            let n = bucket.len() as f64;
            report.speed.push(bucket.iter().map(|r| r.speed).sum::<f64>() / n);
            report.rpm.push(bucket.iter().map(|r| r.rpm_portside).sum::<f64>() / n);
        }

        report.fuel.push(vessel.fuel_consumption + centered_jitter(rng, FUEL_SPAN));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vessel::VesselStatus;
    use crate::test_support::{at, record, vessel};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_always_24_buckets_without_records() {
        let v = vessel("V001", VesselStatus::Active);
        let report = hourly_report(&v, &[], at(2024, 5, 2, 0, 0), &mut StdRng::seed_from_u64(1));

        assert_eq!(report.hours.len(), 24);
        assert_eq!(report.speed.len(), 24);
        assert_eq!(report.rpm.len(), 24);
        assert_eq!(report.fuel.len(), 24);
        assert_eq!(report.hours.first().map(String::as_str), Some("00:00"));
        assert_eq!(report.hours.last().map(String::as_str), Some("23:00"));

        // Fallback stays within the jitter band of the current values
        for (speed, rpm) in report.speed.iter().zip(&report.rpm) {
            assert!((speed - v.speed).abs() <= SPEED_FALLBACK_SPAN / 2.0);
            assert!((rpm - v.rpm_portside).abs() <= RPM_FALLBACK_SPAN / 2.0);
        }
    }

    #[test]
    fn test_averages_records_in_bucket() {
        let v = vessel("V001", VesselStatus::Active);
        let now = at(2024, 5, 2, 0, 0);
        // Window starts 2024-05-01 00:00, so 08:xx falls in bucket 8
        let mut a = record("V001", "Sinar Bahari", 0, at(2024, 5, 1, 8, 10), 10.0);
        a.rpm_portside = 1000.0;
        let mut b = record("V001", "Sinar Bahari", 1, at(2024, 5, 1, 8, 50), 14.0);
        b.rpm_portside = 1400.0;
        let other_vessel = record("V002", "Maritim Jaya", 0, at(2024, 5, 1, 8, 20), 99.0);
        let too_old = record("V001", "Sinar Bahari", 2, at(2024, 4, 30, 8, 20), 99.0);

        let records = vec![b, other_vessel, a, too_old];
        let report = hourly_report(&v, &records, now, &mut StdRng::seed_from_u64(2));

        assert_eq!(report.speed[8], 12.0);
        assert_eq!(report.rpm[8], 1200.0);
        assert_eq!(report.speed.len(), 24);
    }

    #[test]
    fn test_bucket_end_is_exclusive() {
        let v = vessel("V001", VesselStatus::Active);
        let now = at(2024, 5, 2, 0, 0);
        let records = vec![record("V001", "Sinar Bahari", 0, at(2024, 5, 1, 9, 0), 6.0)];

        let report = hourly_report(&v, &records, now, &mut StdRng::seed_from_u64(3));
        assert_eq!(report.speed[9], 6.0);
        assert_ne!(report.speed[8], 6.0);
    }

    #[test]
    fn test_fuel_is_always_simulated() {
        let v = vessel("V001", VesselStatus::Active);
        let now = at(2024, 5, 2, 0, 0);
        let records: Vec<_> = (0..24)
            .map(|h| record("V001", "Sinar Bahari", h, at(2024, 5, 1, h as u32, 15), 5.0))
            .collect();

        let report = hourly_report(&v, &records, now, &mut StdRng::seed_from_u64(4));
        assert!(report.speed.iter().all(|s| *s == 5.0));
        for fuel in &report.fuel {
            assert!((fuel - v.fuel_consumption).abs() <= FUEL_SPAN / 2.0);
        }
    }
}
