// Fuel analysis - Simulated fuel level, alerts and summary along a daily track
use crate::application::simulation::centered_jitter;
use crate::domain::fuel::{AlertSeverity, FuelAlert, FuelAlertKind, FuelSample, FuelSummary};
use crate::domain::history::HistoryRecord;
use crate::domain::vessel::{Position, Vessel};
use rand::Rng;

const STARTING_LEVEL: f64 = 85.0;
const MIN_LEVEL: f64 = 5.0;
const MAX_LEVEL: f64 = 100.0;
const LEVEL_JITTER_SPAN: f64 = 2.0;
const MAX_ALERTS: usize = 10;

pub fn fuel_capacity(vessel_type: &str) -> f64 {
    match vessel_type {
        "Tanker" => 8000.0,
        "Container" => 6000.0,
        "Cargo" => 5000.0,
        "Ferry" => 3000.0,
        _ => 5000.0,
    }
}

/// Litres per hour from speed (kn) and engine RPM.
pub fn consumption_rate(speed: f64, rpm: f64) -> f64 {
    let idle = 20.0;
    (idle + speed * 1.5 + (rpm / 1000.0) * 8.0).max(5.0)
}

/// Walk an ascending track and simulate the tank draining between samples.
pub fn fuel_samples<R: Rng + ?Sized>(
    vessel: &Vessel,
    track: &[HistoryRecord],
    rng: &mut R,
) -> Vec<FuelSample> {
    let capacity = fuel_capacity(&vessel.vessel_type);
    let mut level = STARTING_LEVEL;
    let mut previous: Option<&HistoryRecord> = None;

    track
        .iter()
        .map(|record| {
            let rate = consumption_rate(record.speed, record.rpm_portside);

            if let Some(prev) = previous {
                let hours = (record.timestamp - prev.timestamp).num_milliseconds() as f64 / 3_600_000.0;
                let used = rate * hours / capacity * 100.0;
                level = (level - used).max(MIN_LEVEL);
            }
            previous = Some(record);

            level = (level + centered_jitter(rng, LEVEL_JITTER_SPAN)).clamp(MIN_LEVEL, MAX_LEVEL);

            let current_fuel = level / 100.0 * capacity;
            let efficiency = if record.speed > 0.0 { record.speed / rate } else { 0.0 };

            FuelSample {
                vessel_id: vessel.id.clone(),
                vessel_name: vessel.name.clone(),
                timestamp: record.timestamp,
                fuel_level: level,
                fuel_capacity: capacity,
                current_fuel,
                consumption: rate,
                efficiency,
                estimated_range: current_fuel * efficiency,
                location: Position::new(record.latitude, record.longitude),
            }
        })
        .collect()
}

fn alert(
    sample: &FuelSample,
    index: usize,
    kind: FuelAlertKind,
    severity: AlertSeverity,
    message: String,
) -> FuelAlert {
    FuelAlert {
        id: format!("{}-{}-{}", sample.vessel_id, kind.as_str(), index),
        vessel_id: sample.vessel_id.clone(),
        vessel_name: sample.vessel_name.clone(),
        kind,
        severity,
        message,
        timestamp: sample.timestamp,
        location: sample.location,
    }
}

/// Threshold alerts over the samples; only the latest `MAX_ALERTS` are kept.
pub fn fuel_alerts(samples: &[FuelSample]) -> Vec<FuelAlert> {
    let mut alerts = Vec::new();

    for (index, sample) in samples.iter().enumerate() {
        if sample.fuel_level < 20.0 {
            let critical = sample.fuel_level < 10.0;
            alerts.push(alert(
                sample,
                index,
                FuelAlertKind::LowFuel,
                if critical { AlertSeverity::Critical } else { AlertSeverity::Warning },
                format!(
                    "Fuel level at {:.1}% - {} fuel warning",
                    sample.fuel_level,
                    if critical { "Critical" } else { "Low" }
                ),
            ));
        }

        if sample.consumption > 60.0 {
            alerts.push(alert(
                sample,
                index,
                FuelAlertKind::HighConsumption,
                AlertSeverity::Warning,
                format!("High fuel consumption: {:.1} L/h", sample.consumption),
            ));
        }

        if index > 0 && sample.efficiency < samples[index - 1].efficiency * 0.7 {
            alerts.push(alert(
                sample,
                index,
                FuelAlertKind::EfficiencyDrop,
                AlertSeverity::Warning,
                format!("Fuel efficiency dropped to {:.2} km/L", sample.efficiency),
            ));
        }

        if sample.estimated_range < 50.0 {
            alerts.push(alert(
                sample,
                index,
                FuelAlertKind::RefuelNeeded,
                if sample.estimated_range < 20.0 {
                    AlertSeverity::Critical
                } else {
                    AlertSeverity::Warning
                },
                format!(
                    "Estimated range: {:.0} km - Refuel recommended",
                    sample.estimated_range
                ),
            ));
        }
    }

    let skip = alerts.len().saturating_sub(MAX_ALERTS);
    alerts.split_off(skip)
}

pub fn fuel_summary(samples: &[FuelSample]) -> Option<FuelSummary> {
    let (first, last) = (samples.first()?, samples.last()?);
    let n = samples.len() as f64;

    Some(FuelSummary {
        avg_consumption: samples.iter().map(|s| s.consumption).sum::<f64>() / n,
        avg_efficiency: samples.iter().map(|s| s.efficiency).sum::<f64>() / n,
        total_fuel_used: (first.current_fuel - last.current_fuel).max(0.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vessel::VesselStatus;
    use crate::test_support::{at, record, vessel};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample(level: f64, consumption: f64, efficiency: f64, range: f64) -> FuelSample {
        FuelSample {
            vessel_id: "V001".to_string(),
            vessel_name: "Sinar Bahari".to_string(),
            timestamp: at(2024, 5, 1, 8, 0),
            fuel_level: level,
            fuel_capacity: 5000.0,
            current_fuel: level * 50.0,
            consumption,
            efficiency,
            estimated_range: range,
            location: Position::new(-6.7, 113.8),
        }
    }

    #[test]
    fn test_capacity_by_type() {
        assert_eq!(fuel_capacity("Tanker"), 8000.0);
        assert_eq!(fuel_capacity("Ferry"), 3000.0);
        assert_eq!(fuel_capacity("Submarine"), 5000.0);
    }

    #[test]
    fn test_consumption_rate() {
        assert_eq!(consumption_rate(10.0, 2000.0), 20.0 + 15.0 + 16.0);
        assert_eq!(consumption_rate(0.0, 0.0), 20.0);
    }

    #[test]
    fn test_samples_drain_and_stay_in_bounds() {
        let mut v = vessel("V001", VesselStatus::Active);
        v.vessel_type = "Ferry".to_string();
        let track: Vec<_> = (0..16)
            .map(|i| record("V001", "Sinar Bahari", i, at(2024, 5, 1, i as u32, 30), 12.0))
            .collect();

        let samples = fuel_samples(&v, &track, &mut StdRng::seed_from_u64(9));
        assert_eq!(samples.len(), 16);
        assert!(samples.iter().all(|s| (MIN_LEVEL..=MAX_LEVEL).contains(&s.fuel_level)));
        assert!(samples.iter().all(|s| s.fuel_capacity == 3000.0));
        assert!((samples[0].fuel_level - STARTING_LEVEL).abs() <= 1.0);
        assert!(samples.last().unwrap().fuel_level < samples[0].fuel_level);

        let first = &samples[0];
        assert!((first.efficiency - 12.0 / first.consumption).abs() < 1e-12);
        assert!((first.estimated_range - first.current_fuel * first.efficiency).abs() < 1e-9);
    }

    #[test]
    fn test_zero_speed_has_zero_efficiency() {
        let v = vessel("V001", VesselStatus::Active);
        let track = vec![record("V001", "Sinar Bahari", 0, at(2024, 5, 1, 0, 0), 0.0)];

        let samples = fuel_samples(&v, &track, &mut StdRng::seed_from_u64(1));
        assert_eq!(samples[0].efficiency, 0.0);
        assert_eq!(samples[0].estimated_range, 0.0);
    }

    #[test]
    fn test_alert_thresholds() {
        let samples = vec![
            sample(50.0, 30.0, 0.5, 1000.0),
            sample(15.0, 65.0, 0.2, 30.0),
            sample(8.0, 30.0, 0.2, 10.0),
        ];

        let alerts = fuel_alerts(&samples);
        let kinds: Vec<(FuelAlertKind, AlertSeverity)> =
            alerts.iter().map(|a| (a.kind, a.severity)).collect();

        assert_eq!(
            kinds,
            vec![
                (FuelAlertKind::LowFuel, AlertSeverity::Warning),
                (FuelAlertKind::HighConsumption, AlertSeverity::Warning),
                (FuelAlertKind::EfficiencyDrop, AlertSeverity::Warning),
                (FuelAlertKind::RefuelNeeded, AlertSeverity::Warning),
                (FuelAlertKind::LowFuel, AlertSeverity::Critical),
                (FuelAlertKind::RefuelNeeded, AlertSeverity::Critical),
            ]
        );
        assert_eq!(alerts[0].id, "V001-low-fuel-1");
        assert_eq!(alerts[4].message, "Fuel level at 8.0% - Critical fuel warning");
    }

    #[test]
    fn test_alerts_keep_latest_ten() {
        let samples: Vec<_> = (0..8).map(|_| sample(15.0, 65.0, 0.5, 1000.0)).collect();

        let alerts = fuel_alerts(&samples);
        assert_eq!(alerts.len(), 10);
        assert_eq!(alerts[0].id, "V001-low-fuel-3");
        assert_eq!(alerts[9].id, "V001-high-consumption-7");
    }

    #[test]
    fn test_summary() {
        assert_eq!(fuel_summary(&[]), None);

        let samples = vec![sample(80.0, 30.0, 0.4, 1000.0), sample(70.0, 40.0, 0.2, 1000.0)];
        let summary = fuel_summary(&samples).unwrap();
        assert_eq!(summary.avg_consumption, 35.0);
        assert!((summary.avg_efficiency - 0.3).abs() < 1e-12);
        assert_eq!(summary.total_fuel_used, 500.0);
    }
}
