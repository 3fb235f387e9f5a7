// CSV export - History, daily track and fuel report downloads
use crate::application::error::FleetResult;
use crate::domain::fuel::FuelSample;
use crate::domain::history::HistoryRecord;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use std::io::Write;

pub const HISTORY_HEADER: [&str; 10] = [
    "Vessel ID",
    "Vessel Name",
    "Timestamp",
    "Latitude",
    "Longitude",
    "Speed (kts)",
    "Heading (°)",
    "RPM Portside",
    "RPM Starboard",
    "RPM Center",
];

pub const TRACK_HEADER: [&str; 8] = [
    "Timestamp",
    "Latitude",
    "Longitude",
    "Speed (kts)",
    "Heading (°)",
    "RPM Portside",
    "RPM Starboard",
    "RPM Center",
];

pub const FUEL_HEADER: [&str; 9] = [
    "Timestamp",
    "Vessel",
    "Fuel Level (%)",
    "Current Fuel (L)",
    "Consumption (L/h)",
    "Efficiency (km/L)",
    "Range (km)",
    "Latitude",
    "Longitude",
];

/// A rendered download: suggested filename plus CSV bytes.
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub body: Vec<u8>,
}

pub fn history_export_filename(export_date: NaiveDate) -> String {
    format!("vessel-history-{}.csv", export_date.format("%Y-%m-%d"))
}

pub fn track_export_filename(vessel_name: &str, date: NaiveDate) -> String {
    format!("{}-tracking-{}.csv", vessel_name, date.format("%Y-%m-%d"))
}

pub fn fuel_report_filename(vessel_name: &str, date: NaiveDate) -> String {
    format!("fuel-report-{}-{}.csv", vessel_name, date.format("%Y-%m-%d"))
}

/// ISO-8601 in UTC with milliseconds, e.g. `2024-05-01T08:00:00.000Z`
pub fn iso_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Whole degrees, truncated so the value stays within `0..=359`.
fn heading_degrees(heading: f64) -> String {
    (heading.trunc() as i64).to_string()
}

fn motion_fields(record: &HistoryRecord) -> [String; 8] {
    [
        iso_timestamp(&record.timestamp),
        format!("{:.6}", record.latitude),
        format!("{:.6}", record.longitude),
        format!("{:.1}", record.speed),
        heading_degrees(record.heading),
        format!("{:.2}", record.rpm_portside),
        format!("{:.2}", record.rpm_starboard),
        format!("{:.2}", record.rpm_center),
    ]
}

fn write_rows<W, I, R>(writer: W, header: &[&str], rows: I) -> FleetResult<()>
where
    W: Write,
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(header)?;
    for row in rows {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_history_csv<W: Write>(records: &[HistoryRecord], writer: W) -> FleetResult<()> {
    let rows = records.iter().map(|record| {
        let mut row = vec![record.vessel_id.clone(), record.vessel_name.clone()];
        row.extend(motion_fields(record));
        row
    });
    write_rows(writer, &HISTORY_HEADER, rows)
}

pub fn write_track_csv<W: Write>(track: &[HistoryRecord], writer: W) -> FleetResult<()> {
    write_rows(writer, &TRACK_HEADER, track.iter().map(motion_fields))
}

pub fn write_fuel_csv<W: Write>(samples: &[FuelSample], writer: W) -> FleetResult<()> {
    let rows = samples.iter().map(|s| {
        [
            iso_timestamp(&s.timestamp),
            s.vessel_name.clone(),
            format!("{:.1}", s.fuel_level),
            format!("{:.0}", s.current_fuel),
            format!("{:.1}", s.consumption),
            format!("{:.2}", s.efficiency),
            format!("{:.0}", s.estimated_range),
            format!("{:.6}", s.location.lat),
            format!("{:.6}", s.location.lng),
        ]
    });
    write_rows(writer, &FUEL_HEADER, rows)
}

pub fn export_history(records: &[HistoryRecord], export_date: NaiveDate) -> FleetResult<CsvExport> {
    let mut body = Vec::new();
    write_history_csv(records, &mut body)?;
    Ok(CsvExport {
        filename: history_export_filename(export_date),
        body,
    })
}

pub fn export_track(vessel_name: &str, date: NaiveDate, track: &[HistoryRecord]) -> FleetResult<CsvExport> {
    let mut body = Vec::new();
    write_track_csv(track, &mut body)?;
    Ok(CsvExport {
        filename: track_export_filename(vessel_name, date),
        body,
    })
}

pub fn export_fuel_report(vessel_name: &str, date: NaiveDate, samples: &[FuelSample]) -> FleetResult<CsvExport> {
    let mut body = Vec::new();
    write_fuel_csv(samples, &mut body)?;
    Ok(CsvExport {
        filename: fuel_report_filename(vessel_name, date),
        body,
    })
}

/// One parsed row of a history export.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryCsvRow {
    pub vessel_id: String,
    pub vessel_name: String,
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
    pub heading: i64,
    pub rpm_portside: f64,
    pub rpm_starboard: f64,
    pub rpm_center: f64,
}

#[cfg(test)]
#[derive(Debug, serde::Deserialize)]
struct RawHistoryRow {
    #[serde(rename = "Vessel ID")]
    vessel_id: String,
    #[serde(rename = "Vessel Name")]
    vessel_name: String,
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
    #[serde(rename = "Speed (kts)")]
    speed: f64,
    #[serde(rename = "Heading (°)")]
    heading: i64,
    #[serde(rename = "RPM Portside")]
    rpm_portside: f64,
    #[serde(rename = "RPM Starboard")]
    rpm_starboard: f64,
    #[serde(rename = "RPM Center")]
    rpm_center: f64,
}

/// Parse a history export back into rows.
#[cfg(test)]
pub fn read_history_csv<R: std::io::Read>(reader: R) -> FleetResult<Vec<HistoryCsvRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    csv_reader
        .deserialize::<RawHistoryRow>()
        .map(|row| -> FleetResult<HistoryCsvRow> {
            let row = row?;
            let timestamp = DateTime::parse_from_rfc3339(&row.timestamp)
                .expect("exports write RFC 3339 timestamps")
                .with_timezone(&Utc);

            Ok(HistoryCsvRow {
                vessel_id: row.vessel_id,
                vessel_name: row.vessel_name,
                timestamp,
                latitude: row.latitude,
                longitude: row.longitude,
                speed: row.speed,
                heading: row.heading,
                rpm_portside: row.rpm_portside,
                rpm_starboard: row.rpm_starboard,
                rpm_center: row.rpm_center,
            })
        })
        .collect()
}
