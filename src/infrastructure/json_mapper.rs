// Mapper to convert domain models to JSON transfer types
use crate::application::fleet_service::{FuelReport, HistoryResult, VesselTrack};
use crate::application::history_query::{HistoryView, Page, RecordGroup};
use crate::domain::dashboard::DashboardStats;
use crate::domain::fuel::{FuelAlert, FuelSample, FuelSummary};
use crate::domain::history::HistoryRecord;
use crate::domain::telemetry::HourlyReport;
use crate::domain::vessel::{Position, Vessel};
use crate::infrastructure::csv_export::iso_timestamp;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PositionDto {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselDto {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub vessel_type: String,
    pub status: &'static str,
    pub owner: String,
    pub vts_active: bool,
    pub ems_active: bool,
    pub fms_active: bool,
    pub vessel_key: String,
    pub position: PositionDto,
    pub speed: f64,
    pub heading: f64,
    pub rpm_portside: f64,
    pub rpm_starboard: f64,
    pub rpm_center: f64,
    pub fuel_consumption: f64,
    pub last_update: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecordDto {
    pub id: String,
    pub vessel_id: String,
    pub vessel_name: String,
    pub timestamp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
    pub heading: f64,
    pub rpm_portside: f64,
    pub rpm_starboard: f64,
    pub rpm_center: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsDto {
    pub total_vessels: usize,
    pub active_vessels: usize,
    pub warning_count: usize,
    pub critical_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyReportDto {
    pub vessel_id: String,
    pub hours: Vec<String>,
    pub speed_data: Vec<f64>,
    pub rpm_data: Vec<f64>,
    pub fuel_data: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDto {
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub records: Vec<HistoryRecordDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordGroupDto {
    pub key: String,
    pub records: Vec<HistoryRecordDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryViewDto {
    pub total_records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<RecordGroupDto>>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDto {
    pub vessel_id: String,
    pub vessel_name: String,
    pub date: String,
    pub records: Vec<HistoryRecordDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelSampleDto {
    pub timestamp: String,
    pub fuel_level: f64,
    pub fuel_capacity: f64,
    pub current_fuel: f64,
    pub consumption: f64,
    pub efficiency: f64,
    pub estimated_range: f64,
    pub location: PositionDto,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelAlertDto {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub severity: &'static str,
    pub message: String,
    pub timestamp: String,
    pub location: PositionDto,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelSummaryDto {
    pub avg_consumption: f64,
    pub avg_efficiency: f64,
    pub total_fuel_used: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelReportDto {
    pub vessel_id: String,
    pub vessel_name: String,
    pub date: String,
    pub samples: Vec<FuelSampleDto>,
    pub alerts: Vec<FuelAlertDto>,
    pub summary: Option<FuelSummaryDto>,
}

fn position_to_dto(position: &Position) -> PositionDto {
    PositionDto {
        lat: position.lat,
        lng: position.lng,
    }
}

pub fn vessel_to_dto(vessel: &Vessel) -> VesselDto {
    VesselDto {
        id: vessel.id.clone(),
        name: vessel.name.clone(),
        vessel_type: vessel.vessel_type.clone(),
        status: vessel.status.as_str(),
        owner: vessel.owner.clone(),
        vts_active: vessel.vts_active,
        ems_active: vessel.ems_active,
        fms_active: vessel.fms_active,
        vessel_key: vessel.vessel_key.clone(),
        position: position_to_dto(&vessel.position),
        speed: vessel.speed,
        heading: vessel.heading,
        rpm_portside: vessel.rpm_portside,
        rpm_starboard: vessel.rpm_starboard,
        rpm_center: vessel.rpm_center,
        fuel_consumption: vessel.fuel_consumption,
        last_update: iso_timestamp(&vessel.last_update),
    }
}

pub fn record_to_dto(record: HistoryRecord) -> HistoryRecordDto {
    HistoryRecordDto {
        timestamp: iso_timestamp(&record.timestamp),
        id: record.id,
        vessel_id: record.vessel_id,
        vessel_name: record.vessel_name,
        latitude: record.latitude,
        longitude: record.longitude,
        speed: record.speed,
        heading: record.heading,
        rpm_portside: record.rpm_portside,
        rpm_starboard: record.rpm_starboard,
        rpm_center: record.rpm_center,
    }
}

fn records_to_dto(records: Vec<HistoryRecord>) -> Vec<HistoryRecordDto> {
    records.into_iter().map(record_to_dto).collect()
}

pub fn stats_to_dto(stats: DashboardStats) -> DashboardStatsDto {
    DashboardStatsDto {
        total_vessels: stats.total_vessels,
        active_vessels: stats.active_vessels,
        warning_count: stats.warning_count,
        critical_count: stats.critical_count,
    }
}

pub fn hourly_to_dto(report: HourlyReport) -> HourlyReportDto {
    HourlyReportDto {
        vessel_id: report.vessel_id,
        hours: report.hours,
        speed_data: report.speed,
        rpm_data: report.rpm,
        fuel_data: report.fuel,
    }
}

fn page_to_dto(page: Page) -> PageDto {
    PageDto {
        page: page.page,
        page_size: page.page_size,
        total_pages: page.total_pages,
        records: records_to_dto(page.items),
    }
}

fn group_to_dto(group: RecordGroup) -> RecordGroupDto {
    RecordGroupDto {
        key: group.key,
        records: records_to_dto(group.records),
    }
}

pub fn history_to_dto(result: HistoryResult) -> HistoryViewDto {
    let warnings = result.warnings.iter().map(|w| w.to_string()).collect();
    let total_records = result.view.total_records();

    let (page, groups) = match result.view {
        HistoryView::Paged(page) => (Some(page_to_dto(page)), None),
        HistoryView::Grouped { groups, .. } => {
            (None, Some(groups.into_iter().map(group_to_dto).collect()))
        }
    };

    HistoryViewDto {
        total_records,
        page,
        groups,
        warnings,
    }
}

pub fn track_to_dto(track: VesselTrack) -> TrackDto {
    TrackDto {
        vessel_id: track.vessel.id,
        vessel_name: track.vessel.name,
        date: track.date.format("%Y-%m-%d").to_string(),
        records: records_to_dto(track.records),
    }
}

fn fuel_sample_to_dto(sample: &FuelSample) -> FuelSampleDto {
    FuelSampleDto {
        timestamp: iso_timestamp(&sample.timestamp),
        fuel_level: sample.fuel_level,
        fuel_capacity: sample.fuel_capacity,
        current_fuel: sample.current_fuel,
        consumption: sample.consumption,
        efficiency: sample.efficiency,
        estimated_range: sample.estimated_range,
        location: position_to_dto(&sample.location),
    }
}

fn fuel_alert_to_dto(alert: FuelAlert) -> FuelAlertDto {
    FuelAlertDto {
        id: alert.id,
        kind: alert.kind.as_str(),
        severity: alert.severity.as_str(),
        message: alert.message,
        timestamp: iso_timestamp(&alert.timestamp),
        location: position_to_dto(&alert.location),
    }
}

fn fuel_summary_to_dto(summary: FuelSummary) -> FuelSummaryDto {
    FuelSummaryDto {
        avg_consumption: summary.avg_consumption,
        avg_efficiency: summary.avg_efficiency,
        total_fuel_used: summary.total_fuel_used,
    }
}

pub fn fuel_report_to_dto(report: FuelReport) -> FuelReportDto {
    FuelReportDto {
        vessel_id: report.vessel.id,
        vessel_name: report.vessel.name,
        date: report.date.format("%Y-%m-%d").to_string(),
        samples: report.samples.iter().map(fuel_sample_to_dto).collect(),
        alerts: report.alerts.into_iter().map(fuel_alert_to_dto).collect(),
        summary: report.summary.map(fuel_summary_to_dto),
    }
}
