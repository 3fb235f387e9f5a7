// Fleet service - Use cases behind the dashboard endpoints
use crate::application::error::{FleetError, FleetResult};
use crate::application::fleet_repository::FleetRepository;
use crate::application::fuel::{fuel_alerts, fuel_samples, fuel_summary};
use crate::application::history_query::{
    build_view, day_end, day_start, parse_date, FilterWarning, HistoryQueryParams, HistoryView,
};
use crate::application::hourly::hourly_report;
use crate::application::tracking::daily_track;
use crate::domain::dashboard::DashboardStats;
use crate::domain::fuel::{FuelAlert, FuelSample, FuelSummary};
use crate::domain::history::HistoryRecord;
use crate::domain::telemetry::HourlyReport;
use crate::domain::vessel::Vessel;
use crate::infrastructure::csv_export::{self, CsvExport};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
pub struct FleetSettings {
    pub page_size: usize,
    /// Offset used for calendar days (filters, grouping, tracks)
    pub display_offset: FixedOffset,
    /// Fixed seed for the simulated series; fresh entropy per call when unset
    pub seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct HistoryResult {
    pub view: HistoryView,
    pub warnings: Vec<FilterWarning>,
}

#[derive(Debug, Clone)]
pub struct HistoryExport {
    pub export: CsvExport,
    /// Filters that were ignored while selecting the exported rows
    pub warnings: Vec<FilterWarning>,
}

#[derive(Debug, Clone)]
pub struct VesselTrack {
    pub vessel: Vessel,
    pub date: NaiveDate,
    pub records: Vec<HistoryRecord>,
}

#[derive(Debug, Clone)]
pub struct FuelReport {
    pub vessel: Vessel,
    pub date: NaiveDate,
    pub samples: Vec<FuelSample>,
    pub alerts: Vec<FuelAlert>,
    pub summary: Option<FuelSummary>,
}

#[derive(Clone)]
pub struct FleetService {
    repository: Arc<dyn FleetRepository>,
    settings: FleetSettings,
}

impl FleetService {
    pub fn new(repository: Arc<dyn FleetRepository>, settings: FleetSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    fn rng(&self) -> StdRng {
        match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.settings.display_offset).date_naive()
    }

    /// Parse a required `YYYY-MM-DD` date; absent or blank means today. A
    /// date whose day bounds overflow in the display offset is rejected.
    pub fn resolve_date(&self, date: Option<&str>, now: DateTime<Utc>) -> FleetResult<NaiveDate> {
        let Some(raw) = date.map(str::trim).filter(|d| !d.is_empty()) else {
            return Ok(self.today(now));
        };

        let offset = self.settings.display_offset;
        parse_date(raw)
            .filter(|d| day_start(*d, offset).is_some() && day_end(*d, offset).is_some())
            .ok_or_else(|| FleetError::InvalidDate(raw.to_string()))
    }

    pub async fn list_vessels(&self) -> FleetResult<Vec<Vessel>> {
        self.repository.list_vessels().await
    }

    pub async fn get_vessel(&self, vessel_id: &str) -> FleetResult<Vessel> {
        self.repository
            .find_vessel(vessel_id)
            .await?
            .ok_or_else(|| FleetError::VesselNotFound(vessel_id.to_string()))
    }

    pub async fn dashboard_stats(&self) -> FleetResult<DashboardStats> {
        let vessels = self.repository.list_vessels().await?;
        Ok(DashboardStats::from_vessels(&vessels))
    }

    pub async fn history_view(
        &self,
        params: &HistoryQueryParams,
        page: usize,
    ) -> FleetResult<HistoryResult> {
        let records = self.repository.history().await?;
        let (query, warnings) = params.parse(self.settings.display_offset);

        let view = build_view(
            &records,
            &query,
            page,
            self.settings.page_size,
            self.settings.display_offset,
        );

        tracing::debug!(
            "History view: {} of {} records matched",
            view.total_records(),
            records.len()
        );

        Ok(HistoryResult { view, warnings })
    }

    /// Export every record matching `params`, ignoring pagination.
    pub async fn export_history(
        &self,
        params: &HistoryQueryParams,
        export_date: NaiveDate,
    ) -> FleetResult<HistoryExport> {
        let records = self.repository.history().await?;
        let (query, warnings) = params.parse(self.settings.display_offset);
        let filtered = query.apply(&records);

        tracing::info!(
            "Exporting {} history records ({} filter warnings)",
            filtered.len(),
            warnings.len()
        );
        let export = csv_export::export_history(&filtered, export_date)?;

        Ok(HistoryExport { export, warnings })
    }

    pub async fn hourly_report(&self, vessel_id: &str, now: DateTime<Utc>) -> FleetResult<HourlyReport> {
        let vessel = self.get_vessel(vessel_id).await?;
        let records = self.repository.history().await?;
        Ok(hourly_report(&vessel, &records, now, &mut self.rng()))
    }

    pub async fn vessel_track(&self, vessel_id: &str, date: NaiveDate) -> FleetResult<VesselTrack> {
        let vessel = self.get_vessel(vessel_id).await?;
        let records = self.repository.history().await?;
        let track = daily_track(&vessel.id, &records, date, self.settings.display_offset)?;

        Ok(VesselTrack {
            vessel,
            date,
            records: track,
        })
    }

    pub async fn export_track(&self, vessel_id: &str, date: NaiveDate) -> FleetResult<CsvExport> {
        let track = self.vessel_track(vessel_id, date).await?;
        csv_export::export_track(&track.vessel.name, date, &track.records)
    }

    pub async fn fuel_report(&self, vessel_id: &str, date: NaiveDate) -> FleetResult<FuelReport> {
        let track = self.vessel_track(vessel_id, date).await?;
        let samples = fuel_samples(&track.vessel, &track.records, &mut self.rng());
        let alerts = fuel_alerts(&samples);
        let summary = fuel_summary(&samples);

        Ok(FuelReport {
            vessel: track.vessel,
            date,
            samples,
            alerts,
            summary,
        })
    }

    pub async fn export_fuel_report(&self, vessel_id: &str, date: NaiveDate) -> FleetResult<CsvExport> {
        let report = self.fuel_report(vessel_id, date).await?;
        csv_export::export_fuel_report(&report.vessel.name, date, &report.samples)
    }
}
