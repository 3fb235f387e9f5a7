// Repository trait for fleet data access
use crate::application::error::FleetResult;
use crate::domain::history::HistoryRecord;
use crate::domain::vessel::Vessel;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait FleetRepository: Send + Sync {
    /// All vessels, in configured profile order
    async fn list_vessels(&self) -> FleetResult<Vec<Vessel>>;

    async fn find_vessel(&self, vessel_id: &str) -> FleetResult<Option<Vessel>>;

    /// The full history set, newest first. Read-only after start-up.
    async fn history(&self) -> FleetResult<Arc<Vec<HistoryRecord>>>;
}
