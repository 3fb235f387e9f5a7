// In-memory repository over a generated history set
use crate::application::error::FleetResult;
use crate::application::fleet_repository::FleetRepository;
use crate::application::latest_state::reduce_latest;
use crate::application::simulation::{generate_history, GeneratorConfig};
use crate::domain::history::HistoryRecord;
use crate::domain::vessel::{Vessel, VesselProfile};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct InMemoryFleetRepository {
    vessels: Vec<Vessel>,
    records: Arc<Vec<HistoryRecord>>,
}

impl InMemoryFleetRepository {
    pub fn new(vessels: Vec<Vessel>, records: Vec<HistoryRecord>) -> Self {
        Self {
            vessels,
            records: Arc::new(records),
        }
    }

    /// Generate the history set and derive the vessel snapshots from it.
    /// Fails if any profile ends up without records.
    pub fn generate<R: Rng + ?Sized>(
        profiles: &[VesselProfile],
        config: &GeneratorConfig,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> FleetResult<Self> {
        let records = generate_history(profiles, config, now, rng);
        let vessels = reduce_latest(&records, profiles)?;

        tracing::info!(
            "Generated {} history records across {} vessels",
            records.len(),
            vessels.len()
        );

        Ok(Self::new(vessels, records))
    }
}

#[async_trait]
impl FleetRepository for InMemoryFleetRepository {
    async fn list_vessels(&self) -> FleetResult<Vec<Vessel>> {
        Ok(self.vessels.clone())
    }

    async fn find_vessel(&self, vessel_id: &str) -> FleetResult<Option<Vessel>> {
        Ok(self.vessels.iter().find(|v| v.id == vessel_id).cloned())
    }

    async fn history(&self) -> FleetResult<Arc<Vec<HistoryRecord>>> {
        Ok(self.records.clone())
    }
}
