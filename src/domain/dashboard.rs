// Dashboard domain model
use super::vessel::{Vessel, VesselStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_vessels: usize,
    pub active_vessels: usize,
    pub warning_count: usize,
    pub critical_count: usize,
}

impl DashboardStats {
    pub fn from_vessels(vessels: &[Vessel]) -> Self {
        let count = |status: VesselStatus| vessels.iter().filter(|v| v.status == status).count();

        Self {
            total_vessels: vessels.len(),
            active_vessels: count(VesselStatus::Active),
            warning_count: count(VesselStatus::Warning),
            critical_count: count(VesselStatus::Critical),
        }
    }
}
