// Fuel monitoring domain models
use super::vessel::Position;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct FuelSample {
    pub vessel_id: String,
    pub vessel_name: String,
    pub timestamp: DateTime<Utc>,
    /// Percentage, 0-100
    pub fuel_level: f64,
    /// Liters
    pub fuel_capacity: f64,
    /// Liters
    pub current_fuel: f64,
    /// L/h
    pub consumption: f64,
    pub efficiency: f64,
    pub estimated_range: f64,
    pub location: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuelAlertKind {
    LowFuel,
    HighConsumption,
    EfficiencyDrop,
    RefuelNeeded,
}

impl FuelAlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelAlertKind::LowFuel => "low-fuel",
            FuelAlertKind::HighConsumption => "high-consumption",
            FuelAlertKind::EfficiencyDrop => "efficiency-drop",
            FuelAlertKind::RefuelNeeded => "refuel-needed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Warning => "warning",
            AlertSeverity::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuelAlert {
    pub id: String,
    pub vessel_id: String,
    pub vessel_name: String,
    pub kind: FuelAlertKind,
    pub severity: AlertSeverity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub location: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuelSummary {
    pub avg_consumption: f64,
    pub avg_efficiency: f64,
    pub total_fuel_used: f64,
}
