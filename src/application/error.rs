// Error taxonomy for the fleet engine
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    /// A configured vessel produced no history; fatal at start-up.
    #[error("no history record found for vessel {vessel_id}")]
    MissingHistory { vessel_id: String },

    #[error("vessel {0} not found")]
    VesselNotFound(String),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FleetResult<T> = Result<T, FleetError>;
