// Domain layer - Plain fleet and telemetry types
pub mod dashboard;
pub mod fuel;
pub mod history;
pub mod telemetry;
pub mod vessel;
