// Application layer - Simulation engine and use cases
pub mod error;
pub mod fleet_repository;
pub mod fleet_service;
pub mod fuel;
pub mod history_query;
pub mod hourly;
pub mod latest_state;
pub mod live_ticker;
pub mod simulation;
pub mod tracking;
