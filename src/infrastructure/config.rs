use crate::application::simulation::{FieldScales, GeneratorConfig};
use crate::domain::vessel::VesselProfile;
use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

/// Upper bound on how far back the generated history may reach.
pub const MAX_HISTORY_DAYS: i64 = 10 * 366;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("no vessels configured")]
    EmptyFleet,
    #[error("vessel id {0} is configured more than once")]
    DuplicateVessel(String),
    #[error("simulation.sample_count must be at least 1")]
    ZeroSampleCount,
    #[error("simulation.interval_minutes must be at least 1")]
    ZeroInterval,
    #[error("simulation.sample_count x simulation.interval_minutes exceeds the history window")]
    HistoryWindowTooLong,
    #[error("simulation.live_interval_secs must be at least 1")]
    ZeroLiveInterval,
    #[error("history.page_size must be at least 1")]
    ZeroPageSize,
    #[error("history.utc_offset_minutes {0} is out of range")]
    InvalidOffset(i32),
    #[error("server.bind_addr '{0}' is not a socket address")]
    InvalidBindAddr(String),
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default)]
    pub vessels: Vec<VesselProfile>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SimulationSettings {
    pub seed: Option<u64>,
    pub sample_count: usize,
    pub interval_minutes: i64,
    pub cyclical_amplitude: f64,
    pub cyclical_frequency: f64,
    pub random_amplitude: f64,
    pub live_interval_secs: u64,
    pub scales: FieldScales,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        let generator = GeneratorConfig::default();
        Self {
            seed: None,
            sample_count: generator.sample_count,
            interval_minutes: generator.interval_minutes,
            cyclical_amplitude: generator.cyclical_amplitude,
            cyclical_frequency: generator.cyclical_frequency,
            random_amplitude: generator.random_amplitude,
            live_interval_secs: crate::application::live_ticker::DEFAULT_LIVE_INTERVAL.as_secs(),
            scales: generator.scales,
        }
    }
}

impl SimulationSettings {
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            sample_count: self.sample_count,
            interval_minutes: self.interval_minutes,
            cyclical_amplitude: self.cyclical_amplitude,
            cyclical_frequency: self.cyclical_frequency,
            random_amplitude: self.random_amplitude,
            scales: self.scales,
        }
    }

    pub fn live_interval(&self) -> Duration {
        Duration::from_secs(self.live_interval_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HistorySettings {
    pub page_size: usize,
    /// Offset for calendar-day boundaries, in minutes east of UTC
    pub utc_offset_minutes: i32,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            page_size: crate::application::history_query::DEFAULT_PAGE_SIZE,
            utc_offset_minutes: 0,
        }
    }
}

impl HistorySettings {
    pub fn display_offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vessels.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }

        let mut seen = HashSet::new();
        for profile in &self.vessels {
            if !seen.insert(profile.id.as_str()) {
                return Err(ConfigError::DuplicateVessel(profile.id.clone()));
            }
        }

        if self.simulation.sample_count == 0 {
            return Err(ConfigError::ZeroSampleCount);
        }
        if self.simulation.interval_minutes < 1 {
            return Err(ConfigError::ZeroInterval);
        }
        let window_minutes = i64::try_from(self.simulation.sample_count)
            .ok()
            .and_then(|count| count.checked_mul(self.simulation.interval_minutes));
        if window_minutes.is_none_or(|minutes| minutes > MAX_HISTORY_DAYS * 24 * 60) {
            return Err(ConfigError::HistoryWindowTooLong);
        }
        if self.simulation.live_interval_secs == 0 {
            return Err(ConfigError::ZeroLiveInterval);
        }
        if self.history.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }

        let offset_ok = self
            .history
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .is_some();
        if !offset_ok {
            return Err(ConfigError::InvalidOffset(self.history.utc_offset_minutes));
        }

        if self.server.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidBindAddr(self.server.bind_addr.clone()));
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.server.bind_addr.parse()?)
    }
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/fleet"))
        .add_source(
            config::Environment::with_prefix("FLEET")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = settings.try_deserialize()?;
    app_config.validate()?;

    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vessel::VesselStatus;

    const FLEET_TOML: &str = r#"
        [simulation]
        seed = 42
        sample_count = 24

        [history]
        utc_offset_minutes = 420

        [[vessels]]
        id = "V001"
        name = "Sinar Bahari"
        type = "Cargo"
        status = "Active"
        owner = "PT Sinar Bahari Shipping"
        vts_active = true
        ems_active = true
        fms_active = true
        vessel_key = "SB001-2024-CARGO"
        base_position = { lat = -6.7, lng = 113.8 }
        base_speed = 12.5
        base_heading = 135.0
        base_rpm_portside = 1850.0
        base_rpm_starboard = 1820.0
        base_rpm_center = 1835.0
        base_fuel_consumption = 45.2

        [[vessels]]
        id = "V004"
        name = "Nusantara Express"
        type = "Ferry"
        status = "Critical"
        owner = "PT Nusantara Ferry"
        vessel_key = "NE004-2024-FERRY"
        base_position = { lat = -6.9, lng = 112.7 }
        base_speed = 5.1
        base_heading = 90.0
        base_rpm_portside = 800.0
        base_rpm_starboard = 820.0
        base_rpm_center = 810.0
        base_fuel_consumption = 28.4
    "#;

    fn parsed() -> AppConfig {
        toml::from_str(FLEET_TOML).unwrap()
    }

    #[test]
    fn test_parse_fleet_config_with_defaults() {
        let config = parsed();
        assert!(config.validate().is_ok());

        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.simulation.interval_minutes, 90);
        assert_eq!(config.simulation.live_interval(), Duration::from_secs(5));
        assert_eq!(config.history.page_size, 50);
        assert_eq!(config.history.display_offset().local_minus_utc(), 7 * 3600);

        let generator = config.simulation.generator_config();
        assert_eq!(generator.sample_count, 24);
        assert_eq!(generator.scales, FieldScales::default());

        assert_eq!(config.vessels.len(), 2);
        assert_eq!(config.vessels[1].vessel_type, "Ferry");
        assert_eq!(config.vessels[1].status, VesselStatus::Critical);
        assert!(!config.vessels[1].vts_active);
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut config = parsed();
        config.vessels.push(config.vessels[0].clone());
        assert_eq!(config.validate(), Err(ConfigError::DuplicateVessel("V001".to_string())));

        let mut config = parsed();
        config.vessels.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyFleet));

        let mut config = parsed();
        config.simulation.sample_count = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroSampleCount));

        let mut config = parsed();
        config.simulation.interval_minutes = i64::MAX;
        assert_eq!(config.validate(), Err(ConfigError::HistoryWindowTooLong));

        let mut config = parsed();
        config.simulation.sample_count = 200;
        config.simulation.interval_minutes = 60 * 24 * 366;
        assert_eq!(config.validate(), Err(ConfigError::HistoryWindowTooLong));

        let mut config = parsed();
        config.simulation.live_interval_secs = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroLiveInterval));

        let mut config = parsed();
        config.history.utc_offset_minutes = 24 * 60;
        assert_eq!(config.validate(), Err(ConfigError::InvalidOffset(1440)));

        let mut config = parsed();
        config.server.bind_addr = "localhost".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidBindAddr("localhost".to_string()))
        );
    }
}
