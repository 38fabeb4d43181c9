use std::time::Duration;

use crate::api::config_dto::ClockServiceConfigDto;
use crate::domain::snapshot_store::START_CLOCK_KEY;
use crate::error::{Error, Result};

pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_SNAPSHOT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockServiceConfig {
    /// How often the current global minimum is logged.
    pub report_interval: Duration,
    /// How often the current global minimum is written to the snapshot store.
    pub snapshot_interval: Duration,
    /// Store key for the persisted global minimum.
    pub start_clock_key: String,
    /// Upper bound on the startup read. `None` waits forever.
    pub recovery_timeout: Option<Duration>,
}

impl Default for ClockServiceConfig {
    fn default() -> Self {
        Self {
            report_interval: DEFAULT_REPORT_INTERVAL,
            snapshot_interval: DEFAULT_SNAPSHOT_INTERVAL,
            start_clock_key: START_CLOCK_KEY.to_string(),
            recovery_timeout: None,
        }
    }
}

impl TryFrom<ClockServiceConfigDto> for ClockServiceConfig {
    type Error = Error;

    fn try_from(dto: ClockServiceConfigDto) -> Result<Self> {
        let defaults = ClockServiceConfig::default();

        let report_interval = positive_millis("reportIntervalMs", dto.report_interval_ms)?.unwrap_or(defaults.report_interval);
        let snapshot_interval =
            positive_millis("snapshotIntervalMs", dto.snapshot_interval_ms)?.unwrap_or(defaults.snapshot_interval);
        let recovery_timeout = positive_millis("recoveryTimeoutMs", dto.recovery_timeout_ms)?;

        let start_clock_key = match dto.start_clock_key {
            Some(key) if key.trim().is_empty() => {
                return Err(Error::ConfigError("startClockKey must not be empty".to_string()));
            }
            Some(key) => key,
            None => defaults.start_clock_key,
        };

        Ok(Self { report_interval, snapshot_interval, start_clock_key, recovery_timeout })
    }
}

fn positive_millis(field: &str, value: Option<u64>) -> Result<Option<Duration>> {
    match value {
        Some(0) => Err(Error::ConfigError(format!("{} must be greater than 0", field))),
        Some(ms) => Ok(Some(Duration::from_millis(ms))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dto_gives_defaults() {
        let config = ClockServiceConfig::try_from(ClockServiceConfigDto::default()).unwrap();
        assert_eq!(config, ClockServiceConfig::default());
        assert_eq!(config.report_interval, Duration::from_secs(5));
        assert_eq!(config.start_clock_key, "startClock");
        assert_eq!(config.recovery_timeout, None);
    }

    #[test]
    fn test_overrides_are_applied() {
        let dto = ClockServiceConfigDto {
            report_interval_ms: Some(250),
            snapshot_interval_ms: Some(1000),
            start_clock_key: Some("job-42/startClock".to_string()),
            recovery_timeout_ms: Some(30_000),
        };
        let config = ClockServiceConfig::try_from(dto).unwrap();
        assert_eq!(config.report_interval, Duration::from_millis(250));
        assert_eq!(config.snapshot_interval, Duration::from_secs(1));
        assert_eq!(config.start_clock_key, "job-42/startClock");
        assert_eq!(config.recovery_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let dto = ClockServiceConfigDto { snapshot_interval_ms: Some(0), ..Default::default() };
        assert!(matches!(ClockServiceConfig::try_from(dto), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_blank_key_is_rejected() {
        let dto = ClockServiceConfigDto { start_clock_key: Some("  ".to_string()), ..Default::default() };
        assert!(matches!(ClockServiceConfig::try_from(dto), Err(Error::ConfigError(_))));
    }
}
