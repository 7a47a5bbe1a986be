//! List loading configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Settings shared by one list's fetcher, trigger, and controller
#[derive(Debug, Clone, Deserialize)]
pub struct ListSettings {
    /// Items requested per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Bounded wait per fetch, in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Re-fire suppression window of the sentinel trigger, in milliseconds
    #[serde(default = "default_trigger_cooldown")]
    pub trigger_cooldown_ms: u64,
}

impl ListSettings {
    /// Get the fetch timeout as a duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Get the trigger cool-down as a duration
    pub fn trigger_cooldown(&self) -> Duration {
        Duration::from_millis(self.trigger_cooldown_ms)
    }

    /// Validate list settings
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.page_size == 0 {
            return Err(ValidationError::InvalidPageSize);
        }
        if self.fetch_timeout_secs == 0 || self.fetch_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.trigger_cooldown_ms > 60_000 {
            return Err(ValidationError::InvalidCooldown);
        }
        Ok(())
    }
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            fetch_timeout_secs: default_fetch_timeout(),
            trigger_cooldown_ms: default_trigger_cooldown(),
        }
    }
}

fn default_page_size() -> usize {
    20
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_trigger_cooldown() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_settings_defaults() {
        let settings = ListSettings::default();
        assert_eq!(settings.page_size, 20);
        assert_eq!(settings.fetch_timeout_secs, 30);
        assert_eq!(settings.trigger_cooldown_ms, 1000);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_durations() {
        let settings = ListSettings::default();
        assert_eq!(settings.fetch_timeout(), Duration::from_secs(30));
        assert_eq!(settings.trigger_cooldown(), Duration::from_millis(1000));
    }

    #[test]
    fn test_validation_invalid_page_size() {
        let settings = ListSettings {
            page_size: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_timeout() {
        let settings = ListSettings {
            fetch_timeout_secs: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = ListSettings {
            fetch_timeout_secs: 500,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_deserialization_fills_defaults() {
        let settings: ListSettings = serde_json::from_str(r#"{ "page_size": 50 }"#).unwrap();
        assert_eq!(settings.page_size, 50);
        assert_eq!(settings.fetch_timeout_secs, 30);
    }
}
