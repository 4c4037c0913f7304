use chrono::Duration;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TRIAL_DAYS: u32 = 14;
pub const DEFAULT_TRIAL_WARNING_DAYS: u32 = 3;
/// Same bound as `trialDays` in the access config schema.
pub const MAX_TRIAL_DAYS: u32 = 3650;

const TRIAL_DAYS_ENV: &str = "ACCESS_TRIAL_DAYS";
const TRIAL_WARNING_DAYS_ENV: &str = "ACCESS_TRIAL_WARNING_DAYS";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer number of days, got '{value}'")]
    InvalidDays { var: &'static str, value: String },

    #[error("{var} must be at most {max} days, got {value}")]
    TooManyDays {
        var: &'static str,
        value: u32,
        max: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessConfig {
    /// Length of the free trial granted at signup.
    #[serde(default = "default_trial_days")]
    pub trial_days: u32,
    /// A live trial with this many days or fewer left is flagged as ending soon.
    #[serde(default = "default_trial_warning_days")]
    pub trial_warning_days: u32,
}

fn default_trial_days() -> u32 {
    DEFAULT_TRIAL_DAYS
}

fn default_trial_warning_days() -> u32 {
    DEFAULT_TRIAL_WARNING_DAYS
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            trial_days: DEFAULT_TRIAL_DAYS,
            trial_warning_days: DEFAULT_TRIAL_WARNING_DAYS,
        }
    }
}

impl AccessConfig {
    pub fn trial_length(&self) -> Duration {
        Duration::days(i64::from(self.trial_days))
    }

    /// Apply `ACCESS_TRIAL_DAYS` / `ACCESS_TRIAL_WARNING_DAYS` over `self`.
    /// Unset or blank variables leave the current value alone.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(days) = read_days(TRIAL_DAYS_ENV)? {
            if days > MAX_TRIAL_DAYS {
                return Err(ConfigError::TooManyDays {
                    var: TRIAL_DAYS_ENV,
                    value: days,
                    max: MAX_TRIAL_DAYS,
                });
            }
            self.trial_days = days;
        }
        if let Some(days) = read_days(TRIAL_WARNING_DAYS_ENV)? {
            self.trial_warning_days = days;
        }
        tracing::debug!(
            trial_days = self.trial_days,
            trial_warning_days = self.trial_warning_days,
            "access config resolved"
        );
        Ok(self)
    }
}

pub fn load_from_env() -> Result<AccessConfig, ConfigError> {
    AccessConfig::default().with_env_overrides()
}

fn read_days(var: &'static str) -> Result<Option<u32>, ConfigError> {
    match std::env::var(var) {
        Ok(s) if s.trim().is_empty() => Ok(None),
        Ok(s) => s
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidDays { var, value: s }),
        Err(_) => Ok(None),
    }
}
