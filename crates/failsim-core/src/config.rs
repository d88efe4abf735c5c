//! config.json parser.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::types::InstanceTarget;

pub const DEFAULT_MONITOR_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_RECOVERY_INTERVAL: Duration = Duration::from_secs(10);
pub const DEFAULT_RECOVERY_TIMEOUT: Duration = Duration::from_secs(30 * 60);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// On-disk configuration, as written by the operator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    #[serde(default)]
    pub db_identifier: String,
    #[serde(default)]
    pub endpoint: String,
    /// Optional. Parsed wide so that out-of-range values fail validation
    /// with a field-level message instead of a JSON error.
    #[serde(default)]
    pub port: Option<i64>,
    pub monitor_interval: Option<String>,
    pub recovery_interval: Option<String>,
    /// `"0"` disables the recovery ceiling.
    pub recovery_timeout: Option<String>,
    pub request_timeout: Option<String>,
}

/// Cadence and bounds for the polling loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Wait between polls in monitor mode.
    pub monitor_interval: Duration,
    /// Wait between polls while recovering from a failover.
    pub recovery_interval: Duration,
    /// Give up on recovery after this long. `None` waits forever.
    pub recovery_timeout: Option<Duration>,
    /// Upper bound for a single control-plane call.
    pub request_timeout: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            monitor_interval: DEFAULT_MONITOR_INTERVAL,
            recovery_interval: DEFAULT_RECOVERY_INTERVAL,
            recovery_timeout: Some(DEFAULT_RECOVERY_TIMEOUT),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl SimulationConfig {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check every field and split the config into the target and
    /// its poll settings.
    pub fn validate(&self) -> ConfigResult<(InstanceTarget, PollSettings)> {
        let identifier = self.db_identifier.trim();
        if identifier.is_empty() {
            return Err(ConfigError::Invalid {
                field: "dbIdentifier",
                reason: "must not be empty".to_string(),
            });
        }

        let port = self
            .port
            .map(|raw| {
                u16::try_from(raw)
                    .ok()
                    .filter(|p| *p != 0)
                    .ok_or_else(|| ConfigError::Invalid {
                        field: "port",
                        reason: format!("{raw} is not in 1..=65535"),
                    })
            })
            .transpose()?;

        let defaults = PollSettings::default();
        let settings = PollSettings {
            monitor_interval: nonzero_duration(
                "monitorInterval",
                self.monitor_interval.as_deref(),
                defaults.monitor_interval,
            )?,
            recovery_interval: nonzero_duration(
                "recoveryInterval",
                self.recovery_interval.as_deref(),
                defaults.recovery_interval,
            )?,
            recovery_timeout: match self.recovery_timeout.as_deref() {
                None => defaults.recovery_timeout,
                Some(raw) => {
                    let d = duration_field("recoveryTimeout", raw)?;
                    (!d.is_zero()).then_some(d)
                }
            },
            request_timeout: nonzero_duration(
                "requestTimeout",
                self.request_timeout.as_deref(),
                defaults.request_timeout,
            )?,
        };

        let target = InstanceTarget::new(identifier, self.endpoint.trim(), port);
        Ok((target, settings))
    }
}

/// Read and validate a config file in one step.
pub fn load_config(path: &Path) -> ConfigResult<(InstanceTarget, PollSettings)> {
    SimulationConfig::from_file(path)?.validate()
}

fn duration_field(field: &'static str, raw: &str) -> ConfigResult<Duration> {
    parse_duration(raw).ok_or_else(|| ConfigError::Invalid {
        field,
        reason: format!("`{raw}` is not a duration (try \"5s\", \"500ms\", \"2m\")"),
    })
}

fn nonzero_duration(
    field: &'static str,
    raw: Option<&str>,
    default: Duration,
) -> ConfigResult<Duration> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let d = duration_field(field, raw)?;
    if d.is_zero() {
        return Err(ConfigError::Invalid {
            field,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(d)
}

/// Parse a duration string like "5s", "500ms", "2m".
///
/// A bare number is read as seconds. Returns `None` for unknown units and
/// for minute values too large to represent.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (value, unit) = s.split_at(split);
    let value: u64 = value.parse().ok()?;
    match unit {
        "" | "s" => Some(Duration::from_secs(value)),
        "ms" => Some(Duration::from_millis(value)),
        "m" => value.checked_mul(60).map(Duration::from_secs),
        _ => None,
    }
}
