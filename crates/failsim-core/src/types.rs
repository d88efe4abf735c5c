//! Shared types used across failsim crates.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Status values that mean the instance is serving normally.
pub const HEALTHY_STATUSES: &[&str] = &["available"];

/// Status values that mean a managed operation is in progress.
pub const TRANSITIONAL_STATUSES: &[&str] = &["rebooting", "modifying", "failing-over", "upgrading"];

/// The database instance under observation.
///
/// Built once from a validated config and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceTarget {
    /// Control-plane identifier, unique within the account/region.
    pub identifier: String,
    /// Expected network endpoint. Descriptive only.
    pub endpoint: String,
    /// Expected port, if the config names one. Descriptive only.
    pub port: Option<u16>,
}

impl InstanceTarget {
    pub fn new(
        identifier: impl Into<String>,
        endpoint: impl Into<String>,
        port: Option<u16>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            endpoint: endpoint.into(),
            port,
        }
    }

    /// `endpoint:port`, or the bare endpoint when no port is configured.
    /// Shown in startup banners.
    pub fn address(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{port}", self.endpoint),
            None => self.endpoint.clone(),
        }
    }
}

/// Result of one control-plane query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceSnapshot {
    /// Raw provider status, e.g. "available" or "rebooting".
    pub status: String,
    /// Availability zone the instance currently serves from.
    pub availability_zone: String,
}

impl InstanceSnapshot {
    pub fn new(status: impl Into<String>, availability_zone: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            availability_zone: availability_zone.into(),
        }
    }

    pub fn category(&self) -> StatusCategory {
        classify(&self.status)
    }
}

/// Operator-facing category of a raw instance status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    /// Serving normally.
    Healthy,
    /// Rebooting, modifying, or failing over.
    Transitional,
    /// Anything else, including the empty status.
    Unknown,
}

impl StatusCategory {
    pub fn label(&self) -> &'static str {
        match self {
            StatusCategory::Healthy => "HEALTHY",
            StatusCategory::Transitional => "TRANSITIONAL",
            StatusCategory::Unknown => "UNKNOWN",
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, StatusCategory::Healthy)
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a raw control-plane status to its category.
///
/// Matching is exact. Unrecognized values fall through to
/// [`StatusCategory::Unknown`].
pub fn classify(raw: &str) -> StatusCategory {
    if HEALTHY_STATUSES.contains(&raw) {
        StatusCategory::Healthy
    } else if TRANSITIONAL_STATUSES.contains(&raw) {
        StatusCategory::Transitional
    } else {
        StatusCategory::Unknown
    }
}

/// What the tool should do with the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Poll forever and print each observation.
    #[default]
    Monitor,
    /// Force a failover, then poll until the instance is healthy again.
    Failover,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Monitor => "monitor",
            Mode::Failover => "failover",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monitor" => Ok(Mode::Monitor),
            "failover" => Ok(Mode::Failover),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }
}
