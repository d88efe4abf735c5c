//! Error types for the monitor and failover loops.

use std::time::Duration;

use thiserror::Error;

use crate::client::ControlPlaneError;

/// Result type alias for orchestration operations.
pub type OrchestrationResult<T> = Result<T, OrchestrationError>;

/// Terminal outcomes of a monitor or failover run.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error("no DB instance found for `{identifier}`")]
    NotFound { identifier: String },

    #[error("failed to trigger failover for `{identifier}`: {source}")]
    TriggerFailed {
        identifier: String,
        #[source]
        source: ControlPlaneError,
    },

    #[error("recovery timed out after {elapsed:?} ({polls} polls) without reaching a healthy state")]
    RecoveryTimedOut { elapsed: Duration, polls: u32 },

    #[error("interrupted after {polls} polls before the instance recovered")]
    Interrupted { polls: u32 },
}

impl OrchestrationError {
    /// Whether the poll loop already put this error in front of the
    /// operator through [`Reporter::poll_error`](crate::Reporter::poll_error).
    pub fn already_reported(&self) -> bool {
        matches!(self, OrchestrationError::NotFound { .. })
    }
}
