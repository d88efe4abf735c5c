//! The control-plane seam.
//!
//! Everything the orchestrators know about the managed database goes
//! through [`ControlPlaneClient`]. The AWS RDS implementation lives in
//! [`crate::rds`]; tests plug in scripted fakes.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use failsim_core::InstanceSnapshot;

/// Errors returned by a control-plane call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlPlaneError {
    /// The call itself failed (network, auth, throttling, ...).
    #[error("control plane request failed: {0}")]
    Transport(String),

    /// The call did not complete within the request timeout.
    #[error("control plane request timed out after {0:?}")]
    Timeout(Duration),

    /// No instance matches the identifier.
    #[error("no DB instance found for `{0}`")]
    NotFound(String),
}

impl ControlPlaneError {
    /// Whether polling can carry on after this error.
    ///
    /// Only a missing instance ends a loop; everything else is an
    /// observation gap.
    pub fn is_transient(&self) -> bool {
        !matches!(self, ControlPlaneError::NotFound(_))
    }
}

/// Two-operation contract against a managed database control plane.
#[async_trait]
pub trait ControlPlaneClient: Send + Sync {
    /// Current lifecycle status and availability zone of the instance.
    async fn describe_instance(
        &self,
        identifier: &str,
    ) -> Result<InstanceSnapshot, ControlPlaneError>;

    /// Reboot the instance, forcing it onto its standby.
    async fn force_failover(&self, identifier: &str) -> Result<(), ControlPlaneError>;
}

/// Run a control-plane call with an upper bound on how long it may take.
pub(crate) async fn with_timeout<T, F>(
    limit: Duration,
    call: F,
) -> Result<T, ControlPlaneError>
where
    F: std::future::Future<Output = Result<T, ControlPlaneError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(ControlPlaneError::Timeout(limit)),
    }
}
