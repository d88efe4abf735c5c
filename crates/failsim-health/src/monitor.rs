//! Passive monitor: polls the instance forever and reports each result.
//!
//! The loop has no natural end. It stops when the shutdown signal flips
//! or when the control plane says the instance does not exist.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use failsim_core::{InstanceTarget, PollSettings};

use crate::client::ControlPlaneClient;
use crate::error::OrchestrationResult;
use crate::poller::{PollPlan, PollSummary, poll_until};
use crate::report::Reporter;

/// Watches one instance without touching it.
pub struct Monitor {
    client: Arc<dyn ControlPlaneClient>,
    reporter: Arc<dyn Reporter>,
    settings: PollSettings,
}

impl Monitor {
    pub fn new(
        client: Arc<dyn ControlPlaneClient>,
        reporter: Arc<dyn Reporter>,
        settings: PollSettings,
    ) -> Self {
        Self {
            client,
            reporter,
            settings,
        }
    }

    fn plan(&self) -> PollPlan {
        PollPlan {
            interval: self.settings.monitor_interval,
            request_timeout: self.settings.request_timeout,
            deadline: None,
        }
    }

    /// Poll until shutdown. Only a missing instance is an error.
    pub async fn run(
        &self,
        target: &InstanceTarget,
        mut shutdown: watch::Receiver<bool>,
    ) -> OrchestrationResult<PollSummary> {
        self.reporter.success("Starting instance monitoring...");
        self.reporter.info(&format!("Instance: {}", target.identifier));
        self.reporter.info(&format!("Endpoint: {}", target.address()));

        info!(
            identifier = %target.identifier,
            interval = ?self.settings.monitor_interval,
            "monitor started"
        );

        let client = self.client.as_ref();
        let identifier = target.identifier.as_str();
        let summary = poll_until(
            &self.plan(),
            move || client.describe_instance(identifier),
            |_| true,
            self.reporter.as_ref(),
            &mut shutdown,
        )
        .await?;

        info!(
            identifier = %target.identifier,
            polls = summary.polls,
            "monitor stopped"
        );
        Ok(summary)
    }
}
