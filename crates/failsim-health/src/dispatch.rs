//! Mode selection.

use std::sync::Arc;

use tokio::sync::watch;

use failsim_core::{InstanceTarget, Mode, PollSettings};

use crate::client::ControlPlaneClient;
use crate::error::OrchestrationResult;
use crate::failover::{FailoverOrchestrator, RecoveryReport};
use crate::monitor::Monitor;
use crate::poller::PollSummary;
use crate::report::Reporter;

/// What the selected mode finished with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Monitoring stopped on shutdown.
    Monitored(PollSummary),
    /// The instance recovered after a forced failover.
    Recovered(RecoveryReport),
}

/// Run `mode` against a validated target.
pub async fn dispatch(
    mode: Mode,
    target: &InstanceTarget,
    settings: PollSettings,
    client: Arc<dyn ControlPlaneClient>,
    reporter: Arc<dyn Reporter>,
    shutdown: watch::Receiver<bool>,
) -> OrchestrationResult<RunOutcome> {
    match mode {
        Mode::Monitor => Monitor::new(client, reporter, settings)
            .run(target, shutdown)
            .await
            .map(RunOutcome::Monitored),
        Mode::Failover => FailoverOrchestrator::new(client, reporter, settings)
            .run(target, shutdown)
            .await
            .map(RunOutcome::Recovered),
    }
}
