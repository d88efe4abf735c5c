//! Failover orchestrator: forces the instance onto its standby, then
//! polls until it serves again.
//!
//! ```text
//! Idle → FailoverRequested → Recovering{polls} → Recovered
//!                 │                  ├──→ TimedOut
//!                 ↓                  └──→ Interrupted
//!          TriggerFailed
//! ```
//!
//! A failed trigger never enters the recovery loop. Terminal errors are
//! returned to the caller, which decides how to surface them. The recovery loop
//! ends on the first `Healthy` observation, on the recovery ceiling, or
//! on shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};

use failsim_core::{InstanceTarget, PollSettings};

use crate::client::{ControlPlaneClient, with_timeout};
use crate::error::{OrchestrationError, OrchestrationResult};
use crate::poller::{PollExit, PollPlan, poll_until};
use crate::report::Reporter;

/// Where a failover run currently is. Only surfaces in debug traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailoverPhase {
    Idle,
    FailoverRequested,
    Recovering,
    Recovered,
    TriggerFailed,
    TimedOut,
    Interrupted,
}

/// Outcome of a successful failover exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryReport {
    /// Describe calls made after the trigger.
    pub polls: u32,
    /// Time from trigger acknowledgement to the healthy observation.
    pub elapsed: Duration,
    /// Zone the instance serves from after recovery.
    pub availability_zone: String,
}

/// Drives one forced failover and the recovery watch that follows it.
pub struct FailoverOrchestrator {
    client: Arc<dyn ControlPlaneClient>,
    reporter: Arc<dyn Reporter>,
    settings: PollSettings,
}

impl FailoverOrchestrator {
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
            interval: self.settings.recovery_interval,
            request_timeout: self.settings.request_timeout,
            deadline: self.settings.recovery_timeout,
        }
    }

    pub async fn run(
        &self,
        target: &InstanceTarget,
        mut shutdown: watch::Receiver<bool>,
    ) -> OrchestrationResult<RecoveryReport> {
        let identifier = target.identifier.as_str();
        let mut phase = FailoverPhase::Idle;

        self.reporter.warning("Initiating failover simulation...");
        self.reporter.info(&format!("Target instance: {identifier}"));

        if let Err(source) = with_timeout(
            self.settings.request_timeout,
            self.client.force_failover(identifier),
        )
        .await
        {
            transition(&mut phase, FailoverPhase::TriggerFailed);
            debug!(%identifier, error = %source, "failover trigger rejected");
            return Err(OrchestrationError::TriggerFailed {
                identifier: identifier.to_string(),
                source,
            });
        }

        transition(&mut phase, FailoverPhase::FailoverRequested);
        info!(%identifier, "failover initiated");
        self.reporter.success("Failover initiated successfully");
        self.reporter.header("Monitoring failover status...");

        transition(&mut phase, FailoverPhase::Recovering);
        let client = self.client.as_ref();
        let summary = poll_until(
            &self.plan(),
            move || client.describe_instance(identifier),
            |category| !category.is_healthy(),
            self.reporter.as_ref(),
            &mut shutdown,
        )
        .await
        .inspect_err(|e| debug!(%identifier, error = %e, "recovery watch aborted"))?;

        match summary.exit {
            PollExit::Settled { snapshot, .. } => {
                transition(&mut phase, FailoverPhase::Recovered);
                info!(
                    %identifier,
                    polls = summary.polls,
                    elapsed = ?summary.elapsed,
                    zone = %snapshot.availability_zone,
                    "failover completed"
                );
                self.reporter.success(&format!(
                    "Failover completed successfully after {} polls ({}s), now serving from {}",
                    summary.polls,
                    summary.elapsed.as_secs(),
                    snapshot.availability_zone,
                ));
                Ok(RecoveryReport {
                    polls: summary.polls,
                    elapsed: summary.elapsed,
                    availability_zone: snapshot.availability_zone,
                })
            }
            PollExit::DeadlineExceeded => {
                transition(&mut phase, FailoverPhase::TimedOut);
                let err = OrchestrationError::RecoveryTimedOut {
                    elapsed: summary.elapsed,
                    polls: summary.polls,
                };
                debug!(%identifier, error = %err, "recovery timed out");
                Err(err)
            }
            PollExit::Shutdown => {
                transition(&mut phase, FailoverPhase::Interrupted);
                let err = OrchestrationError::Interrupted {
                    polls: summary.polls,
                };
                debug!(%identifier, polls = summary.polls, "recovery watch interrupted");
                Err(err)
            }
        }
    }
}

fn transition(phase: &mut FailoverPhase, next: FailoverPhase) {
    debug!(from = ?phase, to = ?next, "failover phase");
    *phase = next;
}
