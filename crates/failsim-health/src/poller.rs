//! The polling primitive shared by the monitor and failover loops.
//!
//! Each iteration waits one interval, queries the control plane (bounded
//! by the request timeout), classifies and reports the result, then asks
//! the continuation predicate whether to go again. Transport errors and
//! timeouts are reported and skipped; a missing instance ends the loop.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::debug;

use failsim_core::{InstanceSnapshot, StatusCategory, classify};

use crate::client::{ControlPlaneError, with_timeout};
use crate::error::{OrchestrationError, OrchestrationResult};
use crate::report::Reporter;

/// Cadence and bounds for one polling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPlan {
    /// Wait before every query.
    pub interval: Duration,
    /// Upper bound for a single query.
    pub request_timeout: Duration,
    /// Stop once this much time has passed since the loop started.
    pub deadline: Option<Duration>,
}

/// Why a polling run stopped without an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollExit {
    /// The predicate asked to stop after this observation.
    Settled {
        snapshot: InstanceSnapshot,
        category: StatusCategory,
    },
    /// The shutdown signal fired between polls.
    Shutdown,
    /// `deadline` passed before the predicate asked to stop.
    DeadlineExceeded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSummary {
    pub exit: PollExit,
    /// Queries issued, including failed ones.
    pub polls: u32,
    pub elapsed: Duration,
}

/// Poll until `keep_polling` returns false, the deadline passes, or
/// `shutdown` flips.
///
/// Returns [`OrchestrationError::NotFound`] as soon as a query reports
/// that the instance does not exist. That error has already gone to
/// `reporter` as a poll error when it is returned.
pub async fn poll_until<Q, Fut, P>(
    plan: &PollPlan,
    mut query: Q,
    mut keep_polling: P,
    reporter: &dyn Reporter,
    shutdown: &mut watch::Receiver<bool>,
) -> OrchestrationResult<PollSummary>
where
    Q: FnMut() -> Fut,
    Fut: Future<Output = Result<InstanceSnapshot, ControlPlaneError>>,
    P: FnMut(StatusCategory) -> bool,
{
    let started = Instant::now();
    let mut polls = 0u32;

    let summary = |exit, polls| PollSummary {
        exit,
        polls,
        elapsed: started.elapsed(),
    };

    if *shutdown.borrow() {
        return Ok(summary(PollExit::Shutdown, polls));
    }

    loop {
        tokio::select! {
            _ = tokio::time::sleep(plan.interval) => {}
            Ok(()) = shutdown.changed() => {
                debug!(polls, "poll loop shutting down");
                return Ok(summary(PollExit::Shutdown, polls));
            }
        }

        polls += 1;
        match with_timeout(plan.request_timeout, query()).await {
            Ok(snapshot) => {
                let category = classify(&snapshot.status);
                debug!(
                    polls,
                    status = %snapshot.status,
                    zone = %snapshot.availability_zone,
                    %category,
                    "instance observed"
                );
                reporter.observation(&snapshot, category);

                if !keep_polling(category) {
                    return Ok(summary(PollExit::Settled { snapshot, category }, polls));
                }
            }
            Err(ControlPlaneError::NotFound(identifier)) => {
                let err = ControlPlaneError::NotFound(identifier.clone());
                debug!(polls, %identifier, "instance not found, stopping");
                reporter.poll_error(&err);
                return Err(OrchestrationError::NotFound { identifier });
            }
            Err(err) => {
                debug!(polls, error = %err, "control plane query failed");
                reporter.poll_error(&err);
            }
        }

        if let Some(deadline) = plan.deadline {
            if started.elapsed() >= deadline {
                debug!(polls, ?deadline, "poll deadline exceeded");
                return Ok(summary(PollExit::DeadlineExceeded, polls));
            }
        }
    }
}
