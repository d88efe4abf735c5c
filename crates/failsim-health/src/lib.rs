//! failsim-health: monitoring and failover exercise for a multi-zone
//! managed database instance.
//!
//! # Architecture
//!
//! ```text
//! dispatch(mode)
//!   ├── Monitor              (interval 5s, never settles)
//!   └── FailoverOrchestrator (force_failover, then interval 10s until Healthy)
//!         └── poll_until()
//!               ├── ControlPlaneClient::describe_instance (bounded by request timeout)
//!               ├── classify() → StatusCategory
//!               └── Reporter (console, or a recorder in tests)
//! ```
//!
//! # Error posture
//!
//! A failed describe call is an observation gap: it is reported and the
//! loop waits for the next tick. A missing instance stops either loop.
//! A failed failover trigger stops before any describe call is made.
//!
//! The AWS RDS client is behind the `aws` feature.

pub mod client;
pub mod dispatch;
pub mod error;
pub mod failover;
pub mod monitor;
pub mod poller;
#[cfg(feature = "aws")]
pub mod rds;
pub mod report;

pub use client::{ControlPlaneClient, ControlPlaneError};
pub use dispatch::{RunOutcome, dispatch};
pub use error::{OrchestrationError, OrchestrationResult};
pub use failover::{FailoverOrchestrator, RecoveryReport};
pub use monitor::Monitor;
pub use poller::{PollExit, PollPlan, PollSummary, poll_until};
#[cfg(feature = "aws")]
pub use rds::{RdsConfig, RdsControlPlane};
pub use report::{ConsoleReporter, Reporter};
