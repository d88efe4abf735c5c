//! Test doubles shared by the scenario tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use failsim_core::{InstanceSnapshot, PollSettings, StatusCategory};
use failsim_health::{ControlPlaneClient, ControlPlaneError, Reporter};

pub type Response = Result<InstanceSnapshot, ControlPlaneError>;

pub fn snap(status: &str, zone: &str) -> Response {
    Ok(InstanceSnapshot::new(status, zone))
}

/// Settings with the production cadence and a short request timeout.
pub fn settings() -> PollSettings {
    PollSettings {
        monitor_interval: Duration::from_secs(5),
        recovery_interval: Duration::from_secs(10),
        recovery_timeout: None,
        request_timeout: Duration::from_secs(2),
    }
}

/// What `force_failover` should do.
pub enum Trigger {
    Accept,
    Reject(ControlPlaneError),
    Hang,
}

/// Control plane that replays a fixed script of describe responses.
///
/// Once the script runs out, the last response repeats.
pub struct ScriptedControlPlane {
    script: Mutex<VecDeque<Response>>,
    last: Mutex<Option<Response>>,
    trigger: Trigger,
    describe_calls: AtomicU32,
    failover_calls: AtomicU32,
}

impl ScriptedControlPlane {
    pub fn new(script: Vec<Response>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            trigger: Trigger::Accept,
            describe_calls: AtomicU32::new(0),
            failover_calls: AtomicU32::new(0),
        }
    }

    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn describe_calls(&self) -> u32 {
        self.describe_calls.load(Ordering::SeqCst)
    }

    pub fn failover_calls(&self) -> u32 {
        self.failover_calls.load(Ordering::SeqCst)
    }

    fn next_response(&self) -> Response {
        let mut script = self.script.lock().unwrap();
        let mut last = self.last.lock().unwrap();
        match script.pop_front() {
            Some(response) => {
                *last = Some(response.clone());
                response
            }
            None => last
                .clone()
                .unwrap_or_else(|| Err(ControlPlaneError::Transport("empty script".into()))),
        }
    }
}

#[async_trait]
impl ControlPlaneClient for ScriptedControlPlane {
    async fn describe_instance(&self, _identifier: &str) -> Response {
        self.describe_calls.fetch_add(1, Ordering::SeqCst);
        self.next_response()
    }

    async fn force_failover(&self, _identifier: &str) -> Result<(), ControlPlaneError> {
        self.failover_calls.fetch_add(1, Ordering::SeqCst);
        match &self.trigger {
            Trigger::Accept => Ok(()),
            Trigger::Reject(err) => Err(err.clone()),
            Trigger::Hang => std::future::pending().await,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Header(String),
    Info(String),
    Success(String),
    Warning(String),
    Failure(String),
    Observation {
        at: Instant,
        status: String,
        zone: String,
        category: StatusCategory,
    },
    PollError {
        at: Instant,
        error: ControlPlaneError,
    },
}

/// Reporter that keeps every event, stamped with the (paused) tokio clock.
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<Event>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn observations(&self) -> Vec<(Instant, StatusCategory)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Observation { at, category, .. } => Some((at, category)),
                _ => None,
            })
            .collect()
    }

    pub fn poll_errors(&self) -> Vec<ControlPlaneError> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::PollError { error, .. } => Some(error),
                _ => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Success(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl Reporter for RecordingReporter {
    fn header(&self, message: &str) {
        self.push(Event::Header(message.to_string()));
    }

    fn info(&self, message: &str) {
        self.push(Event::Info(message.to_string()));
    }

    fn success(&self, message: &str) {
        self.push(Event::Success(message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.push(Event::Warning(message.to_string()));
    }

    fn failure(&self, message: &str) {
        self.push(Event::Failure(message.to_string()));
    }

    fn observation(&self, snapshot: &InstanceSnapshot, category: StatusCategory) {
        self.push(Event::Observation {
            at: Instant::now(),
            status: snapshot.status.clone(),
            zone: snapshot.availability_zone.clone(),
            category,
        });
    }

    fn poll_error(&self, error: &ControlPlaneError) {
        self.push(Event::PollError {
            at: Instant::now(),
            error: error.clone(),
        });
    }
}

/// Gaps between consecutive instants.
pub fn gaps(instants: &[Instant]) -> Vec<Duration> {
    instants.windows(2).map(|w| w[1] - w[0]).collect()
}
