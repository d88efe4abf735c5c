//! Operator-facing output.
//!
//! Classification stays pure in `failsim-core`; this module owns the
//! mapping from [`StatusCategory`] to colors and line layout. The
//! orchestrators take a `&dyn Reporter` so tests can record output
//! instead of printing it.

use colored::{ColoredString, Colorize};

use failsim_core::{InstanceSnapshot, StatusCategory};

use crate::client::ControlPlaneError;

/// Sink for everything the orchestrators want the operator to see.
pub trait Reporter: Send + Sync {
    /// Section heading, e.g. "Monitoring failover status...".
    fn header(&self, message: &str);
    /// Neutral detail line.
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn failure(&self, message: &str);
    /// One classified poll result.
    fn observation(&self, snapshot: &InstanceSnapshot, category: StatusCategory);
    /// A poll whose control-plane call failed.
    fn poll_error(&self, error: &ControlPlaneError);
}

/// Colored, timestamped lines on stdout/stderr.
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    color: bool,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    /// Colors follow `colored`'s own terminal and `NO_COLOR` detection.
    pub fn new() -> Self {
        Self { color: true }
    }

    /// Never emit escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    fn paint(&self, text: String, style: fn(ColoredString) -> ColoredString) -> String {
        if self.color {
            style(text.normal()).to_string()
        } else {
            text
        }
    }

    fn category_style(category: StatusCategory) -> fn(ColoredString) -> ColoredString {
        match category {
            StatusCategory::Healthy => |s| s.green().bold(),
            StatusCategory::Transitional => |s| s.yellow().bold(),
            StatusCategory::Unknown => |s| s.red().bold(),
        }
    }

    /// `[HH:MM:SS] <status padded to 12> AZ: <zone>`
    pub fn render_observation(
        &self,
        timestamp: &str,
        snapshot: &InstanceSnapshot,
        category: StatusCategory,
    ) -> String {
        let status = if snapshot.status.is_empty() {
            "<none>".to_string()
        } else {
            snapshot.status.clone()
        };
        format!(
            "[{timestamp}] {} {}",
            self.paint(format!("{status:<12}"), Self::category_style(category)),
            self.paint(format!("AZ: {}", snapshot.availability_zone), |s| s.cyan()),
        )
    }

    pub fn render_poll_error(&self, timestamp: &str, error: &ControlPlaneError) -> String {
        format!(
            "[{timestamp}] {}",
            self.paint(format!("Error checking instance: {error}"), |s| s.red().bold()),
        )
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

impl Reporter for ConsoleReporter {
    fn header(&self, message: &str) {
        println!("{}", self.paint(message.to_string(), |s| s.magenta().bold()));
    }

    fn info(&self, message: &str) {
        println!("{}", self.paint(message.to_string(), |s| s.cyan()));
    }

    fn success(&self, message: &str) {
        println!("{}", self.paint(message.to_string(), |s| s.green().bold()));
    }

    fn warning(&self, message: &str) {
        println!("{}", self.paint(message.to_string(), |s| s.yellow().bold()));
    }

    fn failure(&self, message: &str) {
        eprintln!("{}", self.paint(message.to_string(), |s| s.red().bold()));
    }

    fn observation(&self, snapshot: &InstanceSnapshot, category: StatusCategory) {
        println!("{}", self.render_observation(&timestamp(), snapshot, category));
    }

    fn poll_error(&self, error: &ControlPlaneError) {
        eprintln!("{}", self.render_poll_error(&timestamp(), error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observation_line_layout() {
        let reporter = ConsoleReporter::plain();
        let line = reporter.render_observation(
            "12:00:05",
            &InstanceSnapshot::new("available", "us-east-1a"),
            StatusCategory::Healthy,
        );
        assert_eq!(line, "[12:00:05] available    AZ: us-east-1a");
    }

    #[test]
    fn empty_status_is_visible() {
        let reporter = ConsoleReporter::plain();
        let line = reporter.render_observation(
            "00:00:00",
            &InstanceSnapshot::new("", ""),
            StatusCategory::Unknown,
        );
        assert!(line.contains("<none>"));
    }

    #[test]
    fn poll_error_line_layout() {
        let reporter = ConsoleReporter::plain();
        let line = reporter.render_poll_error(
            "08:15:00",
            &ControlPlaneError::Transport("throttled".into()),
        );
        assert_eq!(
            line,
            "[08:15:00] Error checking instance: control plane request failed: throttled"
        );
    }

    #[test]
    fn timestamp_is_hh_mm_ss() {
        let ts = timestamp();
        assert_eq!(ts.len(), 8);
        assert_eq!(ts.as_bytes()[2], b':');
        assert_eq!(ts.as_bytes()[5], b':');
    }
}
