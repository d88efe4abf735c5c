use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use failsim_core::Mode;

mod commands;

#[derive(Parser)]
#[command(
    name = "rds-failover",
    about = "Monitor a Multi-AZ database instance or exercise its failover",
    version
)]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Simulation mode: monitor or failover.
    #[arg(long, default_value = "monitor")]
    mode: Mode,

    /// AWS region (defaults to the SDK region chain).
    #[arg(long)]
    region: Option<String>,

    /// Control-plane endpoint override, e.g. a LocalStack URL.
    #[arg(long)]
    endpoint_url: Option<String>,
}

/// Used when `RUST_LOG` is unset. Operator output goes through the
/// console reporter, so traces stay quiet unless asked for.
const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let cli = Cli::parse();

    let args = commands::simulate::SimulateArgs {
        config: cli.config,
        mode: cli.mode,
        region: cli.region,
        endpoint_url: cli.endpoint_url,
    };

    match commands::simulate::simulate(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_monitor_and_config_json() {
        let cli = Cli::try_parse_from(["rds-failover"]).unwrap();
        assert_eq!(cli.mode, Mode::Monitor);
        assert_eq!(cli.config, PathBuf::from("config.json"));
        assert!(cli.region.is_none());
    }

    #[test]
    fn parses_failover_mode() {
        let cli = Cli::try_parse_from([
            "rds-failover",
            "--mode",
            "failover",
            "--config",
            "/etc/failsim/db.json",
            "--region",
            "eu-west-1",
        ])
        .unwrap();
        assert_eq!(cli.mode, Mode::Failover);
        assert_eq!(cli.config, PathBuf::from("/etc/failsim/db.json"));
        assert_eq!(cli.region.as_deref(), Some("eu-west-1"));
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = Cli::try_parse_from(["rds-failover", "--mode", "chaos"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("invalid mode `chaos`"));
    }

    #[test]
    fn default_log_filter_keeps_library_info_quiet() {
        let filter = tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER);
        assert_eq!(
            filter.max_level_hint(),
            Some(tracing_subscriber::filter::LevelFilter::WARN)
        );
    }
}
