//! `rds-failover --mode <monitor|failover>`: load the config, build the
//! RDS client, and run the selected mode until it ends or Ctrl-C.
//!
//! A bad config stops here: no mode runs without a validated target.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tracing::{info, warn};

use failsim_core::{InstanceTarget, Mode, PollSettings, load_config};
use failsim_health::{
    ConsoleReporter, ControlPlaneClient, RdsConfig, RdsControlPlane, Reporter, RunOutcome,
    dispatch,
};

pub struct SimulateArgs {
    pub config: PathBuf,
    pub mode: Mode,
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
}

/// Run the simulation, reporting any terminal error on the console.
pub async fn simulate(args: SimulateArgs) -> Result<()> {
    let reporter: Arc<dyn Reporter> = Arc::new(ConsoleReporter::new());
    reporter.header("RDS Failover Simulation Tool");
    reporter.info(&format!("Mode: {}", args.mode));

    let (target, settings) = match load_config(&args.config).context("error loading configuration")
    {
        Ok(loaded) => loaded,
        Err(e) => {
            reporter.failure(&format!("Error: {e:#}"));
            return Err(e);
        }
    };
    info!(
        config = %args.config.display(),
        identifier = %target.identifier,
        "configuration loaded"
    );

    let client = RdsControlPlane::new(RdsConfig {
        region: args.region,
        endpoint: args.endpoint_url,
        operation_timeout: Some(settings.request_timeout),
    })
    .await;

    execute(
        args.mode,
        &target,
        settings,
        Arc::new(client),
        reporter,
        install_shutdown_handler(),
    )
    .await
}

/// Run one mode against `target` and put its terminal error in front of
/// the operator exactly once.
pub async fn execute(
    mode: Mode,
    target: &InstanceTarget,
    settings: PollSettings,
    client: Arc<dyn ControlPlaneClient>,
    reporter: Arc<dyn Reporter>,
    shutdown: watch::Receiver<bool>,
) -> Result<()> {
    match dispatch(mode, target, settings, client, reporter.clone(), shutdown).await {
        Ok(RunOutcome::Monitored(summary)) => {
            reporter.info(&format!("Monitoring stopped after {} polls", summary.polls));
            Ok(())
        }
        Ok(RunOutcome::Recovered(_)) => Ok(()),
        Err(e) => {
            if !e.already_reported() {
                reporter.failure(&format!("Error: {e}"));
            }
            Err(e).with_context(|| format!("{mode} run against `{}` failed", target.identifier))
        }
    }
}

/// First Ctrl-C asks the running loop to stop between polls; a second
/// one exits immediately.
fn install_shutdown_handler() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl-C handler");
            return;
        }
        info!("shutdown signal received");
        let _ = tx.send(true);

        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("second Ctrl-C, exiting");
            std::process::exit(130);
        }
    });

    rx
}
