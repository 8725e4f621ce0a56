//! Pardaz - admin command line for the site's page layouts.

mod cli;
mod commands;
mod logging;

use anyhow::{Context, Result};
use pardaz_api::{NotificationKind, SiteEvent};
use pardaz_kernel::Site;
use tokio::sync::broadcast::error::TryRecvError;

use crate::cli::{Args, Command};
use crate::logging::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let config = args.site_config()?;

    // Nothing to open for a config dump.
    if args.command == Command::Config {
        let mut stdout = std::io::stdout().lock();
        let mut site = Site::in_memory();
        return commands::run(&mut site, &config, args.command, &mut stdout);
    }

    let mut site = Site::open(&config).context("Failed to open site")?;
    let mut events = site.subscribe();

    let result = commands::run(&mut site, &config, args.command, &mut std::io::stdout().lock());

    // Wait for queued writes before reporting on them.
    site.shutdown().await;
    let failed = report_persistence(&mut events);

    result?;
    if failed > 0 {
        anyhow::bail!("{failed} layout change(s) could not be saved");
    }
    Ok(())
}

/// Log the outcome of every write; returns how many failed.
fn report_persistence(events: &mut tokio::sync::broadcast::Receiver<SiteEvent>) -> usize {
    let mut failed = 0;
    loop {
        match events.try_recv() {
            Ok(event) => {
                let Some(notification) = event.notification() else {
                    continue;
                };
                match notification.kind {
                    NotificationKind::Error => {
                        failed += 1;
                        tracing::error!("{}", notification.message);
                    }
                    NotificationKind::Success => tracing::info!("{}", notification.message),
                }
            }
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "missed site events");
            }
            Err(_) => break,
        }
    }
    failed
}
