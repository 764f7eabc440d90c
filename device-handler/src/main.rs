// SPDX-License-Identifier: GPL-3.0-only

//! Removable device notification handler
//!
//! Reads host events as JSON lines on stdin, shows notifications through the
//! desktop notification daemon and writes navigation requests as JSON lines
//! on stdout.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use device_handler::adapters::{ConfiguredImportPolicy, FreedesktopNotifications, MountedVolumes};
use device_handler::config::LoggingLevel;
use device_handler::{AutoImportPipeline, DeviceEventRouter, HandlerConfig, NotificationCenter};
use device_types::{HostEvent, NavigationRequest};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(name = "device-handler")]
#[command(about = "Notifications and auto-import for removable devices")]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the configured log level
    #[arg(long, value_enum)]
    log_level: Option<LoggingLevel>,
}

fn print_navigation(request: &NavigationRequest) {
    match serde_json::to_string(request) {
        Ok(line) => println!("{line}"),
        Err(e) => tracing::error!("Failed to encode navigation request: {e}"),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            HandlerConfig::load(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => HandlerConfig::default(),
    };
    let level = cli.log_level.unwrap_or(config.log_level);

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("device_handler={},warn", level.as_directive()))
        }))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting device handler v{}", env!("CARGO_PKG_VERSION"));

    let connection = zbus::Connection::session()
        .await
        .context("connecting to the session bus")?;
    let host =
        Arc::new(FreedesktopNotifications::new(&connection, config.app_name.clone()).await?);

    let (clicks_tx, mut clicks_rx) = mpsc::unbounded_channel();
    Arc::clone(&host).watch(clicks_tx).await?;

    let notifications = Arc::new(NotificationCenter::new(host, &config));
    let pipeline = Arc::new(AutoImportPipeline::new(
        Arc::new(MountedVolumes::new()),
        Arc::new(ConfiguredImportPolicy::new(config.import.clone())),
        config.media_folders.clone(),
    ));

    let (navigation_tx, mut navigation_rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(request) = navigation_rx.recv().await {
            print_navigation(&request);
        }
    });

    let router = DeviceEventRouter::new(
        &config,
        Arc::clone(&notifications),
        pipeline,
        navigation_tx,
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    tracing::info!("Handler ready, reading host events from stdin");

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<HostEvent>(line) {
                        Ok(event) => router.dispatch(event),
                        Err(e) => tracing::warn!("Ignoring malformed host event: {e}"),
                    }
                }
                Ok(None) => {
                    tracing::info!("Host event stream closed");
                    break;
                }
                Err(e) => {
                    tracing::error!("Failed to read host events: {e}");
                    break;
                }
            },
            Some(identity) = clicks_rx.recv() => router.handle_button_clicked(&identity),
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    router.drain().await;
    notifications.flush().await;
    drop(router);
    if let Err(e) = printer.await {
        tracing::error!("Navigation writer failed: {e}");
    }

    tracing::info!("Device handler stopped");
    Ok(())
}
