//! CeruleanOwl command-line entry point.
//!
//! Prints unique names to stdout, one per line. Banner, logs and the run
//! summary go to stderr so the name list can be piped.

mod cli;

use anyhow::Context;
use cerulean_core::{AppConfig, TargetOrganization};
use cerulean_scanner::{LineSink, ScanPipeline};
use cerulean_search::GoogleCustomSearch;
use clap::Parser;
use cli::{Args, BANNER};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_filter());

    if !args.no_banner {
        eprintln!("{BANNER}");
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let target = TargetOrganization::new(args.target.as_str())?;

    let mut config = AppConfig::load_with_env(args.config.as_deref())?;
    args.apply_to(&mut config.pipeline);
    config.pipeline.validate()?;

    let path = match &args.config {
        Some(path) => path.clone(),
        None => AppConfig::config_path()?,
    };
    let credentials = config.google.credentials(&path)?;

    let provider = GoogleCustomSearch::from_config(credentials, &config.search)
        .context("failed to create search client")?;

    let pipeline = ScanPipeline::from_config(Arc::new(provider), &config.pipeline);
    let cancel = pipeline.cancel_token();

    // Handle Ctrl+C
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, finishing queued results");
            cancel.cancel();
        }
    });

    info!("Dorking LinkedIn for employees of {}", target);

    let (report, _sink) = pipeline
        .run(&target, LineSink::new(std::io::stdout()))
        .await?;

    info!(
        "Found {} unique names across {} pages in {:.1}s ({})",
        report.unique_names(),
        report.fetch.pages_fetched,
        report.elapsed.as_secs_f64(),
        report.fetch.stop_reason
    );

    Ok(())
}
