mod cli;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use solfame::SolfameError;
use solfame::api::{ApiClient, JobApi};
use solfame::config::SolfameConfig;
use solfame::job::{Job, validate_source_url};
use solfame::tracker::JobTracker;
use ui::JobProgress;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = resolve_config(&cli).context("failed to load configuration")?;
    run(cli, config).await?;
    Ok(())
}

/// File and environment first, then command-line flags.
fn resolve_config(cli: &Cli) -> Result<SolfameConfig, SolfameError> {
    let mut config = SolfameConfig::load()?;
    if let Some(base) = cli.api_base.clone() {
        config.api_base = base;
    }
    if let Some(base) = cli.processing_base.clone() {
        config.processing_base = base;
    }
    config.validate()?;
    Ok(config)
}

async fn run(cli: Cli, config: SolfameConfig) -> Result<(), SolfameError> {
    let client = ApiClient::new(config.client_config());
    let tracker = JobTracker::new(client, config.poll_interval()).with_max_polls(config.max_polls);

    let options = cli.command.job_options();
    match cli.command {
        Command::Validate { url } => {
            if validate_source_url(&url) {
                println!("valid: {url}");
            } else {
                println!("invalid: {url}");
                std::process::exit(1);
            }
        }
        Command::Submit { url, wait, .. } => {
            let job = tracker.submit(&url, options).await?;
            let job = if wait {
                follow(&tracker, job.id()).await?
            } else {
                job
            };
            show(&job, cli.json)?;
        }
        Command::Status { id } => {
            let job = tracker.api().get_job(&id).await?;
            show(&job, cli.json)?;
        }
        Command::Watch { id } => {
            let job = follow(&tracker, &id).await?;
            show(&job, cli.json)?;
        }
        Command::Health => {
            let client = tracker.api();
            let control = client.health().await.map_err(|e| e.to_string());
            let processing = client.service_health().await.map_err(|e| e.to_string());
            ui::print_health(control, processing);
        }
    }

    Ok(())
}

fn show(job: &Job, json: bool) -> Result<(), SolfameError> {
    if json {
        println!("{}", serde_json::to_string_pretty(job)?);
    } else {
        ui::print_job(job);
    }
    Ok(())
}

async fn follow(tracker: &JobTracker<ApiClient>, id: &str) -> Result<Job, SolfameError> {
    let progress = JobProgress::start(id);
    let outcome = tracker
        .wait_for_completion(id, |job| progress.update(job))
        .await;
    progress.clear();
    Ok(outcome?)
}
