//! Main execution logic for the logsift CLI.

use anyhow::{Context, Result};
use sift_render::{ActionTable, LineFormatter, RenderConfig, RenderSummary, Renderer};
use sift_search::{
    DirectorySink, S3Config, S3Store, SearchConfig, SearchSummary, Searcher, create_s3_client,
};
use sift_types::KeywordSet;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::fmt;

use crate::args::{Cli, LogLevel, Mode};

/// Result of a run, one variant per mode.
pub enum RunSummary {
    Search(SearchSummary),
    Translate(RenderSummary),
}

/// Initialize logging.
pub fn init_logging(level: LogLevel) -> Result<()> {
    let level: Level = level.into();

    let subscriber = fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr);

    subscriber.init();

    Ok(())
}

/// Execute the mode selected by the arguments.
pub async fn execute(args: Cli) -> Result<RunSummary> {
    match args.run_mode() {
        Mode::Search => search(&args).await.map(RunSummary::Search),
        Mode::Translate => translate(&args).await.map(RunSummary::Translate),
    }
}

async fn search(args: &Cli) -> Result<SearchSummary> {
    let bucket = args
        .bucket
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("--bucket is required when searching"))?;

    let keywords = KeywordSet::load(&args.keywords).await?;
    let listed: Vec<&str> = keywords.iter().collect();
    info!(keywords = ?listed, "Searching for keywords");

    let mut s3_config = S3Config::new(bucket).with_region(&args.region);

    if let Some(prefix) = &args.prefix {
        s3_config = s3_config.with_prefix(prefix);
    }

    if let Some(endpoint) = &args.s3_endpoint {
        s3_config = s3_config.with_endpoint(endpoint);
    }

    if let Some(profile) = &args.profile {
        s3_config = s3_config.with_profile(profile);
    }

    let client = create_s3_client(&s3_config).await?;
    let store = S3Store::new(client, &s3_config);

    let mut config = SearchConfig::new()
        .with_page_size(args.page_size)
        .with_channel_buffer(args.channel_buffer);

    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }

    let searcher = Searcher::new(
        Arc::new(store),
        Arc::new(DirectorySink::new(&args.logs_dir)),
        keywords,
        config,
    );

    let summary = searcher.run().await?;
    Ok(summary)
}

async fn translate(args: &Cli) -> Result<RenderSummary> {
    let actions = match &args.actions {
        Some(path) => ActionTable::load(path).await?,
        None => ActionTable::default(),
    };

    let formatter = LineFormatter::new(actions).with_zone(args.timezone.into());
    let config = RenderConfig::new()
        .with_logs_dir(&args.logs_dir)
        .with_events_dir(&args.events_dir)
        .with_out_dir(&args.out_dir);

    let renderer = Renderer::new(config, formatter);
    let summary = tokio::task::spawn_blocking(move || renderer.run())
        .await
        .context("render task panicked")??;

    Ok(summary)
}
