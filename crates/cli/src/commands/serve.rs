use std::sync::Arc;

use anyhow::Result;
use catalog_feed_http::{AppState, create_router};
use catalog_feed_service::{IngestionScheduler, IngestionService, validate_schedule};

use crate::config::{FeedArgs, SourceArgs, StoreArgs};

pub(crate) struct ServeOptions {
    pub host: String,
    pub port: u16,
    pub schedule: String,
    pub ingest_on_start: bool,
    pub store: StoreArgs,
    pub source: SourceArgs,
    pub feed: FeedArgs,
}

pub(crate) async fn run(opts: ServeOptions) -> Result<()> {
    validate_schedule(&opts.schedule)?;
    if !opts.feed.allow_list.exists() {
        tracing::warn!(
            path = %opts.feed.allow_list.display(),
            "Allow-list file does not exist yet; /feed will fail until it is created"
        );
    }

    let store = opts.store.open()?;
    let ingestion = Arc::new(opts.source.ingestion_service(store.clone())?);
    let scheduler = IngestionScheduler::start(Arc::clone(&ingestion), &opts.schedule).await?;

    if opts.ingest_on_start {
        spawn_initial_cycle(Arc::clone(&ingestion));
    }

    let state = Arc::new(AppState {
        projector: opts.feed.projector(store),
        allow_list: opts.feed.allow_list.clone(),
        channel: opts.feed.channel(),
    });
    let router = create_router(state);

    let addr = format!("{}:{}", opts.host, opts.port);
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    scheduler.shutdown().await?;
    Ok(())
}

/// Runs through the same single-flight guard as the cron job.
fn spawn_initial_cycle(ingestion: Arc<IngestionService>) {
    tokio::spawn(async move {
        match ingestion.ingestion_cycle().await {
            Ok(outcome) => tracing::debug!(?outcome, "Startup ingestion cycle done"),
            Err(e) => tracing::warn!(error = %e, "Startup ingestion cycle failed"),
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
