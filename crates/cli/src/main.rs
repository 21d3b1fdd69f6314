mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::{FeedArgs, SourceArgs, StoreArgs};

#[derive(Parser)]
#[command(name = "catalog-feed")]
#[command(version, about = "Catalog snapshot ingestion with a curated RSS feed", long_about = None)]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the feed over HTTP and ingest on a cron schedule
    Serve {
        #[arg(short, long, env = "CATALOG_FEED_PORT", default_value = "8080")]
        port: u16,
        #[arg(short = 'H', long, env = "CATALOG_FEED_HOST", default_value = "127.0.0.1")]
        host: String,
        /// Cron expression with a leading seconds field
        #[arg(long, env = "CATALOG_FEED_CRON", default_value = catalog_feed_core::constants::DEFAULT_SCHEDULE)]
        schedule: String,
        /// Run one ingestion cycle right away instead of waiting for the first firing
        #[arg(long)]
        ingest_on_start: bool,
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        feed: FeedArgs,
    },
    /// Run exactly one ingestion cycle and print its report
    Ingest {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the feed XML for the current allow-list to stdout
    Feed {
        #[command(flatten)]
        feed: FeedArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host, schedule, ingest_on_start, source, feed } => {
            commands::serve::run(commands::serve::ServeOptions {
                host,
                port,
                schedule,
                ingest_on_start,
                store: cli.store,
                source,
                feed,
            })
            .await?;
        },
        Commands::Ingest { source } => commands::ingest::run(&cli.store, &source).await?,
        Commands::Feed { feed } => commands::feed::run(&cli.store, &feed).await?,
    }

    Ok(())
}
