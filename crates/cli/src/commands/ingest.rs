use anyhow::Result;
use catalog_feed_service::CycleOutcome;

use crate::config::{SourceArgs, StoreArgs};

pub(crate) async fn run(store: &StoreArgs, source: &SourceArgs) -> Result<()> {
    let store = store.open()?;
    let ingestion = source.ingestion_service(store)?;

    match ingestion.ingestion_cycle().await? {
        CycleOutcome::Completed(report) => {
            println!("{report}");
            for failure in &report.parse_failures {
                println!("  entry #{}: {}", failure.index, failure.error);
            }
            for failure in &report.store_failures {
                println!("  game {}: {}", failure.id, failure.reason);
            }
        },
        CycleOutcome::Skipped => println!("skipped: another cycle is running"),
    }
    Ok(())
}
