//! OpenTargets tractability stage.
//!
//! Run with: cargo run -p oncoscout-annotate --bin add_tractability

use oncoscout_common::AnnotateConfig;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = AnnotateConfig::default();
    let rows = oncoscout_annotate::report::run(&config).await?;

    info!(n_genes = rows.len(), "Tractability enrichment complete");
    Ok(())
}
