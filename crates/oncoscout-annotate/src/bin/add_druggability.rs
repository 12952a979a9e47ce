//! Druggability annotation stage.
//!
//! Run with: cargo run -p oncoscout-annotate --bin add_druggability

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
    let summary = oncoscout_annotate::annotate::run(&config).await?;

    info!(
        total = summary.total,
        known_drugs = summary.known_drug_hits,
        families = summary.family_hits,
        chembl = summary.chembl_hits,
        "Druggability annotation complete"
    );
    Ok(())
}
