//! Pan-cancer target screen.
//!
//! Run with: cargo run -p oncoscout-screen --bin screen_targets

use oncoscout_common::ScreenConfig;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ScreenConfig::default();
    let summary = oncoscout_screen::pipeline::run(&config)?;

    info!(
        pan_essential = summary.n_pan_essential,
        cancer_selective = summary.n_cancer_selective,
        final_candidates = summary.candidates.len(),
        "Screen complete"
    );
    Ok(())
}
