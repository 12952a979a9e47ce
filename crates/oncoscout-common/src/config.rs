//! Pipeline configuration.
//!
//! Thresholds, batch caps, and file locations are compiled-in defaults, but
//! each stage takes its config struct explicitly so tests can override
//! values without touching shared state.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ── Fixed filenames inside the data directory ────────────────────────────────

/// DepMap CRISPR gene effect matrix (cell lines × genes).
pub const GENE_EFFECT_FILE: &str = "CRISPRGeneEffect.csv";
/// DepMap cell-line metadata.
pub const MODEL_FILE: &str = "Model.csv";
/// Genes essential in virtually all cell lines (exclusion set).
pub const COMMON_ESSENTIAL_FILE: &str = "AchillesCommonEssentialControls.csv";
/// Inert control genes (validation set).
pub const NONESSENTIAL_FILE: &str = "AchillesNonessentialControls.csv";
/// Stage-1 output: ranked candidate targets.
pub const RANKED_TARGETS_FILE: &str = "pan_cancer_targets.csv";
/// Stage-2a output: candidates with druggability annotations.
pub const DRUGGABILITY_FILE: &str = "pan_cancer_targets_druggability.csv";
/// Stage-2b output: top candidates with OpenTargets tractability scores.
pub const TRACTABILITY_FILE: &str = "top_targets_tractability.csv";

// ── Stage 1: screening ───────────────────────────────────────────────────────

/// Configuration for the essentiality/selectivity screening pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Directory holding the DepMap input files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Effect score below this counts as essential in a cancer line.
    #[serde(default = "default_cancer_threshold")]
    pub cancer_dependency_threshold: f64,

    /// Minimum fraction of cancer lines a gene must be essential in.
    #[serde(default = "default_min_fraction")]
    pub min_fraction_dependent: f64,

    /// Mean effect in non-cancer lines must exceed this, otherwise the gene
    /// is essential in normal cells too and gets excluded.
    #[serde(default = "default_normal_threshold")]
    pub normal_dependency_threshold: f64,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_cancer_threshold() -> f64 {
    -0.5
}
fn default_min_fraction() -> f64 {
    0.5
}
fn default_normal_threshold() -> f64 {
    -0.3
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            cancer_dependency_threshold: default_cancer_threshold(),
            min_fraction_dependent: default_min_fraction(),
            normal_dependency_threshold: default_normal_threshold(),
        }
    }
}

// ── Stage 2: annotation ──────────────────────────────────────────────────────

/// Configuration for the druggability/tractability annotation pipelines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotateConfig {
    /// Directory holding the stage-1 output and stage-2 results.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Only the first N ranked candidates are sent to ChEMBL.
    #[serde(default = "default_chembl_cap")]
    pub chembl_query_cap: usize,

    /// Number of top candidates (by selectivity) sent to OpenTargets.
    #[serde(default = "default_tractability_top_n")]
    pub tractability_top_n: usize,

    /// Pause between consecutive external lookups, in milliseconds.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
}

fn default_chembl_cap() -> usize {
    100
}
fn default_tractability_top_n() -> usize {
    50
}
fn default_request_delay_ms() -> u64 {
    200
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            chembl_query_cap: default_chembl_cap(),
            tractability_top_n: default_tractability_top_n(),
            request_delay_ms: default_request_delay_ms(),
        }
    }
}
