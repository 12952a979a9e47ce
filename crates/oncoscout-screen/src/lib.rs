//! oncoscout-screen — Essentiality/selectivity screening of CRISPR dependency data.
//!
//! Stage 1 of the Oncoscout pipeline: loads the DepMap gene-effect matrix,
//! partitions cell lines into cancer and non-cancer cohorts, filters genes
//! by cancer essentiality and normal-cell selectivity, excludes common
//! essentials, and writes a ranked candidate list.

pub mod filters;
pub mod genesets;
pub mod matrix;
pub mod model;
pub mod pipeline;
pub mod report;
