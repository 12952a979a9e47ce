//! Ranked candidate records and stage-1 output.

use crate::filters::{selectivity_score, GeneFraction};
use crate::matrix::EffectMatrix;
use crate::model::{CellLineMeta, Cohorts};
use anyhow::{Context, Result};
use oncoscout_common::gene::bare_symbol;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::{info, warn};

/// One ranked candidate target.
///
/// `mean_normal_effect` is None when no non-cancer cohort was available; in
/// that case `selectivity_score` is the negated cancer essentiality and is
/// not on the same scale as the two-cohort score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateGene {
    pub gene: String,
    pub gene_symbol: String,
    pub fraction_cancer_dependent: f64,
    pub selectivity_score: f64,
    pub mean_cancer_effect: f64,
    pub mean_normal_effect: Option<f64>,
}

/// Compute per-cohort means and selectivity for the surviving genes, ranked
/// by selectivity descending.
pub fn build_candidates(
    matrix: &EffectMatrix,
    survivors: &[GeneFraction],
    cohorts: &Cohorts,
) -> Vec<CandidateGene> {
    let mut candidates: Vec<CandidateGene> = survivors
        .iter()
        .filter_map(|(gene, fraction)| {
            let idx = matrix.gene_index(gene)?;
            let Some(mean_cancer) = matrix.mean_over(idx, &cohorts.cancer) else {
                warn!(gene = gene.as_str(), "No finite cancer values; dropping candidate");
                return None;
            };
            let mean_normal = if cohorts.non_cancer.is_empty() {
                None
            } else {
                matrix.mean_over(idx, &cohorts.non_cancer)
            };

            Some(CandidateGene {
                gene: gene.clone(),
                gene_symbol: bare_symbol(gene).to_string(),
                fraction_cancer_dependent: *fraction,
                selectivity_score: selectivity_score(mean_cancer, mean_normal),
                mean_cancer_effect: mean_cancer,
                mean_normal_effect: mean_normal,
            })
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.selectivity_score
            .partial_cmp(&a.selectivity_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.gene.cmp(&b.gene))
    });
    candidates
}

/// Write the ranked candidate list. The file is written once, at the end of
/// the run; an interrupted screen leaves no partial output.
pub fn write_candidates(path: &Path, candidates: &[CandidateGene]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create output file at {:?}", path))?;
    for candidate in candidates {
        writer.serialize(candidate)?;
    }
    writer.flush()?;

    info!(n_candidates = candidates.len(), path = %path.display(), "Wrote ranked targets");
    Ok(())
}

/// Read a previously written candidate list (used by the annotation stage).
pub fn read_candidates(path: &Path) -> Result<Vec<CandidateGene>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open ranked targets at {:?}", path))?;
    let mut candidates = Vec::new();
    for record in reader.deserialize() {
        candidates.push(record?);
    }
    Ok(candidates)
}

/// For each of the top candidates, the lineages with the most negative mean
/// effect — which cancer types depend most on the gene.
pub fn lineage_breakdown(
    matrix: &EffectMatrix,
    meta: &[CellLineMeta],
    candidates: &[CandidateGene],
    cancer: &BTreeSet<String>,
    top_genes: usize,
    lineages_per_gene: usize,
) -> Vec<(String, Vec<(String, f64)>)> {
    // Lineage → cancer cell lines present in the matrix
    let mut lineage_lines: HashMap<&str, BTreeSet<String>> = HashMap::new();
    for m in meta {
        if cancer.contains(&m.model_id) && !m.lineage.is_empty() {
            lineage_lines
                .entry(m.lineage.as_str())
                .or_default()
                .insert(m.model_id.clone());
        }
    }

    candidates
        .iter()
        .take(top_genes)
        .filter_map(|candidate| {
            let idx = matrix.gene_index(&candidate.gene)?;
            let mut means: Vec<(String, f64)> = lineage_lines
                .iter()
                .filter_map(|(lineage, lines)| {
                    matrix
                        .mean_over(idx, lines)
                        .map(|mean| (lineage.to_string(), mean))
                })
                .collect();
            // Most negative first = most dependent lineages
            means.sort_by(|a, b| {
                a.1.partial_cmp(&b.1)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.0.cmp(&b.0))
            });
            means.truncate(lineages_per_gene);
            Some((candidate.gene_symbol.clone(), means))
        })
        .collect()
}
