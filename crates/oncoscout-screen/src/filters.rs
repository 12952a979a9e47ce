//! Statistical filters over the gene-effect matrix.
//!
//! The screening order is: pan-essentiality in cancer lines, then
//! cancer-selectivity against non-cancer lines, then common-essential
//! exclusion. Each step is a pure function over the immutable matrix so the
//! partitions stay auditable.

use crate::matrix::EffectMatrix;
use anyhow::Result;
use oncoscout_common::gene::bare_symbol;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use tracing::{info, warn};

/// A gene paired with the fraction of cancer lines it is essential in.
pub type GeneFraction = (String, f64);

fn sort_by_fraction_desc(items: &mut [GeneFraction]) {
    items.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
}

/// Find genes essential in at least `min_fraction` of cancer cell lines.
///
/// A gene counts as essential in a line when its finite effect score falls
/// below `threshold`. The fraction denominator is the full cohort size, so
/// missing values count against the gene rather than shrinking its
/// denominator.
///
/// Fails when the cancer cohort is empty: the fraction is undefined and
/// silently propagating NaN would poison every downstream stage.
pub fn pan_essential_fractions(
    matrix: &EffectMatrix,
    cancer: &BTreeSet<String>,
    threshold: f64,
    min_fraction: f64,
) -> Result<Vec<GeneFraction>> {
    if cancer.is_empty() {
        anyhow::bail!("no cancer cell lines available");
    }

    let cohort_size = cancer.len() as f64;
    let mut fractions: Vec<GeneFraction> = matrix
        .genes()
        .iter()
        .enumerate()
        .filter_map(|(idx, gene)| {
            let essential_count = cancer
                .iter()
                .filter_map(|cl| matrix.value(cl, idx))
                .filter(|score| *score < threshold)
                .count();
            let fraction = essential_count as f64 / cohort_size;
            (fraction >= min_fraction).then(|| (gene.clone(), fraction))
        })
        .collect();

    sort_by_fraction_desc(&mut fractions);

    info!(
        n_genes = fractions.len(),
        threshold,
        min_fraction,
        "Pan-essential filter complete"
    );
    Ok(fractions)
}

/// Result of the cancer-selectivity filter: kept genes plus the excluded
/// partition for auditing.
#[derive(Debug, Clone, Default)]
pub struct SelectivitySplit {
    pub kept: Vec<GeneFraction>,
    pub excluded: Vec<GeneFraction>,
}

/// Remove genes that are also essential in non-cancer cell lines.
///
/// A gene is kept when its mean effect over the non-cancer cohort exceeds
/// `normal_threshold`. Genes with no finite normal values are excluded:
/// their normal-cell behaviour is unknown, which is not evidence of
/// selectivity.
///
/// An empty non-cancer cohort degrades gracefully: all candidates pass
/// through unfiltered with a warning.
pub fn filter_cancer_selective(
    matrix: &EffectMatrix,
    candidates: &[GeneFraction],
    non_cancer: &BTreeSet<String>,
    normal_threshold: f64,
) -> SelectivitySplit {
    if non_cancer.is_empty() {
        warn!("No non-cancer cell lines available; skipping selectivity filtering");
        return SelectivitySplit {
            kept: candidates.to_vec(),
            excluded: Vec::new(),
        };
    }

    let mut split = SelectivitySplit::default();
    for (gene, fraction) in candidates {
        let mean_normal = matrix
            .gene_index(gene)
            .and_then(|idx| matrix.mean_over(idx, non_cancer));

        match mean_normal {
            Some(mean) if mean > normal_threshold => {
                split.kept.push((gene.clone(), *fraction))
            }
            _ => split.excluded.push((gene.clone(), *fraction)),
        }
    }

    info!(
        kept = split.kept.len(),
        excluded = split.excluded.len(),
        normal_threshold,
        "Cancer-selectivity filter complete"
    );
    split
}

/// Remove genes whose bare symbol is in the common-essential reference set.
///
/// Strict subtraction: the output is exactly the input minus matching
/// genes, regardless of Entrez-suffix formatting.
pub fn remove_common_essentials(
    candidates: Vec<GeneFraction>,
    common_essential: &HashSet<String>,
) -> Vec<GeneFraction> {
    let before = candidates.len();
    let filtered: Vec<GeneFraction> = candidates
        .into_iter()
        .filter(|(gene, _)| !common_essential.contains(bare_symbol(gene)))
        .collect();

    info!(
        removed = before - filtered.len(),
        remaining = filtered.len(),
        "Removed common essential genes"
    );
    filtered
}

/// Selectivity score: mean(normal effect) − mean(cancer effect), so higher
/// means the gene matters more in cancer.
///
/// With no non-cancer cohort the score degrades to negated cancer
/// essentiality. The two paths are on different scales; output records
/// carry the optional normal mean so a reader can tell which path produced
/// the score.
pub fn selectivity_score(mean_cancer: f64, mean_normal: Option<f64>) -> f64 {
    match mean_normal {
        Some(normal) => normal - mean_cancer,
        None => -mean_cancer,
    }
}
