//! Tractability enrichment of the top candidates.
//!
//! Bounded to the top N genes by selectivity to respect OpenTargets rate
//! limits. Lookups run one at a time with a fixed inter-request delay; a
//! failed lookup yields an all-zero summary for that gene and the batch
//! continues.

use crate::annotate::{read_annotated, AnnotatedCandidate};
use crate::opentargets::OpenTargetsClient;
use crate::tractability::{summarize, TractabilitySummary};
use anyhow::{Context, Result};
use oncoscout_common::config::{DRUGGABILITY_FILE, TRACTABILITY_FILE};
use oncoscout_common::AnnotateConfig;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::Duration;
use tracing::info;

/// Selectivity floor for the "best opportunities" shortlist.
const BEST_SELECTIVITY_MIN: f64 = 0.2;
/// Total-tractability floor for the "best opportunities" shortlist.
const BEST_TRACTABILITY_MIN: f64 = 2.0;

/// One gene with its per-modality tractability scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TractabilityRow {
    pub gene_symbol: String,
    /// Empty when the symbol search found no target.
    pub ensembl_id: String,
    pub selectivity_score: f64,
    pub fraction_cancer_dependent: f64,
    pub druggability_score: u8,
    pub sm_score: f64,
    pub ab_score: f64,
    pub pr_score: f64,
    pub total_tractability: f64,
    pub sm_clinical: bool,
    pub sm_structural: bool,
    pub ab_clinical: bool,
    pub ab_accessible: bool,
    pub pr_tractable: bool,
}

fn build_row(
    candidate: &AnnotatedCandidate,
    ensembl_id: String,
    summary: &TractabilitySummary,
) -> TractabilityRow {
    TractabilityRow {
        gene_symbol: candidate.gene_symbol.clone(),
        ensembl_id,
        selectivity_score: candidate.selectivity_score,
        fraction_cancer_dependent: candidate.fraction_cancer_dependent,
        druggability_score: candidate.druggability_score,
        sm_score: summary.sm_score,
        ab_score: summary.ab_score,
        pr_score: summary.pr_score,
        total_tractability: summary.total_score,
        sm_clinical: summary.sm_clinical,
        sm_structural: summary.sm_structural,
        ab_clinical: summary.ab_clinical,
        ab_accessible: summary.ab_accessible,
        pr_tractable: summary.pr_tractable,
    }
}

/// Fetch tractability for the top candidates and write the final CSV.
pub async fn run(config: &AnnotateConfig) -> Result<Vec<TractabilityRow>> {
    let mut candidates = read_annotated(&config.data_dir.join(DRUGGABILITY_FILE))?;
    candidates.sort_by(|a, b| {
        b.selectivity_score
            .partial_cmp(&a.selectivity_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.gene_symbol.cmp(&b.gene_symbol))
    });
    candidates.truncate(config.tractability_top_n);

    info!(
        n_genes = candidates.len(),
        "Fetching OpenTargets tractability for top candidates"
    );

    let client = OpenTargetsClient::new()?;
    let delay = Duration::from_millis(config.request_delay_ms);
    let mut rows = Vec::with_capacity(candidates.len());

    for candidate in &candidates {
        let ensembl_id = client.search_target(&candidate.gene_symbol).await?;

        let (ensembl_id, summary) = match ensembl_id {
            Some(id) => {
                let entries = client.fetch_tractability(&id).await?;
                (id, summarize(&entries))
            }
            None => {
                info!(gene = candidate.gene_symbol.as_str(), "No OpenTargets hit");
                (String::new(), TractabilitySummary::default())
            }
        };

        info!(
            gene = candidate.gene_symbol.as_str(),
            sm = summary.sm_score,
            ab = summary.ab_score,
            pr = summary.pr_score,
            "Tractability fetched"
        );
        rows.push(build_row(candidate, ensembl_id, &summary));

        tokio::time::sleep(delay).await;
    }

    let out_path = config.data_dir.join(TRACTABILITY_FILE);
    let mut writer = csv::Writer::from_path(&out_path)
        .with_context(|| format!("Failed to create output file at {:?}", out_path))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!(n_rows = rows.len(), path = %out_path.display(), "Wrote tractability table");

    print_table(&rows);
    print_summary(&rows);

    Ok(rows)
}

/// Fixed-width console table of the enriched candidates.
fn print_table(rows: &[TractabilityRow]) {
    println!("{}", "-".repeat(100));
    println!(
        "{:<10} {:>7} {:>6} {:>4} {:>4} {:>4} {:>5} {:>7} {:>9} {:>7} {:>6} {:>4}",
        "Gene", "Select", "%Ess", "SM", "AB", "PR", "Total", "SM_clin", "SM_struct", "AB_clin",
        "AB_acc", "PR"
    );
    println!("{}", "-".repeat(100));

    let yes_no = |flag: bool| if flag { "Yes" } else { "-" };
    for row in rows {
        println!(
            "{:<10} {:>7.3} {:>5.1}% {:>4.1} {:>4.1} {:>4.1} {:>5.1} {:>7} {:>9} {:>7} {:>6} {:>4}",
            row.gene_symbol,
            row.selectivity_score,
            row.fraction_cancer_dependent * 100.0,
            row.sm_score,
            row.ab_score,
            row.pr_score,
            row.total_tractability,
            yes_no(row.sm_clinical),
            yes_no(row.sm_structural),
            yes_no(row.ab_clinical),
            yes_no(row.ab_accessible),
            yes_no(row.pr_tractable),
        );
    }
}

fn print_summary(rows: &[TractabilityRow]) {
    let count = |f: fn(&TractabilityRow) -> bool| rows.iter().filter(|r| f(r)).count();
    info!(
        sm_clinical = count(|r| r.sm_clinical),
        sm_structural = count(|r| r.sm_structural),
        ab_clinical = count(|r| r.ab_clinical),
        ab_accessible = count(|r| r.ab_accessible),
        pr_tractable = count(|r| r.pr_tractable),
        "Tractability summary"
    );

    let mut best: Vec<&TractabilityRow> = best_opportunities(rows);
    best.sort_by(|a, b| {
        b.total_tractability
            .partial_cmp(&a.total_tractability)
            .unwrap_or(Ordering::Equal)
    });
    for row in best {
        info!(
            gene = row.gene_symbol.as_str(),
            selectivity = row.selectivity_score,
            tractability = row.total_tractability,
            "Best opportunity"
        );
    }
}

/// Genes combining high selectivity with real tractability evidence.
pub fn best_opportunities(rows: &[TractabilityRow]) -> Vec<&TractabilityRow> {
    rows.iter()
        .filter(|r| {
            r.selectivity_score > BEST_SELECTIVITY_MIN
                && r.total_tractability >= BEST_TRACTABILITY_MIN
        })
        .collect()
}
