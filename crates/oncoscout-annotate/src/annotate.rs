//! Druggability annotation of ranked candidates.
//!
//! Three order-independent signals per gene, combined into a 0–3 score:
//! a static known-drug table (score 3), gene-family pattern match (score 2),
//! and a ChEMBL target hit (score 1). ChEMBL is only queried for the first
//! `chembl_query_cap` candidates to respect rate limits.

use crate::chembl::{ChemblClient, ChemblTarget};
use crate::families::classify_family;
use crate::known_drugs::known_drug_info;
use anyhow::{Context, Result};
use oncoscout_common::config::{DRUGGABILITY_FILE, RANKED_TARGETS_FILE};
use oncoscout_common::AnnotateConfig;
use oncoscout_screen::report::read_candidates;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Druggability signals for one gene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DruggabilityAnnotation {
    pub druggable_family: Option<String>,
    pub known_drugs: Option<String>,
    pub drug_status: Option<String>,
    pub in_chembl: bool,
    pub chembl_id: Option<String>,
    pub druggability_score: u8,
}

/// Annotate one gene symbol. Pure given the (optional) ChEMBL hit, so the
/// mapping can later be batched or parallelized without behavioral change.
pub fn annotate_gene(gene_symbol: &str, chembl_hit: Option<&ChemblTarget>) -> DruggabilityAnnotation {
    let mut annotation = DruggabilityAnnotation::default();

    if let Some(info) = known_drug_info(gene_symbol) {
        annotation.known_drugs = Some(info.drugs.join("; "));
        annotation.drug_status = Some(info.status.to_string());
        annotation.druggability_score = 3;
    }

    if let Some(family) = classify_family(gene_symbol) {
        annotation.druggable_family = Some(family.to_string());
        annotation.druggability_score = annotation.druggability_score.max(2);
    }

    if let Some(hit) = chembl_hit {
        annotation.in_chembl = true;
        annotation.chembl_id = Some(hit.chembl_id.clone());
        annotation.druggability_score = annotation.druggability_score.max(1);
    }

    annotation
}

/// A ranked candidate with its druggability annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedCandidate {
    pub gene: String,
    pub gene_symbol: String,
    pub fraction_cancer_dependent: f64,
    pub selectivity_score: f64,
    pub mean_cancer_effect: f64,
    pub mean_normal_effect: Option<f64>,
    pub druggable_family: Option<String>,
    pub known_drugs: Option<String>,
    pub drug_status: Option<String>,
    pub in_chembl: bool,
    pub chembl_id: Option<String>,
    pub druggability_score: u8,
}

/// Read a previously written annotated candidate list.
pub fn read_annotated(path: &Path) -> Result<Vec<AnnotatedCandidate>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open annotated targets at {:?}", path))?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

/// Counts for the annotation run.
#[derive(Debug, Clone, Default)]
pub struct DruggabilitySummary {
    pub total: usize,
    pub known_drug_hits: usize,
    pub family_hits: usize,
    pub chembl_hits: usize,
}

/// Annotate the ranked candidate list and write the enriched CSV.
pub async fn run(config: &AnnotateConfig) -> Result<DruggabilitySummary> {
    let candidates = read_candidates(&config.data_dir.join(RANKED_TARGETS_FILE))?;
    info!(n_candidates = candidates.len(), "Adding druggability annotations");

    let chembl = ChemblClient::new()?;
    let delay = Duration::from_millis(config.request_delay_ms);

    let mut summary = DruggabilitySummary {
        total: candidates.len(),
        ..DruggabilitySummary::default()
    };
    let mut annotated = Vec::with_capacity(candidates.len());

    for (idx, candidate) in candidates.into_iter().enumerate() {
        // ChEMBL lookups are capped to the top of the ranking
        let chembl_hit = if idx < config.chembl_query_cap {
            let hit = chembl.search_target(&candidate.gene_symbol).await?;
            tokio::time::sleep(delay).await;
            hit
        } else {
            None
        };

        let annotation = annotate_gene(&candidate.gene_symbol, chembl_hit.as_ref());
        if annotation.known_drugs.is_some() {
            summary.known_drug_hits += 1;
        }
        if annotation.druggable_family.is_some() {
            summary.family_hits += 1;
        }
        if annotation.in_chembl {
            summary.chembl_hits += 1;
        }

        annotated.push(AnnotatedCandidate {
            gene: candidate.gene,
            gene_symbol: candidate.gene_symbol,
            fraction_cancer_dependent: candidate.fraction_cancer_dependent,
            selectivity_score: candidate.selectivity_score,
            mean_cancer_effect: candidate.mean_cancer_effect,
            mean_normal_effect: candidate.mean_normal_effect,
            druggable_family: annotation.druggable_family,
            known_drugs: annotation.known_drugs,
            drug_status: annotation.drug_status,
            in_chembl: annotation.in_chembl,
            chembl_id: annotation.chembl_id,
            druggability_score: annotation.druggability_score,
        });

        if (idx + 1) % 20 == 0 {
            info!(processed = idx + 1, "Annotation progress");
        }
    }

    let out_path = config.data_dir.join(DRUGGABILITY_FILE);
    let mut writer = csv::Writer::from_path(&out_path)
        .with_context(|| format!("Failed to create output file at {:?}", out_path))?;
    for row in &annotated {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let by_score = |score: u8| {
        annotated
            .iter()
            .filter(|r| r.druggability_score == score)
            .count()
    };
    info!(
        known_drugs = summary.known_drug_hits,
        families = summary.family_hits,
        chembl = summary.chembl_hits,
        "Druggability summary"
    );
    info!(
        score_3 = by_score(3),
        score_2 = by_score(2),
        score_1 = by_score(1),
        score_0 = by_score(0),
        path = %out_path.display(),
        "Wrote annotated targets"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chembl_hit(id: &str) -> ChemblTarget {
        ChemblTarget {
            chembl_id: id.to_string(),
            pref_name: None,
            organism: Some("Homo sapiens".to_string()),
        }
    }

    #[test]
    fn test_known_drug_pins_score_at_three() {
        // DHFR also matches the enzyme_other family; the known-drug signal
        // dominates regardless.
        let annotation = annotate_gene("DHFR", None);
        assert_eq!(annotation.druggability_score, 3);
        assert_eq!(annotation.drug_status.as_deref(), Some("approved"));
        assert!(annotation.known_drugs.unwrap().contains("methotrexate"));
        assert_eq!(annotation.druggable_family.as_deref(), Some("enzyme_other"));
    }

    #[test]
    fn test_family_match_scores_two() {
        let annotation = annotate_gene("EGFR", None);
        assert_eq!(annotation.druggability_score, 2);
        assert_eq!(annotation.druggable_family.as_deref(), Some("kinase"));
        assert!(annotation.known_drugs.is_none());
    }

    #[test]
    fn test_chembl_only_scores_one() {
        let hit = chembl_hit("CHEMBL1075092");
        let annotation = annotate_gene("ZZZ999", Some(&hit));
        assert_eq!(annotation.druggability_score, 1);
        assert!(annotation.in_chembl);
        assert_eq!(annotation.chembl_id.as_deref(), Some("CHEMBL1075092"));
    }

    #[test]
    fn test_chembl_hit_never_lowers_a_family_score() {
        let hit = chembl_hit("CHEMBL240");
        let annotation = annotate_gene("EGFR", Some(&hit));
        assert_eq!(annotation.druggability_score, 2);
        assert!(annotation.in_chembl);
    }

    #[test]
    fn test_no_signal_scores_zero() {
        let annotation = annotate_gene("ZZZ999", None);
        assert_eq!(annotation, DruggabilityAnnotation::default());
    }

    #[test]
    fn test_annotated_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("annotated.csv");
        let rows = vec![AnnotatedCandidate {
            gene: "EGFR (1956)".to_string(),
            gene_symbol: "EGFR".to_string(),
            fraction_cancer_dependent: 0.6,
            selectivity_score: 0.3,
            mean_cancer_effect: -0.7,
            mean_normal_effect: Some(-0.4),
            druggable_family: Some("kinase".to_string()),
            known_drugs: None,
            drug_status: None,
            in_chembl: true,
            chembl_id: Some("CHEMBL240".to_string()),
            druggability_score: 2,
        }];

        let mut writer = csv::Writer::from_path(&path).unwrap();
        for row in &rows {
            writer.serialize(row).unwrap();
        }
        writer.flush().unwrap();

        assert_eq!(read_annotated(&path).unwrap(), rows);
    }
}
