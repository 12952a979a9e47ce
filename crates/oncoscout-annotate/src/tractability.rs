//! Reduction of OpenTargets tractability evidence into per-modality scores.
//!
//! Evidence quality maps onto an ordinal scale: clinical-stage evidence
//! scores 3/2/1 (approved, advanced clinical, phase 1), structural or
//! accessibility evidence scores 1, family-level evidence scores 0.5.

use crate::opentargets::TractabilityEntry;
use serde::{Deserialize, Serialize};

/// Tractability buckets counted as clinical evidence, strongest first.
pub const CLINICAL_LABELS: [&str; 3] = ["Approved Drug", "Advanced Clinical", "Phase 1 Clinical"];

/// Per-modality tractability summary for one gene.
///
/// A failed or empty lookup yields the all-false/zero default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TractabilitySummary {
    pub sm_clinical: bool,
    pub sm_structural: bool,
    pub ab_clinical: bool,
    pub ab_accessible: bool,
    pub pr_tractable: bool,
    pub oc_clinical: bool,
    pub sm_score: f64,
    pub ab_score: f64,
    pub pr_score: f64,
    pub total_score: f64,
}

/// Score of a clinical-evidence label: Approved 3, Advanced 2, Phase 1 → 1.
fn clinical_score(label: &str) -> Option<f64> {
    CLINICAL_LABELS
        .iter()
        .position(|l| *l == label)
        .map(|idx| (3 - idx) as f64)
}

/// Reduce modality-tagged evidence records to per-modality scores.
pub fn summarize(entries: &[TractabilityEntry]) -> TractabilitySummary {
    let mut summary = TractabilitySummary::default();

    for entry in entries {
        if !entry.value {
            continue;
        }
        let label = entry.label.as_str();

        match entry.modality.as_str() {
            "SM" => {
                if let Some(score) = clinical_score(label) {
                    summary.sm_clinical = true;
                    summary.sm_score = summary.sm_score.max(score);
                } else if label.contains("Ligand") || label.contains("Pocket") {
                    summary.sm_structural = true;
                    summary.sm_score = summary.sm_score.max(1.0);
                } else if label == "Druggable Family" {
                    summary.sm_score = summary.sm_score.max(0.5);
                }
            }
            "AB" => {
                if let Some(score) = clinical_score(label) {
                    summary.ab_clinical = true;
                    summary.ab_score = summary.ab_score.max(score);
                } else if label.to_lowercase().contains("loc")
                    || label.contains("SigP")
                    || label.contains("TMHMM")
                {
                    summary.ab_accessible = true;
                    summary.ab_score = summary.ab_score.max(1.0);
                }
            }
            "PR" => {
                summary.pr_tractable = true;
                if let Some(score) = clinical_score(label) {
                    summary.pr_score = summary.pr_score.max(score);
                } else {
                    summary.pr_score = summary.pr_score.max(0.5);
                }
            }
            "OC" => {
                if clinical_score(label).is_some() {
                    summary.oc_clinical = true;
                }
            }
            _ => {}
        }
    }

    summary.total_score = summary.sm_score + summary.ab_score + summary.pr_score;
    summary
}
