//! Stage-1 orchestration: load → classify → filter → rank → write.

use crate::filters::{
    filter_cancer_selective, pan_essential_fractions, remove_common_essentials,
};
use crate::genesets::load_gene_set;
use crate::matrix::EffectMatrix;
use crate::model::{classify_cell_lines, load_model_csv};
use crate::report::{build_candidates, lineage_breakdown, write_candidates, CandidateGene};
use anyhow::Result;
use oncoscout_common::config::{
    COMMON_ESSENTIAL_FILE, GENE_EFFECT_FILE, MODEL_FILE, NONESSENTIAL_FILE,
    RANKED_TARGETS_FILE,
};
use oncoscout_common::gene::bare_symbol;
use oncoscout_common::ScreenConfig;
use tracing::{info, warn};

/// Run counts for the screening stage.
#[derive(Debug, Clone)]
pub struct ScreenSummary {
    pub n_cancer_lines: usize,
    pub n_non_cancer_lines: usize,
    pub n_pan_essential: usize,
    pub n_cancer_selective: usize,
    pub n_common_essential_removed: usize,
    pub candidates: Vec<CandidateGene>,
}

/// Run the full screening pipeline and write the ranked candidate list.
pub fn run(config: &ScreenConfig) -> Result<ScreenSummary> {
    info!(data_dir = %config.data_dir.display(), "Starting pan-cancer target screen");

    let matrix = EffectMatrix::load(&config.data_dir.join(GENE_EFFECT_FILE))?;
    let meta = load_model_csv(&config.data_dir.join(MODEL_FILE))?;
    let common_essential = load_gene_set(&config.data_dir.join(COMMON_ESSENTIAL_FILE))?;
    let nonessential = load_gene_set(&config.data_dir.join(NONESSENTIAL_FILE))?;
    info!(
        common_essential = common_essential.len(),
        nonessential = nonessential.len(),
        "Loaded reference gene sets"
    );

    let cohorts = classify_cell_lines(&meta, &matrix);

    let pan_essential = pan_essential_fractions(
        &matrix,
        &cohorts.cancer,
        config.cancer_dependency_threshold,
        config.min_fraction_dependent,
    )?;
    let n_pan_essential = pan_essential.len();

    let split = filter_cancer_selective(
        &matrix,
        &pan_essential,
        &cohorts.non_cancer,
        config.normal_dependency_threshold,
    );
    let n_cancer_selective = split.kept.len();

    let survivors = remove_common_essentials(split.kept, &common_essential);
    let n_common_essential_removed = n_cancer_selective - survivors.len();

    // Inert controls should never survive the essentiality filter; a hit
    // here means the thresholds are misconfigured.
    for (gene, _) in &survivors {
        if nonessential.contains(bare_symbol(gene)) {
            warn!(gene = gene.as_str(), "Non-essential control gene passed the screen");
        }
    }

    let candidates = build_candidates(&matrix, &survivors, &cohorts);

    for (gene, lineages) in
        lineage_breakdown(&matrix, &meta, &candidates, &cohorts.cancer, 10, 5)
    {
        let formatted: Vec<String> = lineages
            .iter()
            .map(|(lineage, mean)| format!("{}: {:.3}", lineage, mean))
            .collect();
        info!(gene = gene.as_str(), lineages = formatted.join(", ").as_str(), "Most dependent lineages");
    }

    write_candidates(&config.data_dir.join(RANKED_TARGETS_FILE), &candidates)?;

    Ok(ScreenSummary {
        n_cancer_lines: cohorts.cancer.len(),
        n_non_cancer_lines: cohorts.non_cancer.len(),
        n_pan_essential,
        n_cancer_selective,
        n_common_essential_removed,
        candidates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// End-to-end screen over a tiny fixture: three cancer lines, one
    /// fibroblast line, one common-essential gene.
    #[test]
    fn test_screen_end_to_end() {
        let dir = tempfile::tempdir().unwrap();

        // KRAS: essential in all cancer lines, tolerated in the fibroblast.
        // RPL3: passes both filters but is in the common-essential set.
        // TP53: essential in one cancer line only (fails the 0.5 fraction).
        fs::write(
            dir.path().join(GENE_EFFECT_FILE),
            ",KRAS (3845),RPL3 (6122),TP53 (7157)\n\
             ACH-000001,-1.1,-1.5,-0.9\n\
             ACH-000002,-0.9,-1.4,-0.1\n\
             ACH-000003,-1.0,-1.6,-0.2\n\
             ACH-000004,-0.1,-0.2,0.0\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(MODEL_FILE),
            "ModelID,OncotreeLineage,OncotreePrimaryDisease\n\
             ACH-000001,Lung,Lung Adenocarcinoma\n\
             ACH-000002,Skin,Melanoma\n\
             ACH-000003,Breast,Breast Carcinoma\n\
             ACH-000004,Fibroblast,Non-Cancerous\n",
        )
        .unwrap();
        fs::write(dir.path().join(COMMON_ESSENTIAL_FILE), "RPL3 (6122)\n").unwrap();
        fs::write(dir.path().join(NONESSENTIAL_FILE), "OR4F5 (79501)\n").unwrap();

        let config = ScreenConfig {
            data_dir: dir.path().to_path_buf(),
            ..ScreenConfig::default()
        };
        let summary = run(&config).unwrap();

        assert_eq!(summary.n_cancer_lines, 3);
        assert_eq!(summary.n_non_cancer_lines, 1);
        // RPL3 passes essentiality but is removed as a common essential
        assert_eq!(summary.n_common_essential_removed, 1);
        assert_eq!(summary.candidates.len(), 1);

        let kras = &summary.candidates[0];
        assert_eq!(kras.gene_symbol, "KRAS");
        assert!((kras.fraction_cancer_dependent - 1.0).abs() < 1e-12);
        assert!((kras.mean_cancer_effect - (-1.0)).abs() < 1e-12);
        assert_eq!(kras.mean_normal_effect, Some(-0.1));
        assert!((kras.selectivity_score - 0.9).abs() < 1e-12);

        // Output written once, at the end
        assert!(dir.path().join(RANKED_TARGETS_FILE).exists());
    }

    #[test]
    fn test_screen_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(GENE_EFFECT_FILE),
            ",A (1),B (2)\n\
             ACH-000001,-1.0,-0.8\n\
             ACH-000002,-0.9,-0.7\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(MODEL_FILE),
            "ModelID,OncotreeLineage,OncotreePrimaryDisease\n\
             ACH-000001,Lung,Lung Adenocarcinoma\n\
             ACH-000002,Skin,Melanoma\n",
        )
        .unwrap();
        fs::write(dir.path().join(COMMON_ESSENTIAL_FILE), "").unwrap();
        fs::write(dir.path().join(NONESSENTIAL_FILE), "").unwrap();

        let config = ScreenConfig {
            data_dir: dir.path().to_path_buf(),
            ..ScreenConfig::default()
        };
        let first = run(&config).unwrap();
        let second = run(&config).unwrap();
        assert_eq!(first.candidates, second.candidates);
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScreenConfig {
            data_dir: dir.path().to_path_buf(),
            ..ScreenConfig::default()
        };
        assert!(run(&config).is_err());
    }
}
