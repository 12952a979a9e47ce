//! Cell-line metadata and cancer / non-cancer cohort classification.
//!
//! Model.csv is parsed by header-name lookup so column order does not
//! matter. Expected columns:
//! - ModelID: DepMap cell-line id (e.g., "ACH-000001")
//! - OncotreeLineage: broad lineage (e.g., "Lung", "Fibroblast")
//! - OncotreePrimaryDisease: disease label (e.g., "Non-Cancerous")

use crate::matrix::EffectMatrix;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Lineages treated as non-cancerous.
pub const NON_CANCER_LINEAGES: [&str; 2] = ["Fibroblast", "Normal"];
/// Disease-label sentinel for non-cancerous models.
pub const NON_CANCER_DISEASE: &str = "Non-Cancerous";

/// One row of cell-line metadata.
#[derive(Debug, Clone)]
pub struct CellLineMeta {
    pub model_id: String,
    pub lineage: String,
    pub primary_disease: String,
}

impl CellLineMeta {
    /// A cell line is non-cancer iff its lineage is fibroblast/normal or its
    /// disease label is the non-cancerous sentinel.
    pub fn is_non_cancer(&self) -> bool {
        NON_CANCER_LINEAGES.contains(&self.lineage.as_str())
            || self.primary_disease == NON_CANCER_DISEASE
    }
}

/// Load Model.csv.
pub fn load_model_csv(path: &Path) -> Result<Vec<CellLineMeta>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open cell-line metadata at {:?}", path))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers()?.clone();
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow::anyhow!("Model.csv missing {} column", name))
    };
    let id_idx = find("ModelID")?;
    let lineage_idx = find("OncotreeLineage")?;
    let disease_idx = find("OncotreePrimaryDisease")?;

    let mut meta = Vec::new();
    for record in reader.records() {
        let record = record?;
        let model_id = record.get(id_idx).unwrap_or("").trim();
        if model_id.is_empty() {
            continue;
        }
        meta.push(CellLineMeta {
            model_id: model_id.to_string(),
            lineage: record.get(lineage_idx).unwrap_or("").trim().to_string(),
            primary_disease: record.get(disease_idx).unwrap_or("").trim().to_string(),
        });
    }

    info!(n_cell_lines = meta.len(), "Loaded cell-line metadata");
    Ok(meta)
}

/// Cancer / non-cancer cohorts, restricted to cell lines present in the
/// effect matrix.
///
/// The two sets are disjoint by construction; any metadata row without a
/// matrix row is silently dropped. BTreeSet keeps downstream summation
/// order stable across runs.
#[derive(Debug, Clone, Default)]
pub struct Cohorts {
    pub cancer: BTreeSet<String>,
    pub non_cancer: BTreeSet<String>,
}

/// Partition cell lines into cancer and non-cancer cohorts.
///
/// An empty cohort is not an error here; the downstream filters decide how
/// to degrade.
pub fn classify_cell_lines(meta: &[CellLineMeta], matrix: &EffectMatrix) -> Cohorts {
    let mut cohorts = Cohorts::default();

    for m in meta {
        if !matrix.has_cell_line(&m.model_id) {
            continue;
        }
        if m.is_non_cancer() {
            cohorts.non_cancer.insert(m.model_id.clone());
        } else {
            cohorts.cancer.insert(m.model_id.clone());
        }
    }

    info!(
        cancer = cohorts.cancer.len(),
        non_cancer = cohorts.non_cancer.len(),
        "Classified cell lines"
    );
    cohorts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn meta(id: &str, lineage: &str, disease: &str) -> CellLineMeta {
        CellLineMeta {
            model_id: id.to_string(),
            lineage: lineage.to_string(),
            primary_disease: disease.to_string(),
        }
    }

    fn tiny_matrix() -> EffectMatrix {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(
            b",KRAS (3845)\n\
              ACH-000001,-1.0\n\
              ACH-000002,-0.2\n\
              ACH-000003,0.0\n",
        )
        .unwrap();
        EffectMatrix::load(f.path()).unwrap()
    }

    #[test]
    fn test_fibroblast_lineage_is_non_cancer() {
        assert!(meta("ACH-000001", "Fibroblast", "Engineered").is_non_cancer());
        assert!(meta("ACH-000001", "Normal", "Immortalized").is_non_cancer());
    }

    #[test]
    fn test_disease_sentinel_is_non_cancer() {
        assert!(meta("ACH-000001", "Lung", "Non-Cancerous").is_non_cancer());
        assert!(!meta("ACH-000001", "Lung", "Lung Adenocarcinoma").is_non_cancer());
    }

    #[test]
    fn test_cohorts_disjoint_and_subset_of_matrix() {
        let matrix = tiny_matrix();
        let rows = vec![
            meta("ACH-000001", "Lung", "Lung Adenocarcinoma"),
            meta("ACH-000002", "Fibroblast", "Engineered"),
            meta("ACH-000003", "Skin", "Melanoma"),
            // Not in the matrix: dropped from both sets
            meta("ACH-000099", "Normal", "Non-Cancerous"),
        ];
        let cohorts = classify_cell_lines(&rows, &matrix);

        assert_eq!(cohorts.cancer.len(), 2);
        assert_eq!(cohorts.non_cancer.len(), 1);
        assert!(cohorts.cancer.is_disjoint(&cohorts.non_cancer));
        for id in cohorts.cancer.iter().chain(cohorts.non_cancer.iter()) {
            assert!(matrix.has_cell_line(id));
        }
        assert!(!cohorts.non_cancer.contains("ACH-000099"));
    }

    #[test]
    fn test_load_model_csv_by_header_name() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        // Columns deliberately out of the usual order
        f.write_all(
            b"OncotreeLineage,ModelID,OncotreePrimaryDisease\n\
              Lung,ACH-000001,Lung Adenocarcinoma\n\
              Fibroblast,ACH-000002,Non-Cancerous\n",
        )
        .unwrap();
        let meta = load_model_csv(f.path()).unwrap();
        assert_eq!(meta.len(), 2);
        assert_eq!(meta[0].model_id, "ACH-000001");
        assert_eq!(meta[1].lineage, "Fibroblast");
    }

    #[test]
    fn test_load_model_csv_missing_column_is_fatal() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"ModelID,OncotreeLineage\nACH-000001,Lung\n").unwrap();
        assert!(load_model_csv(f.path()).is_err());
    }
}
