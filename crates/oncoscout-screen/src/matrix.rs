//! DepMap gene-effect matrix loader.
//!
//! CRISPRGeneEffect.csv layout:
//! - First column: cell-line id (e.g., "ACH-000001")
//! - Remaining columns: gene ids in "SYMBOL (ENTREZ_ID)" format (header row)
//! - Values: CRISPR dependency scores (more negative = more essential)
//!
//! The matrix is immutable once loaded. Unparseable or non-finite cells are
//! stored as NaN and skipped by every aggregate.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// In-memory gene-effect matrix.
///
/// `genes` holds the column headers in file order; `rows` maps each cell
/// line to its score vector, aligned with `genes`.
#[derive(Debug, Clone)]
pub struct EffectMatrix {
    genes: Vec<String>,
    gene_index: HashMap<String, usize>,
    rows: HashMap<String, Vec<f64>>,
    loaded_at: DateTime<Utc>,
}

impl EffectMatrix {
    /// Load the gene-effect matrix from a CSV file.
    ///
    /// A missing file, an empty header, or a row whose width disagrees with
    /// the header is fatal: the screen cannot run on malformed input.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open gene effect matrix at {:?}", path))?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        // Parse header to get gene ids; first column is the cell-line id
        let header = lines
            .next()
            .ok_or_else(|| anyhow::anyhow!("Gene effect matrix is empty: {:?}", path))??;
        let header_cols: Vec<&str> = header.split(',').collect();
        if header_cols.len() < 2 {
            anyhow::bail!("Gene effect matrix header has no gene columns: {:?}", path);
        }

        let genes: Vec<String> = header_cols[1..]
            .iter()
            .map(|s| s.trim().to_string())
            .collect();
        debug!(n_genes = genes.len(), "Parsed gene effect header");

        let gene_index: HashMap<String, usize> = genes
            .iter()
            .enumerate()
            .map(|(i, g)| (g.clone(), i))
            .collect();

        let mut rows = HashMap::new();
        for (line_no, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let cols: Vec<&str> = line.split(',').collect();
            if cols.len() != genes.len() + 1 {
                anyhow::bail!(
                    "Gene effect matrix row {} has {} columns, expected {}",
                    line_no + 2,
                    cols.len(),
                    genes.len() + 1
                );
            }

            let cell_line = cols[0].trim().to_string();
            let scores: Vec<f64> = cols[1..]
                .iter()
                .map(|s| s.trim().parse::<f64>().unwrap_or(f64::NAN))
                .collect();
            rows.insert(cell_line, scores);
        }

        info!(
            n_cell_lines = rows.len(),
            n_genes = genes.len(),
            "Loaded gene effect matrix"
        );

        Ok(Self {
            genes,
            gene_index,
            rows,
            loaded_at: Utc::now(),
        })
    }

    /// Gene identifiers in column order.
    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    /// Column index of a gene identifier.
    pub fn gene_index(&self, gene: &str) -> Option<usize> {
        self.gene_index.get(gene).copied()
    }

    pub fn gene_count(&self) -> usize {
        self.genes.len()
    }

    pub fn cell_line_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_cell_line(&self, id: &str) -> bool {
        self.rows.contains_key(id)
    }

    /// All cell-line identifiers present in the matrix.
    pub fn cell_lines(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(|s| s.as_str())
    }

    /// Effect score for one cell. Returns None for absent or non-finite cells.
    pub fn value(&self, cell_line: &str, gene_idx: usize) -> Option<f64> {
        self.rows
            .get(cell_line)
            .and_then(|row| row.get(gene_idx))
            .copied()
            .filter(|v| v.is_finite())
    }

    /// Finite effect scores for a gene over a cell-line subset.
    ///
    /// The subset is a BTreeSet so the summation order is stable across
    /// runs; reruns on identical data produce identical output.
    pub fn column_over(&self, gene_idx: usize, cell_lines: &BTreeSet<String>) -> Vec<f64> {
        cell_lines
            .iter()
            .filter_map(|cl| self.value(cl, gene_idx))
            .collect()
    }

    /// Mean effect for a gene over a cell-line subset.
    ///
    /// Returns None when the subset has no finite values for this gene.
    pub fn mean_over(&self, gene_idx: usize, cell_lines: &BTreeSet<String>) -> Option<f64> {
        let scores = self.column_over(gene_idx, cell_lines);
        if scores.is_empty() {
            return None;
        }
        let sum: f64 = scores.iter().sum();
        Some(sum / scores.len() as f64)
    }

    /// When the matrix was loaded.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}
