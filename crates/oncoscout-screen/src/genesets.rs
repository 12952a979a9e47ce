//! Reference gene-list loading.
//!
//! The Achilles control files are single-column CSVs without a header; each
//! row is a gene identifier, usually in the "SYMBOL (ENTREZ_ID)" format.
//! Sets are keyed on the bare symbol so lookups are insensitive to the
//! Entrez suffix.

use anyhow::{Context, Result};
use oncoscout_common::gene::bare_symbol;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Load a single-column gene list into a set of bare symbols.
pub fn load_gene_set(path: &Path) -> Result<HashSet<String>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open gene list at {:?}", path))?;
    let reader = BufReader::new(file);

    let mut set = HashSet::new();
    for line in reader.lines() {
        let line = line?;
        let symbol = bare_symbol(line.trim());
        if !symbol.is_empty() {
            set.insert(symbol.to_string());
        }
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_strips_entrez_suffix() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"RPL3 (6122)\nPOLR2A (5430)\nACTB\n\n").unwrap();
        let set = load_gene_set(f.path()).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("RPL3"));
        assert!(set.contains("POLR2A"));
        assert!(set.contains("ACTB"));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        assert!(load_gene_set(Path::new("/nonexistent/genes.csv")).is_err());
    }
}
