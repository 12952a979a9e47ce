//! Gene identifier helpers.
//!
//! DepMap gene columns use the format `"SYMBOL (ENTREZ_ID)"`, e.g.
//! `"KRAS (3845)"`. Reference gene lists use the same format, while
//! external services key on the bare HGNC symbol.

/// Strip the Entrez suffix from a DepMap gene identifier.
///
/// Splits on the first space; identifiers without a suffix pass through
/// unchanged.
pub fn bare_symbol(gene_id: &str) -> &str {
    gene_id.split(' ').next().unwrap_or(gene_id).trim()
}
