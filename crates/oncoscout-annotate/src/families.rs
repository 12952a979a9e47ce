//! Druggable gene-family pattern matching.
//!
//! Each family carries substring patterns drawn from the gene nomenclature
//! of historically druggable protein classes. A symbol is tagged with the
//! first family whose pattern occurs within it (case-insensitive);
//! families are checked in a fixed enumeration order, so kinase wins over
//! enzyme_other for symbols like PKM.

/// Family label plus its name patterns, in match-priority order.
pub const DRUGGABLE_FAMILIES: &[(&str, &[&str])] = &[
    (
        "kinase",
        &[
            "kinase", "CDK", "MAPK", "JAK", "SRC", "ABL", "EGFR", "VEGFR", "PDGFR", "FGFR",
            "MET", "ALK", "RET", "KIT", "FLT", "BTK", "PIK3", "AURK", "PLK", "CHK", "WEE",
            "BRAF", "RAF", "MEK", "ERK", "AKT", "mTOR", "GSK3", "CK1", "CK2", "DYRK",
            "PRPF4B", "SRPK", "CLK", "PKC", "PKA", "ROCK", "PKM", "PKR",
        ],
    ),
    (
        "protease",
        &[
            "protease", "peptidase", "cathepsin", "caspase", "MMP", "ADAM", "USP", "SENP",
            "CASP", "CTSL", "CTSB", "CTSD",
        ],
    ),
    (
        "phosphatase",
        &["phosphatase", "PTP", "PTPN", "PTPRA", "DUSP", "CDC25", "PPP", "PPM"],
    ),
    (
        "GPCR",
        &[
            "GPR", "ADORA", "DRD", "HTR", "CHRM", "OPRM", "ADRB", "ADRA", "S1PR", "CXCR",
            "CCR",
        ],
    ),
    (
        "ion_channel",
        &[
            "SCN", "CACNA", "KCNA", "KCNB", "KCNC", "KCND", "KCNH", "KCNJ", "KCNQ", "HCN",
            "TRPV", "TRPM", "TRPC", "GABRA", "GRIN", "GRIA", "GRIK",
        ],
    ),
    (
        "nuclear_receptor",
        &[
            "NR1", "NR2", "NR3", "NR4", "NR5", "ESR", "AR", "GR", "MR", "PR", "PPARG",
            "PPARA", "RXRA", "RARA", "VDR", "THR",
        ],
    ),
    (
        "transporter",
        &["SLC", "ABC", "TFRC", "ATP1", "ATP2", "ATP6", "ATP7"],
    ),
    (
        "epigenetic",
        &[
            "HDAC", "HAT", "KMT", "KDM", "DNMT", "TET", "BRD", "SETD", "EZH", "DOT1L",
            "PRMT", "SIRT", "EHMT", "SUV", "NSD", "SMYD", "LSD", "JMJD", "PHF", "ARID",
        ],
    ),
    (
        "enzyme_other",
        &[
            "DHFR", "TYMS", "RNR", "IMPDH", "DHODH", "PARP", "IDH", "LDHA", "LDHB", "HK",
            "PFKFB", "PGAM", "ENO", "PGK", "GAPDH", "TPI", "ALDOA", "PKM", "NMT", "HMGCR",
            "HMGCS", "SCD", "FASN", "ACLY", "ACO", "GGPS", "FDPS",
        ],
    ),
];

/// Classify a gene symbol into a druggable family.
///
/// Returns the first family with a matching pattern, or None when nothing
/// matches.
pub fn classify_family(gene_symbol: &str) -> Option<&'static str> {
    let gene_upper = gene_symbol.to_uppercase();

    for (family, patterns) in DRUGGABLE_FAMILIES {
        for pattern in *patterns {
            let pattern_upper = pattern.to_uppercase();
            if gene_upper.contains(&pattern_upper) || gene_upper.starts_with(&pattern_upper) {
                return Some(family);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_egfr_is_kinase() {
        assert_eq!(classify_family("EGFR"), Some("kinase"));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert_eq!(classify_family("egfr"), Some("kinase"));
        assert_eq!(classify_family("Mtor"), Some("kinase"));
    }

    #[test]
    fn test_substring_match_within_symbol() {
        // CDK occurs inside the symbol, not as a prefix
        assert_eq!(classify_family("PCDK9X"), Some("kinase"));
        assert_eq!(classify_family("CTSL"), Some("protease"));
    }

    #[test]
    fn test_first_family_wins_in_enumeration_order() {
        // PKM is listed under both kinase and enzyme_other; kinase is
        // enumerated first.
        assert_eq!(classify_family("PKM"), Some("kinase"));
    }

    #[test]
    fn test_family_examples() {
        assert_eq!(classify_family("PTPN11"), Some("phosphatase"));
        assert_eq!(classify_family("GPR35"), Some("GPCR"));
        assert_eq!(classify_family("SCN5A"), Some("ion_channel"));
        assert_eq!(classify_family("SLC7A11"), Some("transporter"));
        assert_eq!(classify_family("HDAC6"), Some("epigenetic"));
        assert_eq!(classify_family("DHODH"), Some("enzyme_other"));
    }

    #[test]
    fn test_unmatched_symbol_is_none() {
        assert_eq!(classify_family("ZZZ999"), None);
    }
}
