//! Static table of targets with approved or clinical-stage drugs.
//!
//! Curated from the oncology literature; presence in this table is the
//! strongest druggability signal and pins the score at 3.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Known drugs for a target plus their furthest clinical status.
#[derive(Debug, Clone, Copy)]
pub struct KnownDrugInfo {
    pub drugs: &'static [&'static str],
    pub status: &'static str,
}

lazy_static! {
    static ref KNOWN_DRUGGED_TARGETS: HashMap<&'static str, KnownDrugInfo> = {
        let entries: &[(&str, &[&str], &str)] = &[
            ("DHFR", &["methotrexate", "pemetrexed", "pralatrexate"], "approved"),
            ("TYMS", &["5-fluorouracil", "capecitabine"], "approved"),
            ("TFRC", &["anti-TFRC antibodies (clinical)"], "clinical"),
            ("TOP2A", &["doxorubicin", "etoposide"], "approved"),
            ("CDK1", &["dinaciclib", "flavopiridol"], "clinical"),
            ("KIF11", &["ispinesib", "filanesib"], "clinical"),
            ("PLK1", &["volasertib", "onvansertib"], "clinical"),
            ("BUB1B", &["paclitaxel (indirect)"], "approved"),
            ("MCL1", &["S63845", "AMG-176"], "clinical"),
            ("PARP1", &["olaparib", "niraparib", "rucaparib"], "approved"),
            ("HDAC1", &["vorinostat", "romidepsin"], "approved"),
            ("PRMT5", &["GSK3326595", "JNJ-64619178"], "clinical"),
            ("EZH2", &["tazemetostat"], "approved"),
            ("BRD4", &["JQ1", "OTX015", "ABBV-075"], "clinical"),
            ("NAMPT", &["FK866", "GMX1778"], "clinical"),
            ("AURKA", &["alisertib"], "clinical"),
            ("AURKB", &["barasertib"], "clinical"),
            ("WEE1", &["adavosertib"], "clinical"),
            ("CHK1", &["prexasertib", "rabusertib"], "clinical"),
            ("HMGCR", &["statins"], "approved"),
            ("GGPS1", &["bisphosphonates (indirect)"], "approved"),
            ("ACLY", &["bempedoic acid"], "approved"),
            ("SCD", &["MK-8245"], "clinical"),
            ("IDH1", &["ivosidenib"], "approved"),
            ("IDH2", &["enasidenib"], "approved"),
            ("DHODH", &["leflunomide", "brequinar"], "approved/clinical"),
            ("IMPDH1", &["mycophenolate"], "approved"),
            ("IMPDH2", &["mycophenolate"], "approved"),
            ("RRM1", &["gemcitabine"], "approved"),
            ("RRM2", &["hydroxyurea", "gemcitabine"], "approved"),
            ("PSMB5", &["bortezomib", "carfilzomib"], "approved"),
            ("USP7", &["P5091", "GNE-6640"], "preclinical"),
            ("UBA1", &["TAK-243"], "clinical"),
            ("SAE1", &["ML-792", "TAK-981"], "clinical"),
        ];

        entries
            .iter()
            .copied()
            .map(|(gene, drugs, status)| (gene, KnownDrugInfo { drugs, status }))
            .collect()
    };
}

/// Look up known drugs for a gene symbol (case-insensitive).
pub fn known_drug_info(gene_symbol: &str) -> Option<KnownDrugInfo> {
    KNOWN_DRUGGED_TARGETS
        .get(gene_symbol.to_uppercase().as_str())
        .copied()
}
