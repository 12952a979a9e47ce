//! ChEMBL target search client.
//!
//! ChEMBL is a database of bioactive molecules with drug-like properties.
//! The annotation stage only needs one question answered: does a curated
//! ChEMBL target exist for this gene symbol?
//!
//! API docs: https://chembl.gitbook.io/chembl-interface-documentation/web-resources/chembl-api
//! Endpoint: https://www.ebi.ac.uk/chembl/api/data
//!
//! Lookup failures are localized to the gene being processed: transport
//! errors and non-2xx responses (other than 429, which is retried with
//! backoff) resolve to `Ok(None)`.

use crate::retry::RetryPolicy;
use oncoscout_common::error::Result;
use oncoscout_common::sandbox::SandboxClient as Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const CHEMBL_API_URL: &str = "https://www.ebi.ac.uk/chembl/api/data";

/// Target record from ChEMBL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChemblTarget {
    pub chembl_id: String,
    pub pref_name: Option<String>,
    pub organism: Option<String>,
}

/// ChEMBL client for target lookups.
pub struct ChemblClient {
    client: Client,
    retry: RetryPolicy,
}

impl ChemblClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: Client::new()?,
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry(retry: RetryPolicy) -> Result<Self> {
        Ok(Self {
            client: Client::new()?,
            retry,
        })
    }

    /// Search ChEMBL for a target whose curated gene symbol matches exactly.
    ///
    /// The search endpoint is fuzzy; the response is filtered down to
    /// targets carrying a GENE_SYMBOL synonym equal to the query.
    pub async fn search_target(&self, gene_symbol: &str) -> anyhow::Result<Option<ChemblTarget>> {
        let url = format!("{}/target/search.json", CHEMBL_API_URL);

        debug!(gene = gene_symbol, "Searching ChEMBL targets");

        for attempt in 0..self.retry.max_attempts {
            let resp = match self
                .client
                .get(&url)?
                .query(&[("q", gene_symbol), ("limit", "10")])
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) => {
                    debug!(gene = gene_symbol, error = %e, "ChEMBL request failed");
                    if !self.retry.has_attempts_left(attempt) {
                        return Ok(None);
                    }
                    tokio::time::sleep(self.retry.base_delay).await;
                    continue;
                }
            };

            let status = resp.status();
            if status.is_success() {
                let json: serde_json::Value = match resp.json().await {
                    Ok(json) => json,
                    Err(e) => {
                        debug!(gene = gene_symbol, error = %e, "Malformed ChEMBL payload");
                        return Ok(None);
                    }
                };
                return Ok(find_symbol_match(&json, gene_symbol));
            }

            if self.retry.is_retryable(status) && self.retry.has_attempts_left(attempt) {
                let delay = self.retry.delay_for(attempt);
                warn!(gene = gene_symbol, ?delay, "ChEMBL rate limited, backing off");
                tokio::time::sleep(delay).await;
                continue;
            }

            // Other non-2xx responses mean "not found", not an error
            debug!(gene = gene_symbol, status = %status, "ChEMBL target not found");
            return Ok(None);
        }

        Ok(None)
    }
}

/// Walk the search payload for a target with an exact GENE_SYMBOL synonym.
fn find_symbol_match(json: &serde_json::Value, gene_symbol: &str) -> Option<ChemblTarget> {
    let targets = json["targets"].as_array()?;

    for target in targets {
        let components = match target["target_components"].as_array() {
            Some(components) => components,
            None => continue,
        };
        for component in components {
            let synonyms = match component["target_component_synonyms"].as_array() {
                Some(synonyms) => synonyms,
                None => continue,
            };
            for synonym in synonyms {
                if synonym["syn_type"].as_str() == Some("GENE_SYMBOL")
                    && synonym["component_synonym"].as_str() == Some(gene_symbol)
                {
                    return Some(ChemblTarget {
                        chembl_id: target["target_chembl_id"].as_str()?.to_string(),
                        pref_name: target["pref_name"].as_str().map(String::from),
                        organism: target["organism"].as_str().map(String::from),
                    });
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn search_payload(symbol: &str) -> serde_json::Value {
        json!({
            "targets": [
                {
                    "target_chembl_id": "CHEMBL240",
                    "pref_name": "Epidermal growth factor receptor",
                    "organism": "Homo sapiens",
                    "target_components": [
                        {
                            "target_component_synonyms": [
                                { "syn_type": "GENE_SYMBOL", "component_synonym": symbol },
                                { "syn_type": "UNIPROT", "component_synonym": "P00533" }
                            ]
                        }
                    ]
                }
            ]
        })
    }

    #[test]
    fn test_exact_symbol_match() {
        let hit = find_symbol_match(&search_payload("EGFR"), "EGFR").unwrap();
        assert_eq!(hit.chembl_id, "CHEMBL240");
        assert_eq!(hit.organism.as_deref(), Some("Homo sapiens"));
    }

    #[test]
    fn test_fuzzy_hit_without_exact_symbol_is_rejected() {
        // Search returned a related target, but the curated symbol differs
        assert!(find_symbol_match(&search_payload("EGFR2"), "EGFR").is_none());
    }

    #[test]
    fn test_synonym_type_must_be_gene_symbol() {
        let payload = json!({
            "targets": [{
                "target_chembl_id": "CHEMBL240",
                "target_components": [{
                    "target_component_synonyms": [
                        { "syn_type": "UNIPROT", "component_synonym": "EGFR" }
                    ]
                }]
            }]
        });
        assert!(find_symbol_match(&payload, "EGFR").is_none());
    }

    #[test]
    fn test_empty_payload_is_none() {
        assert!(find_symbol_match(&json!({}), "EGFR").is_none());
        assert!(find_symbol_match(&json!({"targets": []}), "EGFR").is_none());
    }
}
