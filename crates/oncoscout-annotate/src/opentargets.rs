//! OpenTargets Platform GraphQL client.
//!
//! Two sequential lookups per gene: a symbol search resolving the stable
//! Ensembl target id, then a tractability query returning modality-tagged
//! evidence records (SM = small molecule, AB = antibody, PR = PROTAC,
//! OC = other clinical modalities).
//!
//! API docs: https://platform-docs.opentargets.org/data-access/graphql-api
//!
//! Both lookups are advisory: any failure resolves to None/empty and the
//! batch moves on to the next gene.

use crate::retry::RetryPolicy;
use oncoscout_common::error::Result;
use oncoscout_common::sandbox::SandboxClient as Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

const OPENTARGETS_API_URL: &str = "https://api.platform.opentargets.org/api/v4/graphql";

const SEARCH_QUERY: &str = r#"
query searchTarget($symbol: String!) {
  search(queryString: $symbol, entityNames: ["target"], page: {size: 1, index: 0}) {
    hits {
      id
      name
    }
  }
}
"#;

const TRACTABILITY_QUERY: &str = r#"
query targetTractability($ensemblId: String!) {
  target(ensemblId: $ensemblId) {
    id
    approvedSymbol
    tractability {
      label
      modality
      value
    }
  }
}
"#;

/// One modality-tagged tractability evidence record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TractabilityEntry {
    pub label: String,
    pub modality: String,
    #[serde(default)]
    pub value: bool,
}

/// OpenTargets client for target search and tractability evidence.
pub struct OpenTargetsClient {
    client: Client,
    retry: RetryPolicy,
}

impl OpenTargetsClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: Client::new()?,
            retry: RetryPolicy::default(),
        })
    }

    /// Resolve a gene symbol to its Ensembl target id.
    pub async fn search_target(&self, gene_symbol: &str) -> anyhow::Result<Option<String>> {
        debug!(gene = gene_symbol, "Searching OpenTargets");

        let variables = json!({ "symbol": gene_symbol });
        let Some(data) = self.post_graphql(SEARCH_QUERY, variables).await? else {
            return Ok(None);
        };

        Ok(data["search"]["hits"]
            .as_array()
            .and_then(|hits| hits.first())
            .and_then(|hit| hit["id"].as_str())
            .map(String::from))
    }

    /// Fetch tractability evidence for a resolved target.
    ///
    /// Returns an empty list when the target has no evidence or the lookup
    /// fails.
    pub async fn fetch_tractability(
        &self,
        ensembl_id: &str,
    ) -> anyhow::Result<Vec<TractabilityEntry>> {
        debug!(ensembl_id, "Fetching OpenTargets tractability");

        let variables = json!({ "ensemblId": ensembl_id });
        let Some(data) = self.post_graphql(TRACTABILITY_QUERY, variables).await? else {
            return Ok(Vec::new());
        };

        let entries = data["target"]["tractability"].clone();
        if entries.is_null() {
            return Ok(Vec::new());
        }
        match serde_json::from_value(entries) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                debug!(ensembl_id, error = %e, "Malformed tractability payload");
                Ok(Vec::new())
            }
        }
    }

    /// Issue one GraphQL request with bounded 429 retries.
    ///
    /// Returns the `data` envelope, or None for any failure.
    async fn post_graphql(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> anyhow::Result<Option<serde_json::Value>> {
        let body = json!({ "query": query, "variables": variables });

        for attempt in 0..self.retry.max_attempts {
            let resp = match self
                .client
                .post(OPENTARGETS_API_URL)?
                .json(&body)
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) => {
                    debug!(error = %e, "OpenTargets request failed");
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
                        debug!(error = %e, "Malformed OpenTargets payload");
                        return Ok(None);
                    }
                };
                let data = json["data"].clone();
                return Ok((!data.is_null()).then_some(data));
            }

            if self.retry.is_retryable(status) && self.retry.has_attempts_left(attempt) {
                let delay = self.retry.delay_for(attempt);
                warn!(?delay, "OpenTargets rate limited, backing off");
                tokio::time::sleep(delay).await;
                continue;
            }

            debug!(status = %status, "OpenTargets lookup failed");
            return Ok(None);
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tractability_entry_deserialization() {
        let json = r#"[
            {"label": "Approved Drug", "modality": "SM", "value": true},
            {"label": "High-Quality Pocket", "modality": "SM", "value": false},
            {"label": "Half-life >= 24h", "modality": "PR"}
        ]"#;
        let entries: Vec<TractabilityEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries[0].value);
        assert!(!entries[1].value);
        // Missing value defaults to false
        assert!(!entries[2].value);
    }

    #[test]
    fn test_queries_reference_their_variables() {
        assert!(SEARCH_QUERY.contains("$symbol"));
        assert!(TRACTABILITY_QUERY.contains("$ensemblId"));
        assert!(TRACTABILITY_QUERY.contains("tractability"));
    }
}
