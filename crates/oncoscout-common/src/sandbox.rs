use crate::error::OncoscoutError;
use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Request timeout for all external lookups.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// An allowlist-capped HTTP client that only permits requests to the public
/// chemical-biology services the annotation stage depends on.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a new SandboxClient with the default allowlist of annotation endpoints.
    pub fn new() -> Result<Self, OncoscoutError> {
        let mut allowlist = HashSet::new();
        // Default Oncoscout allowlist
        let domains = vec![
            "www.ebi.ac.uk",                  // ChEMBL
            "api.platform.opentargets.org",   // OpenTargets Platform
            "localhost",                      // Test servers
            "127.0.0.1",                      // Localhost alt
        ];

        for d in domains {
            allowlist.insert(d.to_string());
        }

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                OncoscoutError::Config(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, allowlist })
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_string());
    }

    /// Validates if a URL is permitted under the current sandbox policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        if let Ok(parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                // Check exact match or if it's a subdomain of an allowed domain
                for allowed in &self.allowlist {
                    if host == allowed || host.ends_with(&format!(".{}", allowed)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Exposes the inner `reqwest::Client` builder pattern safely for GET requests.
    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, OncoscoutError> {
        if !self.is_allowed(url) {
            return Err(OncoscoutError::Security(format!(
                "Network capabilities capped: domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.get(url))
    }

    /// Exposes the inner `reqwest::Client` builder pattern safely for POST requests.
    pub fn post(&self, url: &str) -> Result<reqwest::RequestBuilder, OncoscoutError> {
        if !self.is_allowed(url) {
            return Err(OncoscoutError::Security(format!(
                "Network capabilities capped: domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.post(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowlist_permits_annotation_endpoints() {
        let client = SandboxClient::new().unwrap();
        assert!(client.is_allowed("https://www.ebi.ac.uk/chembl/api/data/target/search.json"));
        assert!(client.is_allowed("https://api.platform.opentargets.org/api/v4/graphql"));
    }

    #[test]
    fn test_allowlist_rejects_unknown_host() {
        let client = SandboxClient::new().unwrap();
        assert!(!client.is_allowed("https://example.com/payload"));
        assert!(client.get("https://example.com/payload").is_err());
    }

    #[test]
    fn test_allow_domain_extends_allowlist() {
        let mut client = SandboxClient::new().unwrap();
        assert!(!client.is_allowed("https://api.example.org/v1"));
        client.allow_domain("api.example.org");
        assert!(client.is_allowed("https://api.example.org/v1"));
    }
}
