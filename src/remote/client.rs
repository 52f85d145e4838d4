use super::error::FetchError;
use super::source::{SearchQuery, SearchResponse, StructureSource};
use reqwest::StatusCode;
use std::time::Duration;

pub const DEFAULT_SEARCH_URL: &str = "https://search.rcsb.org/rcsbsearch/v2/query";
pub const DEFAULT_MODELS_URL: &str = "https://models.rcsb.org";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = concat!("swifty-protein/", env!("CARGO_PKG_VERSION"));

/// Endpoints and limits for [`RcsbClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RcsbConfig {
    pub search_url: String,
    pub models_url: String,
    pub timeout: Duration,
}

impl Default for RcsbConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            models_url: DEFAULT_MODELS_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// [`StructureSource`] backed by the RCSB search and model-server APIs.
#[derive(Debug, Clone)]
pub struct RcsbClient {
    http: reqwest::Client,
    config: RcsbConfig,
}

impl RcsbClient {
    /// Builds a client whose every request carries the configured timeout and a
    /// `User-Agent` header.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] if the TLS backend cannot be initialized.
    pub fn new(config: RcsbConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http, config })
    }

    /// Model-server URL of the ligand-only coordinate slice of `entry_id`.
    pub fn ligand_url(&self, entry_id: &str) -> String {
        format!(
            "{}/v1/{}/ligand",
            self.config.models_url.trim_end_matches('/'),
            entry_id
        )
    }
}

impl StructureSource for RcsbClient {
    async fn search_entries(&self, component_id: &str) -> Result<Vec<String>, FetchError> {
        let query = SearchQuery::component(component_id).to_json()?;

        let response = self
            .http
            .get(&self.config.search_url)
            .query(&[("json", query.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(FetchError::network(format!(
                "search returned status {}",
                status.as_u16()
            )));
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.into_identifiers())
    }

    async fn fetch_ligand(&self, entry_id: &str, component_id: &str) -> Result<String, FetchError> {
        let url = self.ligand_url(entry_id);

        let response = self
            .http
            .get(&url)
            .query(&[("label_comp_id", component_id), ("encoding", "cif")])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::not_found(component_id));
        }
        if !status.is_success() {
            return Err(FetchError::network(format!(
                "ligand fetch for entry {entry_id} returned status {}",
                status.as_u16()
            )));
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_public_rcsb() {
        let config = RcsbConfig::default();

        assert_eq!(config.search_url, DEFAULT_SEARCH_URL);
        assert_eq!(config.models_url, DEFAULT_MODELS_URL);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn ligand_url_tolerates_trailing_slash() {
        let client = RcsbClient::new(RcsbConfig {
            models_url: "http://localhost:8080/".to_string(),
            ..RcsbConfig::default()
        })
        .expect("client builds");

        assert_eq!(
            client.ligand_url("3W2S"),
            "http://localhost:8080/v1/3W2S/ligand"
        );
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn search_finds_entries_for_atp() {
        let client = RcsbClient::new(RcsbConfig::default()).expect("client builds");

        let entries = client.search_entries("ATP").await.expect("search succeeds");
        assert!(!entries.is_empty());
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn fetch_ligand_returns_atom_site_markup() {
        let client = RcsbClient::new(RcsbConfig::default()).expect("client builds");

        let text = client
            .fetch_ligand("3W2S", "ATP")
            .await
            .expect("fetch succeeds");
        assert!(text.contains("_atom_site."));
    }
}
