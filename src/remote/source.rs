use super::error::FetchError;
use serde::{Deserialize, Serialize};
use std::future::Future;

const COMPONENT_ID_ATTRIBUTE: &str = "rcsb_chem_comp_container_identifiers.comp_id";

/// Remote catalogue of deposited structures.
///
/// [`RcsbClient`](super::RcsbClient) talks to the public RCSB services; tests substitute an
/// in-memory implementation.
pub trait StructureSource: Send + Sync {
    /// Returns the identifiers of every entry containing `component_id`, in the order the
    /// service ranks them. Zero matches is an empty vector, not an error.
    fn search_entries(
        &self,
        component_id: &str,
    ) -> impl Future<Output = Result<Vec<String>, FetchError>> + Send;

    /// Downloads the mmCIF coordinates of `component_id` as deposited in `entry_id`.
    fn fetch_ligand(
        &self,
        entry_id: &str,
        component_id: &str,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Text-search request body understood by the RCSB search API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery<'a> {
    query: TerminalQuery<'a>,
    return_type: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct TerminalQuery<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    service: &'static str,
    parameters: QueryParameters<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct QueryParameters<'a> {
    attribute: &'static str,
    operator: &'static str,
    value: &'a str,
}

impl<'a> SearchQuery<'a> {
    /// Builds an exact-match query for entries containing `component_id`.
    pub fn component(component_id: &'a str) -> Self {
        Self {
            query: TerminalQuery {
                kind: "terminal",
                service: "text",
                parameters: QueryParameters {
                    attribute: COMPONENT_ID_ATTRIBUTE,
                    operator: "exact_match",
                    value: component_id,
                },
            },
            return_type: "entry",
        }
    }

    pub fn to_json(&self) -> Result<String, FetchError> {
        serde_json::to_string(self).map_err(FetchError::network)
    }
}

/// Search API response; only the ranked identifiers are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub result_set: Vec<SearchHit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchHit {
    pub identifier: String,
}

impl SearchResponse {
    pub fn into_identifiers(self) -> Vec<String> {
        self.result_set
            .into_iter()
            .map(|hit| hit.identifier)
            .collect()
    }
}
