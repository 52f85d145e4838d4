//! Remote retrieval of ligand structures.
//!
//! A component id is resolved to the first deposited entry containing it, the entry's
//! ligand-only mmCIF slice is downloaded, and the markup is converted to PDB text. The
//! [`StructureSource`] trait separates the orchestration from the transport so the HTTP
//! layer and tests can swap in their own catalogue.

mod cache;
mod client;
mod error;
mod fetch;
mod source;

pub use cache::StructureCache;
pub use client::{
    DEFAULT_MODELS_URL, DEFAULT_SEARCH_URL, DEFAULT_TIMEOUT, RcsbClient, RcsbConfig,
};
pub use error::FetchError;
pub use fetch::{fetch_structure, fetch_structure_cached, resolve_entry, validate_component_id};
pub use source::{SearchHit, SearchQuery, SearchResponse, StructureSource};

#[cfg(test)]
pub(crate) use fetch::tests::MockSource;
