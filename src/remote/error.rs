use thiserror::Error;

/// Failures surfaced while resolving and retrieving a ligand structure.
///
/// The variants keep the three upstream failure classes apart: nothing matched the
/// component, a remote call failed, or the returned markup could not be converted.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid component id '{0}': expected 1 to 5 ASCII letters or digits")]
    InvalidComponentId(String),

    #[error("no structure entry found for component '{component_id}'")]
    NotFound { component_id: String },

    #[error("upstream request failed: {0}")]
    Network(String),

    #[error("malformed structure data: {0}")]
    MalformedData(#[from] crate::io::Error),
}

impl FetchError {
    pub fn not_found(component_id: impl Into<String>) -> Self {
        Self::NotFound {
            component_id: component_id.into(),
        }
    }

    pub fn network(details: impl std::fmt::Display) -> Self {
        Self::Network(details.to_string())
    }
}

/// Collapses a transport error to its failure class; the request URL only reaches the
/// debug log.
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        log::debug!("upstream request error: {err}");

        let class = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "could not connect to the structure service".to_string()
        } else if let Some(status) = err.status() {
            format!("structure service answered with status {}", status.as_u16())
        } else if err.is_decode() {
            "structure service response could not be decoded".to_string()
        } else if err.is_builder() {
            "request could not be built".to_string()
        } else {
            "request to the structure service failed".to_string()
        };
        Self::Network(class)
    }
}
