use crate::remote::FetchError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

const NOT_FOUND_MESSAGE: &str = "PDB file not found for this ligand";
const INVALID_ID_MESSAGE: &str = "Invalid ligand identifier";
const FAILURE_MESSAGE: &str = "Error trying to get pdb file";

/// Handler failure rendered as a JSON error body.
#[derive(Debug)]
pub struct ApiError(pub FetchError);

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            FetchError::NotFound { .. } => StatusCode::NOT_FOUND,
            FetchError::InvalidComponentId(_) => StatusCode::BAD_REQUEST,
            FetchError::Network(_) | FetchError::MalformedData(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self.0 {
            FetchError::NotFound { component_id } => {
                log::warn!("No structure found for ligand {component_id}");
                json!({ "error": NOT_FOUND_MESSAGE })
            }
            FetchError::InvalidComponentId(_) => {
                json!({ "error": INVALID_ID_MESSAGE, "details": self.0.to_string() })
            }
            other => {
                log::error!("{FAILURE_MESSAGE}: {other}");
                json!({ "error": FAILURE_MESSAGE, "details": other.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}
