use super::AppState;
use super::error::ApiError;
use crate::remote::{StructureSource, fetch_structure_cached};
use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;

/// `GET /api/v1/pdb/:ligand_id`: the ligand's coordinates as PDB text.
pub async fn get_pdb<S: StructureSource>(
    State(state): State<Arc<AppState<S>>>,
    Path(ligand_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    log::info!("Fetching PDB file for ligand: {ligand_id}");

    let pdb = fetch_structure_cached(
        &state.source,
        &state.cache,
        &ligand_id,
        &state.convert_options,
    )
    .await?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        pdb,
    ))
}

/// `GET /health`: liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
