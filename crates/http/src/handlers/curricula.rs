use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use curricula_core::{Curriculum, CurriculumVersion, NewCurriculum, NewVersion};

use crate::AppState;
use crate::api_error::ApiError;

pub async fn create_curriculum(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewCurriculum>, JsonRejection>,
) -> Result<(StatusCode, Json<Curriculum>), ApiError> {
    let Json(input) = payload?;
    let curriculum = state.curriculum_service.save_curriculum(input).await?;
    Ok((StatusCode::CREATED, Json(curriculum)))
}

pub async fn list_curricula(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Curriculum>>, ApiError> {
    Ok(Json(state.curriculum_service.list_curricula().await?))
}

pub async fn get_curriculum(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Curriculum>, ApiError> {
    let Path(id) = id?;
    state
        .curriculum_service
        .get_curriculum(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("curriculum '{id}' not found")))
}

pub async fn add_version(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<NewVersion>, JsonRejection>,
) -> Result<(StatusCode, Json<CurriculumVersion>), ApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let version = state.curriculum_service.add_version(id, input).await?;
    Ok((StatusCode::CREATED, Json(version)))
}
