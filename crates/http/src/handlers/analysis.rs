//! Model-backed endpoints: curriculum parsing and test generation.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};

use curricula_core::{CurriculumParseRequest, TestDraft, TestGenerateRequest};
use curricula_service::ParseOutcome;

use crate::AppState;
use crate::api_error::ApiError;

pub async fn parse_curriculum(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CurriculumParseRequest>, JsonRejection>,
) -> Result<Json<ParseOutcome>, ApiError> {
    let Json(req) = payload?;
    let outcome = state.curriculum_service.parse_curriculum(req).await?;
    Ok(Json(outcome))
}

pub async fn generate_test(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TestGenerateRequest>, JsonRejection>,
) -> Result<Json<TestDraft>, ApiError> {
    let Json(req) = payload?;
    let draft = state.curriculum_service.generate_test(req).await?;
    Ok(Json(draft))
}
