//! Benchmark wizard endpoints.
//!
//! - POST /api/v1/projects/{project_id}/benchmark-wizard/{provider}/step
//! - GET  /api/v1/benchmark-wizard/providers

use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

use benchwiz_types::wizard::{WizardStepRequest, WizardStepResponse};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/projects/{project_id}/benchmark-wizard/{provider}/step
///
/// Stateless: the body carries the step just completed and every answer
/// given so far. An empty body object starts the wizard.
pub async fn get_wizard_step(
    State(state): State<AppState>,
    Path((project_id, provider)): Path<(String, String)>,
    body: Result<Json<WizardStepRequest>, JsonRejection>,
) -> Result<Json<WizardStepResponse>, AppError> {
    let Json(request) = body.map_err(|e| AppError::Validation(e.body_text()))?;

    let response = state
        .wizard_service
        .get_wizard_step(&provider, request, &project_id)
        .await?;

    Ok(Json(response))
}

/// GET /api/v1/benchmark-wizard/providers - Providers with a configured wizard.
pub async fn list_providers(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<String>>> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let providers: Vec<String> = state
        .wizard_service
        .providers()
        .into_iter()
        .map(str::to_string)
        .collect();

    let elapsed = start.elapsed().as_millis() as u64;
    Json(ApiResponse::success(providers, request_id, elapsed))
}
