//! Generation API Handler
//!
//! The single write endpoint of the backend: accepts a task description and
//! a task-type tag, runs the matching prompt pipeline and returns the text.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::services::{Orchestrator, TaskType};
use crate::utils::{ApiError, ApiJson};

/// Application state containing the orchestrator
pub type OrchestratorState = Arc<Orchestrator>;

#[derive(Debug, Deserialize)]
pub struct GenerateApiRequest {
    #[serde(default)]
    pub prompt: String,
    /// Task-type tag; defaults to "generate", unrecognized values behave
    /// the same way
    #[serde(default = "default_task_type", rename = "type")]
    pub task_type: String,
}

fn default_task_type() -> String {
    "generate".to_string()
}

#[derive(Debug, Serialize)]
pub struct GenerateApiResponse {
    pub text: String,
}

/// Run a generation task
/// POST /api/generate
pub async fn generate(
    State(orchestrator): State<OrchestratorState>,
    ApiJson(req): ApiJson<GenerateApiRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Validation order matches the legacy handler: credential before prompt
    if !orchestrator.is_configured() {
        return Err(ApiError::ApiKeyMissing);
    }

    if req.prompt.is_empty() {
        return Err(ApiError::PromptRequired);
    }

    let task_type = TaskType::from_tag(&req.task_type);
    tracing::info!("Generation request: type={}", task_type.as_str());

    let text = orchestrator.run(task_type, &req.prompt).await?;
    Ok(Json(GenerateApiResponse { text }))
}

/// Method fallback for the generate route: anything but POST is rejected
/// with a plain-text 405 before the body is even parsed.
pub async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}
