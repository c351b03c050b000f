//! Project interest routes.

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::session::resolve_caller;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressInterestRequest {
    pub project_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInterestQuery {
    pub project_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestStatusResponse {
    pub has_interest: bool,
}

#[derive(Debug, Serialize)]
pub struct InterestCreatedResponse {
    pub message: String,
}

/// Check whether the caller already expressed interest.
///
/// GET /projects/interest/check?projectId=
///
/// Anonymous callers get `hasInterest: false`, not an error.
async fn check_interest(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CheckInterestQuery>,
) -> AppResult<Json<InterestStatusResponse>> {
    let project_id = query
        .project_id
        .ok_or_else(|| AppError::Validation("Project ID is required".to_string()))?;

    let caller = resolve_caller(&session).await;
    let has_interest = state.listings().has_interest(caller, project_id).await?;

    Ok(Json(InterestStatusResponse { has_interest }))
}

/// Record the caller's interest in a project.
///
/// POST /projects/interest
async fn express_interest(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<ExpressInterestRequest>,
) -> AppResult<Json<InterestCreatedResponse>> {
    let project_id = request
        .project_id
        .ok_or_else(|| AppError::Validation("Project ID is required".to_string()))?;

    let caller = resolve_caller(&session).await;
    state.listings().express_interest(caller, project_id).await?;

    Ok(Json(InterestCreatedResponse {
        message: "Interest expressed successfully".to_string(),
    }))
}

/// Create the interest router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects/interest/check", get(check_interest))
        .route("/projects/interest", post(express_interest))
}
