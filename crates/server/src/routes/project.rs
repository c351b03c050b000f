//! Project listing routes.
//!
//! Browsing is anonymous; create/update/delete require an authenticated
//! caller, and mutation is restricted to the listing's owner.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::AppResult;
use crate::listing::{ProjectDetail, ProjectFilter, ProjectWithCreator};
use crate::models::{CreateProject, Project};
use crate::session::resolve_caller;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectWithCreator>,
}

#[derive(Debug, Serialize)]
pub struct ProjectMutationResponse {
    pub message: String,
    pub project: Project,
}

#[derive(Debug, Serialize)]
pub struct ProjectDeletedResponse {
    pub message: String,
}

/// List projects with optional filters.
///
/// GET /projects?category=&difficulty=&title=&search=
async fn list_projects(
    State(state): State<AppState>,
    Query(filter): Query<ProjectFilter>,
) -> AppResult<Json<ProjectListResponse>> {
    let projects = state.listings().list(&filter).await?;

    Ok(Json(ProjectListResponse { projects }))
}

/// Create a listing owned by the caller.
///
/// POST /projects
async fn create_project(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<ProjectMutationResponse>)> {
    let caller = resolve_caller(&session).await;
    let project = state.listings().create(caller, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ProjectMutationResponse {
            message: "Project created successfully".to_string(),
            project,
        }),
    ))
}

/// Fetch a single listing with the creator's public profile.
///
/// GET /projects/{id}
async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProjectDetail>> {
    let detail = state.listings().get(id).await?;

    Ok(Json(detail))
}

/// Replace a listing's fields. Owner only.
///
/// PUT /projects/{id}
async fn update_project(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(input): Json<CreateProject>,
) -> AppResult<Json<ProjectMutationResponse>> {
    let caller = resolve_caller(&session).await;
    let project = state.listings().update(caller, id, input).await?;

    Ok(Json(ProjectMutationResponse {
        message: "Project updated successfully".to_string(),
        project,
    }))
}

/// Delete a listing. Owner only.
///
/// DELETE /projects/{id}
async fn delete_project(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProjectDeletedResponse>> {
    let caller = resolve_caller(&session).await;
    state.listings().delete(caller, id).await?;

    Ok(Json(ProjectDeletedResponse {
        message: "Project deleted successfully".to_string(),
    }))
}

/// Create the project router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
}
