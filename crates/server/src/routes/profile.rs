//! Profile routes for the authenticated user.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_sessions::Session;

use crate::error::{AppError, AppResult};
use crate::models::{UpdateProfile, User};
use crate::session::resolve_caller;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileUpdatedResponse {
    pub message: String,
    pub user: User,
}

/// Fetch the caller's own profile.
///
/// GET /user/profile
async fn get_profile(State(state): State<AppState>, session: Session) -> AppResult<Json<User>> {
    let caller = resolve_caller(&session).await.ok_or(AppError::Unauthorized)?;

    let user = User::find_by_id(state.db(), caller)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(user))
}

/// Update the caller's profile; absent fields keep their prior values.
///
/// PUT /user/profile
async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<ProfileUpdatedResponse>> {
    let caller = resolve_caller(&session).await.ok_or(AppError::Unauthorized)?;

    let user = User::update_profile(state.db(), caller, input)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ProfileUpdatedResponse {
        message: "Profile updated successfully".to_string(),
        user,
    }))
}

/// Create the profile router.
pub fn router() -> Router<AppState> {
    Router::new().route("/user/profile", get(get_profile).put(update_profile))
}
