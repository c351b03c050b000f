//! Category routes.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub categories: Vec<String>,
}

/// List the derived category set.
///
/// GET /categories
async fn list_categories(State(state): State<AppState>) -> AppResult<Json<CategoryListResponse>> {
    let categories = state.listings().categories().await?;

    Ok(Json(CategoryListResponse { categories }))
}

/// Create the category router.
pub fn router() -> Router<AppState> {
    Router::new().route("/categories", get(list_categories))
}
