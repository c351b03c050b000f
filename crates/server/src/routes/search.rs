//! Search suggestion routes.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::search::Suggestions;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SuggestionsQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Suggestions,
}

/// Three-facet search suggestions.
///
/// GET /search/suggestions?q=
async fn suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestionsQuery>,
) -> AppResult<Json<SuggestionsResponse>> {
    let fragment = query.q.unwrap_or_default();
    let suggestions = state.suggestions().suggest(&fragment).await?;

    Ok(Json(SuggestionsResponse { suggestions }))
}

/// Create the search router.
pub fn router() -> Router<AppState> {
    Router::new().route("/search/suggestions", get(suggestions))
}
