//! Contact message routes.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::listing::MessageReceipt;
use crate::session::resolve_caller;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub project_id: Option<Uuid>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageSentResponse {
    pub message: String,
    pub data: MessageReceipt,
}

/// Send a contact message to a project's creator.
///
/// POST /messages
async fn send_message(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<SendMessageRequest>,
) -> AppResult<Json<MessageSentResponse>> {
    let content = request.message.filter(|m| !m.trim().is_empty());
    let (Some(project_id), Some(content)) = (request.project_id, content) else {
        return Err(AppError::Validation(
            "Project ID and message are required".to_string(),
        ));
    };

    let caller = resolve_caller(&session).await;
    let data = state
        .listings()
        .send_message(caller, project_id, &content)
        .await?;

    Ok(Json(MessageSentResponse {
        message: "Message sent successfully. The team leader will contact you soon.".to_string(),
        data,
    }))
}

/// Create the message router.
pub fn router() -> Router<AppState> {
    Router::new().route("/messages", post(send_message))
}
