//! Contact messages from interested users to project creators.
//!
//! Messages are immutable once written; there is no read/unread state and
//! no threading.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Message record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMessage {
    pub id: Uuid,
    pub project_id: Uuid,
    pub sender_id: Uuid,
    /// The project's creator at send time.
    pub recipient_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ProjectMessage {
    /// Persist a new message.
    pub async fn create(
        pool: &PgPool,
        project_id: Uuid,
        sender_id: Uuid,
        recipient_id: Uuid,
        content: &str,
    ) -> Result<Self> {
        let id = Uuid::now_v7();

        let message = sqlx::query_as::<_, ProjectMessage>(
            r#"
            INSERT INTO project_message (id, project_id, sender_id, recipient_id, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(project_id)
        .bind(sender_id)
        .bind(recipient_id)
        .bind(content)
        .fetch_one(pool)
        .await
        .context("failed to create message")?;

        Ok(message)
    }
}
