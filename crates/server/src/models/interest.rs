//! Project interest join records.
//!
//! A user may express interest in a given project at most once; the store's
//! primary key on (user_id, project_id) is the arbiter under concurrency.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Interest record: "user wants to join project".
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInterest {
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl ProjectInterest {
    /// Insert an interest record.
    ///
    /// Returns `false` when the (user, project) pair already exists; the
    /// uniqueness constraint resolves concurrent duplicates.
    pub async fn insert(pool: &PgPool, user_id: Uuid, project_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO project_interest (user_id, project_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, project_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(project_id)
        .execute(pool)
        .await
        .context("failed to insert interest")?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether an interest record exists for the pair.
    pub async fn exists(pool: &PgPool, user_id: Uuid, project_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM project_interest WHERE user_id = $1 AND project_id = $2)",
        )
        .bind(user_id)
        .bind(project_id)
        .fetch_one(pool)
        .await
        .context("failed to check interest existence")?;

        Ok(exists)
    }
}
