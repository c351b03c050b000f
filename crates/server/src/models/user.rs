//! User model and profile operations.
//!
//! Accounts are provisioned by the external auth collaborator; this service
//! only reads users and lets them edit their own profile fields.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

/// An external link on a user profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileLink {
    pub platform: String,
    pub url: String,
}

/// User record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,

    pub name: String,

    /// Unique email address.
    #[serde(rename = "email")]
    pub mail: String,

    pub github_username: Option<String>,

    pub bio: Option<String>,

    /// Avatar reference.
    pub image: Option<String>,

    /// Ordered list of external links.
    pub links: Json<Vec<ProfileLink>>,

    #[serde(skip_serializing)]
    pub created: DateTime<Utc>,
}

/// Input for updating a profile. Absent fields keep their prior values.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub github_username: Option<String>,
    pub links: Option<Vec<ProfileLink>>,
}

impl User {
    /// Find a user by ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .context("failed to fetch user by id")?;

        Ok(user)
    }

    /// Update a user's profile fields.
    pub async fn update_profile(
        pool: &PgPool,
        id: Uuid,
        input: UpdateProfile,
    ) -> Result<Option<Self>> {
        let Some(current) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let name = input.name.unwrap_or(current.name);
        let bio = input.bio.or(current.bio);
        let github_username = input.github_username.or(current.github_username);
        let links = input.links.map(Json).unwrap_or(current.links);

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $1, bio = $2, github_username = $3, links = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&name)
        .bind(&bio)
        .bind(&github_username)
        .bind(&links)
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to update profile")?;

        Ok(user)
    }
}
