//! Project listing model and CRUD operations.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Default weekly commitment label applied when the creator leaves it out.
pub const DEFAULT_COMMITMENT: &str = "10-20";

/// Default communication channel applied when the creator leaves it out.
pub const DEFAULT_COMMUNICATION: &str = "discord";

/// Project listing record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,

    pub title: String,

    pub description: String,

    /// Free-text description of what the creator expects from collaborators.
    pub requirements: String,

    /// Technology tokens, insertion order preserved for display.
    pub tech_stack: Vec<String>,

    pub team_size: i32,

    /// Free-text duration label ("2 months", "6+ months", ...).
    pub timeframe: String,

    /// beginner | intermediate | advanced.
    pub difficulty: String,

    /// Open-ended category; the valid set is derived from stored values.
    pub category: String,

    /// Weekly hours-range label.
    pub commitment: String,

    /// discord | slack | teams | zoom | email | other.
    pub communication: String,

    pub github_required: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// Owning user; exclusive write access.
    pub creator_id: Uuid,
}

/// Raw client payload for creating or replacing a listing.
///
/// Every field is optional at the wire level so validation can name the
/// missing one; see `listing::validate_listing`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    pub team_size: Option<i32>,
    pub timeframe: Option<String>,
    pub difficulty: Option<String>,
    pub category: Option<String>,
    pub commitment: Option<String>,
    pub communication: Option<String>,
    pub github_required: Option<bool>,
}

/// A validated listing payload with defaults applied.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub tech_stack: Vec<String>,
    pub team_size: i32,
    pub timeframe: String,
    pub difficulty: String,
    pub category: String,
    pub commitment: String,
    pub communication: String,
    pub github_required: bool,
}

impl Project {
    /// Find a project by ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>> {
        let project = sqlx::query_as::<_, Project>("SELECT * FROM project WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .context("failed to fetch project by id")?;

        Ok(project)
    }

    /// Insert a new project owned by `creator_id`.
    pub async fn insert(pool: &PgPool, creator_id: Uuid, input: NewProject) -> Result<Self> {
        let id = Uuid::now_v7();

        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO project (
                id, title, description, requirements, tech_stack, team_size,
                timeframe, difficulty, category, commitment, communication,
                github_required, creator_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.requirements)
        .bind(&input.tech_stack)
        .bind(input.team_size)
        .bind(&input.timeframe)
        .bind(&input.difficulty)
        .bind(&input.category)
        .bind(&input.commitment)
        .bind(&input.communication)
        .bind(input.github_required)
        .bind(creator_id)
        .fetch_one(pool)
        .await
        .context("failed to create project")?;

        Ok(project)
    }

    /// Replace the mutable fields of a project wholesale.
    pub async fn replace(pool: &PgPool, id: Uuid, input: NewProject) -> Result<Option<Self>> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE project
            SET title = $1, description = $2, requirements = $3, tech_stack = $4,
                team_size = $5, timeframe = $6, difficulty = $7, category = $8,
                commitment = $9, communication = $10, github_required = $11,
                updated_at = NOW()
            WHERE id = $12
            RETURNING *
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.requirements)
        .bind(&input.tech_stack)
        .bind(input.team_size)
        .bind(&input.timeframe)
        .bind(&input.difficulty)
        .bind(&input.category)
        .bind(&input.commitment)
        .bind(&input.communication)
        .bind(input.github_required)
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to update project")?;

        Ok(project)
    }

    /// Delete a project permanently (interest and message rows cascade).
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM project WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to delete project")?;

        Ok(result.rows_affected() > 0)
    }

    /// Distinct category values currently in use.
    pub async fn distinct_categories(pool: &PgPool) -> Result<Vec<String>> {
        let categories: Vec<String> = sqlx::query_scalar("SELECT DISTINCT category FROM project")
            .fetch_all(pool)
            .await
            .context("failed to list distinct categories")?;

        Ok(categories)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn sample() -> Project {
        Project {
            id: Uuid::nil(),
            title: "Chess AI".to_string(),
            description: "build a chess engine".to_string(),
            requirements: "some Python experience".to_string(),
            tech_stack: vec!["Python".to_string(), "TensorFlow".to_string()],
            team_size: 3,
            timeframe: "2 months".to_string(),
            difficulty: "advanced".to_string(),
            category: "ai".to_string(),
            commitment: DEFAULT_COMMITMENT.to_string(),
            communication: DEFAULT_COMMUNICATION.to_string(),
            github_required: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            creator_id: Uuid::nil(),
        }
    }

    #[test]
    fn project_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["techStack"][0], "Python");
        assert_eq!(json["teamSize"], 3);
        assert_eq!(json["githubRequired"], false);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("tech_stack").is_none());
    }

    #[test]
    fn create_project_accepts_partial_payload() {
        let input: CreateProject =
            serde_json::from_str(r#"{"title": "Chess AI", "teamSize": 3}"#).unwrap();
        assert_eq!(input.title.as_deref(), Some("Chess AI"));
        assert_eq!(input.team_size, Some(3));
        assert!(input.description.is_none());
        assert!(input.github_required.is_none());
    }

    #[test]
    fn tech_stack_order_preserved() {
        let project = sample();
        assert_eq!(project.tech_stack, ["Python", "TensorFlow"]);
    }
}
