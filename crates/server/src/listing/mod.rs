//! Listing query service.
//!
//! Executes filtered listing retrieval, ownership-gated mutation, the
//! derived category set, and the interest/message side-tables. Every
//! operation is a single request-scoped unit of work against the pool;
//! there is no caching and no cross-call state.

pub mod filter;

use serde::Serialize;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    CreateProject, DEFAULT_COMMITMENT, DEFAULT_COMMUNICATION, NewProject, Project,
    ProjectInterest, ProjectMessage, User,
};
pub use filter::ProjectFilter;

/// Public-safe creator subset joined into listing rows.
///
/// Never carries the email address or other PII.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorSummary {
    pub id: Uuid,
    pub name: String,
    pub image: Option<String>,
}

/// Full public profile of a creator, shown on the single-listing page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub github_username: Option<String>,
}

/// A listing with its creator's public-safe subset.
#[derive(Debug, Serialize)]
pub struct ProjectWithCreator {
    #[serde(flatten)]
    pub project: Project,
    pub creator: CreatorSummary,
}

/// A single listing with the creator's full public profile.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub creator: CreatorProfile,
}

/// Confirmation returned after a contact message is persisted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageReceipt {
    pub message_id: Uuid,
    pub project_title: String,
    pub recipient_name: String,
}

/// Internal row type for the joined listing query.
#[derive(sqlx::FromRow)]
struct ProjectListRow {
    #[sqlx(flatten)]
    project: Project,
    creator_name: String,
    creator_image: Option<String>,
}

impl From<ProjectListRow> for ProjectWithCreator {
    fn from(row: ProjectListRow) -> Self {
        let creator = CreatorSummary {
            id: row.project.creator_id,
            name: row.creator_name,
            image: row.creator_image,
        };
        Self {
            project: row.project,
            creator,
        }
    }
}

/// Listing query service.
#[derive(Clone)]
pub struct ListingService {
    pool: PgPool,
    seed_categories: Vec<String>,
}

impl ListingService {
    /// Create a new listing service.
    pub fn new(pool: PgPool, seed_categories: Vec<String>) -> Self {
        Self {
            pool,
            seed_categories,
        }
    }

    /// List projects matching the filter, newest first, with each creator's
    /// public-safe subset joined in.
    pub async fn list(&self, filter: &ProjectFilter) -> AppResult<Vec<ProjectWithCreator>> {
        let sql = filter.build_list_query();
        debug!(sql = %sql, "listing projects");

        let rows = sqlx::query_as::<_, ProjectListRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Fetch one project with the creator's full public profile.
    pub async fn get(&self, id: Uuid) -> AppResult<ProjectDetail> {
        let project = Project::find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound)?;

        let creator = User::find_by_id(&self.pool, project.creator_id)
            .await?
            .ok_or(AppError::NotFound)?;

        Ok(ProjectDetail {
            project,
            creator: CreatorProfile {
                id: creator.id,
                name: creator.name,
                email: creator.mail,
                image: creator.image,
                github_username: creator.github_username,
            },
        })
    }

    /// Create a listing owned by the caller.
    pub async fn create(&self, caller: Option<Uuid>, input: CreateProject) -> AppResult<Project> {
        let caller = caller.ok_or(AppError::Unauthorized)?;
        let input = validate_listing(input)?;

        Ok(Project::insert(&self.pool, caller, input).await?)
    }

    /// Replace a listing's fields. Owner only.
    pub async fn update(
        &self,
        caller: Option<Uuid>,
        id: Uuid,
        input: CreateProject,
    ) -> AppResult<Project> {
        let caller = caller.ok_or(AppError::Unauthorized)?;

        let existing = Project::find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound)?;

        if existing.creator_id != caller {
            return Err(AppError::Forbidden(
                "You do not have permission to update this project".to_string(),
            ));
        }

        let input = validate_listing(input)?;

        Project::replace(&self.pool, id, input)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Delete a listing permanently. Owner only.
    pub async fn delete(&self, caller: Option<Uuid>, id: Uuid) -> AppResult<()> {
        let caller = caller.ok_or(AppError::Unauthorized)?;

        let existing = Project::find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound)?;

        if existing.creator_id != caller {
            return Err(AppError::Forbidden(
                "You do not have permission to delete this project".to_string(),
            ));
        }

        if !Project::delete(&self.pool, id).await? {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    /// The derived category set: the configured seed list unioned with
    /// every category currently in use, deduplicated, seed order first.
    pub async fn categories(&self) -> AppResult<Vec<String>> {
        let stored = Project::distinct_categories(&self.pool).await?;

        Ok(merge_categories(&self.seed_categories, stored))
    }

    /// Record that the caller wants to join a project.
    ///
    /// The store's uniqueness constraint arbitrates concurrent duplicates;
    /// a lost race surfaces as the same Conflict as an ordinary repeat.
    pub async fn express_interest(&self, caller: Option<Uuid>, project_id: Uuid) -> AppResult<()> {
        let caller = caller.ok_or(AppError::Unauthorized)?;

        let project = Project::find_by_id(&self.pool, project_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if project.creator_id == caller {
            return Err(AppError::Conflict(
                "You cannot express interest in your own project".to_string(),
            ));
        }

        if !ProjectInterest::insert(&self.pool, caller, project_id).await? {
            return Err(AppError::Conflict(
                "You have already expressed interest in this project".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether the caller already expressed interest. Anonymous callers get
    /// `false`, not an error.
    pub async fn has_interest(&self, caller: Option<Uuid>, project_id: Uuid) -> AppResult<bool> {
        let Some(caller) = caller else {
            return Ok(false);
        };

        Ok(ProjectInterest::exists(&self.pool, caller, project_id).await?)
    }

    /// Persist a contact message to a project's creator.
    pub async fn send_message(
        &self,
        caller: Option<Uuid>,
        project_id: Uuid,
        content: &str,
    ) -> AppResult<MessageReceipt> {
        let caller = caller.ok_or(AppError::Unauthorized)?;

        let project = Project::find_by_id(&self.pool, project_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if project.creator_id == caller {
            return Err(AppError::Conflict(
                "You cannot message your own project".to_string(),
            ));
        }

        let sender = User::find_by_id(&self.pool, caller)
            .await?
            .ok_or(AppError::NotFound)?;

        let recipient = User::find_by_id(&self.pool, project.creator_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let message =
            ProjectMessage::create(&self.pool, project_id, sender.id, recipient.id, content)
                .await?;

        Ok(MessageReceipt {
            message_id: message.id,
            project_title: project.title,
            recipient_name: recipient.name,
        })
    }
}

/// Validate a listing payload and apply defaults for the optional fields.
///
/// The error names the first missing field using its wire-level name.
pub fn validate_listing(input: CreateProject) -> AppResult<NewProject> {
    let title = require_text(input.title, "title")?;
    let description = require_text(input.description, "description")?;
    let requirements = require_text(input.requirements, "requirements")?;

    let tech_stack = match input.tech_stack {
        Some(stack) if !stack.is_empty() => stack,
        _ => return Err(missing("techStack")),
    };

    let team_size = match input.team_size {
        Some(size) if size > 0 => size,
        _ => return Err(missing("teamSize")),
    };

    let timeframe = require_text(input.timeframe, "timeframe")?;
    let difficulty = require_text(input.difficulty, "difficulty")?;
    let category = require_text(input.category, "category")?;

    let commitment = input
        .commitment
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_COMMITMENT.to_string());
    let communication = input
        .communication
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_COMMUNICATION.to_string());
    let github_required = input.github_required.unwrap_or(false);

    Ok(NewProject {
        title,
        description,
        requirements,
        tech_stack,
        team_size,
        timeframe,
        difficulty,
        category,
        commitment,
        communication,
        github_required,
    })
}

fn require_text(value: Option<String>, field: &str) -> AppResult<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(missing(field)),
    }
}

fn missing(field: &str) -> AppError {
    AppError::Validation(format!("Missing required field: {field}"))
}

/// Union the seed list with the stored categories, seed order first,
/// deduplicated.
pub fn merge_categories(seed: &[String], stored: Vec<String>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(seed.len() + stored.len());

    for category in seed.iter().cloned().chain(stored) {
        if !merged.contains(&category) {
            merged.push(category);
        }
    }

    merged
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn full_payload() -> CreateProject {
        CreateProject {
            title: Some("Chess AI".to_string()),
            description: Some("build a chess engine".to_string()),
            requirements: Some("some Python experience".to_string()),
            tech_stack: Some(vec!["Python".to_string(), "TensorFlow".to_string()]),
            team_size: Some(3),
            timeframe: Some("2 months".to_string()),
            difficulty: Some("advanced".to_string()),
            category: Some("ai".to_string()),
            commitment: None,
            communication: None,
            github_required: None,
        }
    }

    #[test]
    fn validate_applies_defaults() {
        let new = validate_listing(full_payload()).unwrap();

        assert_eq!(new.commitment, DEFAULT_COMMITMENT);
        assert_eq!(new.communication, DEFAULT_COMMUNICATION);
        assert!(!new.github_required);
        assert_eq!(new.tech_stack, ["Python", "TensorFlow"]);
    }

    #[test]
    fn validate_names_each_missing_field() {
        let cases: [(&str, fn(&mut CreateProject)); 8] = [
            ("title", |p| p.title = None),
            ("description", |p| p.description = Some("  ".to_string())),
            ("requirements", |p| p.requirements = None),
            ("techStack", |p| p.tech_stack = Some(vec![])),
            ("teamSize", |p| p.team_size = Some(0)),
            ("timeframe", |p| p.timeframe = None),
            ("difficulty", |p| p.difficulty = Some(String::new())),
            ("category", |p| p.category = None),
        ];

        for (field, break_payload) in cases {
            let mut payload = full_payload();
            break_payload(&mut payload);

            let err = validate_listing(payload).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Missing required field: {field}"),
                "field: {field}"
            );
        }
    }

    #[test]
    fn validate_keeps_explicit_optionals() {
        let mut payload = full_payload();
        payload.commitment = Some("20-30".to_string());
        payload.communication = Some("slack".to_string());
        payload.github_required = Some(true);

        let new = validate_listing(payload).unwrap();
        assert_eq!(new.commitment, "20-30");
        assert_eq!(new.communication, "slack");
        assert!(new.github_required);
    }

    #[test]
    fn merge_categories_seed_first_deduplicated() {
        let seed = vec!["web".to_string(), "ai".to_string()];
        let stored = vec!["robotics".to_string(), "ai".to_string()];

        let merged = merge_categories(&seed, stored);
        assert_eq!(merged, ["web", "ai", "robotics"]);
    }

    #[test]
    fn merge_categories_empty_store_yields_seed() {
        let seed = vec!["web".to_string(), "mobile".to_string()];
        let merged = merge_categories(&seed, vec![]);
        assert_eq!(merged, ["web", "mobile"]);
    }

    #[test]
    fn project_with_creator_flattens_on_the_wire() {
        let row = ProjectListRow {
            project: Project {
                id: Uuid::nil(),
                title: "Chess AI".to_string(),
                description: "build a chess engine".to_string(),
                requirements: "x".to_string(),
                tech_stack: vec!["Python".to_string()],
                team_size: 3,
                timeframe: "2 months".to_string(),
                difficulty: "advanced".to_string(),
                category: "ai".to_string(),
                commitment: "10-20".to_string(),
                communication: "discord".to_string(),
                github_required: false,
                created_at: chrono::Utc::now(),
                updated_at: chrono::Utc::now(),
                creator_id: Uuid::nil(),
            },
            creator_name: "Ada".to_string(),
            creator_image: None,
        };

        let json = serde_json::to_value(ProjectWithCreator::from(row)).unwrap();
        assert_eq!(json["title"], "Chess AI");
        assert_eq!(json["creator"]["name"], "Ada");
        assert!(
            json["creator"].get("email").is_none(),
            "list view must not expose creator email"
        );
    }
}
