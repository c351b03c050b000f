//! Search suggestion service.
//!
//! Given a free-text fragment, returns bounded candidate lists across three
//! independent facets: listing titles, tech-stack tokens, and categories.
//! Fragments shorter than two characters short-circuit to an empty result
//! without touching the store.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;

use crate::listing::filter::escape_like_wildcards;

/// Minimum trimmed fragment length before any query is issued.
pub const MIN_FRAGMENT_CHARS: usize = 2;

/// Maximum title candidates.
pub const TITLE_LIMIT: i64 = 5;

/// Maximum projects fetched for the tech-stack facet.
pub const STACK_PROJECT_LIMIT: i64 = 5;

/// Maximum tech-stack token candidates after deduplication.
pub const STACK_TOKEN_LIMIT: usize = 5;

/// Maximum category candidates.
pub const CATEGORY_LIMIT: i64 = 3;

/// Three-facet suggestion payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestions {
    /// Titles containing the fragment; duplicates acceptable.
    pub titles: Vec<String>,

    /// Deduplicated tech-stack tokens containing the fragment.
    pub tech_stacks: Vec<String>,

    /// Distinct categories containing the fragment.
    pub categories: Vec<String>,
}

impl Suggestions {
    /// The empty result returned for short fragments.
    pub fn empty() -> Self {
        Self {
            titles: vec![],
            tech_stacks: vec![],
            categories: vec![],
        }
    }

    /// True when every facet is empty.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty() && self.tech_stacks.is_empty() && self.categories.is_empty()
    }
}

/// Suggestion service.
#[derive(Clone)]
pub struct SuggestionService {
    pool: PgPool,
}

impl SuggestionService {
    /// Create a new suggestion service.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Compute suggestions for a fragment.
    pub async fn suggest(&self, fragment: &str) -> Result<Suggestions> {
        let Some(fragment) = normalized_fragment(fragment) else {
            return Ok(Suggestions::empty());
        };

        let pattern = format!("%{}%", escape_like_wildcards(fragment));

        let titles: Vec<String> =
            sqlx::query_scalar("SELECT title FROM project WHERE title ILIKE $1 LIMIT $2")
                .bind(&pattern)
                .bind(TITLE_LIMIT)
                .fetch_all(&self.pool)
                .await
                .context("failed to fetch title suggestions")?;

        // Projects whose stack holds a token matching the fragment; tokens
        // are then sub-matched, flattened, and deduplicated in memory.
        let stacks: Vec<Vec<String>> = sqlx::query_scalar(
            r#"
            SELECT tech_stack FROM project
            WHERE EXISTS (SELECT 1 FROM unnest(tech_stack) AS token WHERE token ILIKE $1)
            LIMIT $2
            "#,
        )
        .bind(&pattern)
        .bind(STACK_PROJECT_LIMIT)
        .fetch_all(&self.pool)
        .await
        .context("failed to fetch tech stack suggestions")?;

        let tech_stacks = matching_tokens(stacks, fragment);

        let categories: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT category FROM project WHERE category ILIKE $1 LIMIT $2",
        )
        .bind(&pattern)
        .bind(CATEGORY_LIMIT)
        .fetch_all(&self.pool)
        .await
        .context("failed to fetch category suggestions")?;

        debug!(
            fragment = %fragment,
            titles = titles.len(),
            tech_stacks = tech_stacks.len(),
            categories = categories.len(),
            "suggestions computed"
        );

        Ok(Suggestions {
            titles,
            tech_stacks,
            categories,
        })
    }
}

impl std::fmt::Debug for SuggestionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionService").finish()
    }
}

/// Trim the fragment; `None` when it is too short to query.
pub fn normalized_fragment(input: &str) -> Option<&str> {
    let trimmed = input.trim();

    (trimmed.chars().count() >= MIN_FRAGMENT_CHARS).then_some(trimmed)
}

/// Collect tokens from the fetched stacks that contain the fragment
/// case-insensitively, deduplicated in first-seen order, truncated to
/// [`STACK_TOKEN_LIMIT`].
pub fn matching_tokens(stacks: Vec<Vec<String>>, fragment: &str) -> Vec<String> {
    let needle = fragment.to_lowercase();
    let mut tokens: Vec<String> = Vec::new();

    for stack in stacks {
        for token in stack {
            if token.to_lowercase().contains(&needle) && !tokens.contains(&token) {
                tokens.push(token);
            }
        }
    }

    tokens.truncate(STACK_TOKEN_LIMIT);
    tokens
}
