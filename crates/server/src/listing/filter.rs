//! Listing filter builder using SeaQuery.
//!
//! Translates the optional `/projects` query parameters into a single
//! condition tree rendered as PostgreSQL. Absent or empty parameters impose
//! no constraint; all active constraints combine by AND, and a free-text
//! `search` expands into a disjunction across title, description, and
//! tech-stack membership.

use sea_query::extension::postgres::PgBinOper;
use sea_query::{
    Alias, Asterisk, Cond, Expr, ExprTrait, Iden, Order, PostgresQueryBuilder, Query, SimpleExpr,
};
use serde::Deserialize;

/// Identifiers for the project table.
#[derive(Iden)]
enum Project {
    Table,
    Id,
    Title,
    Description,
    Category,
    Difficulty,
    CreatedAt,
    CreatorId,
}

/// Identifiers for the users table.
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Image,
}

/// Optional filter parameters for the listing query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilter {
    /// Exact category match (case-sensitive, stored value verbatim).
    pub category: Option<String>,

    /// Exact difficulty match (case-sensitive, stored value verbatim).
    pub difficulty: Option<String>,

    /// Case-insensitive title substring.
    pub title: Option<String>,

    /// Free-text search: title OR description substring, or exact
    /// tech-stack token.
    pub search: Option<String>,
}

impl ProjectFilter {
    /// Build the WHERE condition tree for the active parameters.
    ///
    /// An empty tree (no parameters) renders no WHERE clause at all.
    pub fn condition(&self) -> Cond {
        let mut cond = Cond::all();

        if let Some(category) = param(&self.category) {
            cond = cond.add(Expr::col((Project::Table, Project::Category)).eq(category));
        }

        if let Some(difficulty) = param(&self.difficulty) {
            cond = cond.add(Expr::col((Project::Table, Project::Difficulty)).eq(difficulty));
        }

        if let Some(title) = param(&self.title) {
            cond = cond.add(contains(Project::Title, title));
        }

        if let Some(search) = param(&self.search) {
            cond = cond.add(
                Cond::any()
                    .add(contains(Project::Title, search))
                    .add(contains(Project::Description, search))
                    .add(has_stack_token(search)),
            );
        }

        cond
    }

    /// Build the full listing SELECT: projects joined with the creator's
    /// public-safe columns, newest first with `id` as the deterministic
    /// tie-break.
    pub fn build_list_query(&self) -> String {
        let mut query = Query::select();

        query
            .column((Project::Table, Asterisk))
            .expr_as(
                Expr::col((Users::Table, Users::Name)),
                Alias::new("creator_name"),
            )
            .expr_as(
                Expr::col((Users::Table, Users::Image)),
                Alias::new("creator_image"),
            )
            .from(Project::Table)
            .inner_join(
                Users::Table,
                Expr::col((Project::Table, Project::CreatorId)).equals((Users::Table, Users::Id)),
            )
            .cond_where(self.condition())
            .order_by((Project::Table, Project::CreatedAt), Order::Desc)
            .order_by((Project::Table, Project::Id), Order::Desc);

        query.to_string(PostgresQueryBuilder)
    }
}

/// Treat absent and blank parameters alike: no constraint.
fn param(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Case-insensitive substring match on a project column.
fn contains(column: Project, value: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like_wildcards(value));
    Expr::col((Project::Table, column)).binary(PgBinOper::ILike, Expr::val(pattern))
}

/// Exact token membership in the tech_stack array.
fn has_stack_token(value: &str) -> SimpleExpr {
    Expr::cust_with_values("project.tech_stack @> ARRAY[$1]", [value])
}

/// Escape SQL LIKE wildcard characters (`%`, `_`, `\`) in a value.
pub(crate) fn escape_like_wildcards(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn no_params_no_where() {
        let filter = ProjectFilter::default();
        let sql = filter.build_list_query();

        assert!(!sql.contains("WHERE"), "unfiltered list: {sql}");
        assert!(sql.contains("FROM \"project\""));
        assert!(sql.contains("INNER JOIN \"users\""));
    }

    #[test]
    fn newest_first_with_id_tiebreak() {
        let sql = ProjectFilter::default().build_list_query();

        let created = sql.find("\"created_at\" DESC").unwrap();
        let id = sql.find("\"project\".\"id\" DESC").unwrap();
        assert!(created < id, "created_at sorts before id: {sql}");
    }

    #[test]
    fn creator_columns_are_public_safe() {
        let sql = ProjectFilter::default().build_list_query();

        assert!(sql.contains("\"creator_name\""));
        assert!(sql.contains("\"creator_image\""));
        assert!(!sql.contains("mail"), "creator email must not leak: {sql}");
    }

    #[test]
    fn category_is_exact_match() {
        let filter = ProjectFilter {
            category: Some("ai".to_string()),
            ..Default::default()
        };
        let sql = filter.build_list_query();

        assert!(sql.contains("\"category\" = 'ai'"), "{sql}");
        assert!(!sql.contains("ILIKE '%ai%'"), "category is not fuzzy: {sql}");
    }

    #[test]
    fn difficulty_is_exact_match() {
        let filter = ProjectFilter {
            difficulty: Some("advanced".to_string()),
            ..Default::default()
        };
        let sql = filter.build_list_query();

        assert!(sql.contains("\"difficulty\" = 'advanced'"), "{sql}");
    }

    #[test]
    fn title_is_case_insensitive_substring() {
        let filter = ProjectFilter {
            title: Some("chess".to_string()),
            ..Default::default()
        };
        let sql = filter.build_list_query();

        assert!(sql.contains("ILIKE"), "{sql}");
        assert!(sql.contains("%chess%"), "{sql}");
    }

    #[test]
    fn search_expands_to_disjunction() {
        let filter = ProjectFilter {
            search: Some("Python".to_string()),
            ..Default::default()
        };
        let sql = filter.build_list_query();

        assert!(sql.contains("OR"), "{sql}");
        assert!(sql.contains("\"title\" ILIKE"), "{sql}");
        assert!(sql.contains("\"description\" ILIKE"), "{sql}");
        assert!(sql.contains("tech_stack @> ARRAY['Python']"), "{sql}");
    }

    #[test]
    fn search_token_match_is_exact_not_substring() {
        let filter = ProjectFilter {
            search: Some("Py".to_string()),
            ..Default::default()
        };
        let sql = filter.build_list_query();

        // The array membership arm carries the raw token, not a pattern.
        assert!(sql.contains("ARRAY['Py']"), "{sql}");
        assert!(!sql.contains("ARRAY['%Py%']"), "{sql}");
    }

    #[test]
    fn distinct_params_combine_with_and() {
        let filter = ProjectFilter {
            category: Some("ai".to_string()),
            search: Some("chess".to_string()),
            ..Default::default()
        };
        let sql = filter.build_list_query();

        assert!(sql.contains("\"category\" = 'ai'"), "{sql}");
        assert!(sql.contains("AND"), "{sql}");
        assert!(sql.contains("%chess%"), "{sql}");
    }

    #[test]
    fn blank_params_are_ignored() {
        let filter = ProjectFilter {
            category: Some("  ".to_string()),
            difficulty: Some(String::new()),
            ..Default::default()
        };
        let sql = filter.build_list_query();

        assert!(!sql.contains("WHERE"), "blank params filter nothing: {sql}");
    }

    #[test]
    fn like_wildcards_escaped() {
        let filter = ProjectFilter {
            title: Some("100%_done".to_string()),
            ..Default::default()
        };
        let sql = filter.build_list_query();

        assert!(
            !sql.contains("%100%_done%"),
            "raw wildcard chars should NOT appear unescaped: {sql}"
        );
    }

    #[test]
    fn escape_like_wildcards_function() {
        assert_eq!(escape_like_wildcards("hello"), "hello");
        assert_eq!(escape_like_wildcards("100%"), "100\\%");
        assert_eq!(escape_like_wildcards("a_b"), "a\\_b");
        assert_eq!(escape_like_wildcards("a\\b"), "a\\\\b");
    }

    #[test]
    fn filter_deserializes_from_query_params() {
        let filter: ProjectFilter =
            serde_json::from_str(r#"{"category": "ai", "search": "chess"}"#).unwrap();
        assert_eq!(filter.category.as_deref(), Some("ai"));
        assert_eq!(filter.search.as_deref(), Some("chess"));
        assert!(filter.title.is_none());
    }
}
