//! Configuration loaded from environment variables.

use std::env;

use anyhow::{Context, Result};

/// Baseline category list used when `SEED_CATEGORIES` is not set.
///
/// The effective category set is always this list unioned with whatever
/// categories are already stored; see `ListingService::categories`.
pub const DEFAULT_SEED_CATEGORIES: &[&str] = &[
    "web",
    "mobile",
    "ai/ml",
    "blockchain",
    "game-dev",
    "cybersecurity",
    "data-science",
    "other",
];

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// PostgreSQL connection URL.
    pub database_url: String,

    /// Redis connection URL (sessions and health probe).
    pub redis_url: String,

    /// Maximum database connections in pool (default: 10).
    pub database_max_connections: u32,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,

    /// Cookie SameSite policy: "strict", "lax", or "none" (default: "strict").
    pub cookie_same_site: String,

    /// Baseline categories merged into the derived category list
    /// (comma-separated, defaults to `DEFAULT_SEED_CATEGORIES`).
    pub seed_categories: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL environment variable is required")?;

        let redis_url =
            env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        let cookie_same_site = env::var("COOKIE_SAME_SITE")
            .unwrap_or_else(|_| "strict".to_string())
            .to_lowercase();

        let seed_categories = env::var("SEED_CATEGORIES")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| {
                DEFAULT_SEED_CATEGORIES
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            });

        Ok(Self {
            port,
            database_url,
            redis_url,
            database_max_connections,
            cors_allowed_origins,
            cookie_same_site,
            seed_categories,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn default_seed_categories_nonempty() {
        assert!(DEFAULT_SEED_CATEGORIES.contains(&"web"));
        assert!(DEFAULT_SEED_CATEGORIES.contains(&"other"));
    }
}
