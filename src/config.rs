use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Runtime configuration, read once at startup from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub redis_url: String,
    pub jwt_secret: String,
    pub port: u16,
    /// Built SPA to serve at `/`, if any.
    pub frontend_dir: Option<PathBuf>,
    /// Max create calls in flight during a CSV import.
    pub import_concurrency: usize,
    pub cache: CacheConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            redis_url: required("REDIS_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            port: parse_or("PORT", 8080),
            frontend_dir: std::env::var("FRONTEND_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            import_concurrency: parse_or("IMPORT_CONCURRENCY", 4usize).max(1),
            cache: CacheConfig::from_env(),
        })
    }
}

/// Cache lifetimes.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub taxonomy_ttl: Duration,
    pub session_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            taxonomy_ttl: Duration::from_secs(300), // 5 minutes
            session_ttl: Duration::from_secs(60),   // 1 minute
        }
    }
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self {
            taxonomy_ttl: parse_duration_secs("CACHE_TTL_TAXONOMIES", 300),
            session_ttl: parse_duration_secs("SESSION_CACHE_TTL", 60),
        }
    }
}

fn required(env_var: &'static str) -> Result<String, ConfigError> {
    std::env::var(env_var).map_err(|_| ConfigError::Missing(env_var))
}

fn parse_or<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    std::env::var(env_var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_duration_secs(env_var: &str, default: u64) -> Duration {
    Duration::from_secs(parse_or(env_var, default))
}
