//! Runtime configuration from the environment

use anyhow::bail;

pub const DEFAULT_APP_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    /// Hosted REST endpoint (SUPABASE_URL)
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    /// Direct Postgres connection, preferred over REST when set
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    /// Origin used to build registration links
    pub app_origin: String,
    /// Organizer panel secret
    pub access_secret: String,
    pub request_timeout_secs: u64,
    pub log_dir: String,
}

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Must be set and non-empty outside development
    fn require_secret(name: &str, environment: &str) -> anyhow::Result<String> {
        match var(name) {
            Some(v) => Ok(v),
            None if environment == "development" => Ok(format!("dev-{name}-not-for-production")),
            None => bail!("{name} must be set in {environment} environment"),
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let environment = var("ENVIRONMENT").unwrap_or_else(|| "development".into());

        Ok(Self {
            supabase_url: var("SUPABASE_URL"),
            supabase_anon_key: var("SUPABASE_ANON_KEY"),
            database_url: var("DATABASE_URL"),
            db_max_connections: var("DB_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            app_origin: var("APP_ORIGIN").unwrap_or_else(|| DEFAULT_APP_ORIGIN.into()),
            access_secret: Self::require_secret("ACCESS_SECRET", &environment)?,
            request_timeout_secs: var("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            log_dir: var("LOG_DIR").unwrap_or_else(|| DEFAULT_LOG_DIR.into()),
            environment,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
