use std::path::PathBuf;

/// Runtime configuration read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    /// Postgres connection string; the in-memory repository is used without it
    pub database_url: Option<String>,
    /// JSON seed for the in-memory repository
    pub seed_file: Option<PathBuf>,
    /// Longest date range accepted by the empty classroom search
    pub max_query_span_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            database_url: None,
            seed_file: None,
            max_query_span_days: 7,
        }
    }
}

impl Config {
    /// Reads configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `BIND_ADDR`: listen address (default: 0.0.0.0:3000)
    /// - `DATABASE_URL`: Postgres connection string (optional)
    /// - `SEED_FILE`: JSON seed for the in-memory repository (optional)
    /// - `MAX_QUERY_SPAN_DAYS`: longest empty classroom search, in days (default: 7)
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let bind_addr = std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr);
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());
        let seed_file = std::env::var("SEED_FILE")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let max_query_span_days = match std::env::var("MAX_QUERY_SPAN_DAYS") {
            Ok(value) => value
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|days| *days > 0)
                .ok_or_else(|| format!("MAX_QUERY_SPAN_DAYS must be a positive number, got '{value}'"))?,
            Err(_) => defaults.max_query_span_days,
        };

        Ok(Self {
            bind_addr,
            database_url,
            seed_file,
            max_query_span_days,
        })
    }
}
