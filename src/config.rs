use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    /// Allowed browser origin. Every origin is allowed when unset.
    pub cors_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.into());
        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .filter(|s| !s.is_empty())
                .ok_or_else(|| anyhow::anyhow!("Missing required env var: DATABASE_URL"))?,
            database_max_connections: var("DATABASE_MAX_CONNECTIONS", "10").parse()?,
            host: var("HOST", "0.0.0.0"),
            port: var("PORT", "8080").parse()?,
            cors_origin: lookup("CORS_ORIGIN").filter(|s| !s.is_empty()),
        })
    }
}
