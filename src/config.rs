use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub frontend_url: String,
    pub environment: String,
    pub db_max_connections: u32,
    pub token_ttl_hours: i64,
    pub audit_queue_capacity: usize,
}

fn var_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value '{}': {}", name, raw, e)),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            jwt_secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            port: var_or("PORT", 5000)?,
            frontend_url: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            db_max_connections: var_or("DB_MAX_CONNECTIONS", 10)?,
            token_ttl_hours: var_or("TOKEN_TTL_HOURS", 24)?,
            audit_queue_capacity: var_or("AUDIT_QUEUE_CAPACITY", 1024)?,
        })
    }

    /// Config for in-process use without a database URL.
    pub fn for_tests(jwt_secret: &str) -> Self {
        Self {
            database_url: String::new(),
            jwt_secret: jwt_secret.to_string(),
            port: 0,
            frontend_url: "http://localhost:3000".to_string(),
            environment: "test".to_string(),
            db_max_connections: 1,
            token_ttl_hours: 24,
            audit_queue_capacity: 64,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}
