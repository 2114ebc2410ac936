//! Runtime Configuration
//! Mission: Collect environment settings once and inject them, no ambient globals

use crate::auth::models::AdminCredentials;
use std::env;

/// Process-wide configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub admin: AdminCredentials,
    pub jwt_secret: String,
    pub jwt_expire_minutes: i64,
    pub db_path: String,
    pub cors_origins: Vec<String>,
    pub bind_addr: String,
}

impl Config {
    /// Build configuration from environment variables with development defaults.
    pub fn from_env() -> Self {
        let admin = AdminCredentials {
            email: env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@portfolio.com".to_string()),
            password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "Admin@12345".to_string()),
        };

        let jwt_secret =
            env::var("JWT_SECRET_KEY").unwrap_or_else(|_| "dev_secret_change_me".to_string());

        let jwt_expire_minutes = env::var("JWT_EXPIRE_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(120);

        let db_path = env::var("DB_PATH").unwrap_or_else(|_| "apptrack.db".to_string());

        let cors_origins = parse_origins(
            &env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".to_string()),
        );

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

        Self {
            admin,
            jwt_secret,
            jwt_expire_minutes,
            db_path,
            cors_origins,
            bind_addr,
        }
    }
}

/// Split a comma-separated origin list, trimming whitespace and dropping empties.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}
