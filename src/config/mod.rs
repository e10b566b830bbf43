use std::env;
use std::path::Path;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub database_path: String,
    pub database_max_connections: u32,
    pub api_prefix: String,
    pub frontend_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            environment: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./data/database.sqlite".to_string()),
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3001".to_string()),
        }
    }

    /// SQLx connection URL for the configured database file.
    pub fn database_url(&self) -> String {
        format!("sqlite://{}", self.database_path)
    }

    /// Directory that must exist before the database file can be created.
    pub fn database_dir(&self) -> Option<&Path> {
        Path::new(&self.database_path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// Development mode switches logging to the human-readable format.
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
