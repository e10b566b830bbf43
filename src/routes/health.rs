//! Health check and API discovery endpoints.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::AppState;

/// Health probe detail.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
    pub database: String,
}

/// Root document pointing clients at the API.
#[derive(Debug, Serialize)]
pub struct ApiInfo {
    pub name: String,
    pub version: String,
    pub api: String,
    pub health: String,
}

/// Liveness and readiness in one: reports database connectivity.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let database = match sqlx::query("SELECT 1")
        .execute(state.resources.repository().pool())
        .await
    {
        Ok(_) => "connected".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            format!("error: {e}")
        }
    };

    Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        environment: state.config.environment.clone(),
        database,
    })
}

/// GET / — service name, version, and where the API lives.
pub async fn info(State(state): State<AppState>) -> Json<ApiInfo> {
    let prefix = &state.config.api_prefix;
    Json(ApiInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        api: prefix.clone(),
        health: format!("{prefix}/health"),
    })
}
