//! Route definitions for the resource manager API.

pub mod health;
pub mod resources;

use axum::{
    extract::OriginalUri,
    http::{HeaderValue, Method, StatusCode},
    routing::get,
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::errors::ApiResponse;
use crate::AppState;

/// Request bodies above this size are refused.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let resource_routes = Router::new()
        .route("/health", get(health::health))
        .route("/resources", get(resources::list).post(resources::create))
        .route(
            "/resources/{id}",
            get(resources::get_by_id)
                .put(resources::update)
                .delete(resources::delete),
        );

    let cors = match state.config.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new().allow_origin(origin),
        Err(e) => {
            tracing::warn!(
                error = %e,
                url = %state.config.frontend_url,
                "Invalid FRONTEND_URL, cross-origin requests will be refused"
            );
            CorsLayer::new()
        }
    }
    .allow_methods(Any)
    .allow_headers(Any);

    Router::new()
        .route("/", get(health::info))
        .nest(&state.config.api_prefix, resource_routes)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
                .layer(cors),
        )
        .with_state(state)
}

/// Fallback for unmatched routes. Reports the path as the client sent it,
/// not as seen inside a nested router.
async fn not_found(
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        ApiResponse::error("NOT_FOUND", &format!("Route {method} {} not found", uri.path())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::db::{create_pool, migrate};
    use crate::services::resource::ResourceService;

    async fn app() -> Router {
        let pool = create_pool("sqlite::memory:", 1).await.unwrap();
        migrate(&pool).await.unwrap();
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            database_path: ":memory:".to_string(),
            database_max_connections: 1,
            api_prefix: "/api/v1".to_string(),
            frontend_url: "http://localhost:3001".to_string(),
        };
        router(AppState {
            resources: ResourceService::new(pool),
            config,
        })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn unknown_route_uses_error_envelope() {
        let response = app()
            .await
            .oneshot(Request::get("/api/v1/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "Route GET /api/v1/nope not found");
    }

    #[tokio::test]
    async fn invalid_uuid_is_a_validation_error() {
        let response = app()
            .await
            .oneshot(
                Request::get("/api/v1/resources/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"]["details"][0]["field"], "id");
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let response = app()
            .await
            .oneshot(
                Request::post("/api/v1/resources")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn root_describes_the_api() {
        let response = app()
            .await
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["api"], "/api/v1");
        assert_eq!(json["health"], "/api/v1/health");
    }
}
