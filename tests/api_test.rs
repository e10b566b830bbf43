//! End-to-end tests for the resource API.
//!
//! Each test boots the full Axum app on a random port against a fresh
//! in-memory SQLite database and drives it over HTTP.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use resource_manager::config::AppConfig;
use resource_manager::services::resource::ResourceService;
use resource_manager::{db, routes, AppState};

/// Spin up the app, returning the API base URL and the server task.
async fn start_server() -> (String, tokio::task::JoinHandle<()>) {
    let pool = db::create_pool("sqlite::memory:", 1).await.expect("pool");
    db::migrate(&pool).await.expect("migrations");

    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        database_path: ":memory:".to_string(),
        database_max_connections: 1,
        api_prefix: "/api/v1".to_string(),
        frontend_url: "http://localhost:3001".to_string(),
    };
    let app = routes::router(AppState {
        resources: ResourceService::new(pool),
        config,
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}/api/v1");

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    (base_url, handle)
}

/// Helper: extract `data` from the API envelope, panic with message on error.
fn extract_data(body: &Value) -> &Value {
    if let Some(err) = body.get("error").filter(|e| !e.is_null()) {
        panic!(
            "API error: {} - {}",
            err["code"].as_str().unwrap_or("?"),
            err["message"].as_str().unwrap_or("?"),
        );
    }
    assert_eq!(body["success"], true);
    body.get("data").expect("missing 'data' field")
}

async fn create(client: &Client, base: &str, body: Value) -> Value {
    let resp = client
        .post(format!("{base}/resources"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Resource created successfully");
    extract_data(&body).clone()
}

fn timestamp(value: &Value) -> chrono::DateTime<chrono::FixedOffset> {
    chrono::DateTime::parse_from_rfc3339(value.as_str().unwrap()).unwrap()
}

async fn get_json(client: &Client, url: String) -> (StatusCode, Value) {
    let resp = client.get(url).send().await.unwrap();
    let status = resp.status();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn health_reports_database() {
    let (base, _handle) = start_server().await;
    let (status, body) = get_json(&Client::new(), format!("{base}/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["environment"], "test");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn create_get_update_delete_lifecycle() {
    let (base, _handle) = start_server().await;
    let client = Client::new();

    // Create with only name and status; optional fields come back null.
    let created = create(&client, &base, json!({ "name": "X", "status": "inactive" })).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert!(created["description"].is_null());
    assert!(created["category"].is_null());
    assert!(created["metadata"].is_null());
    assert_eq!(created["status"], "inactive");
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let (status, body) = get_json(&client, format!("{base}/resources/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(extract_data(&body), &created);

    // Partial update touches status only.
    let resp = client
        .put(format!("{base}/resources/{id}"))
        .json(&json!({ "status": "archived" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Resource updated successfully");
    let updated = extract_data(&body);
    assert_eq!(updated["status"], "archived");
    assert_eq!(updated["name"], "X");
    assert!(updated["description"].is_null());
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert!(timestamp(&updated["updatedAt"]) > timestamp(&created["updatedAt"]));

    let resp = client
        .delete(format!("{base}/resources/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let (status, body) = get_json(&client, format!("{base}/resources/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn create_rejects_invalid_body() {
    let (base, _handle) = start_server().await;
    let client = Client::new();

    let resp = client
        .post(format!("{base}/resources"))
        .json(&json!({ "name": "   ", "category": "c".repeat(101) }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "Validation failed");
    let fields: Vec<&str> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["category", "name"]);

    let resp = client
        .post(format!("{base}/resources"))
        .json(&json!({ "name": "ok", "status": "deleted" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_paginates_and_reports_out_of_range_pages() {
    let (base, _handle) = start_server().await;
    let client = Client::new();

    for i in 0..25 {
        create(&client, &base, json!({ "name": format!("item-{i:02}") })).await;
    }

    let (status, body) = get_json(
        &client,
        format!("{base}/resources?sortBy=name&sortOrder=asc&limit=10&page=1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let data = extract_data(&body);
    assert_eq!(data["data"].as_array().unwrap().len(), 10);
    assert_eq!(data["data"][0]["name"], "item-00");
    assert_eq!(
        data["pagination"],
        json!({ "page": 1, "limit": 10, "total": 25, "totalPages": 3, "hasNext": true, "hasPrev": false })
    );

    let (_, body) = get_json(&client, format!("{base}/resources?limit=10&page=3")).await;
    let pagination = &extract_data(&body)["pagination"];
    assert_eq!(pagination["hasNext"], false);
    assert_eq!(pagination["hasPrev"], true);

    let (status, body) = get_json(&client, format!("{base}/resources?limit=10&page=4")).await;
    assert_eq!(status, StatusCode::OK);
    let data = extract_data(&body);
    assert!(data["data"].as_array().unwrap().is_empty());
    assert_eq!(data["pagination"]["hasNext"], false);
    assert_eq!(data["pagination"]["hasPrev"], true);

    let (status, body) = get_json(
        &client,
        format!("{base}/resources?limit=100&page={}", i64::MAX),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let data = extract_data(&body);
    assert!(data["data"].as_array().unwrap().is_empty());
    assert_eq!(data["pagination"]["page"], i64::MAX);
    assert_eq!(data["pagination"]["total"], 25);
}

#[tokio::test]
async fn list_filters_by_category_and_search() {
    let (base, _handle) = start_server().await;
    let client = Client::new();

    create(&client, &base, json!({ "name": "foo widget", "category": "tech" })).await;
    create(
        &client,
        &base,
        json!({ "name": "gadget", "description": "contains foo", "category": "tech" }),
    )
    .await;
    create(&client, &base, json!({ "name": "foo other", "category": "other" })).await;
    create(&client, &base, json!({ "name": "plain", "category": "tech", "status": "archived" }))
        .await;

    let (_, body) = get_json(&client, format!("{base}/resources?category=tech&search=foo")).await;
    let data = extract_data(&body);
    assert_eq!(data["pagination"]["total"], 2);
    for item in data["data"].as_array().unwrap() {
        assert_eq!(item["category"], "tech");
    }

    let (_, body) = get_json(&client, format!("{base}/resources?status=archived")).await;
    let data = extract_data(&body);
    assert_eq!(data["pagination"]["total"], 1);
    assert_eq!(data["data"][0]["name"], "plain");

    // Empty parameters are ignored rather than matched literally.
    let (_, body) = get_json(&client, format!("{base}/resources?category=&name=&search=")).await;
    assert_eq!(extract_data(&body)["pagination"]["total"], 4);
}

#[tokio::test]
async fn list_rejects_invalid_query() {
    let (base, _handle) = start_server().await;
    let client = Client::new();

    let (status, body) = get_json(
        &client,
        format!("{base}/resources?status=deleted&sortBy=metadata&limit=500&page=0"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    let fields: Vec<&str> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["limit", "page", "sortBy", "status"]);
}

#[tokio::test]
async fn update_missing_resource_is_not_found() {
    let (base, _handle) = start_server().await;
    let client = Client::new();

    let resp = client
        .put(format!("{base}/resources/{}", uuid::Uuid::new_v4()))
        .json(&json!({ "name": "new" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
