use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;

use catalog_infra::repository::InMemoryRepository;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, in-memory backend, ephemeral port.
        let app = catalog_api::app::build_app(Arc::new(InMemoryRepository::new()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn health_reports_a_timestamp() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(!body["timestamp"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn product_lifecycle_create_get_update_delete() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Create
    let res = client
        .post(format!("{}/products", srv.base_url))
        .json(&json!({ "name": "Test", "description": "Desc", "price": 10.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(created["name"], "Test");

    // GetByID returns the same product
    let res = client
        .get(format!("{}/products/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched, created);

    // Update replaces wholesale, id unchanged
    let res = client
        .put(format!("{}/products/{}", srv.base_url, id))
        .json(&json!({ "name": "Updated", "description": "New", "price": 20.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["id"].as_str().unwrap(), id);
    assert_eq!(updated["name"], "Updated");
    assert_eq!(updated["description"], "New");

    // Delete
    let res = client
        .delete(format!("{}/products/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    // Gone afterwards
    let res = client
        .get(format!("{}/products/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_discards_fields_absent_from_the_body() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/products", srv.base_url))
        .json(&json!({ "name": "Test", "description": "Keep me?", "price": 10.0 }))
        .send()
        .await
        .unwrap();
    let created: serde_json::Value = res.json().await.unwrap();
    let id = created["id"].as_str().unwrap();

    // No description in the update body: the old one must not survive.
    let res = client
        .put(format!("{}/products/{}", srv.base_url, id))
        .json(&json!({ "name": "B", "price": 2.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["description"], "");
}

#[tokio::test]
async fn invalid_create_fails_and_leaves_the_store_empty() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/products", srv.base_url))
        .json(&json!({ "name": "", "price": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "Name is required and cannot be empty");

    let res = client
        .get(format!("{}/products", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let listed: serde_json::Value = res.json().await.unwrap();
    assert!(listed["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn validation_rules_map_to_bad_request() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let long_name = "a".repeat(129);
    for body in [
        json!({ "name": long_name, "price": 1.0 }),
        json!({ "name": "Widget", "price": -1.0 }),
        json!({ "name": "Widget" }), // missing price decodes to 0
    ] {
        let res = client
            .post(format!("{}/products", srv.base_url))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[tokio::test]
async fn unknown_and_malformed_ids_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Well-formed but unknown id
    let unknown = uuid::Uuid::now_v7();
    let res = client
        .get(format!("{}/products/{}", srv.base_url, unknown))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .delete(format!("{}/products/{}", srv.base_url, unknown))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Malformed id
    let res = client
        .get(format!("{}/products/not-a-uuid", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_returns_every_created_product() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for (name, price) in [("A", 1.0), ("B", 2.0), ("C", 3.0)] {
        let res = client
            .post(format!("{}/products", srv.base_url))
            .json(&json!({ "name": name, "price": price }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = client
        .get(format!("{}/products", srv.base_url))
        .send()
        .await
        .unwrap();
    let listed: serde_json::Value = res.json().await.unwrap();
    assert_eq!(listed["items"].as_array().unwrap().len(), 3);
}
