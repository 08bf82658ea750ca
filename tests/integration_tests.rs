use reqwest::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;
use trajan::{
    AppState,
    config::Config,
    store::{MemoryWorkspaceStore, SharedStore},
};
use uuid::Uuid;

mod unit;

/// 在随机端口启动完整应用（内存存储）
async fn spawn_app_with(pairs: Vec<(&str, &str)>) -> String {
    let config = Config::from_pairs(pairs).expect("valid test config");
    let store: SharedStore = Arc::new(MemoryWorkspaceStore::new());
    let app = trajan::build_app(AppState::new(store, config));

    let server = axum::Server::bind(&"127.0.0.1:0".parse().unwrap())
        .serve(app.into_make_service());
    let addr = server.local_addr();
    tokio::spawn(server);
    format!("http://{}", addr)
}

async fn spawn_app() -> String {
    spawn_app_with(Vec::new()).await
}

async fn create_workspace(client: &reqwest::Client, base: &str, body: Value) -> reqwest::Response {
    client
        .post(format!("{}/api/v1/workspaces", base))
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn create_named(client: &reqwest::Client, base: &str, name: &str) -> Value {
    let res = create_workspace(client, base, json!({ "name": name })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    body["data"].clone()
}

#[tokio::test]
async fn health_reports_healthy_store() {
    let base = spawn_app().await;
    let res = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn documentation_endpoints_are_served() {
    let base = spawn_app().await;

    let res = reqwest::get(format!("{}/openapi.json", base)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let doc: Value = res.json().await.unwrap();
    assert_eq!(doc["info"]["title"], "Trajan API");
    assert!(doc["paths"].get("/api/v1/workspaces").is_some());

    let res = reqwest::get(format!("{}/docs/", base)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("swagger-ui"));

    let res = reqwest::get(format!("{}/redoc", base)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().to_lowercase().contains("redoc"));
}

#[tokio::test]
async fn documentation_can_be_disabled() {
    let base = spawn_app_with(vec![("DOCS_ENABLED", "false")]).await;
    for path in ["docs/", "redoc", "openapi.json"] {
        let res = reqwest::get(format!("{}/{}", base, path)).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn create_then_read_workspace() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let res = create_workspace(
        &client,
        &base,
        json!({
            "name": "checkout",
            "description": "Checkout service",
            "icon": "cart",
            "color": "#00aa55",
            "state": { "branch": "main" }
        }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["code"], 201);
    let created = &body["data"];
    let id = created["id"].as_str().unwrap();
    assert!(Uuid::parse_str(id).is_ok());
    assert_eq!(created["name"], "checkout");
    assert_eq!(created["state"]["branch"], "main");
    assert!(created["created_at"].is_string());

    let res = client
        .get(format!("{}/api/v1/workspaces/{}", base, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(&body["data"], created);
}

#[tokio::test]
async fn repeated_creations_get_unique_ids() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let mut ids = std::collections::HashSet::new();
    for i in 0..10 {
        let ws = create_named(&client, &base, &format!("ws-{}", i)).await;
        assert!(ids.insert(ws["id"].as_str().unwrap().to_string()));
    }
    assert_eq!(ids.len(), 10);
}

#[tokio::test]
async fn unknown_and_malformed_ids_are_not_found() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    for id in [Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
        let res = client
            .get(format!("{}/api/v1/workspaces/{}", base, id))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["errors"][0]["code"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn delete_makes_later_reads_not_found() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let ws = create_named(&client, &base, "scratch").await;
    let url = format!("{}/api/v1/workspaces/{}", base, ws["id"].as_str().unwrap());

    let res = client.delete(&url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);

    let res = client.get(&url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.delete(&url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let res = create_workspace(&client, &base, json!({ "name": "   " })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["errors"][0]["field"], "name");
    assert_eq!(body["errors"][0]["code"], "required");

    let res = create_workspace(&client, &base, json!({})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/v1/workspaces", base))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn duplicate_name_conflicts() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    create_named(&client, &base, "shared").await;

    let res = create_workspace(&client, &base, json!({ "name": "shared" })).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["errors"][0]["code"], "WORKSPACE_003");
    assert_eq!(body["errors"][0]["field"], "name");
}

#[tokio::test]
async fn partial_update_changes_only_given_fields() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let res = create_workspace(
        &client,
        &base,
        json!({ "name": "docs", "description": "Docs site", "icon": "book" }),
    )
    .await;
    let created: Value = res.json().await.unwrap();
    let url = format!(
        "{}/api/v1/workspaces/{}",
        base,
        created["data"]["id"].as_str().unwrap()
    );

    let res = client
        .patch(&url)
        .json(&json!({ "name": "handbook", "description": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    let updated = &body["data"];
    assert_eq!(updated["name"], "handbook");
    assert!(updated["description"].is_null());
    assert_eq!(updated["icon"], "book");
    assert_eq!(updated["created_at"], created["data"]["created_at"]);

    let res = client
        .put(&url)
        .json(&json!({ "color": "teal" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"]["color"], "teal");
    assert_eq!(body["data"]["name"], "handbook");
}

#[tokio::test]
async fn update_errors_map_to_client_statuses() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    create_named(&client, &base, "taken").await;
    let ws = create_named(&client, &base, "free").await;
    let url = format!("{}/api/v1/workspaces/{}", base, ws["id"].as_str().unwrap());

    let res = client.patch(&url).json(&json!({ "name": "taken" })).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = client.patch(&url).json(&json!({ "state": 42 })).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .patch(format!("{}/api/v1/workspaces/{}", base, Uuid::new_v4()))
        .json(&json!({ "name": "ghost" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_paginates_with_meta() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    for i in 0..5 {
        create_named(&client, &base, &format!("p-{}", i)).await;
    }

    let res = client
        .get(format!("{}/api/v1/workspaces?skip=2&limit=2", base))
        .header("x-request-id", "list-req-1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["total_count"], 5);
    assert_eq!(body["meta"]["request_id"], "list-req-1");
    assert_eq!(body["meta"]["pagination"]["page"], 2);
    assert_eq!(body["meta"]["pagination"]["total_pages"], 3);
    assert_eq!(body["meta"]["pagination"]["has_next"], true);
    assert_eq!(body["meta"]["pagination"]["has_prev"], true);

    let res = client
        .get(format!("{}/api/v1/workspaces?skip=-1", base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_paging_uses_error_envelope() {
    let base = spawn_app().await;
    let res = reqwest::get(format!("{}/api/v1/workspaces?limit=abc", base))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], 400);
    assert_eq!(body["errors"][0]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", base))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-me");

    let res = client.get(format!("{}/health", base)).send().await.unwrap();
    let generated = res.headers()["x-request-id"].to_str().unwrap();
    assert!(Uuid::parse_str(generated).is_ok());
}

#[tokio::test]
async fn unknown_route_returns_json_not_found() {
    let base = spawn_app().await;
    let res = reqwest::get(format!("{}/api/v1/nothing-here", base)).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn cors_allows_configured_origin() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/health", base))
        .header("origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();
    assert_eq!(
        res.headers()["access-control-allow-origin"],
        "http://localhost:3000"
    );
}
