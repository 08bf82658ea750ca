pub mod docs;
pub mod health;
pub mod workspaces;

use crate::AppState;
use crate::db::models::api::ApiResponse;
use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use std::sync::Arc;

pub const API_PREFIX: &str = "/api/v1";

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route(
            "/workspaces",
            get(workspaces::list_workspaces).post(workspaces::create_workspace),
        )
        .route(
            "/workspaces/:workspace_id",
            get(workspaces::get_workspace)
                .patch(workspaces::update_workspace)
                .put(workspaces::update_workspace)
                .delete(workspaces::delete_workspace),
        );

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .nest(API_PREFIX, api_routes);

    // 文档页面可通过 DOCS_ENABLED=false 关闭
    if state.config.docs_enabled {
        router = router.merge(docs::docs_routes());
    }

    router.fallback(not_found).with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::not_found("Route not found")),
    )
}
