use axum::Router;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::AppState;
use crate::db::models::workspace::{CreateWorkspaceRequest, UpdateWorkspaceRequest, Workspace};
use crate::routes::{health, workspaces};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Trajan API",
        description = "Lightweight developer workspace API",
        version = "0.1.0"
    ),
    paths(
        health::health_check,
        workspaces::create_workspace,
        workspaces::list_workspaces,
        workspaces::get_workspace,
        workspaces::update_workspace,
        workspaces::delete_workspace,
    ),
    components(schemas(
        Workspace,
        CreateWorkspaceRequest,
        UpdateWorkspaceRequest,
        health::HealthResponse
    )),
    tags(
        (name = "workspaces", description = "工作空间生命周期"),
        (name = "health", description = "健康检查")
    )
)]
pub struct ApiDoc;

pub const OPENAPI_PATH: &str = "/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/docs";
pub const REDOC_PATH: &str = "/redoc";

/// 文档路由：Swagger UI、ReDoc 以及 OpenAPI JSON
pub fn docs_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
        .merge(Redoc::with_url(REDOC_PATH, ApiDoc::openapi()))
}
