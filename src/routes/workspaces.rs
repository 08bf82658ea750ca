use crate::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::models::*;
use crate::error::AppError;
use crate::middleware::extract_request_id;
use crate::services::WorkspacesService;
use crate::validation::{JsonBody, QueryParams};

/// 非法 UUID 不可能对应已存储的工作空间，按不存在处理
fn parse_workspace_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found("workspace"))
}

/// 创建工作空间
#[utoipa::path(
    post,
    path = "/api/v1/workspaces",
    tag = "workspaces",
    request_body = CreateWorkspaceRequest,
    responses(
        (status = 201, description = "Workspace created", body = Workspace),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "A workspace with this name already exists")
    )
)]
pub async fn create_workspace(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<CreateWorkspaceRequest>,
) -> impl IntoResponse {
    match WorkspacesService::create(state.store.as_ref(), payload).await {
        Ok(workspace) => {
            let response = ApiResponse::created(workspace, "Workspace created successfully");
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// 获取工作空间列表（按创建时间倒序）
#[utoipa::path(
    get,
    path = "/api/v1/workspaces",
    tag = "workspaces",
    params(ListWorkspacesQuery),
    responses(
        (status = 200, description = "Workspaces retrieved", body = [Workspace]),
        (status = 400, description = "Invalid paging parameters")
    )
)]
pub async fn list_workspaces(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    QueryParams(params): QueryParams<ListWorkspacesQuery>,
) -> impl IntoResponse {
    match WorkspacesService::list(state.store.as_ref(), params.skip, params.limit).await {
        Ok(page) => {
            let meta = ResponseMeta {
                request_id: extract_request_id(&headers),
                pagination: Some(Pagination::from_window(page.skip, page.limit, page.total_count)),
                total_count: Some(page.total_count),
            };
            let response =
                ApiResponse::success_with_meta(page.items, "Workspaces retrieved successfully", meta);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// 获取工作空间详情
#[utoipa::path(
    get,
    path = "/api/v1/workspaces/{workspace_id}",
    tag = "workspaces",
    params(("workspace_id" = Uuid, Path, description = "Workspace id")),
    responses(
        (status = 200, description = "Workspace retrieved", body = Workspace),
        (status = 404, description = "Workspace not found")
    )
)]
pub async fn get_workspace(
    State(state): State<Arc<AppState>>,
    Path(workspace_id): Path<String>,
) -> impl IntoResponse {
    let workspace_id = match parse_workspace_id(&workspace_id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };

    match WorkspacesService::get(state.store.as_ref(), workspace_id).await {
        Ok(workspace) => {
            let response = ApiResponse::success(workspace, "Workspace retrieved successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// 更新工作空间（部分更新）
#[utoipa::path(
    patch,
    path = "/api/v1/workspaces/{workspace_id}",
    tag = "workspaces",
    params(("workspace_id" = Uuid, Path, description = "Workspace id")),
    request_body = UpdateWorkspaceRequest,
    responses(
        (status = 200, description = "Workspace updated", body = Workspace),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Workspace not found"),
        (status = 409, description = "A workspace with this name already exists")
    )
)]
pub async fn update_workspace(
    State(state): State<Arc<AppState>>,
    Path(workspace_id): Path<String>,
    JsonBody(payload): JsonBody<UpdateWorkspaceRequest>,
) -> impl IntoResponse {
    let workspace_id = match parse_workspace_id(&workspace_id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };

    match WorkspacesService::update(state.store.as_ref(), workspace_id, payload).await {
        Ok(workspace) => {
            let response = ApiResponse::success(workspace, "Workspace updated successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// 删除工作空间
#[utoipa::path(
    delete,
    path = "/api/v1/workspaces/{workspace_id}",
    tag = "workspaces",
    params(("workspace_id" = Uuid, Path, description = "Workspace id")),
    responses(
        (status = 200, description = "Workspace deleted"),
        (status = 404, description = "Workspace not found")
    )
)]
pub async fn delete_workspace(
    State(state): State<Arc<AppState>>,
    Path(workspace_id): Path<String>,
) -> impl IntoResponse {
    let workspace_id = match parse_workspace_id(&workspace_id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };

    match WorkspacesService::delete(state.store.as_ref(), workspace_id).await {
        Ok(()) => {
            let response = ApiResponse::<()>::ok("Workspace deleted successfully");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
