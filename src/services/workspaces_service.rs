use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::models::workspace::{
        CreateWorkspaceRequest, NewWorkspace, UpdateWorkspaceRequest, Workspace, WorkspaceChanges,
    },
    error::{AppError, AppResult},
    store::WorkspaceStore,
    validation::workspace::{normalize_window, validate_create_workspace, validate_update_workspace},
};

pub struct WorkspacesService;

/// 工作空间列表的一页结果
#[derive(Debug)]
pub struct WorkspacePage {
    pub items: Vec<Workspace>,
    pub skip: i64,
    pub limit: i64,
    pub total_count: i64,
}

impl WorkspacesService {
    /// 创建工作空间
    pub async fn create(
        store: &dyn WorkspaceStore,
        req: CreateWorkspaceRequest,
    ) -> AppResult<Workspace> {
        // 验证请求数据
        validate_create_workspace(&req)?;

        let now = Utc::now();
        let new_ws = NewWorkspace {
            id: Uuid::new_v4(),
            name: req.name.trim().to_string(),
            description: req.description,
            icon: req.icon,
            color: req.color,
            state: req.state.unwrap_or_else(|| serde_json::json!({})),
            created_at: now,
            updated_at: now,
        };
        let workspace = store.insert(new_ws).await?;
        tracing::info!(workspace_id = %workspace.id, name = %workspace.name, "Workspace created");
        Ok(workspace)
    }

    pub async fn get(store: &dyn WorkspaceStore, workspace_id: Uuid) -> AppResult<Workspace> {
        store
            .find_by_id(workspace_id)
            .await?
            .ok_or_else(|| AppError::not_found("workspace"))
    }

    pub async fn list(
        store: &dyn WorkspaceStore,
        skip: Option<i64>,
        limit: Option<i64>,
    ) -> AppResult<WorkspacePage> {
        let (skip, limit) = normalize_window(skip, limit)?;
        // 查询当前页与总数
        let items = store.list(skip, limit).await?;
        let total_count = store.count().await?;
        Ok(WorkspacePage {
            items,
            skip,
            limit,
            total_count,
        })
    }

    pub async fn update(
        store: &dyn WorkspaceStore,
        workspace_id: Uuid,
        req: UpdateWorkspaceRequest,
    ) -> AppResult<Workspace> {
        validate_update_workspace(&req)?;

        // 没有任何字段需要修改时直接返回当前记录
        if req.is_empty() {
            return Self::get(store, workspace_id).await;
        }

        let changes = WorkspaceChanges {
            name: req.name.map(|n| n.trim().to_string()),
            description: req.description,
            icon: req.icon,
            color: req.color,
            state: req.state,
            updated_at: Some(Utc::now()),
        };

        let updated = store
            .update(workspace_id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("workspace"))?;
        tracing::info!(workspace_id = %updated.id, "Workspace updated");
        Ok(updated)
    }

    pub async fn delete(store: &dyn WorkspaceStore, workspace_id: Uuid) -> AppResult<()> {
        if !store.delete(workspace_id).await? {
            return Err(AppError::not_found("workspace"));
        }
        tracing::info!(workspace_id = %workspace_id, "Workspace deleted");
        Ok(())
    }
}
