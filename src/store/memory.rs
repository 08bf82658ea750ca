use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{WorkspaceStore, name_conflict};
use crate::db::models::workspace::{NewWorkspace, Workspace, WorkspaceChanges};
use crate::error::AppResult;

/// 进程内存储，重启后数据丢失
#[derive(Default)]
pub struct MemoryWorkspaceStore {
    workspaces: RwLock<HashMap<Uuid, Workspace>>,
}

impl MemoryWorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn name_taken(workspaces: &HashMap<Uuid, Workspace>, name: &str, except: Option<Uuid>) -> bool {
    workspaces
        .values()
        .any(|ws| ws.name == name && Some(ws.id) != except)
}

#[async_trait]
impl WorkspaceStore for MemoryWorkspaceStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, new_ws: NewWorkspace) -> AppResult<Workspace> {
        let mut workspaces = self.workspaces.write().await;
        if name_taken(&workspaces, &new_ws.name, None) {
            return Err(name_conflict());
        }
        let workspace = new_ws.into_workspace();
        workspaces.insert(workspace.id, workspace.clone());
        Ok(workspace)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Workspace>> {
        Ok(self.workspaces.read().await.get(&id).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<Vec<Workspace>> {
        let workspaces = self.workspaces.read().await;
        let mut all: Vec<&Workspace> = workspaces.values().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(all
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.workspaces.read().await.len() as i64)
    }

    async fn update(&self, id: Uuid, changes: WorkspaceChanges) -> AppResult<Option<Workspace>> {
        let mut workspaces = self.workspaces.write().await;
        // 先确认目标存在，未知 id 一律返回 None（与 PostgreSQL 行为一致）
        if !workspaces.contains_key(&id) {
            return Ok(None);
        }
        if let Some(name) = changes.name.as_deref() {
            if name_taken(&workspaces, name, Some(id)) {
                return Err(name_conflict());
            }
        }
        let Some(workspace) = workspaces.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply_to(workspace);
        Ok(Some(workspace.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.workspaces.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
