//! 工作空间存储后端
//!
//! 服务层只依赖 [`WorkspaceStore`]，具体后端在启动时根据配置确定。

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::Config;
use crate::db::models::api::error_codes;
use crate::db::models::workspace::{NewWorkspace, Workspace, WorkspaceChanges};
use crate::error::{AppError, AppResult};

pub use memory::MemoryWorkspaceStore;
pub use postgres::PgWorkspaceStore;

#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    /// 健康检查中显示的后端名称
    fn backend(&self) -> &'static str;

    /// 插入工作空间，名称已存在时返回冲突错误
    async fn insert(&self, new_ws: NewWorkspace) -> AppResult<Workspace>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Workspace>>;

    /// 按 `created_at` 倒序、`id` 升序返回一页数据
    async fn list(&self, offset: i64, limit: i64) -> AppResult<Vec<Workspace>>;

    async fn count(&self) -> AppResult<i64>;

    /// 应用变更并返回新记录；id 不存在时返回 `None`
    /// 改名与其他工作空间重复时返回冲突错误
    async fn update(&self, id: Uuid, changes: WorkspaceChanges) -> AppResult<Option<Workspace>>;

    /// 返回是否删除了记录
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    async fn ping(&self) -> AppResult<()>;
}

pub type SharedStore = Arc<dyn WorkspaceStore>;

/// 设置了 `DATABASE_URL` 时使用 PostgreSQL，否则使用内存存储
pub fn from_config(config: &Config) -> AppResult<SharedStore> {
    match config.database() {
        Some(db) => {
            let pool = crate::db::build_pool(&db)?;
            tracing::info!(
                max_connections = db.max_connections,
                min_connections = db.min_connections,
                "Using PostgreSQL workspace store"
            );
            Ok(Arc::new(PgWorkspaceStore::new(pool)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, workspaces are kept in memory only");
            Ok(Arc::new(MemoryWorkspaceStore::new()))
        }
    }
}

pub(crate) fn name_conflict() -> AppError {
    AppError::conflict_with_code(
        "Workspace with this name already exists",
        Some("name".into()),
        error_codes::WORKSPACE_NAME_EXISTS,
    )
}
