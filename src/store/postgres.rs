use async_trait::async_trait;
use diesel::PgConnection;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use super::{WorkspaceStore, name_conflict};
use crate::db::DbPool;
use crate::db::models::workspace::{NewWorkspace, Workspace, WorkspaceChanges};
use crate::db::repositories::WorkspacesRepo;
use crate::error::{AppError, AppResult};

/// 基于 Diesel 的存储，查询是阻塞的，统一放到 blocking 线程池执行
#[derive(Clone)]
pub struct PgWorkspaceStore {
    pool: DbPool,
}

impl PgWorkspaceStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn with_conn<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await
        .map_err(|e| AppError::internal(format!("Database task failed: {}", e)))?
    }
}

fn map_write_error(err: DieselError) -> AppError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => name_conflict(),
        other => AppError::Database(other),
    }
}

#[async_trait]
impl WorkspaceStore for PgWorkspaceStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, new_ws: NewWorkspace) -> AppResult<Workspace> {
        self.with_conn(move |conn| WorkspacesRepo::insert(conn, &new_ws).map_err(map_write_error))
            .await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Workspace>> {
        self.with_conn(move |conn| Ok(WorkspacesRepo::find_by_id(conn, id)?))
            .await
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<Vec<Workspace>> {
        self.with_conn(move |conn| Ok(WorkspacesRepo::list(conn, offset, limit)?))
            .await
    }

    async fn count(&self) -> AppResult<i64> {
        self.with_conn(|conn| Ok(WorkspacesRepo::count(conn)?)).await
    }

    async fn update(&self, id: Uuid, changes: WorkspaceChanges) -> AppResult<Option<Workspace>> {
        self.with_conn(move |conn| {
            WorkspacesRepo::update_fields(conn, id, &changes).map_err(map_write_error)
        })
        .await
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        self.with_conn(move |conn| Ok(WorkspacesRepo::delete_by_id(conn, id)? > 0))
            .await
    }

    async fn ping(&self) -> AppResult<()> {
        self.with_conn(|conn| Ok(WorkspacesRepo::ping(conn)?)).await
    }
}
