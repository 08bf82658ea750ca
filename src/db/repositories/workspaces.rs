use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::workspace::{NewWorkspace, Workspace, WorkspaceChanges};

pub struct WorkspacesRepo;

impl WorkspacesRepo {
    pub fn insert(conn: &mut PgConnection, new_ws: &NewWorkspace) -> QueryResult<Workspace> {
        diesel::insert_into(crate::schema::workspaces::table)
            .values(new_ws)
            .returning(Workspace::as_returning())
            .get_result(conn)
    }

    pub fn find_by_id(conn: &mut PgConnection, workspace_id: Uuid) -> QueryResult<Option<Workspace>> {
        use crate::schema::workspaces::dsl::*;
        workspaces
            .filter(id.eq(workspace_id))
            .select(Workspace::as_select())
            .first(conn)
            .optional()
    }

    pub fn list(conn: &mut PgConnection, offset: i64, limit: i64) -> QueryResult<Vec<Workspace>> {
        use crate::schema::workspaces::dsl::*;
        workspaces
            .select(Workspace::as_select())
            .order((created_at.desc(), id.asc()))
            .offset(offset)
            .limit(limit)
            .load(conn)
    }

    pub fn count(conn: &mut PgConnection) -> QueryResult<i64> {
        use crate::schema::workspaces::dsl::*;
        workspaces.count().get_result(conn)
    }

    pub fn update_fields(
        conn: &mut PgConnection,
        workspace_id: Uuid,
        changes: &WorkspaceChanges,
    ) -> QueryResult<Option<Workspace>> {
        use crate::schema::workspaces::dsl as w;
        diesel::update(w::workspaces.filter(w::id.eq(workspace_id)))
            .set(changes)
            .returning(Workspace::as_returning())
            .get_result(conn)
            .optional()
    }

    pub fn delete_by_id(conn: &mut PgConnection, workspace_id: Uuid) -> QueryResult<usize> {
        use crate::schema::workspaces::dsl::*;
        diesel::delete(workspaces.filter(id.eq(workspace_id))).execute(conn)
    }

    pub fn ping(conn: &mut PgConnection) -> QueryResult<()> {
        diesel::sql_query("SELECT 1").execute(conn).map(|_| ())
    }
}
