//! 两种存储后端共用同一组行为检查。
//! PostgreSQL 部分需要设置 DATABASE_URL，未设置时跳过。

use chrono::{Duration, Utc};
use diesel::connection::SimpleConnection;
use serde_json::json;
use trajan::{
    config::DatabaseConfig,
    db::{build_pool, models::workspace::{NewWorkspace, WorkspaceChanges}},
    error::AppError,
    store::{MemoryWorkspaceStore, PgWorkspaceStore, WorkspaceStore},
};
use uuid::Uuid;

const SCHEMA_SQL: &str = include_str!("../migrations/2025-01-01-000000_create_workspaces/up.sql");

/// 每次运行使用唯一名称，避免与库中已有数据冲突
fn unique(name: &str) -> String {
    format!("{}-{}", name, Uuid::new_v4())
}

// created_at 放到远期，保证测试数据排在最前
fn new_ws(name: &str, offset_secs: i64) -> NewWorkspace {
    let at = Utc::now() + Duration::days(36500) + Duration::seconds(offset_secs);
    NewWorkspace {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: Some("desc".into()),
        icon: Some("box".into()),
        color: None,
        state: json!({ "k": 1 }),
        created_at: at,
        updated_at: at,
    }
}

async fn check_store(store: &dyn WorkspaceStore) {
    store.ping().await.unwrap();
    let before = store.count().await.unwrap();

    // 插入与读取
    let a = store.insert(new_ws(&unique("a"), 1)).await.unwrap();
    let found = store.find_by_id(a.id).await.unwrap().unwrap();
    assert_eq!(found.id, a.id);
    assert_eq!(found.name, a.name);
    assert_eq!(found.state, json!({ "k": 1 }));
    assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());

    // 重名冲突
    let err = store.insert(new_ws(&a.name, 2)).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));

    let b = store.insert(new_ws(&unique("b"), 2)).await.unwrap();
    let c = store.insert(new_ws(&unique("c"), 3)).await.unwrap();
    assert_eq!(store.count().await.unwrap(), before + 3);

    // 列表：created_at 倒序
    let top: Vec<Uuid> = store.list(0, 3).await.unwrap().into_iter().map(|w| w.id).collect();
    assert_eq!(top, vec![c.id, b.id, a.id]);
    let second: Vec<Uuid> = store.list(1, 1).await.unwrap().into_iter().map(|w| w.id).collect();
    assert_eq!(second, vec![b.id]);

    // Some(None) 清空可空列，None 保持不变
    let updated = store
        .update(
            a.id,
            WorkspaceChanges {
                description: Some(None),
                color: Some(Some("teal".into())),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.description, None);
    assert_eq!(updated.color.as_deref(), Some("teal"));
    assert_eq!(updated.icon.as_deref(), Some("box"));
    assert_eq!(updated.name, a.name);

    // 改名冲突
    let err = store
        .update(a.id, WorkspaceChanges { name: Some(b.name.clone()), ..Default::default() })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));

    // 未知 id：即使名称已被占用也返回 None
    let missing = store
        .update(Uuid::new_v4(), WorkspaceChanges { name: Some(b.name.clone()), ..Default::default() })
        .await
        .unwrap();
    assert!(missing.is_none());

    // 删除
    for ws in [&a, &b, &c] {
        assert!(store.delete(ws.id).await.unwrap());
        assert!(!store.delete(ws.id).await.unwrap());
        assert!(store.find_by_id(ws.id).await.unwrap().is_none());
    }
    assert_eq!(store.count().await.unwrap(), before);
}

#[tokio::test]
async fn memory_store_behaviour() {
    let store = MemoryWorkspaceStore::new();
    check_store(&store).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn postgres_store_behaviour() {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping PostgreSQL store checks");
        return;
    };

    let pool = build_pool(&DatabaseConfig {
        url,
        max_connections: 2,
        min_connections: 0,
        connection_timeout: 10,
    })
    .expect("connect to DATABASE_URL");
    pool.get()
        .expect("database connection")
        .batch_execute(SCHEMA_SQL)
        .expect("apply workspaces schema");

    let store = PgWorkspaceStore::new(pool);
    check_store(&store).await;
}
