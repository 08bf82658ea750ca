pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod services;
pub mod store;
pub mod validation;

use crate::config::Config;
use crate::store::SharedStore;
use axum::Router;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: SharedStore, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// 完整应用：路由 + CORS + 请求追踪
pub fn build_app(state: AppState) -> Router {
    let cors = middleware::cors_layer(&state.config);
    routes::create_router(Arc::new(state))
        .layer(cors)
        .layer(axum::middleware::from_fn(
            middleware::request_tracking_middleware,
        ))
}

/// `RUST_LOG` wins over `LOG_LEVEL` when both are set.
pub fn init_tracing(config: &Config) {
    let logging = config.logging();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .init();
        }
    }
}
