use axum::http::{HeaderName, HeaderValue};
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::middleware::REQUEST_ID_HEADER;

/// 根据 `CORS_ORIGINS` 构建跨域中间件
pub fn cors_layer(config: &Config) -> CorsLayer {
    let server = config.server();
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)]);

    if server.allows_any_origin() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    cors.allow_origin(origins)
}
