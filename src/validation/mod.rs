pub mod workspace;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, rejection::JsonRejection},
    http::{Request, request::Parts},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::{db::models::api::ErrorDetail, error::AppError};

/// JSON 请求体提取器，拒绝时返回统一的 API 错误结构
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<axum::body::Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::MissingJsonContentType(_) => {
                    AppError::validation("Expected request with `Content-Type: application/json`")
                }
                JsonRejection::JsonDataError(err) => {
                    AppError::validation(format!("Invalid request body: {}", err.body_text()))
                }
                _ => AppError::validation("Invalid JSON format"),
            })?;

        Ok(JsonBody(value))
    }
}

/// 查询参数提取器，解析失败时同样返回统一的错误响应
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::validation(format!("Invalid query parameters: {}", rejection.body_text()))
            })?;

        Ok(QueryParams(value))
    }
}

/// 执行 `validator` 校验，失败时每个字段错误对应一条 detail
pub fn validate_request<T: Validate>(value: &T) -> Result<(), AppError> {
    value.validate().map_err(|errors| {
        let details = error_details(&errors);
        AppError::validation_with_details(
            format!("Validation failed with {} errors", details.len()),
            details,
        )
    })
}

pub fn error_details(errors: &ValidationErrors) -> Vec<ErrorDetail> {
    let mut details: Vec<ErrorDetail> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| ErrorDetail {
                field: Some(field.to_string()),
                code: error.code.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation failed for field: {}", field)),
            })
        })
        .collect();
    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}

/// 工作空间 DTO 共用的字段规则
pub mod rules {
    use std::borrow::Cow;
    use validator::ValidationError;

    pub const NAME_MAX_LEN: usize = 255;
    pub const DESCRIPTION_MAX_LEN: usize = 2000;
    pub const ICON_MAX_LEN: usize = 100;
    pub const COLOR_MAX_LEN: usize = 50;

    fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
        let mut err = ValidationError::new(code);
        err.message = Some(message.into());
        err
    }

    pub fn validate_workspace_name(name: &str) -> Result<(), ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(error("required", "Workspace name is required"));
        }
        if trimmed.chars().count() > NAME_MAX_LEN {
            return Err(error(
                "too_long",
                format!("Workspace name must be at most {} characters", NAME_MAX_LEN),
            ));
        }
        if trimmed.chars().any(char::is_control) {
            return Err(error(
                "invalid_characters",
                "Workspace name cannot contain control characters",
            ));
        }
        Ok(())
    }

    pub fn validate_max_chars(value: &str, max: usize) -> Result<(), ValidationError> {
        if value.chars().count() > max {
            return Err(error("too_long", format!("Must be at most {} characters", max)));
        }
        Ok(())
    }

    /// state 内容不透明，但必须是 JSON 对象
    pub fn validate_state_object(state: &serde_json::Value) -> Result<(), ValidationError> {
        if !state.is_object() {
            return Err(error("invalid_state", "Workspace state must be a JSON object"));
        }
        Ok(())
    }
}
