use crate::db::models::workspace::{CreateWorkspaceRequest, UpdateWorkspaceRequest};
use crate::error::AppError;
use crate::validation::validate_request;

pub fn validate_create_workspace(req: &CreateWorkspaceRequest) -> Result<(), AppError> {
    validate_request(req)
}

pub fn validate_update_workspace(req: &UpdateWorkspaceRequest) -> Result<(), AppError> {
    validate_request(req)
}

/// 规范化分页参数：`skip` 默认 0，`limit` 默认 100 且不超过 100
pub fn normalize_window(skip: Option<i64>, limit: Option<i64>) -> Result<(i64, i64), AppError> {
    let skip = skip.unwrap_or(0);
    let limit = limit.unwrap_or(MAX_PAGE_SIZE);
    if skip < 0 {
        return Err(AppError::validation("skip must be >= 0"));
    }
    if limit < 1 {
        return Err(AppError::validation("limit must be >= 1"));
    }
    Ok((skip, limit.min(MAX_PAGE_SIZE)))
}

pub const MAX_PAGE_SIZE: i64 = 100;
