use serde::Serialize;

// 统一API响应格式
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,
    pub timestamp: String,
}

#[derive(Serialize, Default)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct Pagination {
    pub skip: i64,
    pub limit: i64,
    pub page: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// 根据 skip/limit 计算页码信息，`limit` 必须大于 0
    pub fn from_window(skip: i64, limit: i64, total_count: i64) -> Self {
        let total_pages = if total_count == 0 {
            0
        } else {
            (total_count + limit - 1) / limit
        };
        Self {
            skip,
            limit,
            page: skip / limit + 1,
            total_pages,
            has_next: skip + limit < total_count,
            has_prev: skip > 0,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    fn build(success: bool, code: u16, message: &str) -> Self {
        Self {
            success,
            code,
            message: message.to_string(),
            data: None,
            meta: None,
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn failure(code: u16, message: &str, error_code: &str, field: Option<String>) -> Self {
        Self {
            errors: Some(vec![ErrorDetail {
                field,
                code: error_code.to_string(),
                message: message.to_string(),
            }]),
            ..Self::build(false, code, message)
        }
    }

    pub fn success(data: T, message: &str) -> Self {
        Self {
            data: Some(data),
            ..Self::build(true, 200, message)
        }
    }

    pub fn success_with_meta(data: T, message: &str, meta: ResponseMeta) -> Self {
        Self {
            data: Some(data),
            meta: Some(meta),
            ..Self::build(true, 200, message)
        }
    }

    pub fn created(data: T, message: &str) -> Self {
        Self {
            data: Some(data),
            ..Self::build(true, 201, message)
        }
    }

    pub fn ok(message: &str) -> Self {
        Self::build(true, 200, message)
    }

    pub fn error(code: u16, message: &str, errors: Vec<ErrorDetail>) -> Self {
        Self {
            errors: Some(errors),
            ..Self::build(false, code, message)
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::failure(400, message, "BAD_REQUEST", None)
    }

    pub fn not_found(message: &str) -> Self {
        Self::failure(404, message, "NOT_FOUND", None)
    }

    pub fn conflict(message: &str, field: Option<String>, error_code: &str) -> Self {
        Self::failure(409, message, error_code, field)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::failure(500, message, "INTERNAL_ERROR", None)
    }
}

// 业务错误码
pub mod error_codes {
    pub const WORKSPACE_NAME_EXISTS: &str = "WORKSPACE_003";
}
