use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::validation::rules::{
    COLOR_MAX_LEN, DESCRIPTION_MAX_LEN, ICON_MAX_LEN, validate_max_chars, validate_state_object,
    validate_workspace_name,
};

// 工作空间模型
#[derive(Queryable, Selectable, Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::workspaces)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Workspace {
    pub id: Uuid,
    #[schema(example = "payments-service")]
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    /// 不透明的状态数据，始终是 JSON 对象
    #[schema(value_type = Object)]
    pub state: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::workspaces)]
pub struct NewWorkspace {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub state: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewWorkspace {
    pub fn into_workspace(self) -> Workspace {
        Workspace {
            id: self.id,
            name: self.name,
            description: self.description,
            icon: self.icon,
            color: self.color,
            state: self.state,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// 部分更新的列变更：`None` 不修改，`Some(None)` 清空可空列
#[derive(AsChangeset, Clone, Debug, Default)]
#[diesel(table_name = crate::schema::workspaces)]
pub struct WorkspaceChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub icon: Option<Option<String>>,
    pub color: Option<Option<String>>,
    pub state: Option<serde_json::Value>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl WorkspaceChanges {
    pub fn apply_to(self, workspace: &mut Workspace) {
        if let Some(name) = self.name {
            workspace.name = name;
        }
        if let Some(description) = self.description {
            workspace.description = description;
        }
        if let Some(icon) = self.icon {
            workspace.icon = icon;
        }
        if let Some(color) = self.color {
            workspace.color = color;
        }
        if let Some(state) = self.state {
            workspace.state = state;
        }
        if let Some(updated_at) = self.updated_at {
            workspace.updated_at = updated_at;
        }
    }
}

// 工作空间 API DTO
#[derive(Deserialize, Serialize, Validate, ToSchema, Clone, Debug, Default)]
pub struct CreateWorkspaceRequest {
    #[validate(custom(function = "validate_workspace_name"))]
    #[schema(example = "payments-service")]
    pub name: String,
    #[validate(length(max = 2000, code = "too_long"))]
    pub description: Option<String>,
    #[validate(length(max = 100, code = "too_long"))]
    pub icon: Option<String>,
    #[validate(length(max = 50, code = "too_long"))]
    pub color: Option<String>,
    #[validate(custom(function = "validate_state_object"))]
    #[schema(value_type = Option<Object>)]
    pub state: Option<serde_json::Value>,
}

/// 更新工作空间请求
/// `description`、`icon`、`color` 显式传 `null` 表示清空，缺省则保持不变
#[derive(Deserialize, Serialize, ToSchema, Clone, Debug, Default)]
pub struct UpdateWorkspaceRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub icon: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub color: Option<Option<String>>,
    #[schema(value_type = Option<Object>)]
    pub state: Option<serde_json::Value>,
}

impl UpdateWorkspaceRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.icon.is_none()
            && self.color.is_none()
            && self.state.is_none()
    }
}

impl Validate for UpdateWorkspaceRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let mut check = |field: &'static str, result: Result<(), ValidationError>| {
            if let Err(err) = result {
                errors.add(field, err);
            }
        };

        if let Some(name) = &self.name {
            check("name", validate_workspace_name(name));
        }
        if let Some(Some(description)) = &self.description {
            check("description", validate_max_chars(description, DESCRIPTION_MAX_LEN));
        }
        if let Some(Some(icon)) = &self.icon {
            check("icon", validate_max_chars(icon, ICON_MAX_LEN));
        }
        if let Some(Some(color)) = &self.color {
            check("color", validate_max_chars(color, COLOR_MAX_LEN));
        }
        if let Some(state) = &self.state {
            check("state", validate_state_object(state));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Deserialize, utoipa::IntoParams, Clone, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct ListWorkspacesQuery {
    /// 跳过的记录数，默认 0
    pub skip: Option<i64>,
    /// 每页数量，默认 100，最大 100
    pub limit: Option<i64>,
}

// 区分显式 null 与缺省字段
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
