//! Webhook payload 模块 - YouTrack webhook 事件的数据结构
//!
//! Payload 格式：
//! ```json
//! {
//!   "project": { "name": "Proj", "presentation": "Project" },
//!   "issue": {
//!     "summary": "Fix bug",
//!     "url": "https://youtrack.example.com/issue/PROJ-1",
//!     "state": { "name": "Open" },
//!     "priority": { "name": "Major" },
//!     "assignee": { "fullName": "Ivan", "login": "ivan", "email": "ivan@example.com" }
//!   },
//!   "updater": { "login": "bob" },
//!   "changes": [
//!     { "field": "State", "oldValue": { "name": "Open" }, "newValue": { "name": "Fixed" } }
//!   ]
//! }
//! ```
//!
//! `oldValue` / `newValue` 的结构取决于 `field`，这里保留为原始 JSON，
//! 由 [`crate::notification::ChangeValueDecoder`] 按字段解码。

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Webhook 事件（一次请求对应一个）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub project: Option<FieldValue>,
    pub issue: Issue,
    #[serde(default)]
    pub updater: Option<UserRef>,
    /// 变更列表，顺序即事件中的顺序
    #[serde(default, deserialize_with = "null_as_default")]
    pub changes: Vec<Change>,
}

impl WebhookPayload {
    /// 项目名（用于日志），没有时返回空字符串
    pub fn project_name(&self) -> &str {
        self.project
            .as_ref()
            .and_then(|p| p.name.as_deref())
            .unwrap_or("")
    }
}

/// 任务
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub state: Option<FieldValue>,
    #[serde(default)]
    pub priority: Option<FieldValue>,
    #[serde(default)]
    pub assignee: Option<UserRef>,
}

/// 字段值（State、Priority、Project）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub presentation: Option<String>,
}

impl FieldValue {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            presentation: None,
        }
    }

    pub fn with_presentation(mut self, presentation: impl Into<String>) -> Self {
        self.presentation = Some(presentation.into());
        self
    }
}

/// 用户引用
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(default, rename = "fullName")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserRef {
    pub fn with_login(login: impl Into<String>) -> Self {
        Self {
            login: Some(login.into()),
            ..Default::default()
        }
    }

    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// 单个字段变更
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Change {
    /// 字段标签: State / Priority / Assignee / Comment / 其他
    #[serde(default, deserialize_with = "null_as_default")]
    pub field: String,
    #[serde(default, rename = "oldValue")]
    pub old_value: Option<serde_json::Value>,
    #[serde(default, rename = "newValue")]
    pub new_value: Option<serde_json::Value>,
}

impl Change {
    pub fn new(
        field: impl Into<String>,
        old_value: Option<serde_json::Value>,
        new_value: Option<serde_json::Value>,
    ) -> Self {
        Self {
            field: field.into(),
            old_value,
            new_value,
        }
    }
}

/// 评论变更的值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentValue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, rename = "mentionedUsers", deserialize_with = "null_as_default")]
    pub mentioned_users: Vec<UserRef>,
}

/// `null` 按缺省值处理（YouTrack 会把空列表、空字符串写成 null）
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 解析 webhook 请求体
pub fn parse_payload(body: &[u8]) -> Result<WebhookPayload> {
    serde_json::from_slice(body).context("Failed to parse webhook payload")
}
