//! 值提取 - 从字段值和用户引用中取出可显示的字符串

use crate::payload::{FieldValue, UserRef};

/// 可追踪的字段标签
pub mod field {
    pub const ASSIGNEE: &str = "Assignee";
    pub const COMMENT: &str = "Comment";
    pub const PRIORITY: &str = "Priority";
    pub const STATE: &str = "State";
}

/// Notification message constants (Russian)
pub mod msg {
    /// 值为空或无法解析时的占位符
    pub const UNSET: &str = "(Не установлен)";
    /// 评论中提及用户的标签
    pub const MENTIONED: &str = "Упомянуты";

    // Field translations
    pub const FIELD_ASSIGNEE: &str = "Назначена";
    pub const FIELD_COMMENT: &str = "Комментарий";
    pub const FIELD_PRIORITY: &str = "Приоритет";
    pub const FIELD_STATE: &str = "Состояние";

    // Plain block labels
    pub const PROJECT: &str = "Проект";
    pub const ISSUE: &str = "Задача";
    pub const LINK: &str = "Ссылка";
    pub const STATUS: &str = "Статус";
    pub const ASSIGNEE: &str = "Исполнитель";
    pub const UPDATER: &str = "Автор изменения";
    pub const CHANGES: &str = "Изменения";

    // Headers
    pub const CHANGED_ASSIGNEE: &str = "Изменен исполнитель задачи";
    pub const ADDED_COMMENT: &str = "Добавлен комментарий";
    pub const CHANGED_PRIORITY: &str = "Изменен приоритет задачи";
    pub const CHANGED_STATE: &str = "Изменен статус задачи";
}

/// 字段值的显示文本：presentation > name > ""
pub fn field_display(field: Option<&FieldValue>) -> String {
    let Some(field) = field else {
        return String::new();
    };
    non_empty(&field.presentation)
        .or_else(|| non_empty(&field.name))
        .unwrap_or_default()
        .to_string()
}

/// 用户的显示名：fullName > login > ""
///
/// email 只用于部分渠道的提及，不参与显示名。
pub fn user_display(user: Option<&UserRef>) -> String {
    let Some(user) = user else {
        return String::new();
    };
    non_empty(&user.full_name)
        .or_else(|| non_empty(&user.login))
        .unwrap_or_default()
        .to_string()
}

/// 字段名翻译，未知字段原样返回
pub fn translate_field_name(tag: &str) -> &str {
    match tag {
        field::ASSIGNEE => msg::FIELD_ASSIGNEE,
        field::COMMENT => msg::FIELD_COMMENT,
        field::PRIORITY => msg::FIELD_PRIORITY,
        field::STATE => msg::FIELD_STATE,
        other => other,
    }
}

/// 字段图标
pub fn field_icon(tag: &str) -> &'static str {
    match tag {
        field::STATE => "📊",
        field::PRIORITY => "⚡",
        field::ASSIGNEE => "👤",
        field::COMMENT => "💬",
        _ => "📝",
    }
}

/// 变更头部文本（只有四个已知字段有）
pub fn change_header(tag: &str) -> Option<&'static str> {
    match tag {
        field::ASSIGNEE => Some(msg::CHANGED_ASSIGNEE),
        field::COMMENT => Some(msg::ADDED_COMMENT),
        field::PRIORITY => Some(msg::CHANGED_PRIORITY),
        field::STATE => Some(msg::CHANGED_STATE),
        _ => None,
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
