//! 变更值解码 - 把 `oldValue` / `newValue` 的原始 JSON 按字段转成显示文本
//!
//! 解码从不失败：无法解析的值降级为占位符，保证一个坏字段不影响整条消息。

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::extract::{field, field_display, msg, user_display};
use super::mention::MentionStyle;
use crate::payload::{CommentValue, FieldValue, UserRef};

/// 评论中已被转义、需要还原的序列
const UNESCAPE_PAIRS: &[(&str, &str)] = &[
    ("\\*", "*"),
    ("\\~", "~"),
    ("\\`", "`"),
    ("\\>", ">"),
    ("\\|", "|"),
];

/// 变更值解码器
///
/// 各渠道之间只有提及格式不同，因此用 [`MentionStyle`] 参数化，而不是每个渠道一份。
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeValueDecoder {
    mention: MentionStyle,
    unset_marker: String,
    mentioned_label: String,
}

impl ChangeValueDecoder {
    pub fn new(mention: MentionStyle) -> Self {
        Self {
            mention,
            unset_marker: msg::UNSET.to_string(),
            mentioned_label: msg::MENTIONED.to_string(),
        }
    }

    /// 设置占位符
    pub fn with_unset_marker(mut self, marker: impl Into<String>) -> Self {
        self.unset_marker = marker.into();
        self
    }

    /// 设置提及后缀标签
    pub fn with_mentioned_label(mut self, label: impl Into<String>) -> Self {
        self.mentioned_label = label.into();
        self
    }

    pub fn mention_style(&self) -> MentionStyle {
        self.mention
    }

    pub fn unset_marker(&self) -> &str {
        &self.unset_marker
    }

    /// 解码 payload 中已解析的值（`None` 表示缺失或 `null`）
    pub fn decode(&self, value: Option<&Value>, field_tag: &str) -> String {
        match value {
            None | Some(Value::Null) => self.unset_marker.clone(),
            Some(value) => self.decode_value(value, field_tag),
        }
    }

    /// 解码原始 JSON 文本
    pub fn decode_raw(&self, raw: &str, field_tag: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return self.unset_marker.clone();
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => self.decode(Some(&value), field_tag),
            Err(e) => {
                debug!(field = field_tag, error = %e, "Change value is not valid JSON");
                self.unset_marker.clone()
            }
        }
    }

    fn decode_value(&self, value: &Value, field_tag: &str) -> String {
        let decoded = match field_tag {
            // 结构化字段只接受对象，数组不按位置填充字段
            field::STATE | field::PRIORITY | field::ASSIGNEE | field::COMMENT
                if !value.is_object() =>
            {
                debug!(field = field_tag, "Change value is not a JSON object");
                None
            }
            field::STATE | field::PRIORITY => self
                .decode_as::<FieldValue>(value, field_tag)
                .map(|v| field_display(Some(&v))),
            field::ASSIGNEE => self
                .decode_as::<UserRef>(value, field_tag)
                .map(|u| user_display(Some(&u))),
            field::COMMENT => self
                .decode_as::<CommentValue>(value, field_tag)
                .map(|c| self.render_comment(&c)),
            _ => Self::decode_generic(value),
        };
        decoded.unwrap_or_else(|| self.unset_marker.clone())
    }

    fn decode_as<T: DeserializeOwned>(&self, value: &Value, field_tag: &str) -> Option<T> {
        match serde_json::from_value::<T>(value.clone()) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                debug!(field = field_tag, error = %e, "Failed to decode change value");
                None
            }
        }
    }

    /// 未知字段：字符串原样返回（包括空串），对象取 name 或 value
    fn decode_generic(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Object(obj) => ["name", "value"]
                .iter()
                .filter_map(|key| obj.get(*key).and_then(Value::as_str))
                .find(|s| !s.is_empty())
                .map(String::from),
            _ => None,
        }
    }

    /// 渲染评论正文，附加提及用户
    pub fn render_comment(&self, comment: &CommentValue) -> String {
        let mut text = UNESCAPE_PAIRS
            .iter()
            .fold(comment.text.clone(), |acc, (needle, replaced)| {
                acc.replace(needle, replaced)
            });

        let mentions: Vec<String> = comment
            .mentioned_users
            .iter()
            .map(|user| self.mention.format(user))
            .filter(|m| !m.is_empty())
            .collect();

        if !mentions.is_empty() {
            text.push_str(self.mention.suffix_separator());
            text.push_str(&format!("[{}: {}]", self.mentioned_label, mentions.join(", ")));
        }

        text
    }
}
