//! Markdown 渲染器 - Telegram / VK Teams 共用
//!
//! 两种布局：
//! - `Summary`：每个变更一行标题，固定块显示当前值，有评论时附带变更列表
//! - `Inline`：只取最后一个变更做标题，变更值直接替换到固定块对应行
//!
//! 渠道之间的差异只在提及格式，由 [`ChangeValueDecoder`] 携带。

use super::decoder::ChangeValueDecoder;
use super::escape::{escape_link_text, escape_markdown, escape_url};
use super::extract::{
    change_header, field, field_display, field_icon, msg, translate_field_name, user_display,
};
use super::mention::MentionStyle;
use super::renderer::ChannelRenderer;
use crate::payload::{Change, WebhookPayload};

/// Markdown 消息布局
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkdownLayout {
    /// 标题逐条列出，固定块为当前值，附变更列表
    Summary,
    /// 最后一个变更做标题，变更值内联
    #[default]
    Inline,
}

impl std::fmt::Display for MarkdownLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl MarkdownLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkdownLayout::Summary => "summary",
            MarkdownLayout::Inline => "inline",
        }
    }
}

/// 内联布局中被替换的那一行
struct InlineChange {
    field: &'static str,
    header: String,
    value: String,
}

/// Markdown 渲染器
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    layout: MarkdownLayout,
    decoder: ChangeValueDecoder,
}

impl MarkdownRenderer {
    pub fn new(layout: MarkdownLayout, decoder: ChangeValueDecoder) -> Self {
        Self { layout, decoder }
    }

    /// Telegram：内联布局，fullName > email > @login
    pub fn telegram() -> Self {
        Self::new(
            MarkdownLayout::Inline,
            ChangeValueDecoder::new(MentionStyle::LoginTag),
        )
    }

    /// VK Teams：内联布局，@[email] > @login
    pub fn vkteams() -> Self {
        Self::new(
            MarkdownLayout::Inline,
            ChangeValueDecoder::new(MentionStyle::EmailBracketTag),
        )
    }

    fn header_line(field_tag: &str, header: &str) -> String {
        format!("*{} {}*", field_icon(field_tag), header)
    }

    fn line(icon: &str, label: &str, value: &str) -> String {
        format!("*{} {}:* {}", icon, label, value)
    }

    fn project_lines(payload: &WebhookPayload) -> Vec<String> {
        let issue = &payload.issue;
        let label = if issue.summary.is_empty() {
            &issue.url
        } else {
            &issue.summary
        };
        vec![
            Self::line(
                "📁",
                msg::PROJECT,
                &escape_markdown(&field_display(payload.project.as_ref())),
            ),
            Self::line("📋", msg::ISSUE, &escape_markdown(&issue.summary)),
            Self::line(
                "🔗",
                msg::LINK,
                &format!("[{}]({})", escape_link_text(label), escape_url(&issue.url)),
            ),
        ]
    }

    fn updater_line(payload: &WebhookPayload) -> String {
        Self::line(
            "✏️",
            msg::UPDATER,
            &escape_markdown(&user_display(payload.updater.as_ref())),
        )
    }

    fn old_to_new(&self, change: &Change) -> String {
        format!(
            "{} → {}",
            escape_markdown(&self.decoder.decode(change.old_value.as_ref(), &change.field)),
            escape_markdown(&self.decoder.decode(change.new_value.as_ref(), &change.field)),
        )
    }

    fn render_summary(&self, payload: &WebhookPayload) -> String {
        let issue = &payload.issue;
        let mut parts: Vec<String> = payload
            .changes
            .iter()
            .filter_map(|change| {
                change_header(&change.field).map(|h| Self::header_line(&change.field, h))
            })
            .collect();
        parts.push(String::new());

        parts.extend(Self::project_lines(payload));
        parts.push(Self::line(
            field_icon(field::STATE),
            msg::FIELD_STATE,
            &escape_markdown(&field_display(issue.state.as_ref())),
        ));
        parts.push(Self::line(
            field_icon(field::PRIORITY),
            msg::FIELD_PRIORITY,
            &escape_markdown(&field_display(issue.priority.as_ref())),
        ));
        parts.push(Self::line(
            field_icon(field::ASSIGNEE),
            msg::FIELD_ASSIGNEE,
            &escape_markdown(&user_display(issue.assignee.as_ref())),
        ));
        parts.push(Self::updater_line(payload));

        let has_comment = payload.changes.iter().any(|c| c.field == field::COMMENT);
        if has_comment {
            parts.push(String::new());
            parts.push(format!("🔄 *{}:*", msg::CHANGES));
            for change in &payload.changes {
                let icon = field_icon(&change.field);
                let name = translate_field_name(&change.field);
                if change.field == field::COMMENT {
                    let comment = self.decoder.decode(change.new_value.as_ref(), &change.field);
                    parts.push(format!("{} *{}:* {}", icon, name, escape_markdown(&comment)));
                } else {
                    parts.push(format!("{} *{}:* {}", icon, name, self.old_to_new(change)));
                }
            }
        }

        parts.join("\n")
    }

    /// 最后一个可识别的变更
    fn last_inline_change(&self, changes: &[Change]) -> Option<InlineChange> {
        changes.iter().rev().find_map(|change| {
            let tag = match change.field.as_str() {
                field::STATE => field::STATE,
                field::PRIORITY => field::PRIORITY,
                field::ASSIGNEE => field::ASSIGNEE,
                field::COMMENT => field::COMMENT,
                _ => return None,
            };
            let header = Self::header_line(tag, change_header(tag)?);
            let value = if tag == field::COMMENT {
                escape_markdown(&self.decoder.decode(change.new_value.as_ref(), tag))
            } else {
                self.old_to_new(change)
            };
            Some(InlineChange {
                field: tag,
                header,
                value,
            })
        })
    }

    fn render_inline(&self, payload: &WebhookPayload) -> String {
        let issue = &payload.issue;
        let changed = self.last_inline_change(&payload.changes);
        let changed_value = |tag: &str| {
            changed
                .as_ref()
                .filter(|c| c.field == tag)
                .map(|c| c.value.clone())
        };

        let mut parts = Vec::new();
        if let Some(c) = &changed {
            parts.push(c.header.clone());
        }
        parts.push(String::new());

        parts.extend(Self::project_lines(payload));
        parts.push(Self::line(
            field_icon(field::STATE),
            msg::FIELD_STATE,
            &changed_value(field::STATE)
                .unwrap_or_else(|| escape_markdown(&field_display(issue.state.as_ref()))),
        ));
        parts.push(Self::line(
            field_icon(field::PRIORITY),
            msg::FIELD_PRIORITY,
            &changed_value(field::PRIORITY)
                .unwrap_or_else(|| escape_markdown(&field_display(issue.priority.as_ref()))),
        ));
        let assignee = changed_value(field::ASSIGNEE).unwrap_or_else(|| {
            let mention = issue
                .assignee
                .as_ref()
                .map(|user| self.decoder.mention_style().format(user))
                .unwrap_or_default();
            escape_markdown(&mention)
        });
        parts.push(Self::line(
            field_icon(field::ASSIGNEE),
            msg::FIELD_ASSIGNEE,
            &assignee,
        ));
        parts.push(Self::updater_line(payload));

        if let Some(comment) = changed_value(field::COMMENT) {
            parts.push(String::new());
            parts.push(Self::line(
                field_icon(field::COMMENT),
                msg::FIELD_COMMENT,
                &comment,
            ));
        }

        parts.join("\n")
    }
}

impl ChannelRenderer for MarkdownRenderer {
    fn render(&self, payload: &WebhookPayload) -> String {
        match self.layout {
            MarkdownLayout::Summary => self.render_summary(payload),
            MarkdownLayout::Inline => self.render_inline(payload),
        }
    }
}
