//! 默认渲染器 - 纯文本，不转义

use super::decoder::ChangeValueDecoder;
use super::extract::{field, field_display, msg, translate_field_name, user_display};
use super::mention::MentionStyle;
use super::renderer::ChannelRenderer;
use crate::payload::{Change, WebhookPayload};

/// 纯文本渲染器（logger 等没有专门格式的渠道）
#[derive(Debug, Clone)]
pub struct DefaultRenderer {
    decoder: ChangeValueDecoder,
}

impl DefaultRenderer {
    pub fn new() -> Self {
        Self {
            decoder: ChangeValueDecoder::new(MentionStyle::PlainName),
        }
    }

    /// 使用自定义解码器（占位符、标签）
    pub fn with_decoder(decoder: ChangeValueDecoder) -> Self {
        Self { decoder }
    }

    /// 所有变更合并为一行，以 "; " 分隔
    fn summarize_changes(&self, changes: &[Change]) -> String {
        changes
            .iter()
            .map(|change| {
                let name = translate_field_name(&change.field);
                let new_value = self.decoder.decode(change.new_value.as_ref(), &change.field);
                if change.field == field::COMMENT {
                    format!("{}: {}", name, new_value)
                } else {
                    let old_value = self.decoder.decode(change.old_value.as_ref(), &change.field);
                    format!("{}: {} → {}", name, old_value, new_value)
                }
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Default for DefaultRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelRenderer for DefaultRenderer {
    fn render(&self, payload: &WebhookPayload) -> String {
        let issue = &payload.issue;
        let lines = [
            String::new(),
            format!("{}: {}", msg::PROJECT, field_display(payload.project.as_ref())),
            format!("{}: {}", msg::ISSUE, issue.summary),
            format!("{}: {}", msg::LINK, issue.url),
            format!("{}: {}", msg::STATUS, field_display(issue.state.as_ref())),
            format!("{}: {}", msg::FIELD_PRIORITY, field_display(issue.priority.as_ref())),
            format!("{}: {}", msg::ASSIGNEE, user_display(issue.assignee.as_ref())),
            format!("{}: {}", msg::UPDATER, user_display(payload.updater.as_ref())),
            format!("{}: {}", msg::CHANGES, self.summarize_changes(&payload.changes)),
        ];
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{FieldValue, Issue, UserRef};
    use serde_json::json;

    fn payload(changes: Vec<Change>) -> WebhookPayload {
        WebhookPayload {
            project: Some(FieldValue::named("Proj")),
            issue: Issue {
                summary: "Fix bug".to_string(),
                url: "https://x/1".to_string(),
                ..Default::default()
            },
            updater: None,
            changes,
        }
    }

    #[test]
    fn test_render_without_changes() {
        let output = DefaultRenderer::new().render(&payload(vec![]));
        assert_eq!(
            output,
            "\nПроект: Proj\nЗадача: Fix bug\nСсылка: https://x/1\nСтатус: \nПриоритет: \nИсполнитель: \nАвтор изменения: \nИзменения: "
        );
    }

    #[test]
    fn test_render_current_values_unescaped() {
        let mut p = payload(vec![]);
        p.issue.summary = "Fix *bold* [link]".to_string();
        p.issue.state = Some(FieldValue::named("Open").with_presentation("Открыта"));
        p.issue.priority = Some(FieldValue::named("Major"));
        p.issue.assignee = Some(UserRef::with_login("ivan").full_name("Ivan Petrov"));
        p.updater = Some(UserRef::with_login("bob"));

        let output = DefaultRenderer::new().render(&p);
        assert!(output.contains("Задача: Fix *bold* [link]"));
        assert!(output.contains("Статус: Открыта"));
        assert!(output.contains("Приоритет: Major"));
        assert!(output.contains("Исполнитель: Ivan Petrov"));
        assert!(output.contains("Автор изменения: bob"));
    }

    #[test]
    fn test_render_changes_joined_in_order() {
        let changes = vec![
            Change::new(
                "State",
                Some(json!({"name": "To Do", "presentation": "К выполнению"})),
                Some(json!({"name": "In Progress", "presentation": "В работе"})),
            ),
            Change::new("Assignee", None, Some(json!({"login": "ivan"}))),
            Change::new(
                "Comment",
                None,
                Some(json!({"text": "Hi", "mentionedUsers": [{"fullName": "Bob", "login": "bob"}]})),
            ),
            Change::new("Estimation", Some(json!("1d")), Some(json!({"value": "2d"}))),
        ];
        let output = DefaultRenderer::new().render(&payload(changes));
        assert!(output.ends_with(
            "Изменения: Состояние: К выполнению → В работе; Назначена: (Не установлен) → ivan; Комментарий: Hi [Упомянуты: Bob]; Estimation: 1d → 2d"
        ));
    }
}
