//! 注册表构建器 - 根据配置注册各渠道渲染器

use std::sync::Arc;

use tracing::{info, warn};

use super::decoder::ChangeValueDecoder;
use super::default::DefaultRenderer;
use super::markdown::{MarkdownLayout, MarkdownRenderer};
use super::mention::MentionStyle;
use super::registry::FormatterRegistry;
use crate::config::{ChannelConfig, NotifierConfig};

/// 注册表构建器
pub struct RegistryBuilder {
    unset_marker: Option<String>,
    mentioned_label: Option<String>,
    channels: Vec<ChannelConfig>,
}

impl RegistryBuilder {
    /// 不含任何渠道的构建器
    pub fn new() -> Self {
        Self {
            unset_marker: None,
            mentioned_label: None,
            channels: Vec::new(),
        }
    }

    /// 从配置创建
    pub fn from_config(config: NotifierConfig) -> Self {
        Self {
            unset_marker: config.unset_marker,
            mentioned_label: config.mentioned_label,
            channels: config.channels,
        }
    }

    /// 设置占位符
    pub fn unset_marker(mut self, marker: impl Into<String>) -> Self {
        self.unset_marker = Some(marker.into());
        self
    }

    /// 设置提及标签
    pub fn mentioned_label(mut self, label: impl Into<String>) -> Self {
        self.mentioned_label = Some(label.into());
        self
    }

    /// 添加渠道
    pub fn channel(
        mut self,
        name: impl Into<String>,
        layout: MarkdownLayout,
        mention: MentionStyle,
    ) -> Self {
        self.channels.push(ChannelConfig {
            name: name.into(),
            layout,
            mention,
        });
        self
    }

    fn decoder(&self, mention: MentionStyle) -> ChangeValueDecoder {
        let mut decoder = ChangeValueDecoder::new(mention);
        if let Some(marker) = &self.unset_marker {
            decoder = decoder.with_unset_marker(marker.clone());
        }
        if let Some(label) = &self.mentioned_label {
            decoder = decoder.with_mentioned_label(label.clone());
        }
        decoder
    }

    /// 构建 FormatterRegistry
    pub fn build(self) -> FormatterRegistry {
        let fallback = DefaultRenderer::with_decoder(self.decoder(MentionStyle::PlainName));
        let mut registry = FormatterRegistry::new().with_fallback(fallback);

        for config in &self.channels {
            let renderer = MarkdownRenderer::new(config.layout, self.decoder(config.mention));
            if registry.register(config.name.clone(), Arc::new(renderer)) {
                info!(
                    channel = %config.name,
                    layout = %config.layout,
                    mention = %config.mention,
                    "Registered channel renderer"
                );
            } else {
                warn!(layout = %config.layout, "Ignoring channel renderer with empty name");
            }
        }

        registry
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{Change, WebhookPayload};
    use serde_json::json;

    fn payload() -> WebhookPayload {
        let mut payload = WebhookPayload::default();
        payload.issue.summary = "Fix bug".to_string();
        payload.changes = vec![Change::new("State", None, Some(json!({"name": "Open"})))];
        payload
    }

    #[test]
    fn test_default_config_matches_builtin_channels() {
        let registry = RegistryBuilder::from_config(NotifierConfig::default()).build();
        let builtin = FormatterRegistry::with_builtin_channels();
        assert_eq!(registry.channel_names(), builtin.channel_names());
        for channel in ["telegram", "vkteams", "logger"] {
            assert_eq!(registry.format(&payload(), channel), builtin.format(&payload(), channel));
        }
    }

    #[test]
    fn test_custom_marker_reaches_all_renderers() {
        let registry = RegistryBuilder::new()
            .unset_marker("n/a")
            .channel("telegram", MarkdownLayout::Inline, MentionStyle::LoginTag)
            .build();
        assert!(registry.format(&payload(), "telegram").contains("*📊 Состояние:* n/a → Open"));
        assert!(registry.format(&payload(), "logger").contains("Состояние: n/a → Open"));
    }

    #[test]
    fn test_empty_channel_name_skipped() {
        let registry = RegistryBuilder::new()
            .channel("", MarkdownLayout::Summary, MentionStyle::LoginTag)
            .channel("vkteams", MarkdownLayout::Summary, MentionStyle::EmailBracketTag)
            .build();
        assert_eq!(registry.channel_names(), vec!["vkteams"]);
    }

    #[test]
    fn test_duplicate_channel_last_wins() {
        let registry = RegistryBuilder::new()
            .channel("telegram", MarkdownLayout::Inline, MentionStyle::LoginTag)
            .channel("telegram", MarkdownLayout::Summary, MentionStyle::LoginTag)
            .build();
        assert_eq!(registry.channel_count(), 1);
        // 重复渠道只列出一次
        assert_eq!(registry.channel_names(), vec!["telegram"]);
        assert!(registry
            .format(&payload(), "telegram")
            .starts_with("*📊 Изменен статус задачи*\n\n*📁"));
        assert!(!registry.format(&payload(), "telegram").contains("→"));
    }
}
