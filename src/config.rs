//! 渠道配置 - 每个渠道使用的布局和提及格式
//!
//! 配置文件格式（所有字段可选）：
//! ```json
//! {
//!   "unset_marker": "(Не установлен)",
//!   "mentioned_label": "Упомянуты",
//!   "channels": [
//!     { "name": "telegram", "layout": "inline", "mention": "login_tag" },
//!     { "name": "vkteams", "layout": "summary", "mention": "email_bracket_tag" }
//!   ]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::notification::channel;
use crate::notification::{MarkdownLayout, MentionStyle};

/// 单个渠道的渲染配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub name: String,
    #[serde(default)]
    pub layout: MarkdownLayout,
    pub mention: MentionStyle,
}

/// 渲染配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifierConfig {
    #[serde(default)]
    pub unset_marker: Option<String>,
    #[serde(default)]
    pub mentioned_label: Option<String>,
    #[serde(default = "default_channels")]
    pub channels: Vec<ChannelConfig>,
}

fn default_channels() -> Vec<ChannelConfig> {
    vec![
        ChannelConfig {
            name: channel::TELEGRAM.to_string(),
            layout: MarkdownLayout::Inline,
            mention: MentionStyle::LoginTag,
        },
        ChannelConfig {
            name: channel::VKTEAMS.to_string(),
            layout: MarkdownLayout::Inline,
            mention: MentionStyle::EmailBracketTag,
        },
    ]
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            unset_marker: None,
            mentioned_label: None,
            channels: default_channels(),
        }
    }
}

impl NotifierConfig {
    /// 默认配置文件路径: ~/.config/issue-notifier/channels.json
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| anyhow!("Cannot find config directory"))?;
        Ok(dir.join("issue-notifier").join("channels.json"))
    }

    /// 从 JSON 文件加载
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// 从 JSON 字符串解析
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// 查找渠道配置，同名时取最后一个（与注册顺序一致）
    pub fn channel(&self, name: &str) -> Option<&ChannelConfig> {
        self.channels.iter().rev().find(|c| c.name == name)
    }

    /// 加载配置；未指定路径时读取默认路径，文件不存在则使用内置配置
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let path = Self::default_path()?;
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using built-in channels");
            return Ok(Self::default());
        }
        Self::load(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NotifierConfig::default();
        assert!(config.unset_marker.is_none());
        assert_eq!(config.channels.len(), 2);
        assert_eq!(config.channels[0].name, "telegram");
        assert_eq!(config.channels[1].mention, MentionStyle::EmailBracketTag);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = NotifierConfig::from_json("{}").unwrap();
        assert_eq!(config, NotifierConfig::default());
    }

    #[test]
    fn test_parse_custom_config() {
        let config = NotifierConfig::from_json(
            r#"{
                "unset_marker": "-",
                "channels": [
                    {"name": "vkteams", "layout": "summary", "mention": "email_bracket_tag"},
                    {"name": "slack", "mention": "plain_name"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.unset_marker.as_deref(), Some("-"));
        assert!(config.mentioned_label.is_none());
        assert_eq!(config.channels[0].layout, MarkdownLayout::Summary);
        // layout 缺省为 inline
        assert_eq!(config.channels[1].layout, MarkdownLayout::Inline);
        assert_eq!(config.channels[1].mention, MentionStyle::PlainName);
    }

    #[test]
    fn test_channel_lookup_last_wins() {
        let config = NotifierConfig::from_json(
            r#"{"channels": [
                {"name": "telegram", "layout": "inline", "mention": "login_tag"},
                {"name": "telegram", "layout": "summary", "mention": "plain_name"}
            ]}"#,
        )
        .unwrap();
        let telegram = config.channel("telegram").unwrap();
        assert_eq!(telegram.layout, MarkdownLayout::Summary);
        assert_eq!(telegram.mention, MentionStyle::PlainName);
        assert!(config.channel("vkteams").is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_mention() {
        let result = NotifierConfig::from_json(
            r#"{"channels": [{"name": "x", "mention": "nickname"}]}"#,
        );
        assert!(result.is_err());
    }
}
