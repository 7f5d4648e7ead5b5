//! 格式化注册表 - 按渠道名选择渲染器

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::default::DefaultRenderer;
use super::markdown::MarkdownRenderer;
use super::renderer::{channel, ChannelRenderer};
use crate::payload::WebhookPayload;

/// 格式化注册表
///
/// 启动时注册一次，之后只读共享；未注册的渠道使用默认纯文本渲染。
pub struct FormatterRegistry {
    renderers: HashMap<String, Arc<dyn ChannelRenderer>>,
    fallback: DefaultRenderer,
}

impl FormatterRegistry {
    /// 创建空注册表（所有渠道都走默认渲染）
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
            fallback: DefaultRenderer::new(),
        }
    }

    /// 创建带 Telegram / VK Teams 渲染器的注册表
    pub fn with_builtin_channels() -> Self {
        let mut registry = Self::new();
        registry.register(channel::TELEGRAM, Arc::new(MarkdownRenderer::telegram()));
        registry.register(channel::VKTEAMS, Arc::new(MarkdownRenderer::vkteams()));
        registry
    }

    /// 设置默认渲染器
    pub fn with_fallback(mut self, fallback: DefaultRenderer) -> Self {
        self.fallback = fallback;
        self
    }

    /// 注册渠道渲染器，同名覆盖
    ///
    /// 渠道名为空时忽略并返回 false。
    pub fn register(
        &mut self,
        channel: impl Into<String>,
        renderer: Arc<dyn ChannelRenderer>,
    ) -> bool {
        let channel = channel.into();
        if channel.is_empty() {
            return false;
        }
        self.renderers.insert(channel, renderer);
        true
    }

    /// 为指定渠道格式化 payload
    pub fn format(&self, payload: &WebhookPayload, channel: &str) -> String {
        match self.renderers.get(channel) {
            Some(renderer) => {
                debug!(channel = %channel, project = payload.project_name(), "Rendering with channel renderer");
                renderer.render(payload)
            }
            None => {
                debug!(channel = %channel, project = payload.project_name(), "Rendering with default renderer");
                self.fallback.render(payload)
            }
        }
    }

    /// 是否注册了指定渠道
    pub fn contains(&self, channel: &str) -> bool {
        self.renderers.contains_key(channel)
    }

    /// 获取已注册的渠道数量
    pub fn channel_count(&self) -> usize {
        self.renderers.len()
    }

    /// 获取已注册的渠道名称（排序）
    pub fn channel_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
