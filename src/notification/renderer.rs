//! 渲染器 trait 定义

use crate::payload::WebhookPayload;

/// 渠道名称
pub mod channel {
    pub const LOGGER: &str = "logger";
    pub const TELEGRAM: &str = "telegram";
    pub const VKTEAMS: &str = "vkteams";
}

/// 渠道渲染器：把 payload 转成该渠道的消息正文
///
/// 渲染是纯函数，同一 payload 多次渲染结果相同。
pub trait ChannelRenderer: Send + Sync {
    fn render(&self, payload: &WebhookPayload) -> String;
}

impl<F> ChannelRenderer for F
where
    F: Fn(&WebhookPayload) -> String + Send + Sync,
{
    fn render(&self, payload: &WebhookPayload) -> String {
        self(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_renderer() {
        let renderer = |payload: &WebhookPayload| format!("issue: {}", payload.issue.summary);
        let mut payload = WebhookPayload::default();
        payload.issue.summary = "Fix bug".to_string();
        assert_eq!(renderer.render(&payload), "issue: Fix bug");
    }
}
