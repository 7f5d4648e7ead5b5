//! Issue Notifier - 把 YouTrack webhook 事件渲染成各渠道的通知消息

pub mod config;
pub mod notification;
pub mod payload;

pub use config::{ChannelConfig, NotifierConfig};
pub use notification::{
    channel, ChangeValueDecoder, ChannelRenderer, DefaultRenderer, FormatterRegistry,
    MarkdownLayout, MarkdownRenderer, MentionStyle, RegistryBuilder,
};
pub use payload::{parse_payload, Change, CommentValue, FieldValue, Issue, UserRef, WebhookPayload};
