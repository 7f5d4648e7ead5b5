//! 通知渲染层 - 把 webhook 事件渲染成各渠道的消息正文
//!
//! # 设计目标
//! 1. 统一接口：所有渠道实现 `ChannelRenderer` trait
//! 2. 参数化：Telegram / VK Teams 共用一个 Markdown 渲染器，只在提及格式和布局上不同
//! 3. 永不失败：无法解析的变更值降级为占位符
//! 4. 无全局状态：`FormatterRegistry` 显式构建并传入
//!
//! # 使用示例
//! ```ignore
//! use issue_notifier::notification::{FormatterRegistry, channel};
//! use issue_notifier::payload::parse_payload;
//!
//! let registry = FormatterRegistry::with_builtin_channels();
//! let payload = parse_payload(body)?;
//! let message = registry.format(&payload, channel::TELEGRAM);
//! ```

pub mod builder;
pub mod decoder;
pub mod default;
pub mod escape;
pub mod extract;
pub mod markdown;
pub mod mention;
pub mod registry;
pub mod renderer;

pub use builder::RegistryBuilder;
pub use decoder::ChangeValueDecoder;
pub use default::DefaultRenderer;
pub use escape::{escape_link_text, escape_markdown, escape_url};
pub use extract::{field_display, field_icon, msg, translate_field_name, user_display};
pub use markdown::{MarkdownLayout, MarkdownRenderer};
pub use mention::MentionStyle;
pub use registry::FormatterRegistry;
pub use renderer::{channel, ChannelRenderer};
