//! 提及格式 - 评论中被提及用户在各渠道的写法

use super::extract::{non_empty, user_display};
use crate::payload::UserRef;

/// 提及格式（每个渠道一种）
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionStyle {
    /// 显示名（纯文本渠道）
    PlainName,
    /// fullName > email > @login（Telegram）
    LoginTag,
    /// @[email] > @login（VK Teams），不回退到 fullName
    EmailBracketTag,
}

impl std::fmt::Display for MentionStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl MentionStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            MentionStyle::PlainName => "plain_name",
            MentionStyle::LoginTag => "login_tag",
            MentionStyle::EmailBracketTag => "email_bracket_tag",
        }
    }

    /// 格式化一个用户，无可用身份时返回空字符串
    pub fn format(&self, user: &UserRef) -> String {
        match self {
            MentionStyle::PlainName => user_display(Some(user)),
            MentionStyle::LoginTag => {
                if let Some(full_name) = non_empty(&user.full_name) {
                    full_name.to_string()
                } else if let Some(email) = non_empty(&user.email) {
                    email.to_string()
                } else if let Some(login) = non_empty(&user.login) {
                    format!("@{}", login)
                } else {
                    String::new()
                }
            }
            MentionStyle::EmailBracketTag => {
                if let Some(email) = non_empty(&user.email) {
                    format!("@[{}]", email)
                } else if let Some(login) = non_empty(&user.login) {
                    format!("@{}", login)
                } else {
                    String::new()
                }
            }
        }
    }

    /// 提及后缀与正文之间的分隔符：纯文本是单行，Markdown 另起一行
    pub(crate) fn suffix_separator(&self) -> &'static str {
        match self {
            MentionStyle::PlainName => " ",
            MentionStyle::LoginTag | MentionStyle::EmailBracketTag => "\n",
        }
    }
}
