//! MarkdownV2 转义（Telegram / VK Teams）
//!
//! 单次从左到右扫描，在特殊字符前加反斜杠。反斜杠本身不在正文字符集中，
//! 因此已转义的 `\_` 会变成 `\\_`。

/// 正文中需要转义的字符
const BODY_CHARS: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// 链接文本中需要转义的字符（方括号保持原样）
const LINK_TEXT_CHARS: &[char] = &[
    '_', '*', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// 链接地址中需要转义的字符
const URL_CHARS: &[char] = &['\\', ')'];

fn escape_with(text: &str, special: &[char]) -> String {
    let mut result = String::with_capacity(text.len() * 2);
    for ch in text.chars() {
        if special.contains(&ch) {
            result.push('\\');
        }
        result.push(ch);
    }
    result
}

/// 转义正文
pub fn escape_markdown(text: &str) -> String {
    escape_with(text, BODY_CHARS)
}

/// 转义链接文本 `[...]`
pub fn escape_link_text(text: &str) -> String {
    escape_with(text, LINK_TEXT_CHARS)
}

/// 转义链接地址 `(...)`
pub fn escape_url(url: &str) -> String {
    escape_with(url, URL_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markdown_all_special_chars() {
        assert_eq!(
            escape_markdown("_*[]()~`>#+-=|{}.!"),
            r"\_\*\[\]\(\)\~\`\>\#\+\-\=\|\{\}\.\!"
        );
    }

    #[test]
    fn test_escape_markdown_plain_text() {
        assert_eq!(escape_markdown("hello"), "hello");
        assert_eq!(escape_markdown(""), "");
        assert_eq!(escape_markdown("Привет, мир"), "Привет, мир");
    }

    #[test]
    fn test_escape_markdown_mixed() {
        assert_eq!(escape_markdown("v1.2-beta (rc)!"), r"v1\.2\-beta \(rc\)\!");
        assert_eq!(escape_markdown("user@example.com"), r"user@example\.com");
    }

    #[test]
    fn test_escape_markdown_already_escaped_doubles_backslash() {
        assert_eq!(escape_markdown(r"\_"), r"\\_");
        assert_eq!(escape_markdown(r"a\b"), r"a\b");
    }

    #[test]
    fn test_escape_link_text_keeps_brackets() {
        assert_eq!(escape_link_text("[PROJ-1]"), r"[PROJ\-1]");
        assert_eq!(escape_link_text("_*()~`>#+-=|{}.!"), r"\_\*\(\)\~\`\>\#\+\-\=\|\{\}\.\!");
        assert!(!escape_link_text("[a][b]").contains(r"\["));
        assert!(!escape_link_text("[a][b]").contains(r"\]"));
    }

    #[test]
    fn test_escape_url() {
        assert_eq!(escape_url("https://x/1"), "https://x/1");
        assert_eq!(escape_url("https://x/a_(b)"), r"https://x/a_(b\)");
        assert_eq!(escape_url(r"https://x/a\b"), r"https://x/a\\b");
    }
}
