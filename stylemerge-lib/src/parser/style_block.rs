//! Pulls the inline stylesheet out of an HTML document.

use regex::Regex;
use std::sync::OnceLock;

fn style_block_regex() -> Option<&'static Regex> {
    static STYLE_BLOCK: OnceLock<Option<Regex>> = OnceLock::new();
    STYLE_BLOCK
        .get_or_init(|| Regex::new(r"(?is)<style[^>]*>(.*?)</style>").ok())
        .as_ref()
}

/// Returns the trimmed content of the first `<style>` element, or an empty string.
///
/// The tag match is case-insensitive and the content may span lines. Only the first
/// block is considered.
pub fn extract_style_block(html_content: &str) -> String {
    style_block_regex()
        .and_then(|re| re.captures(html_content))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_first_block_only() {
        let html = r#"<!DOCTYPE html>
<html>
<head>
<style type="text/css">
.red { background: red; }
</style>
<style>.second { color: blue; }</style>
</head>
<body><div class="red">Hello</div></body>
</html>"#;
        assert_eq!(extract_style_block(html), ".red { background: red; }");
    }

    #[test]
    fn test_tag_match_is_case_insensitive() {
        let html = "<HEAD><STYLE>\n  p { color: red; }\n</Style></HEAD>";
        assert_eq!(extract_style_block(html), "p { color: red; }");
    }

    #[test]
    fn test_missing_block_is_empty() {
        assert_eq!(extract_style_block("<p>No styles here</p>"), "");
        assert_eq!(extract_style_block("<style>unterminated"), "");
    }
}
