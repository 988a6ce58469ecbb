//! Inline span conversion.
//!
//! Text is escaped before any substitution, so markup already present in the
//! source can never become live. The span rules run in a fixed order: bold,
//! italic, code, strikethrough. Tags inserted by an earlier rule contain none
//! of the later rules' markers.

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD: Lazy<Regex> = Lazy::new(|| compile(r"\*\*(.+?)\*\*"));
static ITALIC: Lazy<Regex> = Lazy::new(|| compile(r"\*(.+?)\*"));
static CODE: Lazy<Regex> = Lazy::new(|| compile(r"`(.+?)`"));
static STRIKE: Lazy<Regex> = Lazy::new(|| compile(r"~~(.+?)~~"));

#[expect(clippy::expect_used, reason = "patterns are literals checked by tests")]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("inline span pattern is valid")
}

/// Escape the five HTML-significant characters.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape `text` and convert its inline spans to markup.
#[must_use]
pub fn convert_spans(text: &str) -> String {
    let escaped = escape_html(text);
    let bold = BOLD.replace_all(&escaped, "<strong>$1</strong>");
    let italic = ITALIC.replace_all(&bold, "<em>$1</em>");
    let code = CODE.replace_all(&italic, "<code>$1</code>");
    STRIKE.replace_all(&code, "<del>$1</del>").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_convert_independently() {
        assert_eq!(
            convert_spans("**bold** and *em* and `code`"),
            "<strong>bold</strong> and <em>em</em> and <code>code</code>"
        );
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(convert_spans("~~old~~ new"), "<del>old</del> new");
    }

    #[test]
    fn test_raw_markup_is_escaped_before_spans() {
        let out = convert_spans("<script>alert('x')</script> **ok**");
        assert!(!out.contains("<script>"));
        assert!(out.starts_with("&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;"));
        assert!(out.ends_with("<strong>ok</strong>"));
    }

    #[test]
    fn test_markup_inside_spans_stays_escaped() {
        assert_eq!(convert_spans("`<b>`"), "<code>&lt;b&gt;</code>");
    }

    #[test]
    fn test_unbalanced_markers_are_left_alone() {
        assert_eq!(convert_spans("5 * 3 = 15"), "5 * 3 = 15");
        assert_eq!(convert_spans("a ` b"), "a ` b");
    }

    #[test]
    fn test_escape_ampersand_first() {
        assert_eq!(escape_html("a & <b>"), "a &amp; &lt;b&gt;");
    }
}
