//! Text cleanup for license bodies taken from settings bundles

use regex::Regex;
use std::sync::LazyLock;

/// Horizontal whitespace around exactly one line break.
static SINGLE_LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\t\p{Zs}]*(?:\r\n|[\n\x0B\x0C\r\x{85}\x{2028}\x{2029}])[\t\p{Zs}]*")
        .expect("static regex")
});

static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\bhttps?://[^\s<>"]+|\b(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,}(?:/[^\s<>"]*)?"#,
    )
    .expect("static regex")
});

/// Removes manual wrapping from a license text.
///
/// A single line break (with any horizontal whitespace around it) sitting
/// between two non-whitespace characters becomes one space. Paragraph breaks,
/// i.e. runs with two or more line breaks, are kept as they are.
pub fn filter_premature_line_breaks(text: &str) -> String {
    let mut filtered = String::with_capacity(text.len());
    let mut copied = 0;

    for m in SINGLE_LINE_BREAK.find_iter(text) {
        let before = text[..m.start()].chars().next_back();
        let after = text[m.end()..].chars().next();
        let joins_words = before.is_some_and(|c| !c.is_whitespace())
            && after.is_some_and(|c| !c.is_whitespace());

        if joins_words {
            filtered.push_str(&text[copied..m.start()]);
            filtered.push(' ');
            copied = m.end();
        }
    }

    filtered.push_str(&text[copied..]);
    filtered
}

/// Finds the first link in `text`.
///
/// Bare domains such as `cocoapods.org` are returned with an `http://` scheme.
pub fn first_link(text: &str) -> Option<String> {
    let found = LINK.find(text)?.as_str();
    let link = found.trim_end_matches(['.', ',', ';', ':', '!', '?', ')', '\'', '"']);

    let lower = link.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Some(link.to_string())
    } else {
        Some(format!("http://{link}"))
    }
}
