//! Formatting utilities used for CLI and export outputs.

use crate::models::shift::Shift;
use regex::Regex;
use std::sync::OnceLock;

/// Label and ANSI color for a shift.
pub fn describe_shift(shift: Shift) -> (&'static str, &'static str) {
    match shift {
        Shift::Morning => (shift.label(), "\x1b[33m"),
        Shift::Afternoon => (shift.label(), "\x1b[36m"),
        Shift::Night => (shift.label(), "\x1b[35m"),
        Shift::FullDay => (shift.label(), "\x1b[34m"),
    }
}

fn markup_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("static regex"))
}

fn break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<br\s*/?>|</p>|</div>|</h[1-6]>|</li>").expect("static regex"))
}

/// Plain text from the rich-text header: block ends become new lines, tags
/// are dropped, a few common entities are decoded, blank lines removed.
pub fn strip_markup(html: &str) -> Vec<String> {
    let with_breaks = break_re().replace_all(html, "\n");
    let text = markup_re().replace_all(&with_breaks, "");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    text.lines()
        .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|l| !l.is_empty())
        .collect()
}
