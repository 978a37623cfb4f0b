//! Reply formatter
//!
//! Turns the markdown-ish text returned by the model into HTML fragments
//! with an ordered chain of regex substitutions. This is a cosmetic pass,
//! not a markdown parser: code blocks, links, tables and nesting are left
//! alone, and running it twice over its own output is not a no-op
//! (emphasis patterns can match across tags inserted by earlier rules).

use regex::Regex;
use std::sync::OnceLock;

/// One substitution step; order matters
struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

/// `(?m)` makes `^`/`$` line anchors; `.` never crosses a newline.
const RULES: &[(&str, &str)] = &[
    (
        r"(?m)^### (.*)$",
        "<h3 class='font-bold mt-2 mb-1 text-base'>$1</h3>",
    ),
    (
        r"(?m)^## (.*)$",
        "<h2 class='font-bold mt-3 mb-1 text-lg'>$1</h2>",
    ),
    (
        r"(?m)^# (.*)$",
        "<h1 class='font-bold mt-3 mb-1 text-xl'>$1</h1>",
    ),
    (r"\*\*(.+?)\*\*", "<strong>$1</strong>"),
    (r"\*(.+?)\*", "<em>$1</em>"),
    (r"(?m)^- (.+)$", "<li class='ml-4 list-disc'>$1</li>"),
    (r"\n", "<br />"),
];

fn rules() -> &'static [Rule] {
    static COMPILED: OnceLock<Vec<Rule>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        RULES
            .iter()
            .map(|&(pattern, replacement)| Rule {
                pattern: Regex::new(pattern).expect("formatter patterns are valid"),
                replacement,
            })
            .collect()
    })
}

/// Format a raw model reply as HTML
///
/// # Examples
///
/// ```
/// use acme_bot::format::format_answer;
///
/// assert_eq!(
///     format_answer("## Title"),
///     "<h2 class='font-bold mt-3 mb-1 text-lg'>Title</h2>"
/// );
/// assert_eq!(format_answer("a **bold** move"), "a <strong>bold</strong> move");
/// ```
pub fn format_answer(raw: &str) -> String {
    rules().iter().fold(raw.to_string(), |text, rule| {
        rule.pattern
            .replace_all(&text, rule.replacement)
            .into_owned()
    })
}
