//! Rendering of the conversation
//!
//! Two views over the same [`ChatEntry`] log: coloured terminal lines for
//! the interactive chat, and a standalone HTML page for `/export`.

use crate::session::{ChatEntry, FileDescriptor, Role, StagedFile};
use colored::Colorize;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Title of the exported transcript page
pub const TRANSCRIPT_TITLE: &str = "ACME Bot";

struct TerminalPatterns {
    heading: Regex,
    strong: Regex,
    em: Regex,
    list_item: Regex,
    line_break: Regex,
}

fn terminal_patterns() -> &'static TerminalPatterns {
    static PATTERNS: OnceLock<TerminalPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| TerminalPatterns {
        heading: Regex::new(r"<h[1-3][^>]*>(.*?)</h[1-3]>").expect("valid heading pattern"),
        strong: Regex::new(r"<strong>(.*?)</strong>").expect("valid strong pattern"),
        em: Regex::new(r"<em>(.*?)</em>").expect("valid em pattern"),
        list_item: Regex::new(r"<li[^>]*>(.*?)</li>").expect("valid list pattern"),
        line_break: Regex::new(r"<br\s*/?>").expect("valid break pattern"),
    })
}

/// Turn formatter output back into readable terminal text
///
/// Headings and strong text become bold, emphasis italic, list items get a
/// bullet, and `<br />` becomes a newline. Other markup is left as is.
pub fn html_to_terminal(html: &str) -> String {
    let p = terminal_patterns();
    let text = p
        .heading
        .replace_all(html, |c: &Captures| c[1].bold().underline().to_string());
    let text = p
        .strong
        .replace_all(&text, |c: &Captures| c[1].bold().to_string());
    let text = p
        .em
        .replace_all(&text, |c: &Captures| c[1].italic().to_string());
    let text = p
        .list_item
        .replace_all(&text, |c: &Captures| format!("  • {}", &c[1]));
    p.line_break.replace_all(&text, "\n").into_owned()
}

fn attachment_label(file: &FileDescriptor) -> String {
    match file.preview {
        Some(_) => format!("🖼 {}", file.name),
        None => format!("📄 {}", file.name),
    }
}

/// Render one conversation entry for the terminal
pub fn render_entry(entry: &ChatEntry) -> String {
    let time = entry.time.dimmed();
    match entry.role {
        Role::User => {
            let mut out = format!("{} {} {}", time, "U".green().bold(), entry.text);
            if let Some(file) = &entry.file {
                // The placeholder text already names the file.
                if entry.text != format!("📄 {}", file.name) {
                    out.push_str(&format!("\n      {}", attachment_label(file).cyan()));
                }
            }
            out
        }
        Role::Assistant => format!(
            "{} {} {}",
            time,
            "A".blue().bold(),
            html_to_terminal(&entry.text)
        ),
    }
}

/// Shown while a send is in flight
pub fn typing_indicator() -> String {
    format!("{} {}", "A".blue().bold(), "Typing…".dimmed())
}

/// Indicator for the file waiting to be sent
pub fn staged_indicator(file: &StagedFile) -> String {
    let label = if file.preview.is_some() {
        format!("🖼 {}", file.name)
    } else {
        format!("📄 {}", file.name)
    };
    format!("{} {}", "Attached:".yellow(), label)
}

fn user_bubble(entry: &ChatEntry) -> String {
    let mut body = String::new();
    if let Some(file) = &entry.file {
        match &file.preview {
            Some(preview) => body.push_str(&format!(
                "<img class=\"preview\" src=\"{}\" alt=\"{}\" />",
                html_escape::encode_double_quoted_attribute(preview),
                html_escape::encode_double_quoted_attribute(&file.name)
            )),
            None => body.push_str(&format!(
                "<div class=\"file\">📄 {}</div>",
                html_escape::encode_text(&file.name)
            )),
        }
    }
    body.push_str(&format!(
        "<div class=\"text\">{}</div>",
        html_escape::encode_text(&entry.text)
    ));
    body
}

/// Render the conversation as a standalone HTML page
///
/// User text is escaped; assistant text is formatter output and is
/// inserted as is.
pub fn transcript_html(entries: &[ChatEntry]) -> String {
    let mut bubbles = String::new();
    for entry in entries {
        let (class, body) = match entry.role {
            Role::User => ("user", user_bubble(entry)),
            Role::Assistant => ("assistant", entry.text.clone()),
        };
        bubbles.push_str(&format!(
            "    <div class=\"msg {}\">\n      {}\n      <span class=\"time\">{}</span>\n    </div>\n",
            class,
            body,
            html_escape::encode_text(&entry.time)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>{title}</title>
  <style>
    body {{ font-family: sans-serif; background: #f3f4f6; margin: 0; }}
    header {{ background: #2563eb; color: #fff; padding: 12px 16px; font-weight: bold; }}
    main {{ max-width: 720px; margin: 0 auto; padding: 16px; }}
    .msg {{ border-radius: 12px; padding: 8px 12px; margin: 8px 0; max-width: 80%; }}
    .user {{ background: #2563eb; color: #fff; margin-left: auto; }}
    .assistant {{ background: #fff; }}
    .preview {{ max-width: 200px; border-radius: 8px; display: block; }}
    .time {{ font-size: 10px; opacity: 0.6; }}
  </style>
</head>
<body>
  <header>{title}</header>
  <main>
{bubbles}  </main>
</body>
</html>
"#,
        title = TRANSCRIPT_TITLE,
        bubbles = bubbles
    )
}
