//! System prompts and request content for the relay endpoints
//!
//! The text relay and the file relay each send one fixed system instruction
//! ahead of the user's content. The file relay also embeds the provider file
//! identifier in the user content so the model reads the uploaded document.

/// System instruction for plain text chat
pub const CHAT_SYSTEM_PROMPT: &str = "You are ACME Bot, the ACME company assistant. \
Answer employees' questions accurately and concisely. \
Use markdown headings (#, ##, ###), **bold** for key terms and '- ' bullet lists \
where they make the answer easier to scan. \
If you do not know something about ACME, say so instead of guessing.";

/// System instruction for questions about an uploaded file
pub const FILE_SYSTEM_PROMPT: &str = "You are a professional assistant. \
Use headings, bullets, and emojis to make answers clear and pleasant.";

/// Builds the user content for a question about an uploaded file
///
/// # Examples
///
/// ```
/// use acme_bot::prompts::file_question;
///
/// let content = file_question("Summarize", "f1");
/// assert_eq!(content, "Summarize\n\n<file>f1</file>");
/// ```
pub fn file_question(question: &str, file_id: &str) -> String {
    format!("{}\n\n<file>{}</file>", question, file_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_question_wraps_identifier() {
        let content = file_question("What is in here?", "file-abc123");
        assert!(content.starts_with("What is in here?"));
        assert!(content.ends_with("<file>file-abc123</file>"));
    }

    #[test]
    fn test_prompts_ask_for_markdown_the_formatter_understands() {
        assert!(CHAT_SYSTEM_PROMPT.contains("headings"));
        assert!(FILE_SYSTEM_PROMPT.contains("headings"));
    }
}
