//! Chat session controller
//!
//! Holds everything the chat UI shows: the ordered message log, the draft
//! input, the staged file with its preview, and the loading flag. Sending
//! dispatches to the text or the file relay depending on whether a file is
//! staged, and stores the assistant reply already formatted as HTML.
//!
//! Nothing here is persisted; [`ChatSession::reset`] or dropping the
//! session discards the conversation.

pub mod attachment;
pub mod client;

pub use attachment::{dropped_path, StagedFile};
pub use client::{HttpRelayClient, RelayClient};

use crate::config::default_question;
use crate::error::Result;
use crate::format::format_answer;
use serde::Serialize;
use uuid::Uuid;

/// Assistant text shown when the relay could not be reached
pub const NETWORK_ERROR_REPLY: &str = "❌ Network error";

/// Assistant text shown when the file relay returned no reply
pub const EMPTY_FILE_REPLY: &str = "File read failed";

/// Assistant text shown when the text relay returned no reply
pub const EMPTY_TEXT_REPLY: &str = "No reply";

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person at the keyboard
    User,
    /// The model, via the relay
    Assistant,
}

/// File attached to a user message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDescriptor {
    /// File name
    pub name: String,
    /// Preview reference for images
    pub preview: Option<String>,
}

/// One entry of the conversation log
#[derive(Debug, Clone, Serialize)]
pub struct ChatEntry {
    /// Unique within the session
    pub id: Uuid,
    /// Author
    pub role: Role,
    /// Plain text for user messages, formatted HTML for assistant messages
    pub text: String,
    /// Attachment sent with a user message
    pub file: Option<FileDescriptor>,
    /// Display time (`HH:MM`, local)
    pub time: String,
}

impl ChatEntry {
    fn new(role: Role, text: String, file: Option<FileDescriptor>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text,
            file,
            time: chrono::Local::now().format("%H:%M").to_string(),
        }
    }
}

/// What a call to [`ChatSession::send`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing to send: blank input and no staged file
    Skipped,
    /// A previous send has not finished
    Busy,
    /// A user message and an assistant reply were appended
    Replied,
}

/// In-memory chat session
pub struct ChatSession<C: RelayClient> {
    client: C,
    messages: Vec<ChatEntry>,
    input: String,
    staged: Option<StagedFile>,
    loading: bool,
}

impl<C: RelayClient> ChatSession<C> {
    /// Create an empty session that talks to the relay through `client`
    pub fn new(client: C) -> Self {
        Self {
            client,
            messages: Vec::new(),
            input: String::new(),
            staged: None,
            loading: false,
        }
    }

    /// Conversation so far, in send order
    pub fn messages(&self) -> &[ChatEntry] {
        &self.messages
    }

    /// Current draft input
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the draft input
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// File that will be sent with the next message
    pub fn staged(&self) -> Option<&StagedFile> {
        self.staged.as_ref()
    }

    /// Whether a send is in flight
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Stage a file from disk, replacing any previously staged file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read
    pub fn stage_file(&mut self, path: impl AsRef<std::path::Path>) -> Result<&StagedFile> {
        let staged: &StagedFile = self.staged.insert(StagedFile::from_path(path)?);
        Ok(staged)
    }

    /// Stage pasted text if it names an existing file (terminal drag-and-drop)
    ///
    /// Returns `Ok(false)` when the text is not a file path, leaving the
    /// session untouched.
    ///
    /// # Errors
    ///
    /// Returns error if the path exists but cannot be read
    pub fn stage_dropped(&mut self, text: &str) -> Result<bool> {
        match dropped_path(text) {
            Some(path) => {
                self.stage_file(path)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drop the staged file, if any
    pub fn unstage(&mut self) -> Option<StagedFile> {
        self.staged.take()
    }

    /// Clear the conversation, the draft input and the staged file
    pub fn reset(&mut self) {
        self.messages.clear();
        self.staged = None;
        self.input.clear();
        tracing::debug!("Chat session reset");
    }

    /// Send the draft input (and staged file) to the relay
    ///
    /// Relay and network failures never escape: they become assistant
    /// messages in the log.
    pub async fn send(&mut self) -> SendOutcome {
        if self.input.trim().is_empty() && self.staged.is_none() {
            return SendOutcome::Skipped;
        }
        if self.loading {
            return SendOutcome::Busy;
        }
        self.loading = true;

        let input = std::mem::take(&mut self.input);
        let user_text = match &self.staged {
            Some(file) if input.is_empty() => format!("📄 {}", file.name),
            _ => input.clone(),
        };
        let descriptor = self.staged.as_ref().map(|file| FileDescriptor {
            name: file.name.clone(),
            preview: file.preview.clone(),
        });
        self.messages
            .push(ChatEntry::new(Role::User, user_text, descriptor));

        let reply = match &self.staged {
            Some(file) => {
                let question = if input.is_empty() {
                    default_question()
                } else {
                    input
                };
                match self.client.send_file(file, &question).await {
                    Ok(reply) if !reply.is_empty() => reply,
                    Ok(_) => EMPTY_FILE_REPLY.to_string(),
                    Err(e) => {
                        tracing::warn!("File relay request failed: {:#}", e);
                        NETWORK_ERROR_REPLY.to_string()
                    }
                }
            }
            None => match self.client.send_text(&input).await {
                Ok(reply) if !reply.is_empty() => reply,
                Ok(_) => EMPTY_TEXT_REPLY.to_string(),
                Err(e) => {
                    tracing::warn!("Text relay request failed: {:#}", e);
                    NETWORK_ERROR_REPLY.to_string()
                }
            },
        };

        self.messages.push(ChatEntry::new(
            Role::Assistant,
            format_answer(&reply),
            None,
        ));
        self.staged = None;
        self.loading = false;

        SendOutcome::Replied
    }
}
