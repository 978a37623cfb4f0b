//! ACME Bot - company chatbot relay library
//!
//! A small relay in front of the Kimi (Moonshot) API plus the chat session
//! that talks to it.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `relay`: HTTP endpoints for text and file questions (axum)
//! - `providers`: Provider abstraction and the Moonshot implementation
//! - `format`: Regex-based reply formatter (markdown-ish text to HTML)
//! - `session`: Chat session controller and the HTTP relay client
//! - `render`: Terminal and HTML views of a conversation
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use acme_bot::config::Config;
//! use acme_bot::providers::create_provider;
//! use acme_bot::relay::{router, RelaySettings, RelayState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let provider = create_provider(&config.provider)?;
//!     let app = router(RelayState::new(provider, RelaySettings::from_config(&config)));
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod prompts;
pub mod providers;
pub mod relay;
pub mod render;
pub mod server;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use error::{AcmeBotError, Result};
pub use format::format_answer;
pub use session::{ChatSession, SendOutcome};

#[cfg(test)]
pub mod test_utils;
