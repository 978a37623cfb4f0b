//! Special commands parser for interactive chat mode
//!
//! Commands are prefixed with `/`. The command word is case-insensitive;
//! arguments (file paths) keep their case.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an argument it does not take
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Stage a file for the next message
    Attach(String),

    /// Drop the staged file
    Detach,

    /// Start a new conversation
    ///
    /// Clears the message log and any staged file.
    NewChat,

    /// Write the conversation to an HTML file
    Export(String),

    /// Display session status
    ShowStatus,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input is sent to the relay as a message.
    None,
}

fn required_arg(command: &str, usage: &str, arg: &str) -> Result<String, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument {
            command: command.to_string(),
            usage: usage.to_string(),
        })
    } else {
        Ok(arg.to_string())
    }
}

fn no_arg(command: &str, arg: &str, cmd: SpecialCommand) -> Result<SpecialCommand, CommandError> {
    if arg.is_empty() {
        Ok(cmd)
    } else {
        Err(CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        })
    }
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` for an unrecognised `/` command,
/// `MissingArgument` when `/attach` or `/export` has no path, and
/// `UnsupportedArgument` when an argument-less command gets one.
///
/// # Examples
///
/// ```
/// use acme_bot::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// let cmd = parse_special_command("/attach ~/Docs/Report.pdf").unwrap();
/// assert_eq!(cmd, SpecialCommand::Attach("~/Docs/Report.pdf".to_string()));
///
/// let cmd = parse_special_command("hello bot").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if lower == "exit" || lower == "quit" {
        return Ok(SpecialCommand::Exit);
    }
    if !trimmed.starts_with('/') {
        return Ok(SpecialCommand::None);
    }

    let (word, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((word, arg)) => (word, arg.trim()),
        None => (trimmed, ""),
    };
    let word = word.to_lowercase();

    match word.as_str() {
        "/attach" => required_arg("/attach", "/attach <path>", arg).map(SpecialCommand::Attach),
        "/export" => required_arg("/export", "/export <path.html>", arg).map(SpecialCommand::Export),
        "/detach" => no_arg("/detach", arg, SpecialCommand::Detach),
        "/new" | "/reset" | "/clear" => no_arg(&word, arg, SpecialCommand::NewChat),
        "/status" => no_arg("/status", arg, SpecialCommand::ShowStatus),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/exit" | "/quit" => Ok(SpecialCommand::Exit),
        _ => Err(CommandError::UnknownCommand(word)),
    }
}

/// Display help text for special commands
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Chat Mode
===========================================

FILES:
  /attach <path>  - Attach a file to the next message
  /detach         - Remove the attached file
  <path>          - Pasting or dropping a file path attaches it

  With a file attached, the message is the question about the file.
  Sending with no text asks for a summary.

CONVERSATION:
  /new            - Start a new conversation (aliases: /reset, /clear)
  /export <path>  - Save the conversation as an HTML page

SESSION:
  /status         - Show relay address, message count and attachment
  /help           - Show this help message
  /exit, /quit    - Exit the session (also: exit, quit, CTRL-D)
"#
    );
}
