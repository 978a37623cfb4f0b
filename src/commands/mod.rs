/*!
Command handlers for the CLI

- `serve` — Run the relay server
- `chat`  — Interactive chat against a running relay

Both handlers are thin; the work lives in the `relay`, `session` and
`render` modules.
*/

use crate::config::Config;
use crate::error::Result;

// Special commands parser for the chat REPL
pub mod special_commands;

/// Run the relay server until interrupted
///
/// # Errors
///
/// Returns error if the server cannot start
pub async fn run_serve(config: Config) -> Result<()> {
    tracing::info!(
        model = %config.provider.model,
        file_model = %config.provider.file_model,
        "Starting relay server"
    );
    crate::server::start_server(&config).await
}

// Chat command handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! A readline loop over a [`ChatSession`] connected to the relay over
    //! HTTP. Lines are slash commands, dropped file paths, or messages.

    use super::special_commands::{parse_special_command, print_help, SpecialCommand};
    use super::*;
    use crate::render::{render_entry, staged_indicator, transcript_html, typing_indicator};
    use crate::session::{ChatSession, HttpRelayClient, RelayClient, SendOutcome};
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration; `client.relay_url` picks the relay
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use acme_bot::commands::chat;
    /// use acme_bot::config::Config;
    ///
    /// # async fn example() -> anyhow::Result<()> {
    /// chat::run_chat(Config::default()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_chat(config: Config) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let client = HttpRelayClient::new(&config.client.relay_url)?;
        let relay_url = client.base_url().to_string();
        let mut session = ChatSession::new(client);
        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&relay_url);

        loop {
            match rl.readline(&prompt(&session)) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(trimmed)?;

                    // A dropped file pastes its path.
                    match session.stage_dropped(trimmed) {
                        Ok(true) => {
                            if let Some(file) = session.staged() {
                                println!("{}\n", staged_indicator(file));
                            }
                            continue;
                        }
                        Ok(false) => {}
                        Err(e) => {
                            eprintln!("{}\n", format!("Error: {}", e).red());
                            continue;
                        }
                    }

                    let command = match parse_special_command(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            eprintln!("{}\n", e);
                            continue;
                        }
                    };

                    match command {
                        SpecialCommand::Attach(path) => {
                            match session.stage_file(expand_home(&path)) {
                                Ok(file) => println!("{}\n", staged_indicator(file)),
                                Err(e) => eprintln!("{}\n", format!("Error: {}", e).red()),
                            }
                            continue;
                        }
                        SpecialCommand::Detach => {
                            match session.unstage() {
                                Some(file) => println!("Removed {}\n", file.name),
                                None => println!("No file attached\n"),
                            }
                            continue;
                        }
                        SpecialCommand::NewChat => {
                            session.reset();
                            println!("{}\n", "Started a new conversation".green());
                            continue;
                        }
                        SpecialCommand::Export(path) => {
                            let path = expand_home(&path);
                            match std::fs::write(&path, transcript_html(session.messages())) {
                                Ok(()) => println!("Saved transcript to {}\n", path),
                                Err(e) => eprintln!(
                                    "{}\n",
                                    format!("Error: failed to write {}: {}", path, e).red()
                                ),
                            }
                            continue;
                        }
                        SpecialCommand::ShowStatus => {
                            print_status_display(&session, &relay_url);
                            continue;
                        }
                        SpecialCommand::Help => {
                            print_help();
                            continue;
                        }
                        SpecialCommand::Exit => break,
                        SpecialCommand::None => {
                            // Regular message
                        }
                    }

                    session.set_input(trimmed);
                    println!("{}", typing_indicator());
                    if session.send().await == SendOutcome::Replied {
                        let messages = session.messages();
                        if let Some(reply) = messages.last() {
                            println!("{}\n", render_entry(reply));
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn prompt<C: RelayClient>(session: &ChatSession<C>) -> String {
        match session.staged() {
            Some(file) => format!("{} {} ", format!("[{}]", file.name).cyan(), ">>".bold()),
            None => format!("{} ", ">>".bold()),
        }
    }

    /// Expand a leading `~/` to the home directory
    fn expand_home(path: &str) -> String {
        match (path.strip_prefix("~/"), std::env::var("HOME")) {
            (Some(rest), Ok(home)) => format!("{}/{}", home.trim_end_matches('/'), rest),
            _ => path.to_string(),
        }
    }

    /// Display welcome banner at the start of interactive chat mode
    fn print_welcome_banner(relay_url: &str) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║            ACME Bot Interactive Chat - Welcome!              ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Relay: {}\n", relay_url.cyan());
        println!("Type '/help' for available commands, 'exit' to quit");
        println!("Drop a file onto the terminal or use '/attach <path>' to ask about it\n");
    }

    /// Display session status
    fn print_status_display<C: RelayClient>(session: &ChatSession<C>, relay_url: &str) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                    ACME Bot Session Status                   ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Relay:             {}", relay_url);
        println!("Conversation Size: {} messages", session.messages().len());
        match session.staged() {
            Some(file) => println!(
                "Attachment:        {} ({}, {} bytes)",
                file.name,
                file.content_type,
                file.data.len()
            ),
            None => println!("Attachment:        none"),
        }
        println!();
    }

}
