//! Command-line interface definition for ACME Bot
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for running the relay server and the terminal chat.

use clap::{Parser, Subcommand};

/// ACME Bot - company chatbot backed by Kimi
///
/// Run the relay server that forwards questions and files to the provider,
/// or chat with it from the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "acme-bot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for ACME Bot
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the relay server (POST /api/chat and POST /api/files)
    Serve {
        /// Interface to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Start an interactive chat session against a relay server
    Chat {
        /// Relay server base URL (overrides client.relay_url)
        #[arg(short, long)]
        relay_url: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
