//! CLI module - Command-line interface for Postboard
//!
//! This module provides a structured CLI using clap for argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Postboard - authenticated short posts over HTTP
#[derive(Parser)]
#[command(name = "postboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server (default)
    #[command(alias = "daemon")]
    Serve,

    /// Register a user directly against the database
    Register {
        /// Display name
        user_name: String,
        /// Unique email address
        email: String,
        /// Plaintext password (hashed before storage)
        password: String,
    },

    /// Create default config file
    #[command(alias = "init")]
    InitConfig {
        /// Where to write the file
        #[arg(long, default_value = "config.toml")]
        path: PathBuf,
    },
}
