//! Vibe Playlist Organizer Library
//!
//! Authenticates against Spotify, fetches a user's saved tracks, sorts them
//! into heuristic "vibes" and turns a selection into a new playlist.
//!
//! # Modules
//!
//! - `api` - HTTP routes of the stateless web service
//! - `cli` - Command-line client commands
//! - `config` - Configuration from environment variables and `.env` files
//! - `error` - Error types of every layer
//! - `management` - Client-held session state and playlist assembly
//! - `server` - HTTP servers (web service and CLI login listener)
//! - `spotify` - Token exchange and the authenticated API gateway
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//! - `vibe` - Track classification
//!
//! # Example
//!
//! ```
//! use vibelist::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> vibelist::Res<()> {
//!     config::load_env().await?;
//!     server::start_api_server(config::Config::from_env()?).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod vibe;

/// Boxed-error result used by CLI glue and server startup, where the
/// concrete error only gets printed.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

// Console output for the CLI. The server logs through `tracing` instead.

/// `[o] message` in blue.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// `[✓] message` in green.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// `[!] message` in red, then exits with status 1. Only for errors the
/// command cannot recover from.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// `[!] message` in yellow.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
