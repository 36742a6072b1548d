// Pokewatch - Core Library
// Exposes all modules for use in the CLI, the TUI, and tests

pub mod client;
pub mod model;
pub mod parser;
pub mod validate;
pub mod watchlist;
pub mod worker;

// Only compiled for the interactive terminal front-end
#[cfg(feature = "tui")]
pub mod artwork;
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use client::{
    ClientConfig, FetchError, ImageError, LookupClient, LookupError, DEFAULT_BASE_URL,
    DEFAULT_TIMEOUT,
};
pub use model::{prettify, CreatureRecord};
pub use parser::{parse_creature, ParseError};
pub use validate::{validate, ValidationError, FORBIDDEN_CHARS, MAX_CREATURE_ID};
pub use watchlist::Watchlist;
pub use worker::{AppEvent, Dispatcher, WORKER_THREADS};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
