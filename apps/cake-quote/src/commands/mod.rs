//! # Commands Module
//!
//! Every operation the front end (today the CLI) can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── quote.rs     ◄─── Selection edits, quote, share link
//! ├── settings.rs  ◄─── Price table edits and save
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  cli.rs parses argv                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  pub fn select_option(                                                  │
//! │      state: &mut AppState<S>,  ◄── Session state, any store            │
//! │      category: Category,       ◄── From the parsed arguments           │
//! │      label: &str,                                                       │
//! │  ) -> Result<QuoteResponse, ApiError>                                   │
//! │         │                                                               │
//! │         │ (text via render.rs, or JSON with --json)                     │
//! │         ▼                                                               │
//! │  stdout                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands are synchronous and generic over the key-value store, so tests
//! drive them with a `MemoryStore`.

pub mod config;
pub mod quote;
pub mod settings;
