//! # Application State
//!
//! Everything a session holds, as plain owned values.
//!
//! ## State Types
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         AppState<S>                                     │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │  PricingState    │  │  SelectionState  │  │  ConfigState         │  │
//! │  │  PriceTable      │  │  Selection       │  │  AppConfig (TOML)    │  │
//! │  │  dirty flag      │  │  coercion issues │  │  read-only           │  │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘  │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────────┐ │
//! │  │  PricingRepository<S>  (MemoryStore in tests, FileStore in CLI)   │ │
//! │  └───────────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Single-threaded: commands take `&mut AppState`, so there is no Mutex.

mod config;
mod pricing;
mod selection;

pub use config::{default_config_path, AppConfig, ConfigError, ConfigState};
pub use pricing::PricingState;
pub use selection::SelectionState;

use cake_store::{FileStore, KeyValueStore, PricingRepository, StoreResult};

/// One session's state.
#[derive(Debug)]
pub struct AppState<S: KeyValueStore> {
    pub config: ConfigState,
    pub pricing: PricingState,
    pub selection: SelectionState,
    pub repo: PricingRepository<S>,
}

impl<S: KeyValueStore> AppState<S> {
    /// Loads the price table from `store` and starts with an empty selection.
    pub fn new(config: ConfigState, store: S) -> Self {
        let repo = PricingRepository::new(store);
        let (table, outcome) = repo.load_price_table();
        AppState {
            config,
            pricing: PricingState::new(table, outcome),
            selection: SelectionState::new(),
            repo,
        }
    }
}

impl AppState<FileStore> {
    /// Opens the store file named by the config.
    pub fn open(config: ConfigState) -> StoreResult<Self> {
        let store = FileStore::open(&config.config.store_path)?;
        Ok(AppState::new(config, store))
    }
}
