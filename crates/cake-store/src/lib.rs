//! # cake-store: Storage Layer for Cake Quote
//!
//! Owns every read and write of persisted state. The price table and the
//! selection echo are plain strings under two well-known keys in a
//! key-value store; cake-core decides what the strings mean.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cake Quote Data Flow                             │
//! │                                                                         │
//! │  cake-quote command (save_price_table)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   cake-store (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────────┐          ┌──────────────────────────┐ │   │
//! │  │   │ PricingRepository  │ ───────► │ KeyValueStore            │ │   │
//! │  │   │ (repository.rs)    │          │ MemoryStore / FileStore  │ │   │
//! │  │   │ logs load outcomes │          │ (kv.rs)                  │ │   │
//! │  │   └────────────────────┘          └──────────────────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/cake-quote/store.json (platform data dir)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use cake_store::{MemoryStore, PricingRepository};
//! use cake_core::PriceTable;
//!
//! let mut repo = PricingRepository::new(MemoryStore::new());
//! let (table, _) = repo.load_price_table();
//! assert_eq!(table, PriceTable::defaults());
//!
//! repo.save_price_table(&table).unwrap();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kv;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use repository::PricingRepository;
