//! # cake-core: Pure Pricing Logic for Cake Quote
//!
//! This crate is the **heart** of Cake Quote. It holds the price table, the
//! selection a customer builds against it, and the total-price function, all
//! as pure code with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cake Quote Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (CLI / web form)                   │   │
//! │  │    Calculator ──► Breakdown ──► Share link      Settings       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    cake-quote commands                          │   │
//! │  │    get_quote, select_option, set_option_price, etc.            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cake-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐ ┌───────────┐ ┌───────────┐ ┌──────────────┐  │   │
//! │  │   │price_table │ │ selection │ │   quote   │ │ share/persist│  │   │
//! │  │   │ PriceTable │ │ Selection │ │  total    │ │ query string │  │   │
//! │  │   │  defaults  │ │  counts   │ │ breakdown │ │ stored blob  │  │   │
//! │  │   └────────────┘ └───────────┘ └───────────┘ └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO GLOBALS • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 cake-store (Storage Layer)                      │   │
//! │  │           Key-value store, price table repository               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Categories, catalog entries, add-ons, misc items
//! - [`price_table`] - The configurable catalog and its settings edits
//! - [`selection`] - What the customer picked
//! - [`quote`] - Total and line-item breakdown
//! - [`share`] - Query-string encoding and share links
//! - [`persist`] - The stored price table blob (with legacy migration)
//! - [`validation`] - Input coercion and table rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Quoting is total**: unknown keys, bad counts and broken blobs never
//!    fail a quote; they price at zero or fall back to defaults
//! 2. **No I/O**: storage and logging live in the crates above this one
//! 3. **Integer Money**: all monetary values are in cents (i64)
//! 4. **Explicit Errors**: settings edits return typed errors, never panics
//!
//! ## Example Usage
//!
//! ```rust
//! use cake_core::{compute_total, AddOn, Category, Money, PriceTable, Selection};
//!
//! let table = PriceTable::defaults();
//!
//! let mut selection = Selection::new();
//! selection.set_choice(Category::PanSize, "6 inch round");
//! selection.set_choice(Category::Flavor, "Chocolate");
//! selection.set_add_on_count(AddOn::Macaron, 4);
//!
//! // $25 pan + $5 chocolate + 4 × $3 macarons
//! assert_eq!(compute_total(&table, &selection), Money::from_dollars(42));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
mod legacy;
pub mod money;
pub mod persist;
pub mod price_table;
pub mod quote;
pub mod selection;
pub mod share;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use cake_core::Money` instead of
// `use cake_core::money::Money`

pub use error::{CoreError, CoreResult, ShareError, ValidationError};
pub use money::Money;
pub use persist::LoadOutcome;
pub use price_table::PriceTable;
pub use quote::{build_quote, compute_total, LineKind, Quote, QuoteLine};
pub use selection::Selection;
pub use share::{
    decode_selection, decode_selection_report, encode_selection, selection_from_url, share_url,
    DecodedSelection, FieldIssue,
};
pub use types::*;
pub use validation::{parse_count, parse_price, Coerced, InputIssue};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key of the price table blob.
///
/// Same key the browser version used in `localStorage`, so an exported
/// legacy blob can be dropped into a store unchanged.
pub const PRICE_TABLE_KEY: &str = "cakePricing";

/// Storage key of the selection echo.
pub const SELECTION_KEY: &str = "cakeSelection";

/// Current version of the persisted blob.
///
/// Version 1 is the untagged legacy shape (dollar maps, fixed add-on fields).
pub const SCHEMA_VERSION: u32 = 2;

/// Maximum length of a label, misc item name or servings text.
pub const MAX_LABEL_LEN: usize = 100;

/// Misc item slots in the default table (`misc1`..`misc4`).
pub const DEFAULT_MISC_SLOTS: usize = 4;
