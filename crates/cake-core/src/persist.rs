//! # Persisted Price Table
//!
//! The price table lives in a key-value store as one JSON blob under
//! `cakePricing`. This module owns that blob's format.
//!
//! ## Blob Format
//! ```json
//! { "schemaVersion": 2,
//!   "table": { "panSizes": [...], "flavors": [...], "shapes": [...],
//!              "addOns": {...}, "miscItems": [...] } }
//! ```
//! Prices inside are integer cents.
//!
//! ## Load Decision
//! ```text
//!  blob ──► None ─────────────────────────────────────► defaults  (Missing)
//!    │
//!    ├──► JSON object with schemaVersion 2, valid ────► table     (Current)
//!    ├──► untagged legacy shape, migrates + valid ────► table     (Migrated)
//!    └──► anything else ──────────────────────────────► defaults  (Malformed)
//! ```
//! Never a partially applied table: either the whole blob is used or none
//! of it is.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::legacy;
use crate::price_table::PriceTable;
use crate::SCHEMA_VERSION;

/// How `load` arrived at its table. The store logs this; the core doesn't.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored yet (first run).
    Missing,
    /// A current-version blob was used as is.
    Current,
    /// A legacy blob was upgraded; saving will rewrite it in the new format.
    Migrated,
    /// The blob was unusable and the defaults were used instead.
    Malformed { reason: String },
}

impl LoadOutcome {
    /// True when the returned table is the built-in defaults.
    pub fn used_defaults(&self) -> bool {
        matches!(self, LoadOutcome::Missing | LoadOutcome::Malformed { .. })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BlobOut<'a> {
    schema_version: u32,
    table: &'a PriceTable,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlobIn {
    table: PriceTable,
}

/// Serializes a table into the canonical blob.
pub fn save(table: &PriceTable) -> serde_json::Result<String> {
    serde_json::to_string(&BlobOut {
        schema_version: SCHEMA_VERSION,
        table,
    })
}

/// Loads a table from an optional blob, falling back to the defaults.
pub fn load(persisted: Option<&str>) -> PriceTable {
    load_with_outcome(persisted).0
}

/// Like `load`, but also says what happened.
///
/// ## Example
/// ```rust
/// use cake_core::persist::{load_with_outcome, save};
/// use cake_core::{LoadOutcome, PriceTable};
///
/// let (table, outcome) = load_with_outcome(Some("{oops"));
/// assert_eq!(table, PriceTable::defaults());
/// assert!(matches!(outcome, LoadOutcome::Malformed { .. }));
///
/// let blob = save(&table).unwrap();
/// assert_eq!(load_with_outcome(Some(&blob)), (table, LoadOutcome::Current));
/// ```
pub fn load_with_outcome(persisted: Option<&str>) -> (PriceTable, LoadOutcome) {
    let Some(blob) = persisted else {
        return (PriceTable::defaults(), LoadOutcome::Missing);
    };

    match parse(blob) {
        Ok((table, outcome)) => (table, outcome),
        Err(reason) => (PriceTable::defaults(), LoadOutcome::Malformed { reason }),
    }
}

fn parse(blob: &str) -> Result<(PriceTable, LoadOutcome), String> {
    let value: Value = serde_json::from_str(blob).map_err(|e| format!("not valid JSON: {}", e))?;
    let Value::Object(obj) = value else {
        return Err("not a JSON object".to_string());
    };

    let (table, outcome) = match obj.get("schemaVersion").cloned() {
        Some(version) if version.as_u64() == Some(u64::from(SCHEMA_VERSION)) => {
            let blob: BlobIn = serde_json::from_value(Value::Object(obj))
                .map_err(|e| format!("schema {} blob has the wrong shape: {}", SCHEMA_VERSION, e))?;
            (blob.table, LoadOutcome::Current)
        }
        Some(version) => return Err(format!("unsupported schemaVersion {}", version)),
        None if legacy::is_legacy_shape(&obj) => (legacy::migrate(&obj)?, LoadOutcome::Migrated),
        None => return Err("unrecognized shape".to_string()),
    };

    table
        .validate()
        .map_err(|e| format!("invalid table: {}", e))?;

    Ok((table, outcome))
}

impl PriceTable {
    /// See [`load`].
    pub fn load(persisted: Option<&str>) -> PriceTable {
        load(persisted)
    }

    /// See [`save`].
    pub fn save(&self) -> serde_json::Result<String> {
        save(self)
    }
}
