//! # Pricing Repository
//!
//! Reads and writes the two well-known keys on top of any `KeyValueStore`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PricingRepository<S>                                                   │
//! │  ├── load_price_table()  "cakePricing"   ──► PriceTable (never fails)   │
//! │  ├── save_price_table()  "cakePricing"   ◄── PriceTable                 │
//! │  ├── clear_price_table() "cakePricing"   ✕                              │
//! │  ├── echo_selection()    "cakeSelection" ◄── encoded Selection          │
//! │  └── last_selection()    "cakeSelection" ──► Selection                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The selection echo is a convenience for the next session. Pricing never
//! reads it back on its own; the caller decides whether to restore it.

use tracing::{debug, info, warn};

use cake_core::persist;
use cake_core::{
    decode_selection, encode_selection, LoadOutcome, PriceTable, Selection, PRICE_TABLE_KEY,
    SELECTION_KEY,
};

use crate::error::StoreResult;
use crate::kv::KeyValueStore;

/// Price table and selection persistence over a key-value store.
#[derive(Debug)]
pub struct PricingRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PricingRepository<S> {
    pub fn new(store: S) -> Self {
        PricingRepository { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Loads the price table, falling back to the defaults.
    ///
    /// A store read error is treated like a missing blob. The outcome is
    /// logged and returned so the caller can tell a migrated table (worth
    /// re-saving) from a fresh one.
    pub fn load_price_table(&self) -> (PriceTable, LoadOutcome) {
        let blob = match self.store.get(PRICE_TABLE_KEY) {
            Ok(blob) => blob,
            Err(e) => {
                warn!(error = %e, "Could not read price table, using defaults");
                None
            }
        };

        let (table, outcome) = persist::load_with_outcome(blob.as_deref());
        match &outcome {
            LoadOutcome::Missing => info!("No saved price table, using defaults"),
            LoadOutcome::Current => debug!(
                pan_sizes = table.pan_sizes.len(),
                flavors = table.flavors.len(),
                shapes = table.shapes.len(),
                misc_items = table.misc_items.len(),
                "Loaded price table"
            ),
            LoadOutcome::Migrated => info!("Migrated legacy price table to the current format"),
            LoadOutcome::Malformed { reason } => {
                warn!(reason = %reason, "Saved price table is unusable, using defaults")
            }
        }

        (table, outcome)
    }

    /// Persists the price table.
    pub fn save_price_table(&mut self, table: &PriceTable) -> StoreResult<()> {
        let blob = persist::save(table)?;
        self.store.set(PRICE_TABLE_KEY, &blob)?;
        info!(bytes = blob.len(), "Price table saved");
        Ok(())
    }

    /// Drops the saved price table so the next load uses the defaults.
    pub fn clear_price_table(&mut self) -> StoreResult<()> {
        self.store.remove(PRICE_TABLE_KEY)?;
        info!("Saved price table cleared");
        Ok(())
    }

    /// Stores the encoded selection. An empty selection clears the echo.
    pub fn echo_selection(&mut self, selection: &Selection) -> StoreResult<()> {
        let encoded = encode_selection(selection);
        if encoded.is_empty() {
            self.store.remove(SELECTION_KEY)?;
        } else {
            self.store.set(SELECTION_KEY, &encoded)?;
        }
        debug!(query = %encoded, "Selection echoed");
        Ok(())
    }

    /// The last echoed selection, decoded against `table`.
    pub fn last_selection(&self, table: &PriceTable) -> Option<Selection> {
        match self.store.get(SELECTION_KEY) {
            Ok(Some(query)) => Some(decode_selection(&query, table)),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Could not read selection echo");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{FileStore, MemoryStore};
    use cake_core::{AddOn, Category, Money};
    use tempfile::TempDir;

    #[test]
    fn test_first_run_uses_defaults() {
        let repo = PricingRepository::new(MemoryStore::new());
        let (table, outcome) = repo.load_price_table();
        assert_eq!(table, PriceTable::defaults());
        assert_eq!(outcome, LoadOutcome::Missing);
    }

    #[test]
    fn test_save_then_load() {
        let mut repo = PricingRepository::new(MemoryStore::new());
        let mut table = PriceTable::defaults();
        table.set_option_price(Category::Shape, "Heart", Money::from_dollars(18)).unwrap();

        repo.save_price_table(&table).unwrap();
        let (loaded, outcome) = repo.load_price_table();
        assert_eq!(loaded, table);
        assert_eq!(outcome, LoadOutcome::Current);

        repo.clear_price_table().unwrap();
        assert_eq!(repo.load_price_table().0, PriceTable::defaults());
    }

    #[test]
    fn test_malformed_blob_falls_back() {
        let mut store = MemoryStore::new();
        store.set(PRICE_TABLE_KEY, "{\"schemaVersion\":2,\"table\":7}").unwrap();

        let (table, outcome) = PricingRepository::new(store).load_price_table();
        assert_eq!(table, PriceTable::defaults());
        assert!(outcome.used_defaults());
    }

    #[test]
    fn test_selection_echo() {
        let mut repo = PricingRepository::new(MemoryStore::new());
        let table = PriceTable::defaults();
        assert_eq!(repo.last_selection(&table), None);

        let mut selection = Selection::new();
        selection.set_choice(Category::Flavor, "Lemon");
        selection.set_add_on_count(AddOn::Macaron, 6);
        repo.echo_selection(&selection).unwrap();

        assert_eq!(
            repo.store().get(SELECTION_KEY).unwrap().as_deref(),
            Some("flavor=Lemon&macaronCount=6")
        );
        assert_eq!(repo.last_selection(&table), Some(selection));

        repo.echo_selection(&Selection::new()).unwrap();
        assert_eq!(repo.last_selection(&table), None);
    }

    #[test]
    fn test_file_backed_repository_persists_across_sessions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cake-quote.json");

        let mut table = PriceTable::defaults();
        table.add_misc_item("Delivery", Money::from_dollars(15)).unwrap();
        {
            let mut repo = PricingRepository::new(FileStore::open(&path).unwrap());
            repo.save_price_table(&table).unwrap();
        }

        let repo = PricingRepository::new(FileStore::open(&path).unwrap());
        assert_eq!(repo.load_price_table(), (table, LoadOutcome::Current));
        assert!(repo.store().updated_at(PRICE_TABLE_KEY).is_some());
    }
}
