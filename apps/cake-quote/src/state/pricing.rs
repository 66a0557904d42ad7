//! # Pricing State
//!
//! The session's price table plus a dirty flag.
//!
//! ```text
//! startup ──► load_price_table() ──► PricingState { table, dirty: migrated? }
//!                                        │
//!              settings edit (ok) ───────┤ dirty = true
//!              settings edit (err) ──────┤ unchanged (edits are all-or-nothing)
//!              save_price_table() ───────┘ dirty = false
//! ```

use cake_core::{CoreResult, LoadOutcome, PriceTable};

/// The price table as the commands see it.
#[derive(Debug, Clone)]
pub struct PricingState {
    table: PriceTable,
    dirty: bool,
    loaded: LoadOutcome,
}

impl PricingState {
    /// Wraps a freshly loaded table.
    ///
    /// A migrated table starts dirty so the next save writes the new format.
    pub fn new(table: PriceTable, loaded: LoadOutcome) -> Self {
        let dirty = loaded == LoadOutcome::Migrated;
        PricingState {
            table,
            dirty,
            loaded,
        }
    }

    pub fn table(&self) -> &PriceTable {
        &self.table
    }

    /// Unsaved edits exist.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// How the table was obtained at startup.
    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.loaded
    }

    /// Applies one settings edit. The table is only touched when the edit
    /// succeeds.
    pub fn edit<T, F>(&mut self, f: F) -> CoreResult<T>
    where
        F: FnOnce(&mut PriceTable) -> CoreResult<T>,
    {
        let mut draft = self.table.clone();
        let result = f(&mut draft)?;
        self.table = draft;
        self.dirty = true;
        Ok(result)
    }

    /// Replaces the table with the defaults (unsaved).
    pub fn reset(&mut self) {
        self.table.reset_to_defaults();
        self.dirty = true;
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }
}

impl Default for PricingState {
    fn default() -> Self {
        PricingState::new(PriceTable::defaults(), LoadOutcome::Missing)
    }
}
