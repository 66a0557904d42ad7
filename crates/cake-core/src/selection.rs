//! # Selection
//!
//! What the customer picked. A selection only refers to the price table
//! through keys (labels and misc ids), so it can be built, stored and shared
//! without the table, and it stays valid when the table changes under it.
//!
//! ## Lifecycle
//! ```text
//! empty ──► pre-filled from a share link (optional)
//!   │
//!   ▼
//! mutated by user input ──► re-encoded into the query string
//!                       └─► echoed into the store under "cakeSelection"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::types::{AddOn, AddOnTable, Category, MiscItemId};

/// The customer's choices.
///
/// ## Normalization
/// - An empty or whitespace-only label is stored as unset
/// - Misc counts keep only non-zero entries, so "absent" and "zero" compare
///   equal
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pan_size: Option<String>,
    flavor: Option<String>,
    shape: Option<String>,
    add_on_counts: AddOnTable<u32>,
    misc_item_counts: BTreeMap<MiscItemId, u32>,
}

impl Selection {
    /// An empty selection: nothing chosen, every count zero.
    pub fn new() -> Self {
        Selection::default()
    }

    // =========================================================================
    // Choices
    // =========================================================================

    /// The label chosen in `category`, if any.
    pub fn choice(&self, category: Category) -> Option<&str> {
        self.choice_slot(category).as_deref()
    }

    /// Chooses `label` in `category`. No membership check is made: a label
    /// the table does not know prices at zero.
    pub fn set_choice(&mut self, category: Category, label: impl Into<String>) {
        let label = label.into();
        *self.choice_slot_mut(category) = if label.trim().is_empty() {
            None
        } else {
            Some(label)
        };
    }

    pub fn clear_choice(&mut self, category: Category) {
        *self.choice_slot_mut(category) = None;
    }

    // =========================================================================
    // Counts
    // =========================================================================

    pub fn add_on_count(&self, add_on: AddOn) -> u32 {
        self.add_on_counts.get(add_on)
    }

    pub fn set_add_on_count(&mut self, add_on: AddOn, count: u32) {
        self.add_on_counts.set(add_on, count);
    }

    /// All add-on counts, zero included.
    pub fn add_on_counts(&self) -> &AddOnTable<u32> {
        &self.add_on_counts
    }

    /// Count selected for a misc item; zero when never set.
    pub fn misc_count(&self, id: &str) -> u32 {
        self.misc_item_counts.get(id).copied().unwrap_or(0)
    }

    /// Sets a misc item count. Zero removes the entry.
    pub fn set_misc_count(&mut self, id: impl Into<MiscItemId>, count: u32) {
        let id = id.into();
        if count == 0 {
            self.misc_item_counts.remove(id.as_str());
        } else {
            self.misc_item_counts.insert(id, count);
        }
    }

    /// Non-zero misc counts in ascending id order.
    pub fn misc_counts(&self) -> impl Iterator<Item = (&MiscItemId, u32)> + '_ {
        self.misc_item_counts.iter().map(|(id, n)| (id, *n))
    }

    /// True when nothing is chosen and every count is zero.
    pub fn is_empty(&self) -> bool {
        self.pan_size.is_none()
            && self.flavor.is_none()
            && self.shape.is_none()
            && self.add_on_counts.iter().all(|(_, n)| n == 0)
            && self.misc_item_counts.is_empty()
    }

    fn choice_slot(&self, category: Category) -> &Option<String> {
        match category {
            Category::PanSize => &self.pan_size,
            Category::Flavor => &self.flavor,
            Category::Shape => &self.shape,
        }
    }

    fn choice_slot_mut(&mut self, category: Category) -> &mut Option<String> {
        match category {
            Category::PanSize => &mut self.pan_size,
            Category::Flavor => &mut self.flavor,
            Category::Shape => &mut self.shape,
        }
    }
}
