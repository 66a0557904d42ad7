//! # Quote Engine
//!
//! The total-price function and the line-item breakdown built on it.
//!
//! ## The Formula
//! ```text
//! total = price(panSizes, selection.panSize)
//!       + price(flavors,  selection.flavor)
//!       + price(shapes,   selection.shape)
//!       + Σ addOn   count[addOn] × unitPrice[addOn]
//!       + Σ misc    count[item.id] × item.price     (items in the table only)
//! ```
//!
//! Every term is non-negative for a valid table. Sums saturate at
//! `i64::MAX` cents. No rounding, no formatting, no caching: call it again
//! after every change.
//!
//! ## Breakdown Visibility
//! ```text
//! ┌──────────────────────┬──────────────────────────────────────────┐
//! │ Line                 │ Shown when                               │
//! ├──────────────────────┼──────────────────────────────────────────┤
//! │ Pan size             │ a pan size is chosen (even at $0)        │
//! │ Flavor / Shape       │ chosen AND surcharge > 0                 │
//! │ Add-on               │ count > 0 AND unit price > 0             │
//! │ Misc item            │ count > 0 AND price > 0                  │
//! └──────────────────────┴──────────────────────────────────────────┘
//! ```
//! A hidden line always carries $0, so the visible lines sum to the total.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::price_table::PriceTable;
use crate::selection::Selection;
use crate::types::{AddOn, Category};

// =============================================================================
// Total
// =============================================================================

/// Computes the quote total for `selection` against `table`.
///
/// Never fails: a choice or misc id the table does not know contributes zero.
///
/// ## Example
/// ```rust
/// use cake_core::{compute_total, Category, Money, PriceTable, Selection};
///
/// let table = PriceTable::defaults();
/// let mut selection = Selection::new();
/// selection.set_choice(Category::PanSize, "12 inch tall"); // not in the table
///
/// assert_eq!(compute_total(&table, &selection), Money::zero());
/// ```
pub fn compute_total(table: &PriceTable, selection: &Selection) -> Money {
    let choices: Money = Category::ALL
        .iter()
        .map(|&category| choice_price(table, selection, category))
        .sum();

    let add_ons: Money = AddOn::ALL
        .iter()
        .map(|&add_on| table.unit_price(add_on) * selection.add_on_count(add_on))
        .sum();

    let misc: Money = table
        .misc_items
        .iter()
        .map(|item| item.price * selection.misc_count(item.id.as_str()))
        .sum();

    choices + add_ons + misc
}

fn choice_price(table: &PriceTable, selection: &Selection, category: Category) -> Money {
    selection
        .choice(category)
        .map(|key| table.lookup_price(category, key))
        .unwrap_or_default()
}

// =============================================================================
// Breakdown
// =============================================================================

/// What a quote line stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum LineKind {
    PanSize,
    Flavor,
    Shape,
    AddOn,
    Misc,
}

impl From<Category> for LineKind {
    fn from(category: Category) -> Self {
        match category {
            Category::PanSize => LineKind::PanSize,
            Category::Flavor => LineKind::Flavor,
            Category::Shape => LineKind::Shape,
        }
    }
}

/// One row of the breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub kind: LineKind,

    /// "Pan size", "Macaron", or a misc item's display name.
    pub label: String,

    /// The chosen option ("8 inch round") for category lines.
    pub detail: Option<String>,

    /// Servings range of the chosen pan size, when it has one.
    pub servings: Option<String>,

    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

/// A priced selection, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub lines: Vec<QuoteLine>,
    pub total: Money,
}

impl Quote {
    /// True when there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Builds the visible breakdown plus the total.
pub fn build_quote(table: &PriceTable, selection: &Selection) -> Quote {
    let mut lines = Vec::new();

    for category in Category::ALL {
        let Some(key) = selection.choice(category) else {
            continue;
        };
        let price = table.lookup_price(category, key);
        if category != Category::PanSize && !price.is_positive() {
            continue;
        }

        let servings = match category {
            Category::PanSize => table
                .pan_size(key)
                .map(|p| p.servings.clone())
                .filter(|s| !s.is_empty()),
            _ => None,
        };

        lines.push(QuoteLine {
            kind: category.into(),
            label: category.to_string(),
            detail: Some(key.to_string()),
            servings,
            quantity: 1,
            unit_price: price,
            line_total: price,
        });
    }

    for (add_on, count) in selection.add_on_counts().iter() {
        let unit_price = table.unit_price(add_on);
        if count == 0 || !unit_price.is_positive() {
            continue;
        }
        lines.push(QuoteLine {
            kind: LineKind::AddOn,
            label: add_on.label().to_string(),
            detail: None,
            servings: None,
            quantity: count,
            unit_price,
            line_total: unit_price * count,
        });
    }

    for item in &table.misc_items {
        let count = selection.misc_count(item.id.as_str());
        if count == 0 || !item.price.is_positive() {
            continue;
        }
        lines.push(QuoteLine {
            kind: LineKind::Misc,
            label: item.display_name().to_string(),
            detail: None,
            servings: None,
            quantity: count,
            unit_price: item.price,
            line_total: item.price * count,
        });
    }

    Quote {
        lines,
        total: compute_total(table, selection),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
