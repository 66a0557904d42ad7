//! # Price Table
//!
//! The operator-configurable catalog: pan sizes, flavors, shapes, unit
//! add-ons and misc items, each with a price.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PriceTable                                                             │
//! │  ├── pan_sizes   [ {label, price, servings}, ... ]   ordered, unique    │
//! │  ├── flavors     [ {label, price}, ... ]             ordered, unique    │
//! │  ├── shapes      [ {label, price}, ... ]             ordered, unique    │
//! │  ├── add_ons     { smallFondant, ..., ediblePrint }  fixed set          │
//! │  └── misc_items  [ {id, name, price}, ... ]          ordered, unique id │
//! │                                                                         │
//! │  Invariants (checked by validate(), kept by every edit below)          │
//! │  • every price >= 0                                                    │
//! │  • labels non-empty and unique within their category                   │
//! │  • misc ids non-empty and unique                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lookup Never Fails
//! `lookup_price` returns zero for an unset or unknown key. A selection made
//! before the operator renamed "Lemon" to "Lemon Curd" keeps pricing, it just
//! stops adding the surcharge.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{AddOn, AddOnTable, CatalogEntry, Category, MiscItem, MiscItemId, PanSize, PricedOption};
use crate::validation::{validate_label, validate_misc_name, validate_price, ValidationResult};
use crate::MAX_LABEL_LEN;

// =============================================================================
// Price Table
// =============================================================================

/// The full catalog a quote is priced against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceTable {
    pub pan_sizes: Vec<PanSize>,
    pub flavors: Vec<PricedOption>,
    pub shapes: Vec<PricedOption>,
    pub add_ons: AddOnTable<Money>,
    pub misc_items: Vec<MiscItem>,
}

impl Default for PriceTable {
    fn default() -> Self {
        PriceTable::defaults()
    }
}

impl PriceTable {
    /// The built-in catalog used on first run and whenever the persisted
    /// blob is missing or unusable.
    pub fn defaults() -> Self {
        PriceTable {
            pan_sizes: vec![
                PanSize::new("4 inch bento", Money::from_dollars(20), "2-4"),
                PanSize::new("4 inch tall", Money::from_dollars(25), "4-6"),
                PanSize::new("6 inch round", Money::from_dollars(25), "8-10"),
                PanSize::new("6 inch tall", Money::from_dollars(30), "10-12"),
                PanSize::new("8 inch round", Money::from_dollars(30), "14-18"),
            ],
            flavors: vec![
                PricedOption::new("Vanilla", Money::zero()),
                PricedOption::new("Chocolate", Money::from_dollars(5)),
                PricedOption::new("Red Velvet", Money::from_dollars(10)),
                PricedOption::new("Lemon", Money::from_dollars(8)),
                PricedOption::new("Strawberry", Money::from_dollars(8)),
            ],
            shapes: vec![
                PricedOption::new("Round", Money::zero()),
                PricedOption::new("Square", Money::from_dollars(5)),
                PricedOption::new("Heart", Money::from_dollars(15)),
                PricedOption::new("Custom", Money::from_dollars(25)),
            ],
            add_ons: AddOnTable {
                small_fondant: Money::from_dollars(10),
                medium_fondant: Money::from_dollars(15),
                large_fondant: Money::from_dollars(20),
                extra_color: Money::from_dollars(5),
                fake_flower: Money::from_dollars(10),
                real_flower: Money::from_dollars(25),
                macaron: Money::from_dollars(3),
                sticker_print: Money::from_dollars(8),
                edible_print: Money::from_dollars(12),
            },
            misc_items: (1..=crate::DEFAULT_MISC_SLOTS)
                .map(|n| MiscItem::new(MiscItemId::new(format!("misc{}", n)), "", Money::zero()))
                .collect(),
        }
    }

    /// A table with no options, zero add-on prices and no misc items.
    ///
    /// Handy as a starting point for building small catalogs by hand.
    pub fn empty() -> Self {
        PriceTable {
            pan_sizes: Vec::new(),
            flavors: Vec::new(),
            shapes: Vec::new(),
            add_ons: AddOnTable::filled(Money::zero()),
            misc_items: Vec::new(),
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Returns the price stored for `key` in `category`, or zero.
    ///
    /// ## Example
    /// ```rust
    /// use cake_core::{Category, Money, PriceTable};
    ///
    /// let table = PriceTable::defaults();
    /// assert_eq!(table.lookup_price(Category::Flavor, "Chocolate"), Money::from_dollars(5));
    /// assert_eq!(table.lookup_price(Category::Flavor, "Durian"), Money::zero());
    /// ```
    pub fn lookup_price(&self, category: Category, key: &str) -> Money {
        self.find_option_price(category, key).unwrap_or_default()
    }

    /// Like `lookup_price`, but tells "absent" apart from "priced at zero".
    pub fn find_option_price(&self, category: Category, key: &str) -> Option<Money> {
        match category {
            Category::PanSize => find_entry(&self.pan_sizes, key).map(CatalogEntry::price),
            Category::Flavor => find_entry(&self.flavors, key).map(CatalogEntry::price),
            Category::Shape => find_entry(&self.shapes, key).map(CatalogEntry::price),
        }
    }

    /// Returns the pan size with this label.
    pub fn pan_size(&self, label: &str) -> Option<&PanSize> {
        find_entry(&self.pan_sizes, label)
    }

    /// Labels of a category, in display order.
    pub fn labels(&self, category: Category) -> Vec<&str> {
        match category {
            Category::PanSize => self.pan_sizes.iter().map(|e| e.label()).collect(),
            Category::Flavor => self.flavors.iter().map(|e| e.label()).collect(),
            Category::Shape => self.shapes.iter().map(|e| e.label()).collect(),
        }
    }

    /// Per-unit price of an add-on.
    #[inline]
    pub fn unit_price(&self, add_on: AddOn) -> Money {
        self.add_ons.get(add_on)
    }

    /// Returns the misc item with this id.
    pub fn misc_item(&self, id: &str) -> Option<&MiscItem> {
        self.misc_items.iter().find(|m| m.id.as_str() == id)
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Checks every table invariant.
    ///
    /// Used on load: a blob that parses but breaks an invariant is treated
    /// the same as a missing blob.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_entries(Category::PanSize, &self.pan_sizes)?;
        validate_entries(Category::Flavor, &self.flavors)?;
        validate_entries(Category::Shape, &self.shapes)?;

        for (add_on, price) in self.add_ons.iter() {
            validate_price(add_on.label(), price)?;
        }

        let mut seen: Vec<&str> = Vec::with_capacity(self.misc_items.len());
        for item in &self.misc_items {
            if item.id.as_str().trim().is_empty() {
                return Err(ValidationError::Required {
                    field: "misc item id".to_string(),
                });
            }
            if seen.contains(&item.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "misc item id".to_string(),
                    value: item.id.to_string(),
                });
            }
            seen.push(item.id.as_str());

            if item.name.chars().count() > MAX_LABEL_LEN {
                return Err(ValidationError::TooLong {
                    field: "misc item name".to_string(),
                    max: MAX_LABEL_LEN,
                });
            }
            validate_price(item.display_name(), item.price)?;
        }

        Ok(())
    }

    // =========================================================================
    // Settings Edits: Pan Sizes, Flavors, Shapes
    // =========================================================================

    /// Renames an option. The new label must be unique in its category.
    ///
    /// Renaming to the same label is a no-op.
    pub fn rename_option(&mut self, category: Category, key: &str, new_label: &str) -> CoreResult<()> {
        let new_label = validate_label(&category.to_string(), new_label)?;
        match category {
            Category::PanSize => rename_entry(&mut self.pan_sizes, category, key, new_label),
            Category::Flavor => rename_entry(&mut self.flavors, category, key, new_label),
            Category::Shape => rename_entry(&mut self.shapes, category, key, new_label),
        }
    }

    /// Sets the price of an option.
    pub fn set_option_price(&mut self, category: Category, key: &str, price: Money) -> CoreResult<()> {
        validate_price(&format!("{} price", category), price)?;
        match category {
            Category::PanSize => find_entry_mut(&mut self.pan_sizes, category, key)?.set_price(price),
            Category::Flavor => find_entry_mut(&mut self.flavors, category, key)?.set_price(price),
            Category::Shape => find_entry_mut(&mut self.shapes, category, key)?.set_price(price),
        }
        Ok(())
    }

    /// Appends a new option at the end of its category.
    pub fn add_option(&mut self, category: Category, label: &str, price: Money) -> CoreResult<()> {
        let label = validate_label(&category.to_string(), label)?;
        validate_price(&format!("{} price", category), price)?;
        match category {
            Category::PanSize => push_entry(&mut self.pan_sizes, category, label, price),
            Category::Flavor => push_entry(&mut self.flavors, category, label, price),
            Category::Shape => push_entry(&mut self.shapes, category, label, price),
        }
    }

    /// Removes an option. Selections still pointing at it price at zero.
    pub fn remove_option(&mut self, category: Category, key: &str) -> CoreResult<()> {
        match category {
            Category::PanSize => remove_entry(&mut self.pan_sizes, category, key),
            Category::Flavor => remove_entry(&mut self.flavors, category, key),
            Category::Shape => remove_entry(&mut self.shapes, category, key),
        }
    }

    /// Sets the free-text servings range of a pan size.
    pub fn set_servings(&mut self, pan_label: &str, servings: &str) -> CoreResult<()> {
        let servings = servings.trim();
        if servings.chars().count() > MAX_LABEL_LEN {
            return Err(ValidationError::TooLong {
                field: "servings".to_string(),
                max: MAX_LABEL_LEN,
            }
            .into());
        }

        let pan = self
            .pan_sizes
            .iter_mut()
            .find(|p| p.label == pan_label)
            .ok_or_else(|| CoreError::OptionNotFound {
                category: Category::PanSize,
                key: pan_label.to_string(),
            })?;
        pan.servings = servings.to_string();
        Ok(())
    }

    // =========================================================================
    // Settings Edits: Add-ons
    // =========================================================================

    /// Sets the per-unit price of an add-on.
    pub fn set_add_on_price(&mut self, add_on: AddOn, price: Money) -> CoreResult<()> {
        validate_price(add_on.label(), price)?;
        self.add_ons.set(add_on, price);
        Ok(())
    }

    // =========================================================================
    // Settings Edits: Misc Items
    // =========================================================================

    /// Appends a misc item with a freshly generated id.
    pub fn add_misc_item(&mut self, name: &str, price: Money) -> CoreResult<MiscItemId> {
        let name = validate_misc_name(name)?;
        validate_price("misc item price", price)?;

        let id = MiscItemId::generate();
        self.misc_items.push(MiscItem::new(id.clone(), name, price));
        Ok(id)
    }

    /// Renames a misc item. Empty names are allowed.
    pub fn rename_misc_item(&mut self, id: &str, name: &str) -> CoreResult<()> {
        let name = validate_misc_name(name)?;
        self.misc_item_mut(id)?.name = name;
        Ok(())
    }

    /// Sets the price of a misc item.
    pub fn set_misc_item_price(&mut self, id: &str, price: Money) -> CoreResult<()> {
        validate_price("misc item price", price)?;
        self.misc_item_mut(id)?.price = price;
        Ok(())
    }

    /// Removes a misc item. Counts selected against it price at zero.
    pub fn remove_misc_item(&mut self, id: &str) -> CoreResult<MiscItem> {
        let index = self
            .misc_items
            .iter()
            .position(|m| m.id.as_str() == id)
            .ok_or_else(|| CoreError::MiscItemNotFound(id.to_string()))?;
        Ok(self.misc_items.remove(index))
    }

    /// Replaces every setting with the built-in defaults.
    pub fn reset_to_defaults(&mut self) {
        *self = PriceTable::defaults();
    }

    fn misc_item_mut(&mut self, id: &str) -> CoreResult<&mut MiscItem> {
        self.misc_items
            .iter_mut()
            .find(|m| m.id.as_str() == id)
            .ok_or_else(|| CoreError::MiscItemNotFound(id.to_string()))
    }
}

// =============================================================================
// Generic Entry Helpers
// =============================================================================

fn find_entry<'a, T: CatalogEntry>(entries: &'a [T], key: &str) -> Option<&'a T> {
    entries.iter().find(|e| e.label() == key)
}

fn find_entry_mut<'a, T: CatalogEntry>(
    entries: &'a mut [T],
    category: Category,
    key: &str,
) -> CoreResult<&'a mut T> {
    entries
        .iter_mut()
        .find(|e| e.label() == key)
        .ok_or_else(|| CoreError::OptionNotFound {
            category,
            key: key.to_string(),
        })
}

fn rename_entry<T: CatalogEntry>(
    entries: &mut [T],
    category: Category,
    key: &str,
    new_label: String,
) -> CoreResult<()> {
    if new_label != key && find_entry(entries, &new_label).is_some() {
        return Err(ValidationError::Duplicate {
            field: category.to_string(),
            value: new_label,
        }
        .into());
    }

    find_entry_mut(entries, category, key)?.set_label(new_label);
    Ok(())
}

fn push_entry<T: CatalogEntry>(
    entries: &mut Vec<T>,
    category: Category,
    label: String,
    price: Money,
) -> CoreResult<()> {
    if find_entry(entries, &label).is_some() {
        return Err(ValidationError::Duplicate {
            field: category.to_string(),
            value: label,
        }
        .into());
    }

    entries.push(T::new_entry(label, price));
    Ok(())
}

fn remove_entry<T: CatalogEntry>(entries: &mut Vec<T>, category: Category, key: &str) -> CoreResult<()> {
    let index = entries
        .iter()
        .position(|e| e.label() == key)
        .ok_or_else(|| CoreError::OptionNotFound {
            category,
            key: key.to_string(),
        })?;
    entries.remove(index);
    Ok(())
}

fn validate_entries<T: CatalogEntry>(category: Category, entries: &[T]) -> ValidationResult<()> {
    let field = category.to_string();
    let mut seen: Vec<&str> = Vec::with_capacity(entries.len());

    for entry in entries {
        let label = entry.label();
        if label.trim().is_empty() {
            return Err(ValidationError::Required { field });
        }
        if label.chars().count() > MAX_LABEL_LEN {
            return Err(ValidationError::TooLong {
                field,
                max: MAX_LABEL_LEN,
            });
        }
        if seen.contains(&label) {
            return Err(ValidationError::Duplicate {
                field,
                value: label.to_string(),
            });
        }
        seen.push(label);
        validate_price(label, entry.price())?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
