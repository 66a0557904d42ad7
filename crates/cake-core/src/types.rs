//! # Domain Types
//!
//! The building blocks a price table and a selection are made of.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    PanSize      │   │  PricedOption   │   │    MiscItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  label (key)    │   │  label (key)    │   │  id (stable)    │       │
//! │  │  price          │   │  price          │   │  name (free)    │       │
//! │  │  servings       │   │  (flavor/shape) │   │  price          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────────────────────────┐     │
//! │  │    Category     │   │   AddOn  ──►  AddOnTable<T>             │     │
//! │  │  ─────────────  │   │   ──────────────────────────────────    │     │
//! │  │  PanSize        │   │   9 fixed unit add-ons, one T each:     │     │
//! │  │  Flavor         │   │   Money in the price table,             │     │
//! │  │  Shape          │   │   u32 counts in the selection           │     │
//! │  └─────────────────┘   └─────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Keys vs Identity
//! Pan sizes, flavors and shapes are keyed by their label: the label is what
//! a selection stores and what a share link carries. Misc items have a
//! separate stable `id` because their display name is free text the operator
//! edits all the time.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// The three single-choice categories of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    PanSize,
    Flavor,
    Shape,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 3] = [Category::PanSize, Category::Flavor, Category::Shape];

    /// The query-string key a selection uses for this category.
    pub const fn query_key(&self) -> &'static str {
        match self {
            Category::PanSize => "panSize",
            Category::Flavor => "flavor",
            Category::Shape => "shape",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::PanSize => write!(f, "Pan size"),
            Category::Flavor => write!(f, "Flavor"),
            Category::Shape => write!(f, "Shape"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "pansize" | "pan" | "size" => Ok(Category::PanSize),
            "flavor" | "flavour" => Ok(Category::Flavor),
            "shape" => Ok(Category::Shape),
            other => Err(format!(
                "Unknown category: '{}'. Valid options: pan-size, flavor, shape",
                other
            )),
        }
    }
}

// =============================================================================
// Catalog Entries
// =============================================================================

/// Shared accessors for the label-keyed entries of a category.
///
/// Lets the price table run one implementation of lookup/rename/set-price
/// over pan sizes (which carry servings) and plain surcharges alike.
pub trait CatalogEntry {
    /// Builds a fresh entry for `add_option`.
    fn new_entry(label: String, price: Money) -> Self;
    fn label(&self) -> &str;
    fn set_label(&mut self, label: String);
    fn price(&self) -> Money;
    fn set_price(&mut self, price: Money);
}

/// A pan size with its base price and a free-text servings range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PanSize {
    /// Display label and selection key, e.g. "8 inch round".
    pub label: String,

    /// Base price.
    pub price: Money,

    /// Free text, e.g. "10-12".
    #[serde(default)]
    pub servings: String,
}

impl PanSize {
    pub fn new(label: impl Into<String>, price: Money, servings: impl Into<String>) -> Self {
        PanSize {
            label: label.into(),
            price,
            servings: servings.into(),
        }
    }
}

impl CatalogEntry for PanSize {
    fn new_entry(label: String, price: Money) -> Self {
        PanSize::new(label, price, "")
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn set_label(&mut self, label: String) {
        self.label = label;
    }

    fn price(&self) -> Money {
        self.price
    }

    fn set_price(&mut self, price: Money) {
        self.price = price;
    }
}

/// A flavor or shape with its surcharge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricedOption {
    pub label: String,
    pub price: Money,
}

impl PricedOption {
    pub fn new(label: impl Into<String>, price: Money) -> Self {
        PricedOption {
            label: label.into(),
            price,
        }
    }
}

impl CatalogEntry for PricedOption {
    fn new_entry(label: String, price: Money) -> Self {
        PricedOption::new(label, price)
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn set_label(&mut self, label: String) {
        self.label = label;
    }

    fn price(&self) -> Money {
        self.price
    }

    fn set_price(&mut self, price: Money) {
        self.price = price;
    }
}

// =============================================================================
// Misc Items
// =============================================================================

/// Stable identity of a misc item.
///
/// The default table ships the historical slot keys `misc1`..`misc4`;
/// items the operator adds get a UUID v4 in simple (hyphenless) form, which
/// keeps share links free of escaping.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MiscItemId(String);

impl MiscItemId {
    pub fn new(id: impl Into<String>) -> Self {
        MiscItemId(id.into())
    }

    /// Generates a fresh id for an operator-added item.
    pub fn generate() -> Self {
        MiscItemId(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MiscItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for MiscItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MiscItemId {
    fn from(id: &str) -> Self {
        MiscItemId::new(id)
    }
}

/// A user-definable extra line item ("Cake board", "Delivery", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MiscItem {
    pub id: MiscItemId,

    /// Free text; may be empty for an unused slot.
    #[serde(default)]
    pub name: String,

    pub price: Money,
}

impl MiscItem {
    pub fn new(id: impl Into<MiscItemId>, name: impl Into<String>, price: Money) -> Self {
        MiscItem {
            id: id.into(),
            name: name.into(),
            price,
        }
    }

    /// Name shown in a quote; unnamed slots fall back to their id.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }
}

// =============================================================================
// Unit Add-ons
// =============================================================================

/// The fixed set of per-unit decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum AddOn {
    SmallFondant,
    MediumFondant,
    LargeFondant,
    ExtraColor,
    FakeFlower,
    RealFlower,
    Macaron,
    StickerPrint,
    EdiblePrint,
}

impl AddOn {
    /// Every add-on, in display and encoding order.
    pub const ALL: [AddOn; 9] = [
        AddOn::SmallFondant,
        AddOn::MediumFondant,
        AddOn::LargeFondant,
        AddOn::ExtraColor,
        AddOn::FakeFlower,
        AddOn::RealFlower,
        AddOn::Macaron,
        AddOn::StickerPrint,
        AddOn::EdiblePrint,
    ];

    /// The query-string key carrying this add-on's count.
    pub const fn query_key(&self) -> &'static str {
        match self {
            AddOn::SmallFondant => "smallFondantCount",
            AddOn::MediumFondant => "mediumFondantCount",
            AddOn::LargeFondant => "largeFondantCount",
            AddOn::ExtraColor => "colorCount",
            AddOn::FakeFlower => "fakeFlowerCount",
            AddOn::RealFlower => "realFlowerCount",
            AddOn::Macaron => "macaronCount",
            AddOn::StickerPrint => "stickerPrintCount",
            AddOn::EdiblePrint => "ediblePrintCount",
        }
    }

    /// Human-readable name for quote lines and settings screens.
    pub const fn label(&self) -> &'static str {
        match self {
            AddOn::SmallFondant => "Small fondant element",
            AddOn::MediumFondant => "Medium fondant element",
            AddOn::LargeFondant => "Large fondant element",
            AddOn::ExtraColor => "Extra color",
            AddOn::FakeFlower => "Fake flower",
            AddOn::RealFlower => "Real flower",
            AddOn::Macaron => "Macaron",
            AddOn::StickerPrint => "Sticker print",
            AddOn::EdiblePrint => "Edible print",
        }
    }

    /// Looks an add-on up by its query key.
    pub fn from_query_key(key: &str) -> Option<AddOn> {
        AddOn::ALL.into_iter().find(|a| a.query_key() == key)
    }
}

impl fmt::Display for AddOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for AddOn {
    type Err = String;

    /// Accepts the camelCase serde name, the kebab-case CLI name, or the
    /// query key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase().replace(['-', '_', ' '], "");
        AddOn::ALL
            .into_iter()
            .find(|a| {
                let serde_name = format!("{:?}", a).to_lowercase();
                let query = a.query_key().to_lowercase();
                wanted == serde_name || wanted == query
            })
            .ok_or_else(|| format!("Unknown add-on: '{}'", s))
    }
}

/// One value per unit add-on.
///
/// Used as `AddOnTable<Money>` for unit prices and `AddOnTable<u32>` for
/// selected counts, so both sides always cover the same fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AddOnTable<T> {
    pub small_fondant: T,
    pub medium_fondant: T,
    pub large_fondant: T,
    pub extra_color: T,
    pub fake_flower: T,
    pub real_flower: T,
    pub macaron: T,
    pub sticker_print: T,
    pub edible_print: T,
}

impl<T: Copy> AddOnTable<T> {
    /// Builds a table holding `value` for every add-on.
    pub fn filled(value: T) -> Self {
        AddOnTable {
            small_fondant: value,
            medium_fondant: value,
            large_fondant: value,
            extra_color: value,
            fake_flower: value,
            real_flower: value,
            macaron: value,
            sticker_print: value,
            edible_print: value,
        }
    }

    pub fn get(&self, add_on: AddOn) -> T {
        *self.slot(add_on)
    }

    pub fn set(&mut self, add_on: AddOn, value: T) {
        *self.slot_mut(add_on) = value;
    }

    /// Iterates `(add_on, value)` in `AddOn::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (AddOn, T)> + '_ {
        AddOn::ALL.into_iter().map(move |a| (a, self.get(a)))
    }

    fn slot(&self, add_on: AddOn) -> &T {
        match add_on {
            AddOn::SmallFondant => &self.small_fondant,
            AddOn::MediumFondant => &self.medium_fondant,
            AddOn::LargeFondant => &self.large_fondant,
            AddOn::ExtraColor => &self.extra_color,
            AddOn::FakeFlower => &self.fake_flower,
            AddOn::RealFlower => &self.real_flower,
            AddOn::Macaron => &self.macaron,
            AddOn::StickerPrint => &self.sticker_print,
            AddOn::EdiblePrint => &self.edible_print,
        }
    }

    fn slot_mut(&mut self, add_on: AddOn) -> &mut T {
        match add_on {
            AddOn::SmallFondant => &mut self.small_fondant,
            AddOn::MediumFondant => &mut self.medium_fondant,
            AddOn::LargeFondant => &mut self.large_fondant,
            AddOn::ExtraColor => &mut self.extra_color,
            AddOn::FakeFlower => &mut self.fake_flower,
            AddOn::RealFlower => &mut self.real_flower,
            AddOn::Macaron => &mut self.macaron,
            AddOn::StickerPrint => &mut self.sticker_print,
            AddOn::EdiblePrint => &mut self.edible_print,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_on_query_keys_are_unique() {
        let mut keys: Vec<_> = AddOn::ALL.iter().map(|a| a.query_key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), AddOn::ALL.len());
    }

    #[test]
    fn test_add_on_from_query_key() {
        assert_eq!(AddOn::from_query_key("macaronCount"), Some(AddOn::Macaron));
        assert_eq!(AddOn::from_query_key("colorCount"), Some(AddOn::ExtraColor));
        assert_eq!(AddOn::from_query_key("macarons"), None);
    }

    #[test]
    fn test_add_on_parsing() {
        assert_eq!("macaron".parse::<AddOn>().unwrap(), AddOn::Macaron);
        assert_eq!("real-flower".parse::<AddOn>().unwrap(), AddOn::RealFlower);
        assert_eq!("small_fondant".parse::<AddOn>().unwrap(), AddOn::SmallFondant);
        assert_eq!("colorCount".parse::<AddOn>().unwrap(), AddOn::ExtraColor);
        assert!("sprinkles".parse::<AddOn>().is_err());
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("pan-size".parse::<Category>().unwrap(), Category::PanSize);
        assert_eq!("Flavor".parse::<Category>().unwrap(), Category::Flavor);
        assert_eq!("shape".parse::<Category>().unwrap(), Category::Shape);
        assert!("topping".parse::<Category>().is_err());
    }

    #[test]
    fn test_add_on_table_get_set() {
        let mut counts: AddOnTable<u32> = AddOnTable::default();
        counts.set(AddOn::Macaron, 4);
        assert_eq!(counts.get(AddOn::Macaron), 4);
        assert_eq!(counts.get(AddOn::FakeFlower), 0);
        assert_eq!(counts.iter().filter(|(_, n)| *n > 0).count(), 1);
    }

    #[test]
    fn test_add_on_table_json_uses_camel_case() {
        let prices = AddOnTable::filled(Money::from_cents(100));
        let json = serde_json::to_value(prices).unwrap();
        assert_eq!(json["smallFondant"], 100);
        assert_eq!(json["ediblePrint"], 100);
    }

    #[test]
    fn test_misc_item_display_name_falls_back_to_id() {
        let unnamed = MiscItem::new("misc2", "  ", Money::zero());
        assert_eq!(unnamed.display_name(), "misc2");

        let named = MiscItem::new("misc1", "Cake board", Money::from_dollars(4));
        assert_eq!(named.display_name(), "Cake board");
    }

    #[test]
    fn test_generated_misc_ids_are_distinct_and_query_safe() {
        let a = MiscItemId::generate();
        let b = MiscItemId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }
}
