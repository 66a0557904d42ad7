//! Migration of the unversioned browser-era price table.
//!
//! ```text
//! {                                         PriceTable (schema 2)
//!   "panSizes": { "6 inch round": 25 },  ─►   panSizes: [{label, price: 2500, servings: ""}]
//!   "flavors":  { "Chocolate": 5 },      ─►   flavors:  [{label, price: 500}]
//!   "shapes":   { "Heart": 15 },         ─►   shapes:   [{label, price: 1500}]
//!   "fondantElements": 15,               ─►   addOns.mediumFondant = 1500
//!   "macarons": 3, ...                   ─►   addOns.macaron = 300, ...
//!   "miscItems": { "misc1": {...} }      ─►   miscItems: [{id: "misc1", ...}]
//! }
//! ```
//!
//! Prices are dollars (any JSON number). Map order is display order.

use serde_json::{Map, Value};

use crate::money::Money;
use crate::price_table::PriceTable;
use crate::types::{AddOn, MiscItem, PanSize, PricedOption};

/// Legacy add-on fields, in lookup order. A later field for the same add-on
/// overrides an earlier one, so the explicit `mediumFondant` beats the older
/// catch-all `fondantElements`.
const ADD_ON_FIELDS: [(&str, AddOn); 10] = [
    ("fondantElements", AddOn::MediumFondant),
    ("smallFondant", AddOn::SmallFondant),
    ("mediumFondant", AddOn::MediumFondant),
    ("largeFondant", AddOn::LargeFondant),
    ("colors", AddOn::ExtraColor),
    ("fakeFlowers", AddOn::FakeFlower),
    ("realFlowers", AddOn::RealFlower),
    ("macarons", AddOn::Macaron),
    ("stickerPrint", AddOn::StickerPrint),
    ("ediblePrint", AddOn::EdiblePrint),
];

/// True when the object looks like the legacy shape at all.
pub(crate) fn is_legacy_shape(obj: &Map<String, Value>) -> bool {
    ["panSizes", "flavors", "shapes"]
        .iter()
        .all(|key| obj.get(*key).map_or(false, Value::is_object))
}

/// Converts a legacy object into a table. The result still needs
/// `PriceTable::validate`.
pub(crate) fn migrate(obj: &Map<String, Value>) -> Result<PriceTable, String> {
    let defaults = PriceTable::defaults();

    let pan_sizes = object_field(obj, "panSizes")?
        .iter()
        .map(|(label, value)| pan_size(label, value))
        .collect::<Result<Vec<_>, _>>()?;

    let flavors = priced_options(object_field(obj, "flavors")?, "flavors")?;
    let shapes = priced_options(object_field(obj, "shapes")?, "shapes")?;

    let mut add_ons = defaults.add_ons;
    for (field, add_on) in ADD_ON_FIELDS {
        if let Some(value) = obj.get(field) {
            add_ons.set(add_on, dollars(value, field)?);
        }
    }

    let misc_items = match obj.get("miscItems") {
        None | Some(Value::Null) => defaults.misc_items,
        Some(Value::Object(slots)) => slots
            .iter()
            .map(|(id, value)| misc_item(id, value))
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err("miscItems is not an object".to_string()),
    };

    Ok(PriceTable {
        pan_sizes,
        flavors,
        shapes,
        add_ons,
        misc_items,
    })
}

fn object_field<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a Map<String, Value>, String> {
    obj.get(field)
        .and_then(Value::as_object)
        .ok_or_else(|| format!("{} is not an object", field))
}

fn pan_size(label: &str, value: &Value) -> Result<PanSize, String> {
    match value {
        Value::Object(fields) => {
            let price = fields
                .get("price")
                .ok_or_else(|| format!("pan size '{}' has no price", label))?;
            let servings = match fields.get("servings") {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
            };
            Ok(PanSize::new(label, dollars(price, label)?, servings))
        }
        other => Ok(PanSize::new(label, dollars(other, label)?, "")),
    }
}

fn priced_options(map: &Map<String, Value>, field: &str) -> Result<Vec<PricedOption>, String> {
    map.iter()
        .map(|(label, value)| {
            dollars(value, label)
                .map(|price| PricedOption::new(label.as_str(), price))
                .map_err(|e| format!("{}: {}", field, e))
        })
        .collect()
}

fn misc_item(id: &str, value: &Value) -> Result<MiscItem, String> {
    match value {
        Value::Object(fields) => {
            let name = fields.get("name").and_then(Value::as_str).unwrap_or("");
            let price = match fields.get("price") {
                Some(price) => dollars(price, id)?,
                None => Money::zero(),
            };
            Ok(MiscItem::new(id, name, price))
        }
        other => Ok(MiscItem::new(id, "", dollars(other, id)?)),
    }
}

/// Converts a JSON number of dollars to cents, rounding to the nearest cent.
fn dollars(value: &Value, field: &str) -> Result<Money, String> {
    let amount = value
        .as_f64()
        .ok_or_else(|| format!("{} is not a number", field))?;

    if !amount.is_finite() || amount < 0.0 {
        return Err(format!("{} is not a non-negative price", field));
    }

    let cents = (amount * 100.0).round();
    if cents >= i64::MAX as f64 {
        return Err(format!("{} is too large", field));
    }

    Ok(Money::from_cents(cents as i64))
}
