//! # Settings Commands
//!
//! Operator edits to the price table.
//!
//! Every edit goes through [`PricingState::edit`](crate::state::PricingState::edit),
//! so a rejected edit leaves the table exactly as it was. Edits mark the
//! table dirty; `save_price_table` writes it to the store.
//!
//! Prices arrive as raw form text. Unparseable prices become $0.00 and the
//! coercion is returned in `warnings` instead of failing the edit.

use serde::Serialize;
use tracing::{debug, info};

use cake_core::{
    parse_price, AddOn, Category, FieldIssue, Money, MiscItem, MiscItemId, PriceTable,
};
use cake_store::KeyValueStore;

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Responses
// =============================================================================

/// The price table after an edit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub table: PriceTable,

    /// Unsaved edits exist.
    pub dirty: bool,

    /// Prices that were coerced to $0.00.
    pub warnings: Vec<FieldIssue>,
}

/// Response for `add_misc_item`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MiscItemCreated {
    pub id: MiscItemId,

    #[serde(flatten)]
    pub settings: SettingsResponse,
}

// =============================================================================
// Read
// =============================================================================

/// Gets the current price table.
pub fn get_price_table<S: KeyValueStore>(state: &AppState<S>) -> SettingsResponse {
    debug!("get_price_table command");
    respond(state, Vec::new())
}

// =============================================================================
// Options (pan sizes, flavors, shapes)
// =============================================================================

/// Renames an option. The new label must be unique within its category.
pub fn rename_option<S: KeyValueStore>(
    state: &mut AppState<S>,
    category: Category,
    key: &str,
    new_label: &str,
) -> Result<SettingsResponse, ApiError> {
    debug!(%category, key = %key, new_label = %new_label, "rename_option command");
    state
        .pricing
        .edit(|t| t.rename_option(category, key, new_label))?;
    Ok(respond(state, Vec::new()))
}

/// Sets an option's price from raw form input.
pub fn set_option_price<S: KeyValueStore>(
    state: &mut AppState<S>,
    category: Category,
    key: &str,
    raw_price: &str,
) -> Result<SettingsResponse, ApiError> {
    debug!(%category, key = %key, raw_price = %raw_price, "set_option_price command");
    let (price, warnings) = price_from(key, raw_price);
    state
        .pricing
        .edit(|t| t.set_option_price(category, key, price))?;
    Ok(respond(state, warnings))
}

/// Adds an option to a category.
pub fn add_option<S: KeyValueStore>(
    state: &mut AppState<S>,
    category: Category,
    label: &str,
    raw_price: &str,
) -> Result<SettingsResponse, ApiError> {
    debug!(%category, label = %label, "add_option command");
    let (price, warnings) = price_from(label, raw_price);
    state.pricing.edit(|t| t.add_option(category, label, price))?;
    Ok(respond(state, warnings))
}

/// Removes an option. Selections naming it then price it at $0.00.
pub fn remove_option<S: KeyValueStore>(
    state: &mut AppState<S>,
    category: Category,
    key: &str,
) -> Result<SettingsResponse, ApiError> {
    debug!(%category, key = %key, "remove_option command");
    state.pricing.edit(|t| t.remove_option(category, key))?;
    Ok(respond(state, Vec::new()))
}

/// Sets the servings text shown next to a pan size.
pub fn set_servings<S: KeyValueStore>(
    state: &mut AppState<S>,
    pan_label: &str,
    servings: &str,
) -> Result<SettingsResponse, ApiError> {
    debug!(pan_label = %pan_label, servings = %servings, "set_servings command");
    state.pricing.edit(|t| t.set_servings(pan_label, servings))?;
    Ok(respond(state, Vec::new()))
}

// =============================================================================
// Add-ons
// =============================================================================

/// Sets an add-on's unit price from raw form input.
pub fn set_add_on_price<S: KeyValueStore>(
    state: &mut AppState<S>,
    add_on: AddOn,
    raw_price: &str,
) -> Result<SettingsResponse, ApiError> {
    debug!(?add_on, raw_price = %raw_price, "set_add_on_price command");
    let (price, warnings) = price_from(add_on.label(), raw_price);
    state.pricing.edit(|t| t.set_add_on_price(add_on, price))?;
    Ok(respond(state, warnings))
}

// =============================================================================
// Misc Items
// =============================================================================

/// Adds a misc item and returns its generated id.
pub fn add_misc_item<S: KeyValueStore>(
    state: &mut AppState<S>,
    name: &str,
    raw_price: &str,
) -> Result<MiscItemCreated, ApiError> {
    debug!(name = %name, "add_misc_item command");
    let (price, warnings) = price_from(name, raw_price);
    let id = state.pricing.edit(|t| t.add_misc_item(name, price))?;
    Ok(MiscItemCreated {
        id,
        settings: respond(state, warnings),
    })
}

pub fn rename_misc_item<S: KeyValueStore>(
    state: &mut AppState<S>,
    id: &str,
    name: &str,
) -> Result<SettingsResponse, ApiError> {
    debug!(id = %id, name = %name, "rename_misc_item command");
    state.pricing.edit(|t| t.rename_misc_item(id, name))?;
    Ok(respond(state, Vec::new()))
}

pub fn set_misc_item_price<S: KeyValueStore>(
    state: &mut AppState<S>,
    id: &str,
    raw_price: &str,
) -> Result<SettingsResponse, ApiError> {
    debug!(id = %id, raw_price = %raw_price, "set_misc_item_price command");
    let (price, warnings) = price_from(id, raw_price);
    state.pricing.edit(|t| t.set_misc_item_price(id, price))?;
    Ok(respond(state, warnings))
}

/// Removes a misc item. Its count is dropped from the current selection.
///
/// The selection echo is only rewritten when the current selection counted
/// the item. An echo from an earlier session is left alone; restoring it
/// against the new table drops the unknown id anyway.
pub fn remove_misc_item<S: KeyValueStore>(
    state: &mut AppState<S>,
    id: &str,
) -> Result<SettingsResponse, ApiError> {
    debug!(id = %id, "remove_misc_item command");
    let removed: MiscItem = state.pricing.edit(|t| t.remove_misc_item(id))?;
    if state.selection.selection().misc_count(removed.id.as_str()) > 0 {
        state
            .selection
            .update(|s| s.set_misc_count(removed.id.clone(), 0));
        state.repo.echo_selection(state.selection.selection())?;
    }
    Ok(respond(state, Vec::new()))
}

// =============================================================================
// Whole Table
// =============================================================================

/// Replaces the table with the defaults. Nothing is written until saved.
pub fn reset_price_table<S: KeyValueStore>(
    state: &mut AppState<S>,
) -> Result<SettingsResponse, ApiError> {
    debug!("reset_price_table command");
    state.pricing.reset();
    Ok(respond(state, Vec::new()))
}

/// Writes the table to the store under `cakePricing`.
pub fn save_price_table<S: KeyValueStore>(
    state: &mut AppState<S>,
) -> Result<SettingsResponse, ApiError> {
    debug!("save_price_table command");
    state.repo.save_price_table(state.pricing.table())?;
    state.pricing.mark_saved();
    info!("Price table saved");
    Ok(respond(state, Vec::new()))
}

// =============================================================================
// Helpers
// =============================================================================

fn price_from(field: &str, raw: &str) -> (Money, Vec<FieldIssue>) {
    let parsed = parse_price(raw);
    let warnings = parsed
        .issue
        .map(|issue| FieldIssue {
            field: field.to_string(),
            raw: raw.to_string(),
            issue,
        })
        .into_iter()
        .collect();
    (parsed.value, warnings)
}

fn respond<S: KeyValueStore>(state: &AppState<S>, warnings: Vec<FieldIssue>) -> SettingsResponse {
    SettingsResponse {
        table: state.pricing.table().clone(),
        dirty: state.pricing.is_dirty(),
        warnings,
    }
}
