//! # Quote Commands
//!
//! Commands that build and price a selection.
//!
//! ## Selection Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Selection Lifecycle                                  │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ Choosing │────►│  Quote   │────►│  Share   │       │
//! │  │          │     │          │     │  shown   │     │  link    │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │       ▲                │                                                │
//! │  apply_query      select_option                                        │
//! │  (share link)     set_add_on_count                                     │
//! │                   set_misc_count                                       │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   reset_selection ─────────────────►  (back to empty)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation re-prices synchronously and echoes the encoded selection
//! into the store under `cakeSelection`.

use serde::Serialize;
use tracing::debug;
use url::Url;

use cake_core::{
    build_quote, parse_count, share_url, AddOn, Category, FieldIssue, Quote,
};
use cake_store::KeyValueStore;

use crate::error::ApiError;
use crate::state::AppState;

/// A priced selection plus what the front end needs to keep in sync.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub quote: Quote,

    /// The selection as a query string (goes in the address bar).
    pub query: String,

    /// Inputs that were coerced to 0.
    pub issues: Vec<FieldIssue>,
}

impl<S: KeyValueStore> From<&AppState<S>> for QuoteResponse {
    fn from(state: &AppState<S>) -> Self {
        QuoteResponse {
            quote: build_quote(state.pricing.table(), state.selection.selection()),
            query: state.selection.query(),
            issues: state.selection.issues().to_vec(),
        }
    }
}

/// A share link for the current selection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub url: String,
}

/// Gets the current quote.
pub fn get_quote<S: KeyValueStore>(state: &AppState<S>) -> QuoteResponse {
    debug!("get_quote command");
    QuoteResponse::from(state)
}

/// Chooses an option. Unknown labels are accepted and price at zero.
pub fn select_option<S: KeyValueStore>(
    state: &mut AppState<S>,
    category: Category,
    label: &str,
) -> Result<QuoteResponse, ApiError> {
    debug!(%category, label = %label, "select_option command");
    state.selection.update(|s| s.set_choice(category, label));
    echo(state)
}

/// Unsets a category.
pub fn clear_option<S: KeyValueStore>(
    state: &mut AppState<S>,
    category: Category,
) -> Result<QuoteResponse, ApiError> {
    debug!(%category, "clear_option command");
    state.selection.update(|s| s.clear_choice(category));
    echo(state)
}

/// Sets an add-on count from raw form input.
///
/// ## Behavior
/// - "4" → 4
/// - "four", "-1", "" → 0, with the coercion listed in `issues`
pub fn set_add_on_count<S: KeyValueStore>(
    state: &mut AppState<S>,
    add_on: AddOn,
    raw: &str,
) -> Result<QuoteResponse, ApiError> {
    debug!(?add_on, raw = %raw, "set_add_on_count command");
    let count = parse_counted(state, add_on.query_key(), raw);
    state.selection.update(|s| s.set_add_on_count(add_on, count));
    echo(state)
}

/// Sets a misc item count from raw form input.
///
/// The id must name a misc item in the current table.
pub fn set_misc_count<S: KeyValueStore>(
    state: &mut AppState<S>,
    id: &str,
    raw: &str,
) -> Result<QuoteResponse, ApiError> {
    debug!(id = %id, raw = %raw, "set_misc_count command");
    let item_id = state
        .pricing
        .table()
        .misc_item(id)
        .map(|item| item.id.clone())
        .ok_or_else(|| ApiError::not_found("Misc item", id))?;

    let count = parse_counted(state, id, raw);
    state.selection.update(|s| s.set_misc_count(item_id, count));
    echo(state)
}

/// Replaces the selection with the one a query string (or share link
/// query) describes.
pub fn apply_query<S: KeyValueStore>(
    state: &mut AppState<S>,
    query: &str,
) -> Result<QuoteResponse, ApiError> {
    debug!(query = %query, "apply_query command");
    // Accept a whole share link as well as a bare query
    let query = match Url::parse(query) {
        Ok(url) if !url.cannot_be_a_base() => url.query().unwrap_or("").to_string(),
        _ => query.to_string(),
    };
    state.selection.apply_query(&query, state.pricing.table());
    echo(state)
}

/// Builds a share link for the current selection from `share_base_url`.
pub fn share_link<S: KeyValueStore>(state: &AppState<S>) -> Result<ShareResponse, ApiError> {
    debug!("share_link command");
    let url = share_url(&state.config.config.share_base_url, state.selection.selection())?;
    Ok(ShareResponse {
        url: url.to_string(),
    })
}

/// Clears the selection.
pub fn reset_selection<S: KeyValueStore>(state: &mut AppState<S>) -> Result<QuoteResponse, ApiError> {
    debug!("reset_selection command");
    state.selection.reset();
    echo(state)
}

/// Restores the selection echoed by the previous session, if any.
pub fn restore_selection<S: KeyValueStore>(state: &mut AppState<S>) -> QuoteResponse {
    debug!("restore_selection command");
    if let Some(selection) = state.repo.last_selection(state.pricing.table()) {
        state.selection = crate::state::SelectionState::restored(selection);
    }
    QuoteResponse::from(&*state)
}

fn parse_counted<S: KeyValueStore>(state: &mut AppState<S>, field: &str, raw: &str) -> u32 {
    let parsed = parse_count(raw);
    let issue = parsed.issue.map(|issue| FieldIssue {
        field: field.to_string(),
        raw: raw.to_string(),
        issue,
    });
    state.selection.record_issue(field, issue);
    parsed.value
}

fn echo<S: KeyValueStore>(state: &mut AppState<S>) -> Result<QuoteResponse, ApiError> {
    state.repo.echo_selection(state.selection.selection())?;
    Ok(QuoteResponse::from(&*state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConfigState;
    use cake_core::{InputIssue, Money, SELECTION_KEY};
    use cake_store::MemoryStore;

    fn state() -> AppState<MemoryStore> {
        AppState::new(ConfigState::default(), MemoryStore::new())
    }

    #[test]
    fn test_select_and_count() {
        let mut state = state();
        select_option(&mut state, Category::PanSize, "6 inch round").unwrap();
        select_option(&mut state, Category::Flavor, "Chocolate").unwrap();
        let response = set_add_on_count(&mut state, AddOn::Macaron, "4").unwrap();

        // $25 + $5 + 4 × $3
        assert_eq!(response.quote.total, Money::from_dollars(42));
        assert_eq!(
            response.query,
            "panSize=6+inch+round&flavor=Chocolate&macaronCount=4"
        );
        assert_eq!(
            state.repo.store().get(SELECTION_KEY).unwrap().as_deref(),
            Some(response.query.as_str())
        );
    }

    #[test]
    fn test_clear_option() {
        let mut state = state();
        select_option(&mut state, Category::PanSize, "8 inch round").unwrap();
        select_option(&mut state, Category::Shape, "Heart").unwrap();

        let response = clear_option(&mut state, Category::Shape).unwrap();
        assert_eq!(response.quote.total, Money::from_dollars(30));
        assert_eq!(response.query, "panSize=8+inch+round");
        assert_eq!(
            state.repo.store().get(SELECTION_KEY).unwrap().as_deref(),
            Some("panSize=8+inch+round")
        );

        // Clearing an unset category is a no-op
        let response = clear_option(&mut state, Category::Flavor).unwrap();
        assert_eq!(response.query, "panSize=8+inch+round");
    }

    #[test]
    fn test_bad_count_is_zero_with_issue() {
        let mut state = state();
        let response = set_add_on_count(&mut state, AddOn::RealFlower, "two").unwrap();
        assert_eq!(response.quote.total, Money::zero());
        assert_eq!(response.issues.len(), 1);
        assert_eq!(response.issues[0].issue, InputIssue::NotANumber);

        let response = set_add_on_count(&mut state, AddOn::RealFlower, "2").unwrap();
        assert!(response.issues.is_empty());
        assert_eq!(response.quote.total, Money::from_dollars(50));
    }

    #[test]
    fn test_misc_count_requires_known_item() {
        let mut state = state();
        let err = set_misc_count(&mut state, "misc9", "1").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::NotFound);
        assert!(set_misc_count(&mut state, "misc1", "1").is_ok());
    }

    #[test]
    fn test_apply_query_accepts_full_link() {
        let mut state = state();
        let response = apply_query(
            &mut state,
            "https://cakes.example/quote?panSize=8+inch+round&shape=Heart",
        )
        .unwrap();
        assert_eq!(response.quote.total, Money::from_dollars(45));

        let response = apply_query(&mut state, "?flavor=Lemon").unwrap();
        assert_eq!(response.quote.total, Money::from_dollars(8));
    }

    #[test]
    fn test_share_link_and_reset() {
        let mut state = state();
        select_option(&mut state, Category::Shape, "Heart").unwrap();
        let link = share_link(&state).unwrap();
        assert_eq!(link.url, "http://localhost:8080/?shape=Heart");

        let response = reset_selection(&mut state).unwrap();
        assert!(response.quote.is_empty());
        assert_eq!(state.repo.store().get(SELECTION_KEY).unwrap(), None);
    }

    #[test]
    fn test_restore_selection() {
        let mut state = state();
        select_option(&mut state, Category::Flavor, "Red Velvet").unwrap();

        let store = state.repo.into_inner();
        let mut next = AppState::new(ConfigState::default(), store);
        let response = restore_selection(&mut next);
        assert_eq!(response.query, "flavor=Red+Velvet");
    }
}
