//! # Selection State
//!
//! The customer's current selection plus the coercions behind it, so the
//! front end can mark "you typed something odd here" apart from a real 0.

use cake_core::{decode_selection_report, encode_selection, FieldIssue, PriceTable, Selection};

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selection: Selection,
    issues: Vec<FieldIssue>,
}

impl SelectionState {
    pub fn new() -> Self {
        SelectionState::default()
    }

    /// Starts from a previously stored selection.
    pub fn restored(selection: Selection) -> Self {
        SelectionState {
            selection,
            issues: Vec::new(),
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Coercions still in effect, one per field at most.
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// The query string for the current selection.
    pub fn query(&self) -> String {
        encode_selection(&self.selection)
    }

    /// Mutates the selection.
    pub fn update<F: FnOnce(&mut Selection)>(&mut self, f: F) {
        f(&mut self.selection);
    }

    /// Replaces the selection with the one a query string decodes to.
    pub fn apply_query(&mut self, query: &str, table: &PriceTable) {
        let decoded = decode_selection_report(query, table);
        self.selection = decoded.selection;
        self.issues = decoded.issues;
    }

    /// Records the outcome of parsing one field: the issue replaces any
    /// earlier one for the same field, or clears it.
    pub fn record_issue(&mut self, field: &str, issue: Option<FieldIssue>) {
        self.issues.retain(|i| i.field != field);
        self.issues.extend(issue);
    }

    pub fn reset(&mut self) {
        *self = SelectionState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cake_core::{AddOn, InputIssue};

    #[test]
    fn test_apply_query_keeps_issues() {
        let mut state = SelectionState::new();
        state.apply_query("macaronCount=ten&flavor=Lemon", &PriceTable::defaults());

        assert_eq!(state.issues().len(), 1);
        assert_eq!(state.issues()[0].issue, InputIssue::NotANumber);
        assert_eq!(state.query(), "flavor=Lemon");
    }

    #[test]
    fn test_record_issue_replaces_per_field() {
        let mut state = SelectionState::new();
        let issue = FieldIssue {
            field: "macaronCount".to_string(),
            raw: "-1".to_string(),
            issue: InputIssue::Negative,
        };
        state.record_issue("macaronCount", Some(issue));
        assert_eq!(state.issues().len(), 1);

        state.update(|s| s.set_add_on_count(AddOn::Macaron, 2));
        state.record_issue("macaronCount", None);
        assert!(state.issues().is_empty());
        assert_eq!(state.query(), "macaronCount=2");
    }
}
