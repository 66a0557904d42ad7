//! # Share Links
//!
//! Encodes a selection as a flat query string and decodes it back.
//!
//! ## Wire Format
//! ```text
//! panSize=6+inch+round&flavor=Chocolate&macaronCount=4&misc1=2
//! └─ choices ────────────────────────┘ └─ add-on counts ┘ └ misc ┘
//!
//! Key order (fixed):
//!   panSize, flavor, shape,
//!   smallFondantCount, mediumFondantCount, largeFondantCount, colorCount,
//!   fakeFlowerCount, realFlowerCount, macaronCount, stickerPrintCount,
//!   ediblePrintCount,
//!   then one key per misc item id, ascending
//! ```
//!
//! Unset choices and zero counts are left out, so an empty selection
//! encodes to `""`.
//!
//! ## Decoding Is Total
//! - A leading `?` is ignored
//! - Unknown keys are ignored
//! - Bad counts become 0 (reported through `decode_selection_report`)
//! - Choice values are taken as-is, with no membership check
//! - A repeated key: the last one wins
//! - Fixed keys take precedence over a misc item that happens to share the
//!   same id

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use url::form_urlencoded;
use url::Url;

use crate::error::ShareError;
use crate::price_table::PriceTable;
use crate::selection::Selection;
use crate::types::{AddOn, Category};
use crate::validation::{parse_count, InputIssue};

// =============================================================================
// Encode
// =============================================================================

/// Encodes a selection as an `application/x-www-form-urlencoded` string.
///
/// ## Example
/// ```rust
/// use cake_core::{encode_selection, AddOn, Category, Selection};
///
/// let mut selection = Selection::new();
/// selection.set_choice(Category::PanSize, "6 inch round");
/// selection.set_add_on_count(AddOn::Macaron, 4);
///
/// assert_eq!(encode_selection(&selection), "panSize=6+inch+round&macaronCount=4");
/// assert_eq!(encode_selection(&Selection::new()), "");
/// ```
pub fn encode_selection(selection: &Selection) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    for category in Category::ALL {
        if let Some(label) = selection.choice(category) {
            query.append_pair(category.query_key(), label);
        }
    }

    for (add_on, count) in selection.add_on_counts().iter() {
        if count > 0 {
            query.append_pair(add_on.query_key(), &count.to_string());
        }
    }

    for (id, count) in selection.misc_counts() {
        query.append_pair(id.as_str(), &count.to_string());
    }

    query.finish()
}

// =============================================================================
// Decode
// =============================================================================

/// A numeric field that was coerced to zero while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldIssue {
    /// The query key, e.g. `macaronCount` or a misc item id.
    pub field: String,
    /// The value as it appeared in the query.
    pub raw: String,
    pub issue: InputIssue,
}

/// A decoded selection plus every coercion that happened on the way.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DecodedSelection {
    pub selection: Selection,
    pub issues: Vec<FieldIssue>,
}

/// Decodes a query string into a selection. Never fails.
///
/// `table` is only consulted to recognize misc item ids.
pub fn decode_selection(query: &str, table: &PriceTable) -> Selection {
    decode_selection_report(query, table).selection
}

/// Like `decode_selection`, but also lists the counts that were coerced.
///
/// ## Example
/// ```rust
/// use cake_core::{decode_selection_report, AddOn, InputIssue, PriceTable};
///
/// let decoded = decode_selection_report("?macaronCount=lots&colorCount=2", &PriceTable::defaults());
/// assert_eq!(decoded.selection.add_on_count(AddOn::Macaron), 0);
/// assert_eq!(decoded.selection.add_on_count(AddOn::ExtraColor), 2);
/// assert_eq!(decoded.issues[0].field, "macaronCount");
/// assert_eq!(decoded.issues[0].issue, InputIssue::NotANumber);
/// ```
pub fn decode_selection_report(query: &str, table: &PriceTable) -> DecodedSelection {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut decoded = DecodedSelection::default();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if let Some(category) = Category::ALL.into_iter().find(|c| c.query_key() == key) {
            decoded.selection.set_choice(category, value.into_owned());
            continue;
        }

        if let Some(add_on) = AddOn::from_query_key(&key) {
            let count = decoded.record_count(&key, &value);
            decoded.selection.set_add_on_count(add_on, count);
            continue;
        }

        if let Some(item) = table.misc_item(&key) {
            let count = decoded.record_count(&key, &value);
            decoded.selection.set_misc_count(item.id.clone(), count);
        }
    }

    decoded
}

impl DecodedSelection {
    /// Parses a count and keeps `issues` in step with last-wins semantics.
    fn record_count(&mut self, field: &str, raw: &str) -> u32 {
        let parsed = parse_count(raw);
        self.issues.retain(|i| i.field != field);
        if let Some(issue) = parsed.issue {
            self.issues.push(FieldIssue {
                field: field.to_string(),
                raw: raw.to_string(),
                issue,
            });
        }
        parsed.value
    }
}

// =============================================================================
// Share URL
// =============================================================================

/// Builds a share link by replacing the query of `base` with the encoded
/// selection. An empty selection produces no query at all.
///
/// ## Example
/// ```rust
/// use cake_core::{share_url, Category, Selection};
///
/// let mut selection = Selection::new();
/// selection.set_choice(Category::Flavor, "Red Velvet");
///
/// let url = share_url("https://cakes.example/quote?old=1", &selection).unwrap();
/// assert_eq!(url.as_str(), "https://cakes.example/quote?flavor=Red+Velvet");
/// ```
pub fn share_url(base: &str, selection: &Selection) -> Result<Url, ShareError> {
    let mut url = Url::parse(base)?;
    if url.cannot_be_a_base() {
        return Err(ShareError::CannotBeABase(base.to_string()));
    }

    let query = encode_selection(selection);
    if query.is_empty() {
        url.set_query(None);
    } else {
        url.set_query(Some(&query));
    }
    Ok(url)
}

/// Decodes the selection carried by a share link.
pub fn selection_from_url(url: &Url, table: &PriceTable) -> Selection {
    decode_selection(url.query().unwrap_or(""), table)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn full_selection() -> Selection {
        let mut selection = Selection::new();
        selection.set_choice(Category::PanSize, "6 inch tall");
        selection.set_choice(Category::Flavor, "Lemon");
        selection.set_choice(Category::Shape, "Heart");
        for (n, add_on) in AddOn::ALL.into_iter().enumerate() {
            selection.set_add_on_count(add_on, n as u32 + 1);
        }
        selection.set_misc_count("misc3", 2);
        selection.set_misc_count("misc1", 5);
        selection
    }

    #[test]
    fn test_encode_uses_fixed_key_order() {
        let encoded = encode_selection(&full_selection());
        let keys: Vec<String> = form_urlencoded::parse(encoded.as_bytes())
            .map(|(k, _)| k.into_owned())
            .collect();

        assert_eq!(
            keys,
            vec![
                "panSize",
                "flavor",
                "shape",
                "smallFondantCount",
                "mediumFondantCount",
                "largeFondantCount",
                "colorCount",
                "fakeFlowerCount",
                "realFlowerCount",
                "macaronCount",
                "stickerPrintCount",
                "ediblePrintCount",
                "misc1",
                "misc3",
            ]
        );
    }

    #[test]
    fn test_round_trip() {
        let table = PriceTable::defaults();
        let selection = full_selection();
        let encoded = encode_selection(&selection);

        let decoded = decode_selection(&encoded, &table);
        assert_eq!(decoded, selection);
        // Decode after encode is idempotent
        assert_eq!(encode_selection(&decoded), encoded);
    }

    #[test]
    fn test_round_trip_varied_selections() {
        let table = PriceTable::defaults();

        let single_misc = {
            let mut s = Selection::new();
            s.set_misc_count("misc4", 1);
            s
        };
        let awkward_labels = {
            let mut s = Selection::new();
            s.set_choice(Category::PanSize, "6\" round + 2 layers");
            s.set_choice(Category::Flavor, "Crème brûlée & co = 1+1");
            s.set_choice(Category::Shape, "ハート 100%?#");
            s
        };
        let max_counts = {
            let mut s = Selection::new();
            for add_on in AddOn::ALL {
                s.set_add_on_count(add_on, u32::MAX);
            }
            s.set_misc_count("misc2", u32::MAX);
            s
        };

        let cases = [
            ("empty", Selection::new()),
            ("single misc count", single_misc),
            ("awkward labels", awkward_labels),
            ("max counts", max_counts),
            ("full", full_selection()),
        ];

        for (name, selection) in cases {
            let encoded = encode_selection(&selection);
            let decoded = decode_selection(&encoded, &table);
            assert_eq!(decoded, selection, "round trip: {}", name);
            assert_eq!(encode_selection(&decoded), encoded, "idempotence: {}", name);
            assert!(
                decode_selection_report(&encoded, &table).issues.is_empty(),
                "issues: {}",
                name
            );
        }
    }

    #[test]
    fn test_round_trip_escapes_labels() {
        let mut table = PriceTable::defaults();
        table
            .add_option(Category::Flavor, "Cookies & Cream = 100%", Money::from_dollars(7))
            .unwrap();

        let mut selection = Selection::new();
        selection.set_choice(Category::Flavor, "Cookies & Cream = 100%");
        let encoded = encode_selection(&selection);

        assert!(!encoded.contains(" "));
        assert_eq!(decode_selection(&encoded, &table), selection);
    }

    #[test]
    fn test_decode_ignores_unknown_and_strips_question_mark() {
        let table = PriceTable::defaults();
        let selection = decode_selection("?panSize=8+inch+round&utm_source=ig&misc9=3", &table);

        assert_eq!(selection.choice(Category::PanSize), Some("8 inch round"));
        assert_eq!(selection.misc_count("misc9"), 0);
    }

    #[test]
    fn test_decode_accepts_stale_labels() {
        let selection = decode_selection("flavor=Durian", &PriceTable::defaults());
        assert_eq!(selection.choice(Category::Flavor), Some("Durian"));
    }

    #[test]
    fn test_decode_last_duplicate_wins() {
        let table = PriceTable::defaults();
        let decoded = decode_selection_report("macaronCount=x&macaronCount=3&shape=Round&shape=Heart", &table);

        assert_eq!(decoded.selection.add_on_count(AddOn::Macaron), 3);
        assert_eq!(decoded.selection.choice(Category::Shape), Some("Heart"));
        assert!(decoded.issues.is_empty());
    }

    #[test]
    fn test_decode_reports_coercions() {
        let table = PriceTable::defaults();
        let decoded = decode_selection_report("realFlowerCount=-2&misc2=&fakeFlowerCount=1", &table);

        assert_eq!(decoded.selection.add_on_count(AddOn::RealFlower), 0);
        assert_eq!(decoded.selection.add_on_count(AddOn::FakeFlower), 1);
        assert_eq!(
            decoded.issues,
            vec![
                FieldIssue {
                    field: "realFlowerCount".to_string(),
                    raw: "-2".to_string(),
                    issue: InputIssue::Negative,
                },
                FieldIssue {
                    field: "misc2".to_string(),
                    raw: "".to_string(),
                    issue: InputIssue::Empty,
                },
            ]
        );
    }

    #[test]
    fn test_empty_choice_value_is_unset() {
        let selection = decode_selection("panSize=&flavor=Lemon", &PriceTable::defaults());
        assert_eq!(selection.choice(Category::PanSize), None);
        assert_eq!(selection.choice(Category::Flavor), Some("Lemon"));
    }

    #[test]
    fn test_share_url() {
        let url = share_url("https://cakes.example/quote#top", &full_selection()).unwrap();
        assert!(url.as_str().starts_with("https://cakes.example/quote?panSize=6+inch+tall"));
        assert_eq!(url.fragment(), Some("top"));
        assert_eq!(selection_from_url(&url, &PriceTable::defaults()), full_selection());

        let empty = share_url("https://cakes.example/quote?panSize=x", &Selection::new()).unwrap();
        assert_eq!(empty.as_str(), "https://cakes.example/quote");
    }

    #[test]
    fn test_share_url_rejects_bad_base() {
        assert!(matches!(
            share_url("not a url", &Selection::new()),
            Err(ShareError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            share_url("mailto:orders@cakes.example", &Selection::new()),
            Err(ShareError::CannotBeABase(_))
        ));
    }
}
