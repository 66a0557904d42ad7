//! # Validation Module
//!
//! Input coercion and validation for prices, counts and labels.
//!
//! ## Two Kinds of Input
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Input Handling                                     │
//! │                                                                         │
//! │  Numbers typed into a form (counts, prices)                            │
//! │  ├── NEVER rejected: malformed input coerces to 0                      │
//! │  └── The coercion is reported as an InputIssue so the form can         │
//! │      flag it, instead of looking like an intentional zero              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  parse_price / parse_count  ← THIS MODULE                              │
//! │                                                                         │
//! │  Labels and price-table edits                                          │
//! │  ├── Rejected with ValidationError (empty, too long, negative)         │
//! │  └── The table is never left half-edited                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  validate_label / validate_price  ← THIS MODULE                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cake_core::validation::{parse_count, parse_price, InputIssue};
//!
//! assert_eq!(parse_price("$12.50").value.cents(), 1250);
//! assert_eq!(parse_count("4").value, 4);
//!
//! let bad = parse_count("four");
//! assert_eq!(bad.value, 0);
//! assert_eq!(bad.issue, Some(InputIssue::NotANumber));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_LABEL_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Coerced Input
// =============================================================================

/// Why a numeric input was coerced to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum InputIssue {
    /// Nothing was entered.
    Empty,
    /// Not a number at all ("abc", "4 cakes").
    NotANumber,
    /// A negative number.
    Negative,
    /// `inf` / `NaN`.
    NonFinite,
    /// Larger than the field can hold.
    TooLarge,
}

impl fmt::Display for InputIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InputIssue::Empty => "empty",
            InputIssue::NotANumber => "not a number",
            InputIssue::Negative => "negative",
            InputIssue::NonFinite => "not a finite number",
            InputIssue::TooLarge => "too large",
        };
        f.write_str(text)
    }
}

/// A value parsed from user input, always usable.
///
/// `issue` is `None` when the input parsed cleanly; otherwise `value` is the
/// zero it was coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Coerced<T> {
    pub value: T,
    pub issue: Option<InputIssue>,
}

impl<T> Coerced<T> {
    fn valid(value: T) -> Self {
        Coerced { value, issue: None }
    }

    fn invalid(value: T, issue: InputIssue) -> Self {
        Coerced {
            value,
            issue: Some(issue),
        }
    }

    /// True when the input parsed without coercion.
    pub fn is_valid(&self) -> bool {
        self.issue.is_none()
    }
}

// =============================================================================
// Numeric Parsers
// =============================================================================

/// Parses a price typed in dollars.
///
/// ## Rules
/// - Surrounding whitespace and one leading `$` are ignored
/// - Rounded to the nearest cent ("2.999" → 300 cents)
/// - Empty, non-numeric, negative, non-finite or out-of-range → 0 with an issue
///
/// ## Example
/// ```rust
/// use cake_core::validation::{parse_price, InputIssue};
///
/// assert_eq!(parse_price(" 8 ").value.cents(), 800);
/// assert_eq!(parse_price("0.29").value.cents(), 29);
/// assert_eq!(parse_price("-5").issue, Some(InputIssue::Negative));
/// ```
pub fn parse_price(raw: &str) -> Coerced<Money> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();

    if trimmed.is_empty() {
        return Coerced::invalid(Money::zero(), InputIssue::Empty);
    }

    let dollars: f64 = match trimmed.parse() {
        Ok(v) => v,
        Err(_) => return Coerced::invalid(Money::zero(), InputIssue::NotANumber),
    };

    if !dollars.is_finite() {
        return Coerced::invalid(Money::zero(), InputIssue::NonFinite);
    }

    if dollars < 0.0 {
        return Coerced::invalid(Money::zero(), InputIssue::Negative);
    }

    let cents = (dollars * 100.0).round();
    if cents >= i64::MAX as f64 {
        return Coerced::invalid(Money::zero(), InputIssue::TooLarge);
    }

    Coerced::valid(Money::from_cents(cents as i64))
}

/// Parses a unit count.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Whole numbers only ("2.5" is not a count)
/// - Empty, non-numeric, negative or > `u32::MAX` → 0 with an issue
///
/// ## User Workflow
/// ```text
/// Macarons: [ 4x ]
///      │
///      ▼
/// parse_count("4x") ← THIS FUNCTION
///      │
///      ▼
/// Coerced { value: 0, issue: NotANumber }
///      │
///      ├──► Selection gets 0 (quote stays defined)
///      └──► Form outlines the field in red
/// ```
pub fn parse_count(raw: &str) -> Coerced<u32> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Coerced::invalid(0, InputIssue::Empty);
    }

    if let Ok(count) = trimmed.parse::<u32>() {
        return Coerced::valid(count);
    }

    match trimmed.parse::<i128>() {
        Ok(n) if n < 0 => Coerced::invalid(0, InputIssue::Negative),
        Ok(_) => Coerced::invalid(0, InputIssue::TooLarge),
        Err(_) => Coerced::invalid(0, InputIssue::NotANumber),
    }
}

// =============================================================================
// Table Validators
// =============================================================================

/// Validates a category label (pan size, flavor, shape).
///
/// ## Rules
/// - Trimmed before checking
/// - Must not be empty
/// - At most `MAX_LABEL_LEN` characters
///
/// ## Returns
/// The trimmed label.
///
/// ## Example
/// ```rust
/// use cake_core::validation::validate_label;
///
/// assert_eq!(validate_label("flavor", "  Lemon ").unwrap(), "Lemon");
/// assert!(validate_label("flavor", "   ").is_err());
/// ```
pub fn validate_label(field: &str, label: &str) -> ValidationResult<String> {
    let label = label.trim();

    if label.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if label.chars().count() > MAX_LABEL_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_LABEL_LEN,
        });
    }

    Ok(label.to_string())
}

/// Validates a misc item name. Empty is allowed (an unused slot).
pub fn validate_misc_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.chars().count() > MAX_LABEL_LEN {
        return Err(ValidationError::TooLong {
            field: "misc item name".to_string(),
            max: MAX_LABEL_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a stored price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (Vanilla, Round, unused misc slots)
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_accepts_dollar_forms() {
        assert_eq!(parse_price("12").value.cents(), 1200);
        assert_eq!(parse_price("12.5").value.cents(), 1250);
        assert_eq!(parse_price("$12.50").value.cents(), 1250);
        assert_eq!(parse_price("  $ 3 ").value.cents(), 300);
        assert_eq!(parse_price("19.99").value.cents(), 1999);
        assert_eq!(parse_price("0").value, Money::zero());
        assert!(parse_price("0").is_valid());
    }

    #[test]
    fn test_parse_price_rounds_to_cents() {
        assert_eq!(parse_price("2.999").value.cents(), 300);
        assert_eq!(parse_price("2.994").value.cents(), 299);
    }

    #[test]
    fn test_parse_price_coerces_bad_input_to_zero() {
        let cases = [
            ("", InputIssue::Empty),
            ("   ", InputIssue::Empty),
            ("abc", InputIssue::NotANumber),
            ("12abc", InputIssue::NotANumber),
            ("-5", InputIssue::Negative),
            ("inf", InputIssue::NonFinite),
            ("NaN", InputIssue::NonFinite),
            ("1e300", InputIssue::TooLarge),
        ];

        for (raw, issue) in cases {
            let parsed = parse_price(raw);
            assert_eq!(parsed.value, Money::zero(), "input {:?}", raw);
            assert_eq!(parsed.issue, Some(issue), "input {:?}", raw);
        }
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("4"), Coerced::valid(4));
        assert_eq!(parse_count(" 12 ").value, 12);
        assert_eq!(parse_count("0"), Coerced::valid(0));

        assert_eq!(parse_count("").issue, Some(InputIssue::Empty));
        assert_eq!(parse_count("four").issue, Some(InputIssue::NotANumber));
        assert_eq!(parse_count("2.5").issue, Some(InputIssue::NotANumber));
        assert_eq!(parse_count("-3").issue, Some(InputIssue::Negative));
        assert_eq!(parse_count("99999999999").issue, Some(InputIssue::TooLarge));
        assert_eq!(parse_count("-3").value, 0);
    }

    #[test]
    fn test_validate_label() {
        assert_eq!(validate_label("flavor", "Lemon").unwrap(), "Lemon");
        assert_eq!(validate_label("flavor", "  Lemon  ").unwrap(), "Lemon");
        assert!(validate_label("flavor", "").is_err());
        assert!(validate_label("flavor", &"A".repeat(MAX_LABEL_LEN + 1)).is_err());
        assert!(validate_label("flavor", &"A".repeat(MAX_LABEL_LEN)).is_ok());
    }

    #[test]
    fn test_validate_misc_name_allows_empty() {
        assert_eq!(validate_misc_name("").unwrap(), "");
        assert_eq!(validate_misc_name(" Delivery ").unwrap(), "Delivery");
        assert!(validate_misc_name(&"A".repeat(MAX_LABEL_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("price", Money::zero()).is_ok());
        assert!(validate_price("price", Money::from_cents(1099)).is_ok());
        assert_eq!(
            validate_price("price", Money::from_cents(-1)),
            Err(ValidationError::MustBeNonNegative {
                field: "price".to_string()
            })
        );
    }
}
