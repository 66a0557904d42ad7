//! # Text Rendering
//!
//! Plain-text output for the terminal.
//!
//! ```text
//! Sweet Layers
//! ────────────────────────────────────────
//! Pan size: 6 inch round (8-10 servings) $25.00
//! Flavor: Chocolate                  $5.00
//! Macaron × 4 @ $3.00               $12.00
//! ────────────────────────────────────────
//! Total                             $42.00
//! ```

use std::fmt::Write;

use cake_core::{AddOn, Category, FieldIssue, LineKind, PriceTable, QuoteLine};

use crate::commands::quote::QuoteResponse;
use crate::commands::settings::SettingsResponse;
use crate::state::ConfigState;

const WIDTH: usize = 40;

/// Renders a quote with its header, lines, total and any input warnings.
pub fn quote(config: &ConfigState, response: &QuoteResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", config.config.business_name);
    rule(&mut out);

    if response.quote.lines.is_empty() {
        let _ = writeln!(out, "Nothing selected yet.");
    }
    for line in &response.quote.lines {
        row(&mut out, &describe(config, line), &config.format_money(line.line_total));
    }

    rule(&mut out);
    row(&mut out, "Total", &config.format_money(response.quote.total));
    issues(&mut out, "Ignored input", &response.issues);
    out
}

/// Renders the price table the way the settings screen lists it.
pub fn price_table(config: &ConfigState, response: &SettingsResponse) -> String {
    let table: &PriceTable = &response.table;
    let mut out = String::new();

    for category in Category::ALL {
        let _ = writeln!(out, "{}", heading(category));
        match category {
            Category::PanSize => {
                for pan in &table.pan_sizes {
                    let label = if pan.servings.is_empty() {
                        pan.label.clone()
                    } else {
                        format!("{} ({} servings)", pan.label, pan.servings)
                    };
                    row(&mut out, &format!("  {}", label), &config.format_money(pan.price));
                }
            }
            Category::Flavor | Category::Shape => {
                let options = if category == Category::Flavor {
                    &table.flavors
                } else {
                    &table.shapes
                };
                for option in options {
                    row(
                        &mut out,
                        &format!("  {}", option.label),
                        &config.format_money(option.price),
                    );
                }
            }
        }
        out.push('\n');
    }

    let _ = writeln!(out, "Add-ons (each)");
    for (add_on, price) in table.add_ons.iter() {
        row(
            &mut out,
            &format!("  {} [{}]", add_on.label(), cli_name(add_on)),
            &config.format_money(price),
        );
    }
    out.push('\n');

    let _ = writeln!(out, "Misc items");
    if table.misc_items.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for item in &table.misc_items {
        let name = if item.name.is_empty() {
            "(unnamed)"
        } else {
            item.name.as_str()
        };
        row(
            &mut out,
            &format!("  {} [{}]", name, item.id),
            &config.format_money(item.price),
        );
    }

    if response.dirty {
        let _ = writeln!(out, "\nUnsaved changes.");
    }
    issues(&mut out, "Prices set to zero", &response.warnings);
    out
}

fn describe(config: &ConfigState, line: &QuoteLine) -> String {
    match line.kind {
        LineKind::PanSize | LineKind::Flavor | LineKind::Shape => {
            let mut text = match &line.detail {
                Some(detail) => format!("{}: {}", line.label, detail),
                None => line.label.clone(),
            };
            if let Some(servings) = line.servings.as_deref().filter(|s| !s.is_empty()) {
                let _ = write!(text, " ({} servings)", servings);
            }
            text
        }
        LineKind::AddOn | LineKind::Misc => format!(
            "{} × {} @ {}",
            line.label,
            line.quantity,
            config.format_money(line.unit_price)
        ),
    }
}

fn heading(category: Category) -> &'static str {
    match category {
        Category::PanSize => "Pan sizes",
        Category::Flavor => "Flavors",
        Category::Shape => "Shapes",
    }
}

/// The kebab-case name `--add-on` accepts.
fn cli_name(add_on: AddOn) -> String {
    let mut name = String::new();
    for (i, c) in format!("{:?}", add_on).chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            name.push('-');
        }
        name.push(c.to_ascii_lowercase());
    }
    name
}

fn row(out: &mut String, left: &str, right: &str) {
    let pad = WIDTH.saturating_sub(left.chars().count() + right.chars().count()).max(1);
    let _ = writeln!(out, "{}{}{}", left, " ".repeat(pad), right);
}

fn rule(out: &mut String) {
    let _ = writeln!(out, "{}", "─".repeat(WIDTH));
}

fn issues(out: &mut String, title: &str, issues: &[FieldIssue]) {
    if issues.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}:", title);
    for issue in issues {
        let _ = writeln!(out, "  {} = '{}' ({})", issue.field, issue.raw, issue.issue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cake_core::{build_quote, InputIssue, Selection};

    fn response(selection: &Selection) -> QuoteResponse {
        QuoteResponse {
            quote: build_quote(&PriceTable::defaults(), selection),
            query: String::new(),
            issues: Vec::new(),
        }
    }

    #[test]
    fn test_quote_lines_and_total() {
        let mut selection = Selection::new();
        selection.set_choice(Category::PanSize, "6 inch round");
        selection.set_choice(Category::Flavor, "Chocolate");
        selection.set_add_on_count(AddOn::Macaron, 4);

        let text = quote(&ConfigState::default(), &response(&selection));
        assert!(text.starts_with("Cake Quote\n"));
        assert!(text.contains("Pan size: 6 inch round (8-10 servings)"));
        assert!(text.contains("Flavor: Chocolate"));
        assert!(text.contains("Macaron × 4 @ $3.00"));
        assert!(text.lines().any(|l| l.starts_with("Total") && l.ends_with("$42.00")));
    }

    #[test]
    fn test_empty_quote_and_issues() {
        let mut response = response(&Selection::new());
        response.issues.push(FieldIssue {
            field: "macaronCount".to_string(),
            raw: "lots".to_string(),
            issue: InputIssue::NotANumber,
        });

        let text = quote(&ConfigState::default(), &response);
        assert!(text.contains("Nothing selected yet."));
        assert!(text.contains("macaronCount = 'lots' (not a number)"));
        assert!(text.lines().any(|l| l.ends_with("$0.00")));
    }

    #[test]
    fn test_price_table_lists_everything() {
        let response = SettingsResponse {
            table: PriceTable::defaults(),
            dirty: true,
            warnings: Vec::new(),
        };
        let text = price_table(&ConfigState::default(), &response);
        assert!(text.contains("4 inch bento (2-4 servings)"));
        assert!(text.contains("Red Velvet"));
        assert!(text.contains("Real flower [real-flower]"));
        assert!(text.contains("(unnamed) [misc1]"));
        assert!(text.contains("Unsaved changes."));
    }

    #[test]
    fn test_cli_name_round_trips_through_from_str() {
        for add_on in AddOn::ALL {
            assert_eq!(cli_name(add_on).parse::<AddOn>(), Ok(add_on));
        }
    }
}
