//! End-to-end tests: commands over an in-memory store, and the CLI over a
//! real store file.

use std::path::{Path, PathBuf};

use clap::Parser;
use tempfile::TempDir;

use cake_core::{AddOn, Category, Money, PRICE_TABLE_KEY, SELECTION_KEY};
use cake_quote::cli::Cli;
use cake_quote::commands::{quote, settings};
use cake_quote::error::ErrorCode;
use cake_quote::execute;
use cake_quote::state::{AppConfig, AppState, ConfigState};
use cake_store::{KeyValueStore, MemoryStore};

fn memory_state() -> AppState<MemoryStore> {
    AppState::new(ConfigState::default(), MemoryStore::new())
}

/// Writes a config whose store lives inside `dir`.
fn write_config(dir: &Path) -> PathBuf {
    let config = AppConfig {
        store_path: dir.join("data").join("store.json"),
        share_base_url: "https://sweetlayers.example/quote".to_string(),
        business_name: "Sweet Layers".to_string(),
        ..AppConfig::default()
    };
    let path = dir.join("cake-quote.toml");
    config.save(Some(&path)).unwrap();
    path
}

fn run(config: &Path, args: &[&str]) -> anyhow::Result<String> {
    let mut argv = vec!["cake-quote", "--config", config.to_str().unwrap()];
    argv.extend_from_slice(args);
    execute(&Cli::try_parse_from(argv).unwrap())
}

// =============================================================================
// Commands
// =============================================================================

#[test]
fn test_full_order_totals_57() {
    let mut state = memory_state();
    settings::set_option_price(&mut state, Category::PanSize, "6 inch round", "40").unwrap();

    quote::select_option(&mut state, Category::PanSize, "6 inch round").unwrap();
    quote::select_option(&mut state, Category::Flavor, "Chocolate").unwrap();
    quote::select_option(&mut state, Category::Shape, "Round").unwrap();
    let response = quote::set_add_on_count(&mut state, AddOn::Macaron, "4").unwrap();

    // 40 + 5 + 0 + 4 × 3
    assert_eq!(response.quote.total, Money::from_dollars(57));
    // Round is free, so it has no line
    assert_eq!(response.quote.lines.len(), 3);
    let sum: Money = response.quote.lines.iter().map(|l| l.line_total).sum();
    assert_eq!(sum, response.quote.total);
}

#[test]
fn test_misc_items_add_to_total() {
    let mut state = memory_state();
    let board = settings::add_misc_item(&mut state, "Cake board", "4").unwrap().id;

    quote::select_option(&mut state, Category::PanSize, "6 inch tall").unwrap();
    let response = quote::set_misc_count(&mut state, board.as_str(), "2").unwrap();
    assert_eq!(response.quote.total, Money::from_dollars(38));

    // Bad input drops the count to zero and says why
    let response = quote::set_misc_count(&mut state, board.as_str(), "a few").unwrap();
    assert_eq!(response.quote.total, Money::from_dollars(30));
    assert_eq!(response.issues.len(), 1);
    assert_eq!(response.issues[0].field, board.as_str());
}

#[test]
fn test_settings_edits_survive_reload() {
    let mut state = memory_state();
    settings::set_option_price(&mut state, Category::Flavor, "Vanilla", "2.50").unwrap();
    settings::rename_option(&mut state, Category::Shape, "Custom", "Custom sculpt").unwrap();
    settings::set_add_on_price(&mut state, AddOn::EdiblePrint, "14").unwrap();
    settings::save_price_table(&mut state).unwrap();

    let store = state.repo.into_inner();
    assert!(store.get(PRICE_TABLE_KEY).unwrap().is_some());

    let state = AppState::new(ConfigState::default(), store);
    let table = state.pricing.table();
    assert!(!state.pricing.is_dirty());
    assert_eq!(table.lookup_price(Category::Flavor, "Vanilla"), Money::from_cents(250));
    assert_eq!(table.lookup_price(Category::Shape, "Custom sculpt"), Money::from_dollars(25));
    assert_eq!(table.lookup_price(Category::Shape, "Custom"), Money::zero());
    assert_eq!(table.unit_price(AddOn::EdiblePrint), Money::from_dollars(14));
}

#[test]
fn test_unsaved_edits_are_not_persisted() {
    let mut state = memory_state();
    settings::remove_option(&mut state, Category::Flavor, "Lemon").unwrap();

    let state = AppState::new(ConfigState::default(), state.repo.into_inner());
    assert!(state.pricing.table().find_option_price(Category::Flavor, "Lemon").is_some());
}

#[test]
fn test_apply_query_reports_coercions() {
    let mut state = memory_state();
    let response = quote::apply_query(
        &mut state,
        "panSize=8+inch+round&macaronCount=-2&misc1=abc&unknown=1",
    )
    .unwrap();

    assert_eq!(response.quote.total, Money::from_dollars(30));
    let fields: Vec<_> = response.issues.iter().map(|i| i.field.as_str()).collect();
    assert_eq!(fields, vec!["macaronCount", "misc1"]);
    assert_eq!(response.query, "panSize=8+inch+round");
}

#[test]
fn test_share_link_round_trips() {
    let mut state = memory_state();
    quote::select_option(&mut state, Category::PanSize, "4 inch bento").unwrap();
    quote::set_add_on_count(&mut state, AddOn::RealFlower, "2").unwrap();
    let link = quote::share_link(&state).unwrap();
    assert_eq!(
        link.url,
        "http://localhost:8080/?panSize=4+inch+bento&realFlowerCount=2"
    );

    let before = quote::get_quote(&state);
    quote::reset_selection(&mut state).unwrap();
    let after = quote::apply_query(&mut state, &link.url).unwrap();
    assert_eq!(after.quote, before.quote);
    assert_eq!(
        state.repo.store().get(SELECTION_KEY).unwrap().as_deref(),
        Some("panSize=4+inch+bento&realFlowerCount=2")
    );
}

#[test]
fn test_removed_option_prices_at_zero() {
    let mut state = memory_state();
    quote::select_option(&mut state, Category::Shape, "Heart").unwrap();
    settings::remove_option(&mut state, Category::Shape, "Heart").unwrap();

    let response = quote::get_quote(&state);
    assert_eq!(response.quote.total, Money::zero());
    assert!(response.quote.lines.is_empty());
}

#[test]
fn test_removing_misc_item_in_new_session_keeps_saved_selection() {
    let mut first = memory_state();
    quote::select_option(&mut first, Category::Flavor, "Lemon").unwrap();

    let mut second = AppState::new(ConfigState::default(), first.repo.into_inner());
    settings::remove_misc_item(&mut second, "misc2").unwrap();
    assert_eq!(
        second.repo.store().get(SELECTION_KEY).unwrap().as_deref(),
        Some("flavor=Lemon")
    );
}

#[test]
fn test_saved_selection_drops_removed_misc_item_on_restore() {
    let mut first = memory_state();
    quote::select_option(&mut first, Category::Shape, "Heart").unwrap();
    quote::set_misc_count(&mut first, "misc1", "2").unwrap();
    quote::set_misc_count(&mut first, "misc2", "1").unwrap();

    let mut second = AppState::new(ConfigState::default(), first.repo.into_inner());
    settings::remove_misc_item(&mut second, "misc1").unwrap();
    settings::save_price_table(&mut second).unwrap();

    let mut third = AppState::new(ConfigState::default(), second.repo.into_inner());
    let response = quote::restore_selection(&mut third);
    assert_eq!(response.query, "shape=Heart&misc2=1");
}

#[test]
fn test_invalid_edit_returns_validation_error() {
    let mut state = memory_state();
    let err = settings::add_option(&mut state, Category::PanSize, "  ", "10").unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
    assert!(!state.pricing.is_dirty());
}

// =============================================================================
// CLI
// =============================================================================

#[test]
fn test_cli_quote_text_and_share() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    let out = run(
        &config,
        &[
            "quote",
            "--pan-size",
            "6 inch round",
            "--flavor",
            "Chocolate",
            "--add-on",
            "macaron=4",
            "--share",
        ],
    )
    .unwrap();

    assert!(out.starts_with("Sweet Layers\n"));
    assert!(out.lines().any(|l| l.starts_with("Total") && l.ends_with("$42.00")));
    assert!(out.contains(
        "Share: https://sweetlayers.example/quote?panSize=6+inch+round&flavor=Chocolate&macaronCount=4"
    ));
}

#[test]
fn test_cli_settings_are_saved_between_runs() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    run(&config, &["settings", "set-price", "flavor", "Lemon", "11"]).unwrap();
    let added = run(&config, &["--json", "settings", "misc", "add", "Delivery", "15"]).unwrap();
    let added: serde_json::Value = serde_json::from_str(&added).unwrap();
    let id = added["id"].as_str().unwrap().to_string();
    assert_eq!(added["dirty"], false);

    let out = run(
        &config,
        &["--json", "quote", "--flavor", "Lemon", "--misc", &format!("{}=1", id)],
    )
    .unwrap();
    let out: serde_json::Value = serde_json::from_str(&out).unwrap();
    // $11 + $15, in cents
    assert_eq!(out["quote"]["total"], 2600);

    assert!(dir.path().join("data").join("store.json").exists());
}

#[test]
fn test_cli_restore_uses_previous_selection() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    run(&config, &["quote", "--shape", "Heart"]).unwrap();
    let out = run(&config, &["--json", "quote", "--restore"]).unwrap();
    let out: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(out["query"], "shape=Heart");
}

#[test]
fn test_cli_clear_unsets_restored_category() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    run(&config, &["quote", "--shape", "Heart", "--flavor", "Lemon"]).unwrap();
    run(&config, &["settings", "misc", "remove", "misc2"]).unwrap();

    let out = run(
        &config,
        &["--json", "quote", "--restore", "--clear", "shape"],
    )
    .unwrap();
    let out: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(out["query"], "flavor=Lemon");
    // Lemon only
    assert_eq!(out["quote"]["total"], 800);
}

#[test]
fn test_cli_bad_price_is_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    let out = run(&config, &["settings", "add-on", "sticker-print", "free"]).unwrap();
    assert!(out.contains("Prices set to zero"));
    assert!(out.contains("Sticker print = 'free' (not a number)"));
}

#[test]
fn test_cli_missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.toml");
    assert!(run(&missing, &["quote"]).is_err());
}

#[test]
fn test_cli_config_init_then_show() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fresh.toml");

    let out = run(&path, &["config", "init"]).unwrap();
    assert!(out.starts_with("Wrote "));
    assert!(run(&path, &["config", "init"]).is_err());

    let shown = run(&path, &["config", "show"]).unwrap();
    assert!(shown.contains("business_name = \"Cake Quote\""));
}
