//! # Cake Quote Library
//!
//! Command-line front end for the cake quoting core.
//!
//! ## Module Organization
//! ```text
//! cake_quote/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── render.rs       ◄─── Plain-text output
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState
//! │   ├── pricing.rs  ◄─── Price table + dirty flag
//! │   ├── selection.rs◄─── Current selection + coercion issues
//! │   └── config.rs   ◄─── TOML configuration
//! ├── commands/
//! │   ├── quote.rs    ◄─── Selection and quote commands
//! │   ├── settings.rs ◄─── Price table edits
//! │   └── config.rs   ◄─── Configuration commands
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## One Invocation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize logging (stderr, RUST_LOG)                              │
//! │  2. Parse arguments                                                     │
//! │  3. Load config: --config / platform dir, then CAKE_* overrides        │
//! │  4. Open the store file, load the price table (defaults on any         │
//! │     problem, legacy tables migrated)                                    │
//! │  5. Run the commands the arguments describe                             │
//! │  6. Settings edits are saved before exiting                             │
//! │  7. Print text or JSON to stdout                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod render;
pub mod state;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cake_core::Category;
use cake_store::KeyValueStore;

use cli::{Cli, Commands, ConfigCommands, MiscCommands, QuoteArgs, SettingsCommands};
use commands::{quote as quote_cmd, settings as settings_cmd};
use state::{AppState, ConfigState};

/// Runs the CLI.
pub fn run() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let output = execute(&cli)?;
    print!("{}", output);
    Ok(())
}

/// Executes a parsed command line and returns what should be printed.
pub fn execute(cli: &Cli) -> anyhow::Result<String> {
    let command = cli.get_command();
    debug!(?command, "Executing");

    // Must work before a valid config exists
    if let Commands::Config {
        action: ConfigCommands::Init { force },
    } = &command
    {
        let path = commands::config::init_config(cli.config.as_deref(), *force)?;
        return Ok(format!("Wrote {}\n", path.display()));
    }

    let config = ConfigState::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match command {
        Commands::Config { .. } => show_config(&config, cli.json),
        Commands::Quote(args) => {
            let mut state = open(config)?;
            run_quote(&mut state, &args, cli.json)
        }
        Commands::Settings { action } => {
            let mut state = open(config)?;
            run_settings(&mut state, action, cli.json)
        }
    }
}

fn open(config: ConfigState) -> anyhow::Result<AppState<cake_store::FileStore>> {
    let path = config.config.store_path.clone();
    let state = AppState::open(config)
        .with_context(|| format!("Failed to open store {}", path.display()))?;
    debug!(path = %path.display(), outcome = ?state.pricing.load_outcome(), "Store opened");
    Ok(state)
}

fn show_config(config: &ConfigState, json: bool) -> anyhow::Result<String> {
    let config = commands::config::get_config(config);
    if json {
        return to_json(&config);
    }

    let mut out = match &config.loaded_from {
        Some(path) => format!("# Loaded from {}\n", path.display()),
        None => "# Defaults (no config file)\n".to_string(),
    };
    out.push_str(&toml::to_string_pretty(&config.config).context("Failed to render config")?);
    Ok(out)
}

/// Applies the quote arguments in order and renders the final quote.
pub fn run_quote<S: KeyValueStore>(
    state: &mut AppState<S>,
    args: &QuoteArgs,
    json: bool,
) -> anyhow::Result<String> {
    let mut response = if args.restore {
        quote_cmd::restore_selection(state)
    } else {
        quote_cmd::get_quote(state)
    };

    if let Some(query) = &args.query {
        response = quote_cmd::apply_query(state, query)?;
    }

    for category in &args.clear {
        response = quote_cmd::clear_option(state, *category)?;
    }

    let choices = [
        (Category::PanSize, &args.pan_size),
        (Category::Flavor, &args.flavor),
        (Category::Shape, &args.shape),
    ];
    for (category, label) in choices {
        if let Some(label) = label {
            response = quote_cmd::select_option(state, category, label)?;
        }
    }

    for (add_on, raw) in &args.add_ons {
        response = quote_cmd::set_add_on_count(state, *add_on, raw)?;
    }
    for (id, raw) in &args.misc {
        response = quote_cmd::set_misc_count(state, id, raw)?;
    }

    let share = if args.share {
        Some(quote_cmd::share_link(state)?)
    } else {
        None
    };

    if json {
        let mut value = serde_json::to_value(&response)?;
        if let Some(share) = share {
            value["shareUrl"] = serde_json::Value::String(share.url);
        }
        return to_json(&value);
    }

    let mut out = render::quote(&state.config, &response);
    if let Some(share) = share {
        out.push_str(&format!("\nShare: {}\n", share.url));
    }
    Ok(out)
}

/// Applies one settings edit and saves the table.
pub fn run_settings<S: KeyValueStore>(
    state: &mut AppState<S>,
    action: SettingsCommands,
    json: bool,
) -> anyhow::Result<String> {
    let mut created = None;
    let response = match action {
        SettingsCommands::Show => {
            let response = settings_cmd::get_price_table(state);
            return if json {
                to_json(&response)
            } else {
                Ok(render::price_table(&state.config, &response))
            };
        }
        SettingsCommands::SetPrice {
            category,
            label,
            price,
        } => settings_cmd::set_option_price(state, category, &label, &price)?,
        SettingsCommands::Rename {
            category,
            label,
            new_label,
        } => settings_cmd::rename_option(state, category, &label, &new_label)?,
        SettingsCommands::Add {
            category,
            label,
            price,
        } => settings_cmd::add_option(state, category, &label, &price)?,
        SettingsCommands::Remove { category, label } => {
            settings_cmd::remove_option(state, category, &label)?
        }
        SettingsCommands::Servings { pan_size, servings } => {
            settings_cmd::set_servings(state, &pan_size, &servings)?
        }
        SettingsCommands::AddOn { add_on, price } => {
            settings_cmd::set_add_on_price(state, add_on, &price)?
        }
        SettingsCommands::Misc { action } => match action {
            MiscCommands::Add { name, price } => {
                let result = settings_cmd::add_misc_item(state, &name, &price)?;
                created = Some(result.id);
                result.settings
            }
            MiscCommands::Rename { id, name } => settings_cmd::rename_misc_item(state, &id, &name)?,
            MiscCommands::Price { id, price } => {
                settings_cmd::set_misc_item_price(state, &id, &price)?
            }
            MiscCommands::Remove { id } => settings_cmd::remove_misc_item(state, &id)?,
        },
        SettingsCommands::Reset => settings_cmd::reset_price_table(state)?,
    };

    let mut saved = settings_cmd::save_price_table(state)?;
    saved.warnings = response.warnings;

    if json {
        let mut value = serde_json::to_value(&saved)?;
        if let Some(id) = created {
            value["id"] = serde_json::Value::String(id.to_string());
        }
        return to_json(&value);
    }

    let mut out = String::new();
    if let Some(id) = created {
        out.push_str(&format!("Added misc item {}\n\n", id));
    }
    out.push_str(&render::price_table(&state.config, &saved));
    Ok(out)
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every command as it runs
/// - `RUST_LOG=cake_store=debug` - Show store reads and writes
/// - Default: warnings, plus info from this crate
///
/// Logs go to stderr so stdout stays clean for `--json`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,cake_quote=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
