use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use cake_core::{AddOn, Category};

#[derive(Parser, Debug)]
#[command(name = "cake-quote", version, about = "Custom cake price quotes")]
pub struct Cli {
    /// Configuration file path (defaults to the platform config dir)
    #[arg(short, long, global = true, env = "CAKE_QUOTE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Price a selection (default)
    Quote(QuoteArgs),

    /// View and edit the price table
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Options for `quote`. Applied in order: restore, query, clears, then the
/// individual flags on top.
#[derive(Args, Debug, Clone, Default)]
pub struct QuoteArgs {
    /// Start from a query string or share link
    #[arg(short, long)]
    pub query: Option<String>,

    /// Start from the selection saved by the previous run
    #[arg(long)]
    pub restore: bool,

    /// Pan size label, e.g. "6 inch round"
    #[arg(long)]
    pub pan_size: Option<String>,

    #[arg(long)]
    pub flavor: Option<String>,

    #[arg(long)]
    pub shape: Option<String>,

    /// Unset a category: pan-size, flavor or shape (repeatable)
    #[arg(long, value_name = "CATEGORY")]
    pub clear: Vec<Category>,

    /// Add-on count as NAME=COUNT, e.g. macaron=4 (repeatable)
    #[arg(long = "add-on", value_name = "NAME=COUNT", value_parser = parse_add_on)]
    pub add_ons: Vec<(AddOn, String)>,

    /// Misc item count as ID=COUNT, e.g. misc1=2 (repeatable)
    #[arg(long = "misc", value_name = "ID=COUNT", value_parser = parse_assignment)]
    pub misc: Vec<(String, String)>,

    /// Also print a share link
    #[arg(long)]
    pub share: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SettingsCommands {
    /// Display the price table
    Show,

    /// Set the price of a pan size, flavor or shape
    SetPrice {
        category: Category,
        label: String,
        #[arg(allow_hyphen_values = true)]
        price: String,
    },

    /// Rename a pan size, flavor or shape
    Rename {
        category: Category,
        label: String,
        new_label: String,
    },

    /// Add a pan size, flavor or shape
    Add {
        category: Category,
        label: String,
        #[arg(allow_hyphen_values = true)]
        price: String,
    },

    /// Remove a pan size, flavor or shape
    Remove { category: Category, label: String },

    /// Set the servings text of a pan size
    Servings { pan_size: String, servings: String },

    /// Set the unit price of an add-on
    AddOn {
        add_on: AddOn,
        #[arg(allow_hyphen_values = true)]
        price: String,
    },

    /// Manage misc items
    Misc {
        #[command(subcommand)]
        action: MiscCommands,
    },

    /// Restore the default price table
    Reset,
}

#[derive(Subcommand, Debug, Clone)]
pub enum MiscCommands {
    /// Add a misc item
    Add {
        name: String,
        #[arg(allow_hyphen_values = true)]
        price: String,
    },

    /// Rename a misc item
    Rename { id: String, name: String },

    /// Set the price of a misc item
    Price {
        id: String,
        #[arg(allow_hyphen_values = true)]
        price: String,
    },

    /// Remove a misc item
    Remove { id: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Write a config file with the defaults
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Get the command to execute, defaulting to an empty quote
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Quote(QuoteArgs::default()))
    }
}

/// Splits `NAME=COUNT`. The count is kept raw so bad input can be reported
/// the same way the form reports it.
fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=COUNT, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing name in '{}'", s));
    }
    Ok((name.to_string(), value.to_string()))
}

fn parse_add_on(s: &str) -> Result<(AddOn, String), String> {
    let (name, value) = parse_assignment(s)?;
    Ok((name.parse()?, value))
}
