//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for clearflow
#[derive(Parser, Debug)]
#[command(name = "clearflow")]
#[command(author, version, about = "Multi-locale storefront client")]
#[command(long_about = r#"
clearflow is a storefront client over a headless CMS backend: browse the
localized catalog, keep a durable shopping cart, chat with the store
assistant, and follow support tickets.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./clearflow.toml    Project-level config
3. ~/.config/clearflow/config.toml   Global config

Example:
  clearflow products
  clearflow cart add filter-x --qty 2
  clearflow --locale ar product filter-x
  clearflow ticket watch T3
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Storefront locale for this invocation (overrides the saved preference)
    #[arg(short, long, value_name = "LOCALE", global = true)]
    pub locale: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the localized product catalog
    Products {
        /// Page of the listing to fetch
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Show one product by slug
    Product { slug: String },

    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        command: CartCommand,
    },

    /// Chat with the store assistant
    Chat,

    /// View and follow support tickets
    Ticket {
        #[command(subcommand)]
        command: TicketCommand,
    },

    /// Show or change the saved locale preference
    Locale {
        #[command(subcommand)]
        command: LocaleCommand,
    },

    /// Show configuration file locations
    ConfigSources,
}

#[derive(Subcommand, Debug)]
pub enum CartCommand {
    /// Add a product to the cart (merges with an existing line)
    Add {
        slug: String,
        /// Quantity to add
        #[arg(long, default_value_t = 1)]
        qty: u32,
    },

    /// Remove a line from the cart
    Remove { id: String },

    /// Set a line's quantity to an absolute value (>= 1)
    Set { id: String, quantity: u32 },

    /// Empty the cart
    Clear,

    /// Show the cart
    Show,

    /// Re-localize cart snapshots for the current locale
    Refresh,

    /// Review the cart as an order summary (checkout is a preview stub)
    Checkout,
}

#[derive(Subcommand, Debug)]
pub enum TicketCommand {
    /// Fetch a ticket and show its conversation
    Show { id: String },

    /// Poll a ticket until it closes (Ctrl-C to stop)
    Watch { id: String },

    /// Append a reply to a ticket
    Reply { id: String, message: String },
}

#[derive(Subcommand, Debug)]
pub enum LocaleCommand {
    /// Show the effective locale and its text direction
    Show,

    /// Save a locale preference ("en" or "ar")
    Set { locale: String },
}
