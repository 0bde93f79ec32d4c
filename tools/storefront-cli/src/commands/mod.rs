//! CLI command implementations.

pub mod browse;
pub mod categories;
pub mod config;
pub mod prefs;
pub mod search;
pub mod show;
pub mod wishlist;

use clap::{Args, Subcommand};
use storefront_catalog::search::SortKey;

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Only show these categories (repeatable).
    #[arg(short = 'C', long)]
    pub category: Vec<String>,

    /// Minimum price (whole units).
    #[arg(long)]
    pub min_price: Option<String>,

    /// Maximum price (whole units).
    #[arg(long)]
    pub max_price: Option<String>,

    /// Minimum average rating (0-5).
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Free-text search over title, description and category.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort order: default, price-low, price-high or rating.
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Ignore saved filters and start from the defaults.
    #[arg(long)]
    pub reset: bool,

    /// Show only the first N products.
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Signed-in user id (reveals prices).
    #[arg(short, long)]
    pub user: Option<String>,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Signed-in user id (reveals prices).
    #[arg(short, long)]
    pub user: Option<String>,

    /// Results shown per update.
    #[arg(short, long, default_value = "10")]
    pub limit: usize,
}

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Product id.
    pub id: u64,

    /// Signed-in user id (reveals prices).
    #[arg(short, long)]
    pub user: Option<String>,
}

/// Arguments for the wishlist command.
#[derive(Args)]
pub struct WishlistArgs {
    #[command(subcommand)]
    pub command: Option<WishlistCommand>,

    /// User whose wishlist to use. Omit for the anonymous wishlist.
    #[arg(short, long, global = true)]
    pub user: Option<String>,
}

#[derive(Subcommand)]
pub enum WishlistCommand {
    /// List wishlist products.
    List,
    /// Add a product.
    Add {
        /// Product id.
        id: u64,
    },
    /// Remove a product.
    Remove {
        /// Product id.
        id: u64,
    },
    /// Add or remove a product. Requires --user.
    Toggle {
        /// Product id.
        id: u64,
    },
}

/// Arguments for the prefs command.
#[derive(Args)]
pub struct PrefsArgs {
    #[command(subcommand)]
    pub command: Option<PrefsCommand>,
}

#[derive(Subcommand)]
pub enum PrefsCommand {
    /// Show saved filters and sort.
    Show,
    /// Forget saved filters and sort.
    Clear,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
