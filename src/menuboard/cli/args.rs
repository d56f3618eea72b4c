use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "menuboard",
    bin_name = "menuboard",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Manage and browse a restaurant menu", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the menu API (overrides config and MENUBOARD_API)
    #[arg(long, global = true, help_heading = "Options")]
    pub api: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage menu categories
    #[command(display_order = 1)]
    Categories {
        #[command(subcommand)]
        action: CategoryCommands,
    },

    /// Manage menu items
    #[command(display_order = 2)]
    Menus {
        #[command(subcommand)]
        action: MenuCommands,
    },

    /// Browse the public menu
    #[command(display_order = 3)]
    Browse {
        /// Search term (title or description)
        #[arg(short, long)]
        search: Option<String>,

        /// Category id
        #[arg(short, long)]
        category: Option<String>,

        /// Sort: default, price-low, price-high, name
        #[arg(long)]
        sort: Option<String>,
    },

    /// Get or set configuration
    #[command(display_order = 4)]
    Config {
        /// Config key (api-base, timeout-secs, categories-page-size, menus-page-size)
        key: Option<String>,

        /// New value
        value: Option<String>,
    },
}

/// Search and paging shared by the list commands.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Search term
    #[arg(short, long)]
    pub search: Option<String>,

    /// Page number
    #[arg(short, long, default_value = "1")]
    pub page: String,

    /// Rows per page
    #[arg(long)]
    pub page_size: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List categories
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,
    },

    /// Create a category
    Create {
        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Display order
        #[arg(long, default_value = "0")]
        order: String,

        /// Create hidden from the menu screens
        #[arg(long)]
        inactive: bool,
    },

    /// Update a category
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        order: Option<String>,

        #[arg(long, conflicts_with = "inactive")]
        active: bool,

        #[arg(long)]
        inactive: bool,
    },

    /// Delete a category with no menu items
    #[command(alias = "rm")]
    Delete { id: String },
}

/// How an item is priced: a single price, a range, or a promotion.
#[derive(Args, Debug, Default)]
pub struct PriceArgs {
    #[arg(long, conflicts_with_all = ["min_price", "max_price", "regular_price", "promo_price"])]
    pub price: Option<f64>,

    #[arg(long, conflicts_with_all = ["regular_price", "promo_price"])]
    pub min_price: Option<f64>,

    #[arg(long, conflicts_with_all = ["regular_price", "promo_price"])]
    pub max_price: Option<f64>,

    #[arg(long)]
    pub regular_price: Option<f64>,

    #[arg(long)]
    pub promo_price: Option<f64>,
}

impl PriceArgs {
    pub fn is_empty(&self) -> bool {
        self.price.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.regular_price.is_none()
            && self.promo_price.is_none()
    }
}

#[derive(Subcommand, Debug)]
pub enum MenuCommands {
    /// List menu items
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Only items in this category id
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Create a menu item
    Create {
        #[arg(long)]
        title: Option<String>,

        /// Category id
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[command(flatten)]
        price: PriceArgs,

        /// USD or KHR
        #[arg(long)]
        currency: Option<String>,

        /// Image file to upload
        #[arg(long)]
        image: Option<PathBuf>,

        #[arg(long)]
        unavailable: bool,

        #[arg(long)]
        featured: bool,
    },

    /// Update a menu item
    Update {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[command(flatten)]
        price: PriceArgs,

        #[arg(long)]
        currency: Option<String>,

        #[arg(long)]
        image: Option<PathBuf>,

        #[arg(long, conflicts_with = "unavailable")]
        available: bool,

        #[arg(long)]
        unavailable: bool,

        #[arg(long, conflicts_with = "not_featured")]
        featured: bool,

        #[arg(long)]
        not_featured: bool,
    },

    /// Delete a menu item
    #[command(alias = "rm")]
    Delete { id: String },
}
