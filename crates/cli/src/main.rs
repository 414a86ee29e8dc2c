//! Shop Inventory CLI - Manage shops, products and stock.
//!
//! # Usage
//!
//! ```bash
//! # Create a shop and add a product
//! inv-cli shop create -n "Corner Shop" -d "Groceries and more" -i https://example.com/shop.png
//! inv-cli product add -s 1 -n Widget -d "A sturdy widget" -i https://example.com/w.png -p 10 -q 3
//!
//! # Show shop totals
//! inv-cli shop list
//! inv-cli shop show 1
//! ```
//!
//! # Commands
//!
//! - `shop create|list|show` - Manage shops
//! - `product add|set-quantity|increment|decrement|update|remove` - Manage products
//!
//! State is read from and written to `$INVENTORY_DATA_DIR` on every run.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use shop_inventory_cli::commands::{self, CommandError};
use shop_inventory_cli::{CliConfig, open_store};
use shop_inventory_core::validation::{ProductForm, ProductUpdateForm, ShopForm};
use shop_inventory_core::{ProductId, ShopId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "inv-cli")]
#[command(author, version, about = "Shop Inventory CLI tools")]
struct Cli {
    /// Directory holding the persisted inventory (overrides `INVENTORY_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage shops
    Shop {
        #[command(subcommand)]
        action: ShopAction,
    },
    /// Manage products within a shop
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
}

#[derive(Subcommand)]
enum ShopAction {
    /// Create a new shop
    Create {
        /// Shop name
        #[arg(short, long)]
        name: String,

        /// Shop description
        #[arg(short, long)]
        description: String,

        /// Shop image URL
        #[arg(short, long)]
        image: String,
    },
    /// List shops with their totals
    List,
    /// Show a shop and its products
    Show {
        /// Shop ID
        id: ShopId,
    },
}

#[derive(Args)]
struct ProductRef {
    /// Shop ID
    #[arg(short, long = "shop")]
    shop: ShopId,

    /// Product ID
    #[arg(short, long = "product")]
    product: ProductId,
}

#[derive(Subcommand)]
enum ProductAction {
    /// Add a product to a shop
    Add {
        /// Shop ID
        #[arg(short, long)]
        shop: ShopId,

        /// Product name (at least 2 characters)
        #[arg(short, long)]
        name: String,

        /// Product description (at least 5 characters)
        #[arg(short, long)]
        description: String,

        /// Product image URL
        #[arg(short, long)]
        image: String,

        /// Unit price (greater than 0)
        #[arg(short, long)]
        price: String,

        /// Units in stock
        #[arg(short, long)]
        quantity: String,
    },
    /// Set a product's quantity (negative values become 0)
    SetQuantity {
        #[command(flatten)]
        target: ProductRef,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Add one unit
    Increment {
        #[command(flatten)]
        target: ProductRef,
    },
    /// Remove one unit
    Decrement {
        #[command(flatten)]
        target: ProductRef,
    },
    /// Edit product fields
    Update {
        #[command(flatten)]
        target: ProductRef,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New image URL
        #[arg(long)]
        image: Option<String>,

        /// New unit price
        #[arg(long)]
        price: Option<String>,

        /// New quantity
        #[arg(long)]
        quantity: Option<String>,
    },
    /// Delete a product
    Remove {
        #[command(flatten)]
        target: ProductRef,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shop_inventory_cli=info,shop_inventory_core=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::from_env()?.with_data_dir(cli.data_dir);
    tracing::debug!(data_dir = %config.data_dir.display(), key = %config.storage_key, "Configuration loaded");

    let mut store = open_store(&config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Shop { action } => match action {
            ShopAction::Create {
                name,
                description,
                image,
            } => {
                let form = ShopForm {
                    name,
                    description,
                    image,
                };
                commands::shop::create(&mut store, &form, &mut out)?;
            }
            ShopAction::List => commands::shop::list(&store, &mut out)?,
            ShopAction::Show { id } => commands::shop::show(&store, id, &mut out)?,
        },
        Commands::Product { action } => run_product(&mut store, action, &mut out)?,
    }
    Ok(())
}

fn run_product(
    store: &mut shop_inventory_core::Store,
    action: ProductAction,
    out: &mut impl io::Write,
) -> Result<(), CommandError> {
    match action {
        ProductAction::Add {
            shop,
            name,
            description,
            image,
            price,
            quantity,
        } => {
            let form = ProductForm {
                name,
                description,
                image,
                price,
                quantity,
            };
            commands::product::add(store, shop, &form, out)?;
        }
        ProductAction::SetQuantity { target, quantity } => {
            commands::product::set_quantity(store, target.shop, target.product, quantity, out)?;
        }
        ProductAction::Increment { target } => {
            commands::product::increment(store, target.shop, target.product, out)?;
        }
        ProductAction::Decrement { target } => {
            commands::product::decrement(store, target.shop, target.product, out)?;
        }
        ProductAction::Update {
            target,
            name,
            description,
            image,
            price,
            quantity,
        } => {
            let form = ProductUpdateForm {
                name,
                description,
                image,
                price,
                quantity,
            };
            commands::product::update(store, target.shop, target.product, &form, out)?;
        }
        ProductAction::Remove { target, yes } => {
            let stdin = io::stdin();
            commands::product::remove(store, target.shop, target.product, yes, &mut stdin.lock(), out)?;
        }
    }
    Ok(())
}
