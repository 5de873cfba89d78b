//! GoMarket CLI - Inspect and modify the persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! gomarket show
//!
//! # Show the raw persisted record
//! gomarket show --json
//!
//! # Add a product (increments it if already in the cart)
//! gomarket add --id p1 --title Tomato --image-url https://img.example/p1.png --price 2.50
//!
//! # Change quantities
//! gomarket increment p1
//! gomarket decrement p1
//! ```
//!
//! # Configuration
//!
//! `GOMARKET_DATA_DIR` and `GOMARKET_CART_KEY` (or a `.env` file) select
//! where the cart lives; `--data-dir` and `--key` override them.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gomarket_cart::{CartConfig, CartStore};
use gomarket_core::{NewLineItem, ProductId, UnitPrice};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "gomarket")]
#[command(author, version, about = "GoMarket cart tools")]
struct Cli {
    /// Directory holding the cart file (overrides `GOMARKET_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Storage key of the cart record (overrides `GOMARKET_CART_KEY`)
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart
    Show {
        /// Print the persisted JSON record instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Add a product to the cart
    Add {
        /// Product ID
        #[arg(long)]
        id: String,

        /// Product title
        #[arg(long)]
        title: String,

        /// Product image URL
        #[arg(long, default_value = "")]
        image_url: String,

        /// Unit price
        #[arg(long)]
        price: UnitPrice,
    },
    /// Increase a line item's quantity by one
    Increment {
        /// Product ID
        id: String,
    },
    /// Decrease a line item's quantity by one (stops at one)
    Decrement {
        /// Product ID
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so `show --json` output stays machine-readable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gomarket_cart=info,gomarket_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CartConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(key) = cli.key {
        config = config.with_storage_key(key);
    }

    let store = CartStore::open_file(&config).await;
    tracing::debug!(data_dir = %config.data_dir.display(), key = %config.storage_key, "Cart opened");

    match cli.command {
        Commands::Show { json } => commands::cart::show(&store, json)?,
        Commands::Add {
            id,
            title,
            image_url,
            price,
        } => {
            let product = NewLineItem {
                id: ProductId::new(id),
                title,
                image_url,
                price,
            };
            commands::cart::add(&store, product).await?;
        }
        Commands::Increment { id } => {
            commands::cart::increment(&store, &ProductId::new(id)).await?;
        }
        Commands::Decrement { id } => {
            commands::cart::decrement(&store, &ProductId::new(id)).await?;
        }
    }
    Ok(())
}
