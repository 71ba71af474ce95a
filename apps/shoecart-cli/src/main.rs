//! # shoecart CLI
//!
//! Drives one cart session from the command line.
//!
//! ## Usage
//!
//! ```bash
//! # Print the stored cart
//! shoecart show
//!
//! # Add one unit of product 3
//! shoecart add 3
//!
//! # Set product 3 to 2 units
//! shoecart update 3 2
//!
//! # Remove product 3
//! shoecart remove 3
//!
//! # Use a specific config file
//! shoecart --config ./cart.toml show
//! ```
//!
//! The cart is printed to stdout as JSON. Notices and logs go to stderr, so
//! the exit status only reflects setup failures: `2` for a bad config, `1`
//! for anything else.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use shoecart_core::{ProductId, UpdateProductAmount};
use shoecart_store::{CartConfig, CartStore, ChannelNotifier, StoreError, StoreResult};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{drain_notices, execute, CartCommand};

#[derive(Parser)]
#[command(name = "shoecart")]
#[command(author, version, about = "Shopping cart backed by a storefront stock API")]
struct Cli {
    /// Config file (defaults to cart.toml in the platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cart
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: i64,
    },
    /// Remove a product's line
    Remove {
        /// Product id
        id: i64,
    },
    /// Set a product's quantity
    Update {
        /// Product id
        id: i64,

        /// New absolute quantity
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

impl From<Commands> for CartCommand {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Show => CartCommand::Show,
            Commands::Add { id } => CartCommand::Add(ProductId::new(id)),
            Commands::Remove { id } => CartCommand::Remove(ProductId::new(id)),
            Commands::Update { id, amount } => {
                CartCommand::Update(UpdateProductAmount::new(id, amount))
            }
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(exit_code(&e));
    }
}

fn exit_code(error: &StoreError) -> i32 {
    if error.is_config_error() {
        2
    } else {
        1
    }
}

async fn run(cli: Cli) -> StoreResult<()> {
    let config = CartConfig::load(cli.config)?;
    info!(
        api = %config.base_url(),
        policy = %config.mutation_policy(),
        "Starting cart session"
    );

    let (notifier, mut notices) = ChannelNotifier::channel();
    let store = CartStore::from_config(&config, Arc::new(notifier))?;

    let response = execute(&store, cli.command.into()).await;

    for notice in drain_notices(&mut notices) {
        eprintln!("{}", notice);
    }
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shoecart=trace` - Trace the shoecart crates only
/// - Default: `info,shoecart=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shoecart=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
