//! RocketShoes CLI - Cart operations from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Add one unit of product 1 to the cart
//! rs-cart add 1
//!
//! # Set product 1's quantity to 3
//! rs-cart set 1 3
//!
//! # Remove product 1 from the cart
//! rs-cart remove 1
//!
//! # Show the cart
//! rs-cart show
//! ```
//!
//! Configuration comes from the environment (see `CartConfig`); the cart
//! persists between invocations at `CART_STORAGE_PATH`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "rs-cart")]
#[command(author, version, about = "RocketShoes cart CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product to the cart
    Add {
        /// Product identifier
        id: i32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product identifier
        id: i32,
    },
    /// Set the quantity of a product already in the cart
    Set {
        /// Product identifier
        id: i32,
        /// Desired quantity (at least 1)
        amount: u32,
    },
    /// Show the cart contents
    Show,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Add { id } => commands::cart::add(id).await?,
        Commands::Remove { id } => commands::cart::remove(id).await?,
        Commands::Set { id, amount } => commands::cart::set(id, amount).await?,
        Commands::Show => commands::cart::show().await?,
    }

    Ok(())
}
