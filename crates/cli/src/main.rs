//! Crescent Commerce CLI - demo flows against an in-memory store.
//!
//! # Usage
//!
//! ```bash
//! # Browse the demo catalog
//! crescent catalog --category SSD --sort price-asc
//!
//! # Full-text search with pagination
//! crescent catalog --search keyboard --page 2
//!
//! # Run a scripted checkout end to end
//! crescent checkout
//!
//! # Print the admin dashboard for the demo data set
//! crescent dashboard
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;
mod fixtures;

#[derive(Parser)]
#[command(name = "crescent")]
#[command(author, version, about = "Crescent Commerce CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the demo catalog with filters, sorting and pagination
    Catalog {
        /// Case-insensitive search over title, tag, category and id
        #[arg(short, long, default_value = "")]
        search: String,

        /// Restrict to a category (repeatable)
        #[arg(short, long)]
        category: Vec<String>,

        /// Restrict to a color (repeatable)
        #[arg(long)]
        color: Vec<String>,

        /// Keep products rated at least N stars (repeatable)
        #[arg(short = 'r', long)]
        min_rating: Vec<u8>,

        /// Lower price bound
        #[arg(long)]
        price_min: Option<String>,

        /// Upper price bound
        #[arg(long)]
        price_max: Option<String>,

        /// Sort key: popularity, rating, latest, price-asc, price-desc or default
        #[arg(long, default_value = "default")]
        sort: String,

        /// 1-based page number (out-of-range values clamp)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Run a scripted checkout flow
    Checkout {
        /// User id to place the order as
        #[arg(short, long, default_value = "user-001")]
        user: String,
    },
    /// Print admin dashboard aggregates for the demo data set
    Dashboard,
}

#[tokio::main]
async fn main() {
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
        Commands::Catalog {
            search,
            category,
            color,
            min_rating,
            price_min,
            price_max,
            sort,
            page,
        } => {
            commands::catalog::browse(commands::catalog::BrowseArgs {
                search,
                categories: category,
                colors: color,
                min_ratings: min_rating,
                price_min,
                price_max,
                sort,
                page,
            })
            .await?;
        }
        Commands::Checkout { user } => commands::checkout::run(&user).await?,
        Commands::Dashboard => commands::dashboard::show().await?,
    }
    Ok(())
}
