//! Loomwear CLI - catalog administration from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Categories
//! loom-cli category list
//! loom-cli category create -n "Winter Jackets"
//! loom-cli category update 4 -n "Jackets" -s outerwear
//! loom-cli category delete 4
//!
//! # Products
//! loom-cli product list
//! loom-cli product show 42
//! loom-cli product save draft.json
//! loom-cli product save draft.json --product-id 42
//! ```
//!
//! # Environment Variables
//!
//! - `CATALOG_API_URL` - Base URL of the catalog backend (required)
//! - `CATALOG_API_TOKEN` - Bearer token for authenticated calls (optional)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use loomwear_client::{CatalogClient, CatalogConfig};
use loomwear_core::CategoryId;

mod commands;

#[derive(Parser)]
#[command(name = "loom-cli")]
#[command(author, version, about = "Loomwear catalog admin tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage catalog categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// List all categories
    List,
    /// Create a category (slug derived from name unless given)
    Create {
        /// Category name
        #[arg(short, long)]
        name: String,

        /// URL slug (defaults to a slug derived from the name)
        #[arg(short, long)]
        slug: Option<String>,

        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Update a category
    Update {
        /// Category id
        id: i64,

        /// New name
        #[arg(short, long)]
        name: String,

        /// New slug (defaults to the slug derived from the new name)
        #[arg(short, long)]
        slug: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a category
    Delete {
        /// Category id
        id: i64,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List all products
    List,
    /// Show one product with its variants
    Show {
        /// Product id
        id: i64,
    },
    /// Validate a draft file and run the save workflow
    Save {
        /// Path to a JSON draft file
        draft: PathBuf,

        /// Update this existing product instead of creating one
        #[arg(long)]
        product_id: Option<i64>,
    },
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
    let config = CatalogConfig::from_env()?;
    let client = CatalogClient::from_config(&config)?;

    match cli.command {
        Commands::Category { action } => match action {
            CategoryAction::List => commands::category::list(&client).await?,
            CategoryAction::Create {
                name,
                slug,
                description,
            } => {
                commands::category::create(&client, &name, slug.as_deref(), description).await?;
            }
            CategoryAction::Update {
                id,
                name,
                slug,
                description,
            } => {
                commands::category::update(
                    &client,
                    CategoryId::new(id),
                    &name,
                    slug.as_deref(),
                    description,
                )
                .await?;
            }
            CategoryAction::Delete { id } => {
                commands::category::delete(&client, CategoryId::new(id)).await?;
            }
        },
        Commands::Product { action } => match action {
            ProductAction::List => commands::product::list(&client).await?,
            ProductAction::Show { id } => commands::product::show(&client, id).await?,
            ProductAction::Save { draft, product_id } => {
                commands::product::save(&client, &draft, product_id).await?;
            }
        },
    }
    Ok(())
}
