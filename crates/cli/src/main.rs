//! True Harvest CLI - operator tools on top of the admin library.
//!
//! # Usage
//!
//! ```bash
//! # Export pending orders matching "ravi" to a CSV file
//! th-cli orders export --query ravi --status Pending --output pending.csv
//!
//! # List the catalog, the plans and the customers
//! th-cli products list
//! th-cli subscriptions list
//! th-cli customers list
//!
//! # Delete a user account by mobile number
//! th-cli users delete 9876543210
//! ```
//!
//! # Environment Variables
//!
//! - `TRUE_HARVEST_API_BASE_URL` - REST API base URL
//! - `ADMIN_DEFAULT_USER_ID` - Owner of products and plans
//! - `TRUE_HARVEST_API_TOKEN` - Optional bearer token for protected endpoints

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::{CliError, Context};

#[derive(Parser)]
#[command(name = "th-cli")]
#[command(author, version, about = "True Harvest CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Work with the product catalog
    Products {
        #[command(subcommand)]
        action: ListAction,
    },
    /// Work with subscription plans
    Subscriptions {
        #[command(subcommand)]
        action: ListAction,
    },
    /// Work with customers
    Customers {
        #[command(subcommand)]
        action: ListAction,
    },
    /// Manage user accounts
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// Export orders as CSV
    Export {
        /// Search text (order id, customer name or phone)
        #[arg(short, long, default_value = "")]
        query: String,

        /// Order status (Pending, Processing, Shipped, Delivered, Cancelled)
        #[arg(short, long)]
        status: Option<String>,

        /// Output file; defaults to `orders_export_<date>.csv`
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ListAction {
    /// Print every record
    List,
}

#[derive(Subcommand)]
enum UsersAction {
    /// Permanently delete a user by mobile number
    Delete {
        /// 10-digit mobile number
        mobile: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "true_harvest_cli=info,true_harvest_admin=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    match cli.command {
        Commands::Orders { action } => match action {
            OrdersAction::Export {
                query,
                status,
                output,
            } => {
                let path = commands::orders::export(&ctx, &query, status, output).await?;
                println!("{}", path.display());
            }
        },
        Commands::Products { action: ListAction::List } => commands::listing::products(&ctx).await?,
        Commands::Subscriptions { action: ListAction::List } => {
            commands::listing::subscriptions(&ctx).await?;
        }
        Commands::Customers { action: ListAction::List } => commands::listing::customers(&ctx).await?,
        Commands::Users { action } => match action {
            UsersAction::Delete { mobile } => commands::users::delete(&ctx, &mobile).await?,
        },
    }
    Ok(())
}
