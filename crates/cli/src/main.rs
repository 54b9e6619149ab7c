//! TechNova CLI - browse the catalog, manage the cart, and check out.
//!
//! # Usage
//!
//! ```bash
//! # Browse and filter the catalog
//! tn-cli products --search shirt --price 0-25 --sort price-low
//! tn-cli product 3
//!
//! # Cart
//! tn-cli cart add 3
//! tn-cli cart set 3 2
//! tn-cli cart show
//!
//! # Session and checkout
//! tn-cli demo-login
//! tn-cli checkout --address "1 Main St" --city Springfield --state IL --zip 62701
//! tn-cli orders
//! ```
//!
//! State persists in `TECHNOVA_DATA_DIR` between invocations. Logs go to
//! stderr; set `TECHNOVA_LOG_FORMAT=json` for JSON lines.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use technova_core::ProductId;
use technova_storefront::CheckoutForm;
use technova_storefront::config::StorefrontConfig;
use technova_storefront::session::ProfileData;
use technova_storefront::view::{CategoryFilter, PriceBand, SortKey};

mod commands;
mod render;

use commands::account::ProfileArgs;
use commands::catalog::ProductQuery;

const DEFAULT_LOG_FILTER: &str = "technova_storefront=info,tn_cli=info";

#[derive(Parser)]
#[command(name = "tn-cli")]
#[command(author, version, about = "TechNova storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, optionally filtered and sorted
    Products {
        /// Match against title, description and category
        #[arg(short, long)]
        search: Option<String>,

        /// Category name, or `all`
        #[arg(short, long)]
        category: Option<CategoryFilter>,

        /// Price band (`all`, `0-25`, `25-50`, `50-100`, `100-500`, `500+`)
        #[arg(short, long, default_value = "all")]
        price: PriceBand,

        /// Sort order (`default`, `price-low`, `price-high`, `name-asc`, `name-desc`, `rating`)
        #[arg(long, default_value = "default")]
        sort: SortKey,
    },
    /// Show one product
    Product { id: ProductId },
    /// List product categories
    Categories,
    /// Suggest search terms for a partial query
    Suggest { query: String },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Log in with an email address
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,
    },
    /// Log in as the demo user
    DemoLogin,
    /// Log out
    Logout,
    /// Delete the account and log out
    DeleteAccount,
    /// Show or edit the profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Show order history
    Orders,
    /// Place an order from the cart
    Checkout {
        #[arg(long, default_value = "")]
        address: String,

        #[arg(long, default_value = "")]
        city: String,

        #[arg(long, default_value = "")]
        state: String,

        #[arg(long, default_value = "")]
        zip: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add one unit of a product
    Add { id: ProductId },
    /// Remove a product from the cart
    Remove { id: ProductId },
    /// Set a product's quantity (zero or below removes it)
    Set {
        id: ProductId,

        #[arg(allow_negative_numbers = true)]
        quantity: String,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show the profile
    Show,
    /// Update profile fields
    Update {
        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        email_notifications: Option<bool>,

        #[arg(long)]
        sms_notifications: Option<bool>,
    },
    /// Change the password
    Password {
        #[arg(long)]
        new: String,

        #[arg(long)]
        confirm: String,
    },
}

#[tokio::main]
async fn main() {
    // Load .env before the subscriber reads RUST_LOG
    dotenvy::dotenv().ok();

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);
    if std::env::var("TECHNOVA_LOG_FORMAT").is_ok_and(|f| f == "json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;

    match cli.command {
        Commands::Products {
            search,
            category,
            price,
            sort,
        } => {
            let query = ProductQuery {
                search,
                category,
                price,
                sort,
            };
            commands::catalog::products(&config, query).await?;
        }
        Commands::Product { id } => commands::catalog::product(&config, id).await?,
        Commands::Categories => commands::catalog::categories(&config).await?,
        Commands::Suggest { query } => commands::catalog::suggest(&query),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&config),
            CartAction::Add { id } => commands::cart::add(&config, id).await?,
            CartAction::Remove { id } => commands::cart::remove(&config, id)?,
            CartAction::Set { id, quantity } => commands::cart::set(&config, id, quantity)?,
        },
        Commands::Login {
            email,
            first_name,
            last_name,
            phone,
            address,
        } => {
            let data = ProfileData {
                first_name,
                last_name,
                phone,
                address,
                ..ProfileData::with_email(email)
            };
            commands::account::login(&config, data)?;
        }
        Commands::DemoLogin => commands::account::demo_login(&config)?,
        Commands::Logout => commands::account::logout(&config)?,
        Commands::DeleteAccount => commands::account::delete_account(&config)?,
        Commands::Profile { action } => match action {
            ProfileAction::Show => commands::account::show_profile(&config)?,
            ProfileAction::Update {
                first_name,
                last_name,
                email,
                phone,
                address,
                email_notifications,
                sms_notifications,
            } => {
                let args = ProfileArgs {
                    first_name,
                    last_name,
                    email,
                    phone,
                    address,
                    email_notifications,
                    sms_notifications,
                };
                commands::account::update_profile(&config, args)?;
            }
            ProfileAction::Password { new, confirm } => {
                commands::account::change_password(&config, new, confirm)?;
            }
        },
        Commands::Orders => commands::account::orders(&config)?,
        Commands::Checkout {
            address,
            city,
            state,
            zip,
        } => {
            let form = CheckoutForm {
                address,
                city,
                state,
                zip,
            };
            commands::account::checkout(&config, form)?;
        }
    }
    Ok(())
}
