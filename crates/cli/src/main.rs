//! TechStore CLI - browse the catalog and manage the signed-in session.
//!
//! # Usage
//!
//! ```bash
//! # List products, filtered and sorted
//! techstore products --search phone --brand Apple --sort price-low
//!
//! # Sign in and stay signed in across runs (prompts for the password)
//! techstore login jane@example.com --remember
//!
//! # Create an account
//! techstore signup --name "Jane Doe" --username jane --email jane@example.com
//!
//! # Interactive session with cart and wishlist
//! techstore shop
//! ```
//!
//! # Commands
//!
//! - `products` - List catalog products
//! - `brands` - List brands for the brand filter
//! - `login` / `signup` - Sign in
//! - `whoami` - Show the remembered session
//! - `logout` - Sign out and forget the session
//! - `shop` - Interactive shell

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use techstore_core::SortMode;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "techstore")]
#[command(author, version, about = "TechStore storefront CLI")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Products {
        /// Case-insensitive name search
        #[arg(short, long, default_value = "")]
        search: String,

        /// Brand to show, or "All"
        #[arg(short, long, default_value = "All")]
        brand: String,

        /// Sort order (`default`, `price-low`, `price-high`, `rating`)
        #[arg(long, default_value = "default")]
        sort: SortMode,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// List brands in catalog order
    Brands,
    /// Sign in with a username or email
    Login {
        /// Username or email address
        identifier: String,

        /// Password; prompted for on stdin when omitted
        #[arg(short, long)]
        password: Option<String>,

        /// Stay signed in across runs
        #[arg(short, long)]
        remember: bool,
    },
    /// Create an account
    Signup {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: String,

        /// Password; prompted for on stdin when omitted
        #[arg(short, long)]
        password: Option<String>,

        /// Password again; prompted for on stdin when omitted
        #[arg(short, long)]
        confirm_password: Option<String>,

        /// Stay signed in across runs
        #[arg(short, long)]
        remember: bool,
    },
    /// Show the remembered session
    Whoami,
    /// Sign out and forget the session
    Logout,
    /// Interactive shell with cart and wishlist
    Shop,
}

fn init_tracing(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "techstore_storefront=info,techstore_cli=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let mut state = commands::open_state()?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Products {
            search,
            brand,
            sort,
            json,
        } => commands::catalog::products(&mut state, &mut out, &search, &brand, sort, json)?,
        Commands::Brands => commands::catalog::brands(&state, &mut out)?,
        Commands::Login {
            identifier,
            password,
            remember,
        } => {
            let mut input = std::io::stdin().lock();
            let password = commands::session::password_or_prompt(
                password,
                &mut input,
                &mut out,
                "Password",
            )?;
            let form = commands::session::LoginForm {
                identifier,
                password,
                remember,
            };
            commands::session::login(&mut state, &mut out, form).await?;
        }
        Commands::Signup {
            name,
            username,
            email,
            password,
            confirm_password,
            remember,
        } => {
            let mut input = std::io::stdin().lock();
            let password = commands::session::password_or_prompt(
                password,
                &mut input,
                &mut out,
                "Password",
            )?;
            let confirm_password = commands::session::password_or_prompt(
                confirm_password,
                &mut input,
                &mut out,
                "Confirm password",
            )?;
            let form = commands::session::SignupForm {
                name,
                username,
                email,
                password,
                confirm_password,
                remember,
            };
            commands::session::signup(&mut state, &mut out, form).await?;
        }
        Commands::Whoami => commands::session::whoami(&state, &mut out)?,
        Commands::Logout => commands::session::logout(&mut state, &mut out)?,
        Commands::Shop => {
            let input = std::io::stdin().lock();
            commands::shop::run(&mut state, input, &mut out).await?;
        }
    }
    Ok(())
}
