use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use ridepool_cli::{AdminInput, create_admin};
use ridepool_config::{PasswordConfig, StorageConfig};
use ridepool_db::{AccountStore, PgAccountStore, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "ridepool-cli")]
#[command(about = "Ridepool CLI - Administrative tools for Ridepool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        /// First name of the admin
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name of the admin
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Public pseudonym
        #[arg(short = 'u', long)]
        pseudo: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Apply pending database migrations
    Migrate,
}

fn prompt(value: Option<String>, label: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Input::new()
            .with_prompt(label)
            .interact_text()
            .with_context(|| format!("Failed to read {}", label.to_lowercase())),
    }
}

async fn connect() -> anyhow::Result<PgAccountStore> {
    let (url, max_connections) = match StorageConfig::from_env()? {
        StorageConfig::Postgres {
            url,
            max_connections,
        } => (url, max_connections),
        StorageConfig::Memory => {
            anyhow::bail!("The CLI needs a database; unset STORAGE=memory and set DATABASE_URL")
        }
    };
    let pool = init_db_pool(&url, max_connections.min(5))
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;
    Ok(PgAccountStore::new(pool))
}

async fn handle_create_admin(
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    pseudo: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let first_name = prompt(first_name, "First name")?;
    let last_name = prompt(last_name, "Last name")?;
    let email = prompt(email, "Email address")?;
    let pseudo = prompt(pseudo, "Pseudo")?;
    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let store: Arc<dyn AccountStore> = Arc::new(connect().await?);
    let admin = create_admin(
        store.as_ref(),
        AdminInput {
            email,
            pseudo,
            first_name,
            last_name,
            password,
        },
        PasswordConfig::from_env().bcrypt_cost,
    )
    .await?;

    println!("\n✅ Admin created successfully!");
    println!("   Email: {}", admin.email);
    println!("   Pseudo: {}", admin.pseudo);
    println!("   Name: {} {}", admin.first_name, admin.last_name);
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::CreateAdmin {
            first_name,
            last_name,
            email,
            pseudo,
            password,
        } => handle_create_admin(first_name, last_name, email, pseudo, password).await,
        Commands::Migrate => connect().await.map(|_| println!("✅ Migrations applied")),
    };

    if let Err(e) = result {
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
}
