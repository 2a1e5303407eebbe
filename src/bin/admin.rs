//! CLI administration tool for users-api.
//!
//! Every `/users` endpoint needs an admin token, so the first administrator
//! and their token have to come from somewhere else. This tool talks to the
//! database directly.
//!
//! # Usage
//!
//! ```bash
//! # Create an administrator (interactive)
//! cargo run --bin admin -- user create-admin
//!
//! # List all users
//! cargo run --bin admin -- user list
//!
//! # Issue a bearer token for an account
//! cargo run --bin admin -- token issue admin@example.com
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`users_api::config`]. `DATABASE_URL` and
//! `JWT_SECRET` are required.

use users_api::application::services::{PasswordHasher, TokenCodec, UserManager, UserService};
use users_api::config::{self, Config};
use users_api::domain::dto::CreateUserDto;
use users_api::domain::entities::Role;
use users_api::domain::repositories::UserRepository;
use users_api::infrastructure::persistence::PgUserRepository;
use users_api::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

/// CLI tool for managing users-api.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage bearer tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create an account with the admin role
    CreateAdmin {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        /// Generate a random password instead of prompting for one
        #[arg(short, long)]
        generate_password: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users
    List,
}

/// Token subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Issue a JWT for the account with this e-mail
    Issue { email: String },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool, &config).await?,
        Commands::Token { action } => handle_token_action(action, &pool, &config).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn repository(pool: &PgPool) -> Arc<PgUserRepository> {
    Arc::new(PgUserRepository::new(Arc::new(pool.clone())))
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool, config: &Config) -> Result<()> {
    match action {
        UserAction::CreateAdmin {
            name,
            email,
            generate_password,
            yes,
        } => {
            create_admin(pool, config, name, email, generate_password, yes).await?;
        }
        UserAction::List => list_users(pool).await?,
    }

    Ok(())
}

/// Creates an administrator with interactive prompts.
///
/// The account goes through the same service as `POST /users`, so field
/// rules, e-mail normalization and password hashing are identical.
async fn create_admin(
    pool: &PgPool,
    config: &Config,
    name: Option<String>,
    email: Option<String>,
    generate_password: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create Administrator".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Name").interact_text()?,
    };

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("E-mail").interact_text()?,
    };

    let password = if generate_password {
        let generated = generate_password_value();
        println!("{}", "✨ Generated password".green());
        generated
    } else {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?
    };

    let payload = CreateUserDto {
        name,
        email,
        password: password.clone(),
        birth_at: None,
        role: Some(Role::Admin),
    };

    if let Err(errors) = payload.validate() {
        println!("{}", "❌ Invalid input:".red().bold());
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                println!("  {}: {}", field.to_string().cyan(), message);
            }
        }
        anyhow::bail!("Validation failed");
    }

    println!();
    println!("{}", "Account details:".bright_white().bold());
    println!("  Name:   {}", payload.name.cyan());
    println!("  E-mail: {}", payload.email.cyan());
    println!("  Role:   {}", Role::Admin.as_str().cyan());
    if generate_password {
        println!("  Password: {}", password.bright_yellow().bold());
        println!();
        println!(
            "{}",
            "⚠️  IMPORTANT: Save this password now! You won't be able to see it again."
                .red()
                .bold()
        );
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this administrator?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let service = UserManager::new(repository(pool), PasswordHasher::new(config.bcrypt_cost));

    let user = service
        .create(payload)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ Administrator created with id".green().bold(),
        user.id.to_string().bright_white().bold()
    );
    println!();
    println!(
        "  Issue a token with: {} admin -- token issue {}",
        "cargo run --bin".bright_cyan(),
        user.email
    );
    println!();

    Ok(())
}

/// Lists all users.
///
/// # Output Format
///
/// ```text
/// 📋 Users
///
///   ID  Name                      E-mail                          Role    Created
///   ────────────────────────────────────────────────────────────────────────────────────
///   1   Root                      root@example.com                admin   2024-01-15 10:30
/// ```
async fn list_users(pool: &PgPool) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let repo = repository(pool);

    let users = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin -- user create-admin",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<25} {:<32} {:<7} {:<16}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "E-mail".bright_white().bold(),
        "Role".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(88).bright_black());

    for user in &users {
        let role = if user.is_admin() {
            user.role.as_str().green()
        } else {
            user.role.as_str().normal()
        };

        println!(
            "  {:<5} {:<25} {:<32} {:<7} {}",
            user.id.to_string().bright_black(),
            user.name.cyan(),
            user.email,
            role,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    let admins = repo
        .count_admins()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count administrators: {}", e))?;

    println!();
    println!(
        "  Total: {}  Admins: {}",
        users.len().to_string().bright_white().bold(),
        admins.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Dispatches token commands.
async fn handle_token_action(action: TokenAction, pool: &PgPool, config: &Config) -> Result<()> {
    match action {
        TokenAction::Issue { email } => issue_token(pool, config, &email).await,
    }
}

/// Issues a bearer token for an existing account.
///
/// The token carries only the user id; the role is looked up on every
/// request, so a token issued to a non-admin is rejected with `403` until
/// the account is promoted.
async fn issue_token(pool: &PgPool, config: &Config, email: &str) -> Result<()> {
    println!("{}", "🔑 Issue Token".bright_blue().bold());
    println!();

    let user = repository(pool)
        .find_by_email(email.trim())
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("User not found")?;

    if !user.is_admin() {
        println!(
            "{}",
            "⚠️  This account is not an administrator; /users will answer 403"
                .yellow()
        );
        println!();
    }

    let codec = TokenCodec::new(&config.jwt_secret, &config.jwt_issuer, config.jwt_ttl_hours);
    let token = codec
        .issue(&user)
        .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))?;

    println!("  User:    {} ({})", user.name.cyan(), user.email.cyan());
    println!(
        "  Expires: {}",
        format!("in {}h", config.jwt_ttl_hours).bright_black()
    );
    println!();
    println!("{}", "Add this to your requests:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token.bright_yellow()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/users",
        token.bright_yellow()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
                .fetch_one(pool)
                .await
                .context("Users table is missing; start the server once to run migrations")?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Users:      {}", users_count.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}

/// Generates a random password.
///
/// # Format
///
/// - Length: 20 characters
/// - Character set: A-Z, a-z, 0-9
fn generate_password_value() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const PASSWORD_LEN: usize = 20;

    let mut rng = rand::rng();

    (0..PASSWORD_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
