//! CLI administration tool for shortlink-core.
//!
//! Inspects and manipulates the PostgreSQL mapping store without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Look up a code without counting a click
//! cargo run --bin admin -- lookup aZ3kQ9x
//!
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com/x
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; `DATABASE_URL` (or the `DB_*` components) is required.

use shortlink_core::application::services::LinkService;
use shortlink_core::config::{self, Config, StorageBackend};
use shortlink_core::infrastructure::persistence::PgLinkRepository;
use shortlink_core::server::{build_link_service, connect_pool};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortlink-core.
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
    /// Show statistics
    Stats,

    /// Show a short link without counting a click
    Lookup {
        /// Short code to look up
        code: String,
    },

    /// Shorten a URL (returns the existing link if already shortened)
    Shorten {
        /// Absolute http or https URL
        url: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
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

    let config = config::load_from_env().context("Invalid configuration")?;
    if config.storage_backend != StorageBackend::Postgres {
        anyhow::bail!("admin requires STORAGE_BACKEND=postgres");
    }

    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set")?;
    let pool = connect_pool(database_url, &config).await?;

    match cli.command {
        Commands::Stats => handle_stats(&service(&config, &pool)).await?,
        Commands::Lookup { code } => handle_lookup(&service(&config, &pool), &code).await?,
        Commands::Shorten { url } => handle_shorten(&service(&config, &pool), &url).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn service(config: &Config, pool: &PgPool) -> LinkService {
    let repository = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    build_link_service(config, repository)
}

/// Displays aggregate counters.
async fn handle_stats(service: &LinkService) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let stats = service
        .stats()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  Links:         {}",
        stats.total_urls.to_string().bright_green().bold()
    );
    println!(
        "  Created today: {}",
        stats.urls_created_today.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:        {}",
        stats.total_clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Prints one link; the click counter is not touched.
async fn handle_lookup(service: &LinkService, code: &str) -> Result<()> {
    let link = service
        .get_link_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", code, e))?;

    println!("{}", "🔗 Short Link".bright_blue().bold());
    println!();
    println!("  Code:      {}", link.code.cyan());
    println!("  Short URL: {}", service.short_url(&link.code).bright_yellow());
    println!("  Target:    {}", link.original_url.bright_white());
    println!(
        "  Created:   {}",
        link.created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!(
        "  Clicks:    {}",
        link.clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Creates a link through the same protocol the API uses.
async fn handle_shorten(service: &LinkService, url: &str) -> Result<()> {
    let outcome = service
        .create_short_link(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    if outcome.created {
        println!("{}", "✅ Short link created".green().bold());
    } else {
        println!("{}", "ℹ️  URL was already shortened".yellow());
    }
    println!();
    println!("  Code:      {}", outcome.link.code.cyan());
    println!(
        "  Short URL: {}",
        service.short_url(&outcome.link.code).bright_yellow().bold()
    );
    println!("  Target:    {}", outcome.link.original_url.bright_white());
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

            let table_size: Option<String> = sqlx::query_scalar(
                "SELECT pg_size_pretty(pg_total_relation_size(to_regclass('short_links')))",
            )
            .fetch_one(pool)
            .await?;

            println!("  PostgreSQL:  {}", version.bright_white());
            println!(
                "  short_links: {}",
                table_size
                    .unwrap_or_else(|| "not created (run the server to migrate)".to_string())
                    .bright_white()
            );
            println!();
        }
    }

    Ok(())
}
