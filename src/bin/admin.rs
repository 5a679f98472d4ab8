//! CLI administration tool for slug-shortener.
//!
//! Provides commands for inspecting and removing slugs, viewing statistics,
//! and checking the database without going through the HTTP API.
//!
//! Commands act directly on the store; the identity provider is not consulted.
//!
//! # Usage
//!
//! ```bash
//! # List a user's slugs
//! cargo run --bin admin -- slugs list --user u1
//!
//! # Delete one of them
//! cargo run --bin admin -- slugs delete --user u1 --id 65a1f0c2e4b0a1b2c3d4e5f6
//!
//! # View statistics, optionally for one user
//! cargo run --bin admin -- stats
//! cargo run --bin admin -- stats --user u1
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `SLUG_LIMIT`, `SLUG_LIMIT_WINDOW_DAYS` (optional): creation limit shown by `stats --user`

use slug_shortener::application::services::{CreationLimit, MAX_WINDOW_DAYS};
use slug_shortener::domain::entities::SlugId;
use slug_shortener::domain::filter::SlugFilter;
use slug_shortener::domain::repositories::{HitRepository, SlugRepository};
use slug_shortener::infrastructure::persistence::{PgHitRepository, PgSlugRepository};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing slug-shortener.
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
    /// Inspect and remove slugs
    Slugs {
        #[command(subcommand)]
        action: SlugAction,
    },

    /// Show statistics
    Stats {
        /// Restrict counts to one user
        #[arg(short, long)]
        user: Option<String>,

        /// Slugs a user may create per window
        #[arg(long, env = "SLUG_LIMIT", default_value_t = 30)]
        limit: u64,

        /// Window length in days
        #[arg(
            long,
            env = "SLUG_LIMIT_WINDOW_DAYS",
            default_value_t = 30,
            value_parser = clap::value_parser!(i64).range(1..=MAX_WINDOW_DAYS)
        )]
        window_days: i64,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Slug subcommands.
#[derive(Subcommand)]
enum SlugAction {
    /// List a user's slugs in insertion order
    List {
        /// Owner uid
        #[arg(short, long)]
        user: String,
    },

    /// Delete a slug owned by a user
    Delete {
        /// Owner uid
        #[arg(short, long)]
        user: String,

        /// Slug id (24 hex characters)
        #[arg(long)]
        id: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Slugs { action } => handle_slug_action(action, &pool).await?,
        Commands::Stats {
            user,
            limit,
            window_days,
        } => handle_stats(&pool, user, CreationLimit::new(limit, window_days)).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches slug commands.
async fn handle_slug_action(action: SlugAction, pool: &PgPool) -> Result<()> {
    let repo = PgSlugRepository::new(Arc::new(pool.clone()));

    match action {
        SlugAction::List { user } => list_slugs(&repo, &user).await?,
        SlugAction::Delete { user, id, yes } => delete_slug(&repo, &user, &id, yes).await?,
    }

    Ok(())
}

/// Lists a user's slugs.
///
/// # Output Format
///
/// ```text
/// 🔗 Slugs of u1
///
///   ID                        Slug             Redirect                       Created
///   ──────────────────────────────────────────────────────────────────────────────────
///   65a1f0c2e4b0a1b2c3d4e5f6  abc              https://x.com                  2024-01-15 10:30
/// ```
async fn list_slugs(repo: &PgSlugRepository, user: &str) -> Result<()> {
    println!("{} {}", "🔗 Slugs of".bright_blue().bold(), user.cyan().bold());
    println!();

    let records = repo
        .find(SlugFilter::new().with_user(user))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list slugs: {}", e))?;

    if records.is_empty() {
        println!("{}", "  No slugs found".yellow());
        return Ok(());
    }

    println!(
        "  {:<25} {:<16} {:<30} {:<16}",
        "ID".bright_white().bold(),
        "Slug".bright_white().bold(),
        "Redirect".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    for record in &records {
        println!(
            "  {:<25} {:<16} {:<30} {}",
            record.id.to_hex().bright_black(),
            record.slug.cyan(),
            record.domain,
            record
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!(
        "  Total: {}",
        records.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Deletes a slug scoped to its owner, after confirmation.
///
/// A pair that matches nothing is reported, not treated as an error.
async fn delete_slug(repo: &PgSlugRepository, user: &str, id: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Slug".bright_blue().bold());
    println!();

    let id: SlugId = id.parse().context("Invalid slug id")?;
    let filter = SlugFilter::new().with_id(id).with_user(user);

    let record = repo
        .find(filter.clone())
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .pop();

    let Some(record) = record else {
        println!("{}", "⚠️  No slug with this id belongs to this user".yellow());
        return Ok(());
    };

    println!("  ID:       {}", record.id.to_hex().bright_black());
    println!("  Slug:     {}", record.slug.cyan());
    println!("  Redirect: {}", record.domain);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this slug?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    repo.delete(filter)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete slug: {}", e))?;

    println!();
    println!("{}", "✅ Slug deleted".green().bold());
    println!();

    Ok(())
}

/// Displays slug and hit counts.
///
/// With `--user`, also shows creations inside the current window against the limit.
async fn handle_stats(pool: &PgPool, user: Option<String>, limit: CreationLimit) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let slugs = PgSlugRepository::new(pool.clone());
    let hits = PgHitRepository::new(pool.clone());

    match user {
        None => {
            println!("{}", "📊 Statistics".bright_blue().bold());
            println!();

            let slugs_count = slugs
                .count(SlugFilter::new())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count slugs: {}", e))?;
            let hits_count = hits
                .count(None)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count hits: {}", e))?;

            println!(
                "  Slugs: {}",
                slugs_count.to_string().bright_green().bold()
            );
            println!("  Hits:  {}", hits_count.to_string().bright_green().bold());
        }
        Some(user) => {
            println!(
                "{} {}",
                "📊 Statistics for".bright_blue().bold(),
                user.cyan().bold()
            );
            println!();

            let slugs_count = slugs
                .count(SlugFilter::new().with_user(&user))
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count slugs: {}", e))?;
            let recent = slugs
                .count(
                    SlugFilter::new()
                        .with_user(&user)
                        .created_since(limit.cutoff(Utc::now())?),
                )
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count slugs: {}", e))?;
            let hits_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hits WHERE uid = $1")
                .bind(&user)
                .fetch_one(pool.as_ref())
                .await?;

            let recent_label = format!("{}/{}", recent, limit.max_slugs);
            let recent_label = if recent >= limit.max_slugs {
                recent_label.red().bold()
            } else {
                recent_label.bright_green().bold()
            };

            println!(
                "  Slugs:             {}",
                slugs_count.to_string().bright_green().bold()
            );
            println!(
                "  Created in {:>3}d:  {}",
                limit.window_days, recent_label
            );
            println!(
                "  Hits:              {}",
                hits_count.to_string().bright_green().bold()
            );
        }
    }
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
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_rejects_out_of_range_window() {
        let parsed = Cli::try_parse_from(["admin", "stats", "--window-days", "100000000"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from(["admin", "stats", "--window-days", "0"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_stats_accepts_window_in_range() {
        let cli = Cli::try_parse_from(["admin", "stats", "--user", "u1", "--window-days", "7"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Stats {
                window_days: 7,
                ..
            }
        ));
    }
}
