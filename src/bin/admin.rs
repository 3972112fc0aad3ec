//! CLI administration tool for admin-dashboard.
//!
//! Manages the token store shared with the server and fetches the dashboard
//! overview from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Store an access token (prompts when flags are omitted)
//! cargo run --bin admin -- token set --access eyJhbGciOi...
//!
//! # Show which token keys are populated
//! cargo run --bin admin -- token show
//!
//! # Remove every stored token
//! cargo run --bin admin -- token clear
//!
//! # Print metric cards and the earning series for a year
//! cargo run --bin admin -- overview --year 2025
//! ```
//!
//! # Environment Variables
//!
//! - `TOKEN_STORE_PATH` (required): JSON token store used by the server
//! - `API_BASE_URL`: Dashboard backend root (default: `http://localhost:8000`)

use admin_dashboard::application::services::{DashboardService, TokenManager};
use admin_dashboard::application::services::token_manager::{
    ACCESS_TOKEN_KEYS, REFRESH_TOKEN_KEYS,
};
use admin_dashboard::config::Config;
use admin_dashboard::server::build_services;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};

/// CLI tool for managing admin-dashboard.
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
    /// Manage stored tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Fetch and print the dashboard overview
    Overview {
        /// Year for the earning series (default: current year)
        #[arg(short, long)]
        year: Option<i32>,
    },
}

/// Token store subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Store access (and optionally refresh) token
    Set {
        /// Access token (prompted if omitted)
        #[arg(short, long)]
        access: Option<String>,

        /// Refresh token
        #[arg(short, long)]
        refresh: Option<String>,
    },

    /// Show which token keys are populated
    Show,

    /// Remove all stored tokens
    Clear {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    if config.token_store_path.is_none() {
        bail!("TOKEN_STORE_PATH must be set to share tokens with the server");
    }
    config.validate()?;

    let (token_manager, dashboard_service) = build_services(&config).await?;

    match cli.command {
        Commands::Token { action } => match action {
            TokenAction::Set { access, refresh } => {
                set_tokens(&token_manager, access, refresh).await?
            }
            TokenAction::Show => show_tokens(&config, &token_manager).await?,
            TokenAction::Clear { yes } => clear_tokens(&token_manager, yes).await?,
        },
        Commands::Overview { year } => print_overview(&dashboard_service, year).await?,
    }

    Ok(())
}

/// Stores tokens under the primary key names, prompting for a missing access token.
async fn set_tokens(tokens: &TokenManager, access: Option<String>, refresh: Option<String>) -> Result<()> {
    println!("{}", "🔑 Store Tokens".bright_blue().bold());
    println!();

    let access = match access {
        Some(a) => a,
        None => Input::<String>::new()
            .with_prompt("Access token")
            .interact_text()?,
    };

    tokens
        .set_tokens(access.trim(), refresh.as_deref().map(str::trim))
        .await
        .context("Failed to store tokens")?;

    println!("{}", "✅ Tokens stored".green().bold());
    println!(
        "  {} {}",
        "Access: ".bright_white(),
        mask(access.trim()).bright_yellow()
    );
    if let Some(refresh) = refresh.filter(|r| !r.trim().is_empty()) {
        println!(
            "  {} {}",
            "Refresh:".bright_white(),
            mask(refresh.trim()).bright_yellow()
        );
    }
    println!();

    Ok(())
}

/// Lists every known key with a masked value.
///
/// # Output Format
///
/// ```text
/// 🔍 Token Store (/var/lib/admin-dashboard/tokens.json)
///
///   adminAuthToken       eyJh…9xQ   ← active
///   authToken            -
/// ```
async fn show_tokens(config: &Config, tokens: &TokenManager) -> Result<()> {
    let path = config
        .token_store_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    println!(
        "{} ({})",
        "🔍 Token Store".bright_blue().bold(),
        path.bright_black()
    );
    println!();

    let active_access = tokens.get_access_token().await;
    let active_refresh = tokens.get_refresh_token().await;

    for key in ACCESS_TOKEN_KEYS.iter().chain(REFRESH_TOKEN_KEYS.iter()) {
        let value = tokens
            .storage()
            .get_item(key)
            .await
            .with_context(|| format!("Failed to read {}", key))?;

        match value {
            Some(v) if !v.is_empty() => {
                let active = (ACCESS_TOKEN_KEYS.contains(key) && Some(&v) == active_access.as_ref())
                    || (REFRESH_TOKEN_KEYS.contains(key) && Some(&v) == active_refresh.as_ref());
                let marker = if active { "← active".green() } else { "".normal() };
                println!("  {:<20} {}   {}", key.cyan(), mask(&v).bright_yellow(), marker);
            }
            _ => println!("  {:<20} {}", key.cyan(), "-".bright_black()),
        }
    }
    println!();

    Ok(())
}

/// Removes every token key after confirmation.
async fn clear_tokens(tokens: &TokenManager, skip_confirm: bool) -> Result<()> {
    println!("{}", "🔒 Clear Tokens".bright_blue().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Remove all stored tokens? The dashboard will require a new login.")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    tokens
        .clear_tokens()
        .await
        .context("Failed to clear tokens")?;

    println!("{}", "✅ Tokens cleared".green().bold());
    println!();

    Ok(())
}

/// Fetches metrics and the earning series once and prints them.
async fn print_overview(service: &DashboardService, year: Option<i32>) -> Result<()> {
    println!("{}", "📊 Dashboard Overview".bright_blue().bold());
    println!();

    let panel = service.refresh_metrics().await;
    if let Some(error) = &panel.error {
        println!("  {}", error.yellow());
    }
    for card in panel.summary.cards() {
        println!(
            "  {:<16} {}",
            card.label.bright_white(),
            card.value.cyan().bold()
        );
    }
    println!();

    let chart = service.earning_chart(year).await;
    println!(
        "{} {}",
        "Earnings".bright_white().bold(),
        chart.year.to_string().bright_black()
    );
    if let Some(error) = &chart.error {
        println!("  {}", error.yellow());
    }

    let domain = chart.domain_max();
    for point in &chart.series {
        let width = if domain > 0.0 {
            (point.value.max(0.0) / domain * 40.0).round() as usize
        } else {
            0
        };
        let bar = "█".repeat(width);
        println!(
            "  {:<4} {:<40} ${:.2}",
            point.month,
            if point.active { bar.green() } else { bar.bright_black() },
            point.value
        );
    }
    println!();
    println!("  Max: {}", chart.max_label().bright_white());
    println!();

    Ok(())
}

/// Shows the first and last four characters of a token.
fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}
