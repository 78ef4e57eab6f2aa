mod check;
mod config;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use config::Config;
use std::env;
use std::path::PathBuf;

use check::CheckReport;

#[derive(Parser, Debug)]
#[command(name = "menuhook")]
#[command(author, version, about = "Check that a page wires its menu button to the menu handler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug logs (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a page fixture, run the bootstrap and replay clicks
    Check {
        /// JSON page fixture
        page: PathBuf,

        /// Element identifier (overrides env var and config file)
        #[arg(long)]
        element_id: Option<String>,

        /// Number of clicks to simulate after binding
        #[arg(long, default_value_t = 1)]
        clicks: usize,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Set a configuration value
    Set {
        /// The key to set (element-id)
        key: String,
        /// The value to set
        value: String,
    },
    /// Get a configuration value
    Get {
        /// The key to get (element-id)
        key: String,
    },
    /// Show the config file path
    Path,
    /// Clear a configuration value
    Clear {
        /// The key to clear (element-id)
        key: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check {
            page,
            element_id,
            clicks,
            json,
        } => handle_check(page, element_id, clicks, json),
        Commands::Config { action } => handle_config(action),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn handle_check(page: PathBuf, element_id: Option<String>, clicks: usize, json: bool) -> Result<()> {
    let element_id = resolve_element_id(element_id)?;
    let spec = check::load_page(&page)?;
    let report = check::run_check(&spec, &element_id, clicks)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if let Some(error) = report.error {
        bail!("{}", error);
    }
    Ok(())
}

fn print_report(report: &CheckReport) {
    println!("{}", format!("menuhook check: #{}", report.element_id).bold());
    println!("{}", "-".repeat(40).dimmed());
    if report.is_ok() {
        println!("{}", format!("state: {}", report.state).green());
    } else {
        println!("{}", format!("state: {}", report.state).red());
    }
    println!("click listeners: {}", report.listeners);
    println!("clicks: {}", report.clicks);
    println!("showMenu calls: {}", report.show_menu_calls);
    println!("{}", "-".repeat(40).dimmed());
}

fn handle_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            match key.as_str() {
                "element-id" | "element_id" => {
                    if value.trim().is_empty() {
                        bail!("element-id cannot be empty");
                    }
                    config.set_element_id(value.clone());
                    config.save()?;
                    println!("{}", format!("Element id set to: {}", value).green());
                }
                _ => bail!("Unknown config key: {}. Available keys: element-id", key),
            }
        }
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            match key.as_str() {
                "element-id" | "element_id" => {
                    if config.element_id.is_some() {
                        println!("element-id: {}", config.get_element_id());
                    } else {
                        println!(
                            "{}",
                            format!("element-id: {} (default)", config.get_element_id()).dimmed()
                        );
                    }
                }
                _ => bail!("Unknown config key: {}. Available keys: element-id", key),
            }
        }
        ConfigAction::Path => {
            if let Some(path) = Config::path() {
                println!("{}", path.display());
            } else {
                bail!("Could not determine config path");
            }
        }
        ConfigAction::Clear { key } => {
            let mut config = Config::load()?;
            match key.as_str() {
                "element-id" | "element_id" => {
                    config.clear_element_id();
                    config.save()?;
                    println!("{}", "Element id cleared (using default: menuButton).".green());
                }
                _ => bail!("Unknown config key: {}. Available keys: element-id", key),
            }
        }
    }
    Ok(())
}

/// Resolve element id from: CLI flag > env var > config file > default
fn resolve_element_id(cli_id: Option<String>) -> Result<String> {
    let env_id = env::var("MENUHOOK_ELEMENT_ID").ok();
    let config = Config::load()?;

    Ok(determine_element_id(cli_id, env_id, config.element_id))
}

/// Pure logic to determine element id precedence
fn determine_element_id(
    cli_id: Option<String>,
    env_id: Option<String>,
    config_id: Option<String>,
) -> String {
    cli_id
        .or(env_id.filter(|id| !id.is_empty()))
        .or(config_id)
        .unwrap_or_else(|| menuhook_core::MENU_BUTTON_ID.to_string())
}
