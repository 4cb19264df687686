//! # Maturity CLI Module
//!
//! This module implements the CLI interface for Maturity.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `status` - Show store status
//! - `list` - List all dimensions with their gaps
//! - `show` - Show one dimension in detail
//! - `set` - Set the current/desired levels of a dimension
//! - `action add` / `action remove` - Edit the customized actions
//! - `levels` - Show the maturity scale of a dimension
//! - `recommend` - Show the recommendation for a gap
//! - `init` - Initialize a new database

mod commands;

use crate::config::{AppConfig, Overrides};
use clap::{ArgGroup, Parser, Subcommand};
use maturity_core::{GapLevel, MaturityError, Priority};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Maturity - Gap Analysis Tool
///
/// Rate each dimension on a 1-5 maturity scale, see how far the desired
/// level is and what to do about it.
#[derive(Parser, Debug)]
#[command(name = "maturity")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML config file (default: ./maturity.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the database (default: maturity.db)
    #[arg(short = 'D', long, global = true)]
    pub database: Option<PathBuf>,

    /// Storage backend: "memory", "file" (JSON file) or "redb" (ACID database)
    #[arg(short = 'B', long, global = true)]
    pub backend: Option<String>,

    /// Key holding the gap analysis (default: gapAnalysis)
    #[arg(short = 'k', long, global = true)]
    pub store_key: Option<String>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to (default: 127.0.0.1)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (default: 8080)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show store status
    Status,

    /// List all dimensions with their gaps
    List,

    /// Show one dimension with its levels and recommendation
    Show {
        /// Dimension name (e.g. "Technology")
        name: String,
    },

    /// Set the current and/or desired level of a dimension
    #[command(group(ArgGroup::new("levels").required(true).multiple(true)))]
    Set {
        /// Dimension name
        name: String,

        /// Current maturity level (1-5)
        #[arg(short, long, group = "levels", value_parser = clap::value_parser!(i32).range(1..=5))]
        current: Option<i32>,

        /// Desired maturity level (1-5)
        #[arg(short, long, group = "levels", value_parser = clap::value_parser!(i32).range(1..=5))]
        desired: Option<i32>,
    },

    /// Edit the customized actions of a dimension
    Action {
        #[command(subcommand)]
        command: ActionCommands,
    },

    /// Show the five maturity levels of a dimension
    Levels {
        /// Dimension name
        name: String,
    },

    /// Show the recommended actions for a dimension
    Recommend {
        /// Dimension name
        name: String,

        /// Gap level (HIGH, MEDIUM, LOW); defaults to the dimension's computed gap
        #[arg(short, long)]
        gap: Option<GapLevel>,
    },

    /// Initialize a new database
    Init {
        /// Force initialization even if database exists
        #[arg(short, long)]
        force: bool,

        /// Persist the seed dimensions right away
        #[arg(short, long)]
        seed: bool,
    },
}

/// Action editing subcommands.
#[derive(Subcommand, Debug)]
pub enum ActionCommands {
    /// Append a customized action
    Add {
        /// Dimension name
        name: String,

        /// Action description
        text: String,

        /// Priority (URGENT, IMPORTANT, FOLLOW UP)
        #[arg(short, long, default_value = "IMPORTANT")]
        priority: Priority,
    },

    /// Remove a customized action by its zero-based index
    Remove {
        /// Dimension name
        name: String,

        /// Zero-based index as printed by `show`
        index: usize,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Resolve the configuration: defaults, then the TOML file, then CLI flags.
pub fn resolve_config(cli: &Cli) -> Result<AppConfig, MaturityError> {
    let config = AppConfig::load(cli.config.as_deref())?.with_overrides(Overrides {
        database: cli.database.clone(),
        backend: cli.backend.clone(),
        store_key: cli.store_key.clone(),
        ..Overrides::default()
    });
    config.validate()?;
    tracing::debug!(
        backend = %config.backend,
        database = ?config.database,
        store_key = %config.store_key,
        "Configuration resolved"
    );
    Ok(config)
}

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), MaturityError> {
    let config = resolve_config(&cli)?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => {
            let config = config.with_overrides(Overrides {
                host,
                port,
                ..Overrides::default()
            });
            cmd_server(&config).await
        }
        Some(Commands::Status) => cmd_status(&config, json_mode),
        Some(Commands::List) => cmd_list(&config, json_mode),
        Some(Commands::Show { name }) => cmd_show(&config, json_mode, &name),
        Some(Commands::Set {
            name,
            current,
            desired,
        }) => cmd_set(&config, json_mode, &name, current, desired),
        Some(Commands::Action { command }) => match command {
            ActionCommands::Add {
                name,
                text,
                priority,
            } => cmd_action_add(&config, json_mode, &name, &text, priority),
            ActionCommands::Remove { name, index } => {
                cmd_action_remove(&config, json_mode, &name, index)
            }
        },
        Some(Commands::Levels { name }) => cmd_levels(json_mode, &name),
        Some(Commands::Recommend { name, gap }) => cmd_recommend(&config, json_mode, &name, gap),
        Some(Commands::Init { force, seed }) => cmd_init(&config, force, seed),
        None => {
            println!("No command specified. Use --help for usage information.");
            Ok(())
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
