//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api;
use crate::config::AppConfig;
use crate::edit::{load_for_edit, lookup, require_supported, save_dimension};
use maturity_core::reference::{levels_for, level_name, recommendation_for};
use maturity_core::{
    Dimension, DimensionReport, GapLevel, MaturityError, Priority, UpsertOutcome, classify,
};
use std::path::Path;

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(config: &AppConfig) -> Result<(), MaturityError> {
    let repository = config.open_repository()?;

    println!("Maturity Gap Analysis Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:      {}", config.host);
    println!("  Port:      {}", config.port);
    println!("  Backend:   {}", config.backend);
    println!("  Database:  {:?}", config.database);
    println!("  Store key: {}", config.store_key);
    println!();
    println!("Endpoints:");
    println!("  GET  /dimensions                               - List dimensions");
    println!("  GET  /dimensions/{{name}}                        - Show a dimension");
    println!("  PUT  /dimensions/{{name}}                        - Update a dimension");
    println!("  GET  /reference/{{name}}/levels                  - Maturity scale");
    println!("  GET  /reference/{{name}}/recommendations/{{gap}}   - Recommendation");
    println!("  GET  /status                                   - Store status");
    println!("  GET  /health                                   - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", config.host, config.port);
    api::run_server(&addr, repository).await
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show store status.
pub fn cmd_status(config: &AppConfig, json_mode: bool) -> Result<(), MaturityError> {
    let repo = config.open_repository()?;
    let persisted = repo.is_persisted()?;
    let analysis = repo.fetch_all()?;
    let stale = analysis.iter().filter(|d| !d.is_gap_consistent()).count();

    if json_mode {
        let output = serde_json::json!({
            "database": config.database.to_string_lossy(),
            "backend": repo.store().name(),
            "durable": repo.store().is_durable(),
            "store_key": repo.store_key(),
            "persisted": persisted,
            "dimension_count": analysis.len(),
            "stale_gaps": stale
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Maturity Store Status");
    println!("=====================");
    println!("Database:   {:?}", config.database);
    println!("Backend:    {}", repo.store().name());
    println!("Store key:  {}", repo.store_key());
    println!();
    if persisted {
        println!("Persisted:  yes");
    } else {
        println!("Persisted:  no (showing seed data)");
    }
    println!("Dimensions: {}", analysis.len());
    if stale > 0 {
        println!("Stale gaps: {} (stored gap differs from computed gap)", stale);
    }

    Ok(())
}

// =============================================================================
// LIST COMMAND
// =============================================================================

/// List all dimensions with their gaps.
pub fn cmd_list(config: &AppConfig, json_mode: bool) -> Result<(), MaturityError> {
    let repo = config.open_repository()?;
    let analysis = repo.fetch_all()?;
    let reports: Vec<DimensionReport<'_>> = analysis.iter().map(DimensionReport::assess).collect();

    if json_mode {
        let output = serde_json::json!({
            "persisted": repo.is_persisted()?,
            "dimensions": reports
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Gap Analysis");
    println!("============");
    println!();
    for report in &reports {
        let dimension = report.dimension;
        let marker = if report.gap_consistent { "" } else { " (stale)" };
        println!("{}", dimension.name());
        println!(
            "  Current: {} - {}",
            dimension.current_state(),
            level_name(dimension.name(), dimension.current_state())
        );
        println!(
            "  Desired: {} - {}",
            dimension.desired_state(),
            level_name(dimension.name(), dimension.desired_state())
        );
        println!("  Gap:     {}{}", report.computed_gap, marker);
        println!("  Actions: {}", report.actions_summary());
        println!();
    }

    Ok(())
}

// =============================================================================
// SHOW COMMAND
// =============================================================================

/// Show one dimension with its actions and recommendation.
pub fn cmd_show(config: &AppConfig, json_mode: bool, name: &str) -> Result<(), MaturityError> {
    let repo = config.open_repository()?;
    let (dimension, stored) = lookup(&repo, name)?;
    let report = DimensionReport::assess(&dimension);

    if json_mode {
        let output = serde_json::json!({
            "stored": stored,
            "report": report,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{}", dimension.name());
    println!("{}", "=".repeat(dimension.name().chars().count()));
    if !stored {
        println!("(not assessed yet)");
    }
    println!();
    print_level(
        "Current",
        &dimension,
        dimension.current_state(),
        report.current_level.map(|l| l.description),
    );
    print_level(
        "Desired",
        &dimension,
        dimension.desired_state(),
        report.desired_level.map(|l| l.description),
    );
    println!();
    println!("Gap: {}", report.computed_gap);
    if !report.gap_consistent {
        println!(
            "  Stored gap {} differs from computed gap; it is corrected on the next save.",
            dimension.gap()
        );
    }
    println!();

    println!("Customized actions ({}):", report.actions_summary());
    for (index, action) in dimension.customized_actions().iter().enumerate() {
        println!("  [{}] {} ({})", index, action.action, action.priority);
    }
    println!();

    if let Some(recommendation) = report.recommendation {
        println!("Recommended ({}):", recommendation.priority);
        for line in recommendation.actions {
            println!("  - {}", line);
        }
    }

    Ok(())
}

fn print_level(label: &str, dimension: &Dimension, level: i32, description: Option<&str>) {
    println!(
        "{}: {} - {}",
        label,
        level,
        level_name(dimension.name(), level)
    );
    if let Some(description) = description {
        println!("  {}", description);
    }
}

// =============================================================================
// SET COMMAND
// =============================================================================

/// Set the current and/or desired level of a dimension.
///
/// A level that is not given keeps its stored value.
pub fn cmd_set(
    config: &AppConfig,
    json_mode: bool,
    name: &str,
    current: Option<i32>,
    desired: Option<i32>,
) -> Result<(), MaturityError> {
    let mut repo = config.open_repository()?;
    let mut dimension = load_for_edit(&repo, name)?;

    let current = current.unwrap_or(dimension.current_state());
    let desired = desired.unwrap_or(dimension.desired_state());
    dimension.set_states(current, desired);

    let outcome = save_dimension(&mut repo, &mut dimension)?;
    print_saved(&dimension, outcome, json_mode);
    Ok(())
}

// =============================================================================
// ACTION COMMANDS
// =============================================================================

/// Append a customized action to a dimension.
pub fn cmd_action_add(
    config: &AppConfig,
    json_mode: bool,
    name: &str,
    text: &str,
    priority: Priority,
) -> Result<(), MaturityError> {
    let mut repo = config.open_repository()?;
    let mut dimension = load_for_edit(&repo, name)?;
    dimension.add_action(text, priority)?;

    let outcome = save_dimension(&mut repo, &mut dimension)?;
    print_saved(&dimension, outcome, json_mode);
    Ok(())
}

/// Remove a customized action by zero-based index.
///
/// An index out of range changes nothing and writes nothing.
pub fn cmd_action_remove(
    config: &AppConfig,
    json_mode: bool,
    name: &str,
    index: usize,
) -> Result<(), MaturityError> {
    let mut repo = config.open_repository()?;
    let mut dimension = load_for_edit(&repo, name)?;

    let Some(removed) = dimension.remove_action(index) else {
        if json_mode {
            let output = serde_json::json!({
                "removed": serde_json::Value::Null,
                "index": index,
                "actions_count": dimension.customized_actions().len()
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&output).unwrap_or_default()
            );
        } else {
            println!(
                "No action at index {} ({} has {})",
                index,
                dimension.name(),
                DimensionReport::assess(&dimension).actions_summary()
            );
        }
        return Ok(());
    };

    save_dimension(&mut repo, &mut dimension)?;

    if json_mode {
        let output = serde_json::json!({
            "removed": removed,
            "index": index,
            "dimension": dimension
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
    } else {
        println!(
            "Removed [{}] {} ({}) from {}",
            index,
            removed.action,
            removed.priority,
            dimension.name()
        );
    }
    Ok(())
}

// =============================================================================
// REFERENCE COMMANDS
// =============================================================================

/// Show the five maturity levels of a dimension.
pub fn cmd_levels(json_mode: bool, name: &str) -> Result<(), MaturityError> {
    let levels = levels_for(name);
    if levels.is_empty() {
        return Err(MaturityError::UnknownDimension(name.to_string()));
    }

    if json_mode {
        let output = serde_json::json!({
            "dimension": name,
            "levels": levels
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{} maturity levels", name);
    println!();
    for level in levels {
        println!("{}. {}", level.level, level.name);
        println!("   {}", level.description);
    }

    Ok(())
}

/// Show the recommendation for a dimension.
///
/// Without `--gap`, the gap computed from the dimension's levels is used.
pub fn cmd_recommend(
    config: &AppConfig,
    json_mode: bool,
    name: &str,
    gap: Option<GapLevel>,
) -> Result<(), MaturityError> {
    require_supported(name)?;
    let gap = match gap {
        Some(gap) => gap,
        None => {
            let repo = config.open_repository()?;
            let (dimension, _) = lookup(&repo, name)?;
            classify(dimension.current_state(), dimension.desired_state())
        }
    };

    let recommendation = recommendation_for(name, gap)
        .ok_or_else(|| MaturityError::UnknownDimension(name.to_string()))?;

    if json_mode {
        let output = serde_json::json!({
            "dimension": name,
            "gap": gap,
            "recommendation": recommendation
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{} - {} gap ({})", name, gap, recommendation.priority);
    println!();
    for line in recommendation.actions {
        println!("  - {}", line);
    }

    Ok(())
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Initialize a new database, optionally persisting the seed dimensions.
pub fn cmd_init(config: &AppConfig, force: bool, seed: bool) -> Result<(), MaturityError> {
    config.validate()?;

    if config.backend != "memory" && config.database.exists() {
        if !force {
            return Err(MaturityError::ConfigError(format!(
                "Database already exists at {:?}. Use --force to overwrite.",
                config.database
            )));
        }
        std::fs::remove_file(&config.database).map_err(|e| {
            MaturityError::IoError(format!("Cannot remove {:?}: {}", config.database, e))
        })?;
        tracing::warn!(database = ?config.database, "Existing database removed");
    }

    let mut repo = config.open_repository()?;
    if !repo.store().is_durable() {
        println!("The memory backend keeps nothing between runs; nothing to initialize.");
        return Ok(());
    }

    let seeded = if seed {
        Some(repo.persist_current()?)
    } else {
        None
    };
    println!(
        "{}",
        init_summary(repo.store().name(), &config.database, seeded)
    );

    Ok(())
}

/// The file backend creates its file on the first save, redb on open.
fn init_summary(backend: &str, database: &Path, seeded: Option<usize>) -> String {
    match (seeded, backend) {
        (Some(count), _) => format!(
            "Initialized {} database at {:?} with {} seed dimensions",
            backend, database, count
        ),
        (None, "file") => format!(
            "File database at {:?} will be created on the first save",
            database
        ),
        (None, _) => format!("Initialized new {} database at {:?}", backend, database),
    }
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn print_saved(dimension: &Dimension, outcome: UpsertOutcome, json_mode: bool) {
    let created = matches!(outcome, UpsertOutcome::Appended(_));

    if json_mode {
        let output = serde_json::json!({
            "created": created,
            "index": outcome.index(),
            "dimension": dimension
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return;
    }

    let verb = if created { "Added" } else { "Updated" };
    println!(
        "{} {}: current {}, desired {}, gap {} ({})",
        verb,
        dimension.name(),
        dimension.current_state(),
        dimension.desired_state(),
        dimension.gap(),
        DimensionReport::assess(dimension).actions_summary()
    );
}

// =============================================================================
// TESTS
// =============================================================================
