// ABOUTME: Nutrition CLI - offline analysis of meal plan and weekly summary JSON files
// ABOUTME: Runs the overload rules or the weekly trend comparison and prints JSON to stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Nutrition CLI
//!
//! Usage:
//! ```bash
//! # Overload alerts for a meal plan
//! nutrition-cli analyze-plan --file plan.json
//!
//! # Week-over-week comparison for a client history
//! nutrition-cli compare-weeks --file semanas.json --client cliente_1
//! ```

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use nutrition_monitor::{
    config::MonitorConfig,
    logging::LoggingConfig,
    models::{MealPlan, WeeklySummary},
};
use nutrition_intelligence::{OverloadRuleEngine, TrendComparator};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "nutrition-cli",
    about = "Nutrition monitor command-line tool",
    long_about = "Runs the nutrition analysis engine on local JSON files without a server."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Print indented JSON
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Detect overloads in a meal plan
    AnalyzePlan {
        /// Meal plan JSON file
        #[arg(long)]
        file: PathBuf,
    },
    /// Compare adjacent weeks of a client history
    CompareWeeks {
        /// JSON array of weekly summaries, oldest first
        #[arg(long)]
        file: PathBuf,

        /// Client id recorded on the report and its alerts
        #[arg(long, default_value = "cliente")]
        client: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    LoggingConfig::for_cli(if cli.verbose { "debug" } else { "warn" }).init()?;

    let config = MonitorConfig::from_environment().context("Invalid engine configuration")?;
    let now = Utc::now();

    match cli.command {
        Command::AnalyzePlan { file } => {
            let plan: MealPlan = read_json(&file)?;
            let alerts = OverloadRuleEngine::new(&config).analyze(&plan, now);
            info!(diet_id = %plan.id, alerts = alerts.len(), "Plan analysed");
            print_json(&alerts, cli.pretty)
        }
        Command::CompareWeeks { file, client } => {
            let mut history: Vec<WeeklySummary> = read_json(&file)?;
            history.sort_by_key(|week| week.start_date);
            let report = TrendComparator::new(&config).analyze(&client, &history, now);
            info!(
                client_id = %client,
                comparisons = report.comparisons.len(),
                "Weeks compared"
            );
            print_json(&report, cli.pretty)
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
