//! vgpuplan - GPU virtualization profile validation and capacity planning

use anyhow::Result;
use clap::{Parser, Subcommand};
use plan_advisor::Planner;
use plan_core::{PlannerConfig, ProfileMode};
use std::path::PathBuf;
use tracing::debug;

mod commands;
mod output;

use output::OutputFormat;

/// Validate vGPU profiles and plan virtualized GPU deployments
#[derive(Debug, Parser)]
#[command(name = "vgpuplan")]
#[command(about = "Validate vGPU profiles and plan virtualized GPU deployments")]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Profile catalog YAML path (overrides configuration)
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable JSON output (overrides --output)
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List GPU models in the catalog
    #[command(name = "list-models")]
    ListModels,

    /// List vGPU profiles for a GPU model
    #[command(name = "list-profiles")]
    ListProfiles {
        /// GPU model name or alias
        model: String,

        /// Only show profiles with at least this much per-instance memory (GB)
        #[arg(long)]
        min_memory: Option<u32>,
    },

    /// Validate a profile name against a GPU model
    #[command(name = "validate")]
    Validate {
        /// GPU model name or alias
        model: String,

        /// Candidate profile name
        profile: String,
    },

    /// Parse a hardware description into a normalized inventory
    #[command(name = "parse")]
    Parse {
        /// Free-text hardware description (e.g. "4x A40 and 2 L40S")
        text: String,
    },

    /// Compute VM capacity for an inventory
    #[command(name = "capacity")]
    Capacity {
        /// Free-text hardware description
        inventory: String,

        /// Use one named profile across compatible models
        #[arg(short, long)]
        profile: Option<String>,

        /// Instance ceiling mode (equal or mixed)
        #[arg(short, long, default_value = "equal")]
        mode: ProfileMode,

        /// Pick the smallest sufficient profile per model for this
        /// per-workload memory (GB)
        #[arg(long)]
        memory: Option<u32>,
    },

    /// Recommend a deployment mode for one GPU model
    #[command(name = "recommend")]
    Recommend {
        /// GPU model name or alias
        model: String,

        /// Per-workload GPU memory requirement in GB
        #[arg(short, long)]
        memory: u32,
    },

    /// Plan a full deployment for an inventory and workload
    #[command(name = "plan")]
    Plan {
        /// Free-text hardware description
        inventory: String,

        /// Per-workload GPU memory requirement in GB
        #[arg(short, long)]
        memory: u32,

        /// Concurrent users per VM
        #[arg(short, long)]
        users: Option<u32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "plan_cli={level},plan_core={level},plan_catalog={level},plan_advisor={level}",
            level = log_level
        ))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("starting vgpuplan CLI with args: {:?}", cli);

    let mut config = match cli.config.as_deref() {
        Some(path) => PlannerConfig::load_from_file(path)?,
        None => PlannerConfig::load()?,
    };
    if let Some(path) = cli.catalog {
        config.catalog.path = Some(path);
    }
    let planner = Planner::from_config(config)?;

    let output_format = if cli.json {
        OutputFormat::Json
    } else {
        cli.output
    };

    match cli.command {
        Commands::ListModels => {
            commands::catalog::list_models(&planner, output_format)?;
        }

        Commands::ListProfiles { model, min_memory } => {
            commands::catalog::list_profiles(&planner, model, min_memory, output_format)?;
        }

        Commands::Validate { model, profile } => {
            commands::validate::validate_profile(&planner, model, profile, output_format)?;
        }

        Commands::Parse { text } => {
            commands::inventory::parse_inventory(&planner, text, output_format)?;
        }

        Commands::Capacity {
            inventory,
            profile,
            mode,
            memory,
        } => {
            commands::capacity::capacity(
                &planner,
                inventory,
                profile,
                mode,
                memory,
                output_format,
            )?;
        }

        Commands::Recommend { model, memory } => {
            commands::plan::recommend(&planner, model, memory, output_format)?;
        }

        Commands::Plan {
            inventory,
            memory,
            users,
        } => {
            commands::plan::plan(&planner, inventory, memory, users, output_format)?;
        }
    }

    Ok(())
}
