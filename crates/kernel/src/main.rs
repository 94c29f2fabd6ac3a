//! Tabulum
//!
//! Loads dashboard tab manifests and inspects the resulting registry.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tabulum_kernel::cli;
use tabulum_kernel::config::{Config, ConfigOverrides};
use tabulum_kernel::tabs::TabRegistry;

/// Inspect dashboard sub-tabs contributed by feature modules.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing `*.tabs.toml` manifests (overrides TAB_MANIFESTS_DIR).
    #[arg(long, global = true)]
    manifests: Option<PathBuf>,

    /// Base path for generated tab links (overrides DASHBOARD_DESTINATION).
    #[arg(long, global = true)]
    destination: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered tabs in placement order.
    List {
        /// Only list this group.
        #[arg(long)]
        group: Option<String>,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Show a single tab.
    Show { group: String, name: String },
    /// Print the group that holds a tab name.
    GroupOf { name: String },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();

    let config = Config::from_env_with(ConfigOverrides {
        manifests_dir: args.manifests,
        destination: args.destination,
    })
    .context("failed to load configuration")?;

    let registry = TabRegistry::from_manifests(&config.manifests_dir);
    info!(
        groups = registry.len(),
        tabs = registry.tab_count(),
        "tab registry ready"
    );

    match args.command {
        Command::List { group, json } => {
            cli::cmd_list(&registry, group.as_deref(), &config.destination, json)
        }
        Command::Show { group, name } => {
            cli::cmd_show(&registry, &group, &name, &config.destination)
        }
        Command::GroupOf { name } => cli::cmd_group_of(&registry, &name),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
