//! MedGen cross-reference pipeline CLI.

use clap::Parser;
use medgen_mappings::{build_robot_templates, run_mapping_status, run_sssom, MappingResult};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod layout;

use crate::cli::{Cli, Command};
use crate::layout::ProjectLayout;

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> MappingResult<()> {
    let layout = ProjectLayout::new(cli.project_dir);
    tracing::info!(project_dir = %layout.project_dir().display(), "resolved project layout");

    match cli.command {
        Command::Sssom(args) => run_sssom(&args.into_job(&layout)),
        Command::RobotTemplate(args) => build_robot_templates(&args.into_job(&layout)),
        Command::MappingStatus(args) => run_mapping_status(&args.into_job(&layout)),
    }
}
