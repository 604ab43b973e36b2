mod cli;
mod platform;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use planner_logging::planner_info;

use cli::{Cli, Command};
use platform::app;
use platform::config::PlannerConfig;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("planner: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = PlannerConfig::load(cli.config.as_deref())?;
    config.apply_cli(&cli);

    platform::logging::initialize(
        config.log_destination(),
        planner_logging::level_for(cli.verbose),
    )
    .context("Failed to initialize logging")?;
    planner_info!("planner {} starting", env!("CARGO_PKG_VERSION"));

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => app::run_interactive(&config),
        Command::Generate { goal } => app::run_generate(&config, goal),
        Command::Plans => app::run_list_plans(&config),
        Command::Show { id } => app::run_show_plan(&config, &id),
    }
}
