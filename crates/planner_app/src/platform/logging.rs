//! Logger setup for the planner binary.
//!
//! The interactive session owns the terminal, so the default destination is
//! a log file; terminal logging is opt-in.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Destination for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to the given file, truncating it.
    File(PathBuf),
    /// Write to the given file and the terminal.
    Both(PathBuf),
}

/// Initialize the global logger. Later calls are ignored.
pub fn initialize(destination: LogDestination, level: LevelFilter) -> Result<()> {
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    let path = match destination {
        LogDestination::File(path) => path,
        LogDestination::Both(path) => {
            loggers.push(term_logger(level, config.clone()));
            path
        }
    };
    loggers.push(create_file_logger(&path, level, config)?);

    let _ = CombinedLogger::init(loggers);
    Ok(())
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn term_logger(level: LevelFilter, config: Config) -> Box<TermLogger> {
    TermLogger::new(level, config, TerminalMode::Stderr, ColorChoice::Auto)
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Result<Box<WriteLogger<File>>> {
    let file = File::create(path)
        .with_context(|| format!("Could not create log file at {}", path.display()))?;
    Ok(WriteLogger::new(level, config, file))
}
