//! Command-line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// AI Smart Task Planner - turn a goal into a plan via the Plan Service
#[derive(Debug, Parser)]
#[command(
    name = "planner",
    about = "Submit a goal to the Plan Service and show the generated plan",
    version,
    after_help = "Logs are written to ./planner.log unless the config file says otherwise."
)]
pub struct Cli {
    /// Path to a RON config file (defaults to ./planner.ron when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Plan Service base url, e.g. http://127.0.0.1:5000
    #[arg(short, long, global = true)]
    pub endpoint: Option<String>,

    /// Give up on a request after this many seconds (waits forever by default)
    #[arg(long, global = true, value_name = "SECS")]
    pub request_timeout: Option<u64>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Interactive session (default)
    Run,

    /// Submit one goal, print the result and exit
    Generate {
        /// The goal, sent verbatim
        goal: String,
    },

    /// List plans stored by the service
    Plans,

    /// Print one stored plan
    Show {
        /// Plan id as printed by `plans`
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_interactive_session() {
        let cli = Cli::try_parse_from(["planner"]).unwrap();
        assert_eq!(cli.command, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "planner",
            "generate",
            "Learn guitar",
            "--endpoint",
            "http://localhost:8000",
            "-v",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Generate {
                goal: "Learn guitar".to_string()
            })
        );
        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost:8000"));
        assert!(cli.verbose);
    }

    #[test]
    fn show_requires_an_id() {
        assert!(Cli::try_parse_from(["planner", "show"]).is_err());
    }
}
