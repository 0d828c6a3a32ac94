//! CLI command definitions for the `benchwiz` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod step;
pub mod validate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Guided benchmark configuration for cloud providers.
#[derive(Parser)]
#[command(name = "benchwiz", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true, env = "BENCHWIZ_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Address to bind (overrides `[http].bind` in config.toml).
        #[arg(long)]
        bind: Option<String>,
    },

    /// Resolve one wizard step, as the REST endpoint would.
    Step {
        /// Cloud provider key (e.g. aws).
        provider: String,

        /// Project whose connections are listed.
        #[arg(long)]
        project: String,

        /// Step just completed. Omit to start the wizard.
        #[arg(long)]
        current_step: Option<String>,

        /// Answer given so far, as `step=value1,value2`. Repeatable.
        #[arg(long = "answer", value_name = "STEP=VALUES")]
        answers: Vec<String>,

        /// Read connections from a JSON fixture instead of the connection store.
        #[arg(long)]
        connections_file: Option<PathBuf>,
    },

    /// Validate the wizard graphs against the registered adapters.
    Validate {
        /// Directory of wizard graphs (defaults to `wizard_dir` in config.toml).
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
