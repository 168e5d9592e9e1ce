//! Lock Trace CLI
//!
//! Loads a lock-state trace, reports per-thread work and global efficiency.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use lock_trace::commands::{
    display_schema, execute_analyze, validate_args, validate_trace_file, AnalyzeArgs,
};
use lock_trace::utils::config::DEFAULT_REPORT_PATH;

/// Lock Trace - work and efficiency from lock-state traces
#[derive(Parser, Debug)]
#[command(name = "lock-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Segment a trace and compute work statistics
    Analyze {
        /// Trace document to analyze
        #[arg(short, long, env = "LOCK_TRACE_FILE")]
        trace: PathBuf,

        /// Output path for JSON report
        #[arg(short, long, default_value = DEFAULT_REPORT_PATH)]
        output: PathBuf,

        /// Do not write a report file
        #[arg(long, conflicts_with = "output")]
        no_output: bool,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Check a trace document for consistency
    Validate {
        /// Trace document to check
        #[arg(short, long)]
        trace: PathBuf,
    },

    /// Display report schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Analyze {
            trace,
            output,
            no_output,
            summary,
        } => {
            let args = AnalyzeArgs {
                trace,
                output_json: (!no_output).then_some(output),
                print_summary: summary,
            };

            validate_args(&args)?;
            execute_analyze(&args)?;
        }

        Commands::Validate { trace } => {
            validate_trace_file(&trace)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }
    }

    Ok(())
}
