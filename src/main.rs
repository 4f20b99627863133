//! unitgen CLI - Command-line interface
//!
//! Commands:
//!   generate   - Generate a unit test class from a contract descriptor
//!   abi-types  - Generate sized ABI types
//!   tuples     - Generate tuple classes
//!   schema     - Print JSON schema for an input file

mod cli;

use clap::{Parser, Subcommand};
use cli::GenerateArgs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "unitgen",
    about = "Unit test and wrapper boilerplate generator for smart-contract wrappers",
    version
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a unit test class for a contract
    Generate(GenerateArgs),

    /// Generate Int/Uint/Bytes/StaticArray types
    AbiTypes {
        /// Source root the package path is created under
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Generate Tuple1..Tuple20
    Tuples {
        /// Source root the package path is created under
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Print JSON schema (contract, config or list)
    Schema { name: Option<String> },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Generate(args) => cli::cmd_generate(args),
        Commands::AbiTypes { dir } => cli::cmd_abi_types(dir),
        Commands::Tuples { dir } => cli::cmd_tuples(dir),
        Commands::Schema { name } => cli::cmd_schema(name.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
