//! foxconf CLI
//!
//! Command-line interface over fox-platform subsystem documents

use clap::{Parser, Subcommand, ValueEnum};
use foxconf_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "foxconf")]
#[command(about = "foxconf - fox-platform subsystem configuration tool", long_about = None)]
struct Cli {
    /// Log output format (stderr); RUST_LOG overrides the level
    #[arg(long, value_enum, global = true, default_value = "production")]
    log: LogProfile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogProfile {
    /// Human-readable, debug level
    Development,
    /// JSON lines, info level
    Production,
}

impl From<LogProfile> for Profile {
    fn from(profile: LogProfile) -> Self {
        match profile {
            LogProfile::Development => Profile::Development,
            LogProfile::Production => Profile::Production,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse a document and print its operations
    Parse(commands::parse::ParseArgs),
    /// Install a document and summarise the resource tree
    Install(commands::install::InstallArgs),
    /// Install a document and write it back out
    Marshal(commands::marshal::MarshalArgs),
    /// Check that a document survives a round trip
    Verify(commands::verify::VerifyArgs),
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log.into());

    let result = match cli.command {
        Commands::Parse(args) => commands::parse::execute(args),
        Commands::Install(args) => commands::install::execute(args),
        Commands::Marshal(args) => commands::marshal::execute(args),
        Commands::Verify(args) => commands::verify::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
