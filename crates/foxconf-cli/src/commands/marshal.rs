//! Marshal command
//!
//! Usage: foxconf marshal <FILE> [--output <FILE>]

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct MarshalArgs {
    /// Subsystem document to install and regenerate
    pub file: PathBuf,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute marshal command
pub fn execute(args: MarshalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let tree = foxconf_core::install_file(&args.file)?;
    let document = foxconf_core::marshal(&tree)?;

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, format!("{document}\n"))?;
        println!("✓ Written to {}", output_path.display());
    } else {
        println!("{document}");
    }

    Ok(())
}
