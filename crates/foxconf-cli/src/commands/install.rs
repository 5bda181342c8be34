//! Install command
//!
//! Usage: foxconf install <FILE> [--json]

use clap::Args;
use foxconf_core::{ReferenceProjection, ServiceProjection};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InstallArgs {
    /// Subsystem document to install
    pub file: PathBuf,

    /// Print the resource tree as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

/// Execute install command
pub fn execute(args: InstallArgs) -> Result<(), Box<dyn std::error::Error>> {
    let tree = foxconf_core::install_file(&args.file)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }

    let services = ReferenceProjection.services(&tree);
    println!("✓ Installed {} resource(s)", tree.len());
    println!("  process engines: {}", tree.process_engines().len());
    println!(
        "  job executor: {}",
        if tree.job_executor().is_some() { "yes" } else { "no" }
    );
    println!("  job acquisitions: {}", tree.job_acquisitions().len());
    println!("  services: {}", services.len());
    for service in &services {
        println!("    {service}");
    }
    println!("  digest: {}", foxconf_core::canonical_digest(&tree)?);

    Ok(())
}
