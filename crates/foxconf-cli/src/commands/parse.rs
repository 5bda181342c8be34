//! Parse command
//!
//! Usage: foxconf parse <FILE> [--json]

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Subsystem document to parse
    pub file: PathBuf,

    /// Print operations as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute parse command
pub fn execute(args: ParseArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ops = foxconf_core::parse_file(&args.file)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ops)?);
        return Ok(());
    }

    for (index, op) in ops.iter().enumerate() {
        let defined: Vec<&str> = op
            .attributes()
            .iter()
            .filter(|(_, value)| value.is_defined())
            .map(|(attribute, _)| attribute.local_name())
            .collect();
        if defined.is_empty() {
            println!("{index}: add {}", op.address());
        } else {
            println!("{index}: add {} [{}]", op.address(), defined.join(", "));
        }
    }
    println!("{} operation(s)", ops.len());

    Ok(())
}
