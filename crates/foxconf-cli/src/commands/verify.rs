//! Verify command
//!
//! Usage: foxconf verify <FILE>
//!
//! Installs the document, marshals the tree and checks that the output is
//! equivalent to the input and re-installs to the same tree.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Subsystem document to verify
    pub file: PathBuf,
}

/// Execute verify command
pub fn execute(args: VerifyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let original = std::fs::read_to_string(&args.file)?;
    let tree = foxconf_core::install(&original)?;
    let persisted = foxconf_core::marshal(&tree)?;

    if let Some(diff) = foxconf_core::compare_documents(&original, &persisted)? {
        return Err(format!("round trip differs: {diff}").into());
    }

    let reinstalled = foxconf_core::install(&persisted)?;
    let digest = foxconf_core::canonical_digest(&tree)?;
    if foxconf_core::canonical_digest(&reinstalled)? != digest {
        return Err("re-installed tree differs from the original".into());
    }

    println!("✓ Round trip equivalent ({} resource(s))", tree.len());
    println!("  digest: {digest}");

    Ok(())
}
