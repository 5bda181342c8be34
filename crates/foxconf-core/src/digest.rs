//! Canonical digest of a resource tree
//!
//! SHA-256 over the canonical JSON rendering of the tree. Resources are
//! rendered in insertion order with attributes in declaration order, so two
//! trees built from equivalent operation sequences hash the same.

use sha2::{Digest, Sha256};

use crate::errors::Result;
use crate::ops::ResourceTree;

/// Compute the lowercase hex SHA-256 digest of a tree
///
/// # Errors
///
/// Returns `Serialization` if the tree cannot be rendered as JSON.
pub fn canonical_digest(tree: &ResourceTree) -> Result<String> {
    let bytes = serde_json::to_vec(tree)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}
