//! Functional-boundary apply functions
//!
//! This module is the only way resources enter a [`ResourceTree`].
//!
//! ## Atomicity Contract
//!
//! - **Per operation**: [`apply`] either returns a new tree containing the
//!   added resource, or an error; the tree passed in is never left half-built.
//! - **Per batch**: [`apply_operations`] is incremental. Operations are applied
//!   in order and the first failure stops the batch; resources added before
//!   the failing operation stay in the tree.
//! - **No panics**: invalid input returns typed errors.
//!
//! ## Example
//!
//! ```
//! use foxconf_core::{apply, Attributes, Operation, PathAddress, ResourceTree};
//!
//! let tree = ResourceTree::new();
//! let op = Operation::add(PathAddress::subsystem(), Attributes::new());
//! let tree = apply(tree, op).unwrap();
//! assert!(tree.contains(&PathAddress::subsystem()));
//! ```

use std::path::Path;
use std::time::Instant;

use foxconf_core_types::schema::{
    FIELD_ADDRESS, FIELD_OP, FIELD_OP_COUNT, FIELD_RESOURCE_COUNT, FIELD_RESOURCE_TYPE,
};

use crate::errors::Result;
use crate::model::Operation;
use crate::ops::{resource_ops, ResourceTree};
use crate::parser;
use crate::{log_op_end, log_op_error, log_op_start};

/// Apply one Add operation to a tree, returning the new tree state
///
/// Takes ownership of the current state. On error the state is dropped;
/// callers that need to keep the old state should clone it first or use
/// [`apply_operations`], which mutates in place.
///
/// # Errors
///
/// Returns the applier error for the operation: `DuplicateResource`,
/// `InvalidEnumValue`, or an `InvalidOperation` kind (missing parent,
/// malformed address, undeclared attribute, wrong value shape).
///
/// # Example
///
/// ```
/// use foxconf_core::{apply, Attributes, Operation, PathAddress, ResourceTree};
///
/// let tree = apply(
///     ResourceTree::new(),
///     Operation::add(PathAddress::subsystem(), Attributes::new()),
/// )
/// .unwrap();
/// let err = apply(
///     tree,
///     Operation::add(PathAddress::subsystem(), Attributes::new()),
/// )
/// .unwrap_err();
/// assert_eq!(err.code(), "ERR_DUPLICATE_RESOURCE");
/// ```
pub fn apply(mut state: ResourceTree, op: Operation) -> Result<ResourceTree> {
    resource_ops::add_resource(&mut state, &op)?;
    Ok(state)
}

/// Apply a sequence of operations in order
///
/// Returns the number of operations applied. The first failing operation
/// stops the batch and its error is returned; earlier operations remain
/// applied.
///
/// # Errors
///
/// Returns the error of the first operation that fails validation.
pub fn apply_operations(tree: &mut ResourceTree, ops: &[Operation]) -> Result<usize> {
    log_op_start!("apply_operations", { FIELD_OP_COUNT } = ops.len());
    let start = Instant::now();

    for (index, op) in ops.iter().enumerate() {
        if let Err(err) = resource_ops::add_resource(tree, op) {
            log_op_error!(
                "apply_operations",
                err,
                duration_ms = start.elapsed().as_millis() as u64,
                op_index = index,
                { FIELD_ADDRESS } = %op.address()
            );
            return Err(err);
        }
        tracing::debug!(
            { FIELD_OP } = "apply_operations",
            { FIELD_ADDRESS } = %op.address(),
            { FIELD_RESOURCE_TYPE } = op
                .address()
                .resource_type()
                .map(|t| t.key())
                .unwrap_or_default(),
            "resource added"
        );
    }

    log_op_end!(
        "apply_operations",
        duration_ms = start.elapsed().as_millis() as u64,
        { FIELD_RESOURCE_COUNT } = tree.len()
    );
    Ok(ops.len())
}

/// Parse a document and apply its operations to a fresh tree
///
/// # Errors
///
/// Returns the parse error, or the error of the first operation that fails.
pub fn install(document: &str) -> Result<ResourceTree> {
    let ops = parser::parse_document(document)?;
    let mut tree = ResourceTree::new();
    apply_operations(&mut tree, &ops)?;
    tracing::debug!({ FIELD_OP_COUNT } = ops.len(), "document installed");
    Ok(tree)
}

/// Read a document from disk and [`install`] it
///
/// # Errors
///
/// Returns `Io` if the file cannot be read, otherwise as [`install`].
pub fn install_file(path: impl AsRef<Path>) -> Result<ResourceTree> {
    let document = std::fs::read_to_string(path)?;
    install(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::model::{Attributes, PathAddress, Value};
    use crate::vocabulary::Attribute;

    fn engine(name: &str) -> Operation {
        let mut attributes = Attributes::new();
        attributes.insert(Attribute::Name, Value::String(name.to_string()));
        Operation::add(PathAddress::process_engine(name), attributes)
    }

    fn root() -> Operation {
        Operation::add(PathAddress::subsystem(), Attributes::new())
    }

    #[test]
    fn test_apply_returns_new_state() {
        let tree = apply(ResourceTree::new(), root()).unwrap();
        let tree = apply(tree, engine("e1")).unwrap();
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_batch_stops_at_first_failure() {
        let mut tree = ResourceTree::new();
        let ops = vec![root(), engine("a"), engine("a"), engine("b")];

        let err = apply_operations(&mut tree, &ops).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateResource);
        // root and first engine stay applied, "b" is never reached
        assert_eq!(tree.len(), 2);
        assert!(!tree.contains(&PathAddress::process_engine("b")));
    }

    #[test]
    fn test_batch_returns_applied_count() {
        let mut tree = ResourceTree::new();
        let applied = apply_operations(&mut tree, &[root(), engine("a"), engine("b")]).unwrap();
        assert_eq!(applied, 3);
        assert_eq!(tree.process_engines().len(), 2);
    }

    #[test]
    fn test_install_file_missing_is_io_error() {
        let err = install_file("/nonexistent/foxconf/standalone.xml").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
