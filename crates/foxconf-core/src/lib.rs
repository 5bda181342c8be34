//! foxconf Core - process engine subsystem configuration
//!
//! This crate turns a fox-platform subsystem document into a resource tree
//! and back:
//! - Closed vocabulary of elements, attributes and the schema namespace
//! - Parser producing an ordered sequence of Add operations
//! - Applier building the resource tree, enforcing unique names and legal enums
//! - Marshaller regenerating the document from the tree
//! - Structural document equivalence for round-trip checks
//! - Service-count projection and canonical tree digest
//!
//! The core is synchronous and holds no locks; a host sharing a
//! [`ResourceTree`] between threads must serialise writers itself.

pub mod apply;
pub mod compare;
pub mod digest;
pub mod errors;
pub mod logging_facility;
mod markup;
pub mod marshal;
pub mod model;
pub mod ops;
pub mod parser;
pub mod services;
pub mod vocabulary;

// Re-export commonly used types
pub use apply::{apply, apply_operations, install, install_file};
pub use compare::{compare_documents, documents_equivalent};
pub use digest::canonical_digest;
pub use errors::{ErrorKind, Position, Result, SubsystemError};
pub use marshal::marshal;
pub use model::{
    Attributes, Operation, OperationKind, PathAddress, PathElement, Presence, PropertyList,
    ResourceType, Value,
};
pub use ops::{Resource, ResourceTree};
pub use parser::{parse_document, parse_file};
pub use services::{ReferenceProjection, ServiceName, ServiceProjection};
pub use vocabulary::{Attribute, Element, Namespace};
