//! Operation records produced by the parser
//!
//! Operations are processed by [`apply`](crate::apply::apply) and
//! [`apply_operations`](crate::apply::apply_operations), which add one
//! resource to the tree per operation.

use serde::Serialize;

use super::address::PathAddress;
use super::value::{Attributes, Presence, Value};
use crate::vocabulary::Attribute;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Add one resource at the operation's address
    Add,
}

/// Immutable model-mutation record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    #[serde(rename = "operation")]
    kind: OperationKind,
    address: PathAddress,
    attributes: Attributes,
}

impl Operation {
    pub fn add(address: PathAddress, attributes: Attributes) -> Self {
        Self {
            kind: OperationKind::Add,
            address,
            attributes,
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn address(&self) -> &PathAddress {
        &self.address
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn get(&self, attribute: Attribute) -> Option<&Value> {
        self.attributes.get(attribute)
    }

    pub fn has(&self, attribute: Attribute) -> bool {
        self.attributes.has(attribute)
    }

    pub fn has_defined(&self, attribute: Attribute) -> bool {
        self.attributes.has_defined(attribute)
    }

    pub fn presence(&self, attribute: Attribute) -> Presence {
        self.attributes.presence(attribute)
    }
}
