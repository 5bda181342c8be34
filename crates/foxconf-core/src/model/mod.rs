pub mod address;
pub mod operation;
pub mod resource_type;
pub mod value;

pub use address::{PathAddress, PathElement};
pub use operation::{Operation, OperationKind};
pub use resource_type::{AcquisitionStrategy, AttributeDefinition, ResourceType, ValueShape};
pub use value::{Attributes, Presence, PropertyList, Value};
