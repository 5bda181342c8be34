use super::tree::{Resource, ResourceTree};
use crate::errors::{Result, SubsystemError};
use crate::model::{
    Attributes, Operation, PathAddress, ResourceType, Value, ValueShape,
};
use crate::vocabulary::{DEFAULT_NAME, SUBSYSTEM_NAME};

/// Add one resource described by an Add operation
///
/// Every check runs before the tree is touched, so a failed call leaves the
/// tree exactly as it was.
///
/// # Arguments
/// * `tree` - Mutable reference to the ResourceTree
/// * `op` - The Add operation to apply
///
/// # Errors
/// * `InvalidAddress` - If the address does not follow the resource type layout
/// * `DuplicateResource` - If a resource already exists at the address
/// * `ParentNotFound` - If the parent resource has not been added yet
/// * `UndeclaredAttribute` - If an attribute is not declared for the resource type
/// * `AttributeTypeMismatch` - If a defined value has the wrong shape
/// * `InvalidEnumValue` - If an enumerated value is outside its legal set
pub fn add_resource(tree: &mut ResourceTree, op: &Operation) -> Result<()> {
    let address = op.address();
    let resource_type = validate_address(address)?;

    if tree.contains(address) {
        return Err(SubsystemError::DuplicateResource {
            resource_type: resource_type.display_name().to_string(),
            name: address.name().unwrap_or_default().to_string(),
        });
    }

    if let Some(parent) = address.parent() {
        if !tree.contains(&parent) {
            return Err(SubsystemError::ParentNotFound {
                address: address.to_string(),
                parent: parent.to_string(),
            });
        }
    }

    let attributes = populate_attributes(address, resource_type, op.attributes())?;
    tree.insert(address.clone(), Resource::new(resource_type, attributes));
    Ok(())
}

/// Check the segment layout of an address and return the addressed type
fn validate_address(address: &PathAddress) -> Result<ResourceType> {
    let invalid = || SubsystemError::InvalidAddress {
        address: address.to_string(),
    };

    let root = address.element(0).ok_or_else(invalid)?;
    if root.resource_type() != ResourceType::Subsystem || root.value() != SUBSYSTEM_NAME {
        return Err(invalid());
    }

    for pair in address.elements().windows(2) {
        if pair[1].resource_type().parent() != Some(pair[0].resource_type()) {
            return Err(invalid());
        }
    }

    for element in address.elements() {
        if element.value().is_empty() {
            return Err(invalid());
        }
        // the job executor is a singleton
        if element.resource_type() == ResourceType::JobExecutor && element.value() != DEFAULT_NAME
        {
            return Err(invalid());
        }
    }

    address.resource_type().ok_or_else(invalid)
}

/// Validate operation attributes and expand them to the full declared set
///
/// The result holds every declared attribute in declaration order; attributes
/// the operation does not mention are `Undefined`.
fn populate_attributes(
    address: &PathAddress,
    resource_type: ResourceType,
    given: &Attributes,
) -> Result<Attributes> {
    for (attribute, value) in given.iter() {
        let definition =
            resource_type
                .definition(attribute)
                .ok_or_else(|| SubsystemError::UndeclaredAttribute {
                    attribute: attribute.to_string(),
                    resource_type: resource_type.key().to_string(),
                })?;

        let shape_matches = match (definition.shape, value) {
            (_, Value::Undefined) => true,
            (ValueShape::String, Value::String(_)) => true,
            (ValueShape::Boolean, Value::Boolean(_)) => true,
            (ValueShape::Enum(_), Value::Enum(_) | Value::String(_)) => true,
            (ValueShape::Properties, Value::Properties(_)) => true,
            _ => false,
        };
        if !shape_matches {
            return Err(SubsystemError::AttributeTypeMismatch {
                address: address.to_string(),
                attribute: attribute.to_string(),
                expected: definition.shape.name().to_string(),
                actual: value.type_name().to_string(),
            });
        }

        if let (ValueShape::Enum(allowed), Some(raw)) = (definition.shape, value.as_str()) {
            if !allowed.contains(&raw) {
                return Err(SubsystemError::InvalidEnumValue {
                    attribute: attribute.to_string(),
                    value: raw.to_string(),
                    allowed: allowed.join(", "),
                });
            }
        }
    }

    Ok(resource_type
        .attributes()
        .iter()
        .map(|definition| {
            let value = match (definition.shape, given.get(definition.attribute)) {
                (ValueShape::Enum(_), Some(Value::String(s))) => Value::Enum(s.clone()),
                (_, Some(value)) => value.clone(),
                (_, None) => Value::Undefined,
            };
            (definition.attribute, value)
        })
        .collect())
}
