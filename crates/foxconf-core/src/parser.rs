//! Document parser: markup → ordered Add operations
//!
//! The parser is purely syntactic. It checks that every element and
//! attribute belongs to the vocabulary and sits where the schema allows it,
//! and emits one Add per resource in schema order: the root, the engines in
//! document order, then the job executor and its acquisitions. Uniqueness of
//! names and enum legality are left to the applier.

use std::path::Path;
use std::time::Instant;

use foxconf_core_types::schema::FIELD_OP_COUNT;

use crate::errors::{Position, Result, SubsystemError};
use crate::markup::{self, Node};
use crate::model::{Attributes, Operation, PathAddress, PropertyList, ResourceType, Value, ValueShape};
use crate::vocabulary::{Attribute, Element, Namespace, DEFAULT_NAME};
use crate::{log_op_end, log_op_error, log_op_start};

/// Parse a subsystem document into its ordered operations
///
/// The first operation is always the Add of the subsystem root. The root
/// element may be `<subsystem>` or, as a shorthand, a single top-level
/// section (`process-engines`, `process-engine` or `job-executor`).
///
/// # Errors
///
/// Returns an `UnknownToken` error for names outside the vocabulary and a
/// `MalformedStructure` error for anything the schema does not allow. Both
/// carry the document position.
///
/// # Example
///
/// ```
/// use foxconf_core::parse_document;
///
/// let ops = parse_document("<process-engines/>").unwrap();
/// assert_eq!(ops.len(), 1);
/// ```
pub fn parse_document(input: &str) -> Result<Vec<Operation>> {
    log_op_start!("parse_document", input_len = input.len());
    let start = Instant::now();

    let ops = parse_document_impl(input).map_err(|err| {
        log_op_error!(
            "parse_document",
            err,
            duration_ms = start.elapsed().as_millis() as u64
        );
        err
    })?;

    log_op_end!(
        "parse_document",
        duration_ms = start.elapsed().as_millis() as u64,
        { FIELD_OP_COUNT } = ops.len()
    );
    Ok(ops)
}

/// Read a document from disk and [`parse_document`] it
///
/// # Errors
///
/// Returns `Io` if the file cannot be read, otherwise as [`parse_document`].
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<Operation>> {
    let input = std::fs::read_to_string(path)?;
    parse_document(&input)
}

fn parse_document_impl(input: &str) -> Result<Vec<Operation>> {
    let root = markup::read_document(input)?;
    let mut ops = vec![Operation::add(PathAddress::subsystem(), Attributes::new())];

    match known_element(&root)? {
        Element::Subsystem => {
            reject_attributes(&root)?;
            reject_text(&root)?;
            parse_sections(&root.children, &root.name, &mut ops)?;
        }
        Element::ProcessEngines | Element::ProcessEngine | Element::JobExecutor => {
            parse_sections(std::slice::from_ref(&root), "document", &mut ops)?;
        }
        _ => return Err(unexpected_element(&root, "document")),
    }

    Ok(ops)
}

/// Top-level sections, each at most once, in either order
///
/// Engine operations always precede executor operations so that the tree
/// does not depend on the order of the sections.
fn parse_sections(sections: &[Node], parent: &str, ops: &mut Vec<Operation>) -> Result<()> {
    let mut seen: Vec<Element> = Vec::new();
    let mut engine_ops = Vec::new();
    let mut executor_ops = Vec::new();

    for node in sections {
        let element = known_element(node)?;
        // a bare engine stands in for the whole engines section
        let section = match element {
            Element::ProcessEngine => Element::ProcessEngines,
            other => other,
        };
        if seen.contains(&section) {
            return Err(SubsystemError::DuplicateElement {
                element: node.name.clone(),
                parent: parent.to_string(),
                position: node.position,
            });
        }
        seen.push(section);

        match element {
            Element::ProcessEngines => {
                reject_attributes(node)?;
                reject_text(node)?;
                for child in &node.children {
                    match known_element(child)? {
                        Element::ProcessEngine => engine_ops.push(parse_process_engine(child)?),
                        _ => return Err(unexpected_element(child, &node.name)),
                    }
                }
            }
            Element::ProcessEngine => engine_ops.push(parse_process_engine(node)?),
            Element::JobExecutor => parse_job_executor(node, &mut executor_ops)?,
            _ => return Err(unexpected_element(node, parent)),
        }
    }

    ops.extend(engine_ops);
    ops.extend(executor_ops);
    Ok(())
}

fn parse_process_engine(node: &Node) -> Result<Operation> {
    let (mut attributes, _) = parse_resource(node, ResourceType::ProcessEngine)?;

    let name = attributes
        .get_str(Attribute::Name)
        .unwrap_or(DEFAULT_NAME)
        .to_string();
    if !attributes.has(Attribute::Name) {
        attributes.insert(Attribute::Name, Value::String(name.clone()));
    }
    Ok(Operation::add(PathAddress::process_engine(name), attributes))
}

fn parse_job_executor(node: &Node, ops: &mut Vec<Operation>) -> Result<()> {
    let (attributes, acquisitions) = parse_resource(node, ResourceType::JobExecutor)?;
    ops.push(Operation::add(PathAddress::job_executor(), attributes));

    for acquisition in acquisitions {
        let (attributes, _) = parse_resource(acquisition, ResourceType::JobAcquisition)?;
        let name = attributes
            .get_str(Attribute::Name)
            .unwrap_or_default()
            .to_string();
        ops.push(Operation::add(PathAddress::job_acquisition(name), attributes));
    }
    Ok(())
}

/// Read the markup attributes and leaf children of a resource element
///
/// Returns the collected attributes and the child elements that declare
/// nested resources. A resource type that declares `properties` always gets
/// that key: `Undefined` when the element has no `properties` child.
fn parse_resource(node: &Node, resource_type: ResourceType) -> Result<(Attributes, Vec<&Node>)> {
    reject_text(node)?;
    let mut attributes = Attributes::new();

    for markup_attribute in &node.attributes {
        let attribute = Attribute::from_local_name(&markup_attribute.name).ok_or_else(|| {
            SubsystemError::UnknownAttribute {
                name: markup_attribute.name.clone(),
                element: node.name.clone(),
                position: node.position,
            }
        })?;
        let definition = resource_type
            .definition(attribute)
            .filter(|d| d.attribute.is_markup())
            .ok_or_else(|| SubsystemError::UnexpectedAttribute {
                attribute: markup_attribute.name.clone(),
                element: node.name.clone(),
                position: node.position,
            })?;
        let value = match definition.shape {
            ValueShape::Boolean => Value::Boolean(parse_bool(
                attribute,
                &markup_attribute.value,
                node.position,
            )?),
            ValueShape::Enum(_) => Value::Enum(markup_attribute.value.clone()),
            _ => Value::String(markup_attribute.value.clone()),
        };
        attributes.insert(attribute, value);
    }

    let nested_element = ResourceType::ALL
        .into_iter()
        .find(|t| t.parent() == Some(resource_type))
        .map(ResourceType::element);
    let mut nested = Vec::new();

    for child in &node.children {
        let element = known_element(child)?;
        if Some(element) == nested_element {
            nested.push(child);
            continue;
        }
        let definition = resource_type
            .definition_for_element(element)
            .ok_or_else(|| unexpected_element(child, &node.name))?;
        if attributes.has(definition.attribute) {
            return Err(SubsystemError::DuplicateElement {
                element: child.name.clone(),
                parent: node.name.clone(),
                position: child.position,
            });
        }
        let value = match definition.shape {
            ValueShape::Properties => Value::Properties(parse_properties(child)?),
            ValueShape::Enum(_) => Value::Enum(read_text(child)?),
            ValueShape::Boolean => {
                let text = read_text(child)?;
                Value::Boolean(parse_bool(definition.attribute, &text, child.position)?)
            }
            ValueShape::String => Value::String(read_text(child)?),
        };
        attributes.insert(definition.attribute, value);
    }

    for definition in resource_type.attributes() {
        if attributes.has(definition.attribute) {
            continue;
        }
        if definition.required {
            return Err(match definition.attribute.element() {
                None => SubsystemError::MissingAttribute {
                    attribute: definition.attribute.to_string(),
                    element: node.name.clone(),
                    position: node.position,
                },
                Some(element) => SubsystemError::MissingElement {
                    element: element.to_string(),
                    parent: node.name.clone(),
                    position: node.position,
                },
            });
        }
        if definition.shape == ValueShape::Properties {
            attributes.insert(definition.attribute, Value::Undefined);
        }
    }

    Ok((attributes, nested))
}

/// `<properties>`: zero or more `<property name="...">value</property>`
fn parse_properties(node: &Node) -> Result<PropertyList> {
    reject_attributes(node)?;
    reject_text(node)?;
    let mut properties = PropertyList::new();

    for child in &node.children {
        if known_element(child)? != Element::Property {
            return Err(unexpected_element(child, &node.name));
        }
        let mut name = None;
        for markup_attribute in &child.attributes {
            match Attribute::from_local_name(&markup_attribute.name) {
                Some(Attribute::Name) => name = Some(markup_attribute.value.clone()),
                Some(_) => {
                    return Err(SubsystemError::UnexpectedAttribute {
                        attribute: markup_attribute.name.clone(),
                        element: child.name.clone(),
                        position: child.position,
                    })
                }
                None => {
                    return Err(SubsystemError::UnknownAttribute {
                        name: markup_attribute.name.clone(),
                        element: child.name.clone(),
                        position: child.position,
                    })
                }
            }
        }
        let name = name.ok_or_else(|| SubsystemError::MissingAttribute {
            attribute: Attribute::Name.to_string(),
            element: child.name.clone(),
            position: child.position,
        })?;
        if let Some(grandchild) = child.children.first() {
            known_element(grandchild)?;
            return Err(unexpected_element(grandchild, &child.name));
        }
        properties.insert(name, child.text.clone());
    }
    Ok(properties)
}

/// Text of a leaf element that takes no attributes and no children
fn read_text(node: &Node) -> Result<String> {
    reject_attributes(node)?;
    if let Some(child) = node.children.first() {
        known_element(child)?;
        return Err(unexpected_element(child, &node.name));
    }
    Ok(node.text.clone())
}

fn parse_bool(attribute: Attribute, value: &str, position: Position) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(SubsystemError::InvalidAttributeValue {
            attribute: attribute.to_string(),
            value: value.to_string(),
            reason: "expected 'true' or 'false'".to_string(),
            position,
        }),
    }
}

/// Resolve an element to the vocabulary, checking its namespace declaration
fn known_element(node: &Node) -> Result<Element> {
    if let Some(uri) = &node.namespace {
        if Namespace::from_uri(uri).is_none() {
            return Err(SubsystemError::UnknownNamespace {
                uri: uri.clone(),
                position: node.position,
            });
        }
    }
    Element::from_local_name(&node.name).ok_or_else(|| SubsystemError::UnknownElement {
        name: node.name.clone(),
        position: node.position,
    })
}

fn reject_attributes(node: &Node) -> Result<()> {
    match node.attributes.first() {
        None => Ok(()),
        Some(attribute) if Attribute::from_local_name(&attribute.name).is_some() => {
            Err(SubsystemError::UnexpectedAttribute {
                attribute: attribute.name.clone(),
                element: node.name.clone(),
                position: node.position,
            })
        }
        Some(attribute) => Err(SubsystemError::UnknownAttribute {
            name: attribute.name.clone(),
            element: node.name.clone(),
            position: node.position,
        }),
    }
}

fn reject_text(node: &Node) -> Result<()> {
    if node.text.is_empty() {
        return Ok(());
    }
    Err(SubsystemError::UnexpectedText {
        element: node.name.clone(),
        position: node.text_position.unwrap_or(node.position),
    })
}

fn unexpected_element(node: &Node, parent: &str) -> SubsystemError {
    SubsystemError::UnexpectedElement {
        element: node.name.clone(),
        parent: parent.to_string(),
        position: node.position,
    }
}
