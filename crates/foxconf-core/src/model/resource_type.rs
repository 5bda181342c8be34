//! Resource types of the subsystem and their declared attributes
//!
//! The attribute declarations here are read by the parser (which leaves and
//! markup attributes an element accepts), by the applier (which attributes a
//! resource carries and in what shape) and by the marshaller (what to write).

use std::fmt;

use serde::{Serialize, Serializer};

use crate::vocabulary::{Attribute, Element};

/// Shape of a declared attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    String,
    Boolean,
    /// Enumerated string with its legal values
    Enum(&'static [&'static str]),
    Properties,
}

impl ValueShape {
    pub fn name(&self) -> &'static str {
        match self {
            ValueShape::String => "string",
            ValueShape::Boolean => "boolean",
            ValueShape::Enum(_) => "enum",
            ValueShape::Properties => "properties",
        }
    }
}

/// One declared attribute of a resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDefinition {
    pub attribute: Attribute,
    pub shape: ValueShape,
    /// Must appear in the document (as markup attribute or leaf element)
    pub required: bool,
}

const fn def(attribute: Attribute, shape: ValueShape, required: bool) -> AttributeDefinition {
    AttributeDefinition {
        attribute,
        shape,
        required,
    }
}

/// Job acquisition strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcquisitionStrategy {
    Sequential,
}

impl AcquisitionStrategy {
    pub const ALL: [AcquisitionStrategy; 1] = [AcquisitionStrategy::Sequential];

    /// Legal values, in the same order as `ALL`
    pub const NAMES: &'static [&'static str] = &["SEQUENTIAL"];

    pub const fn as_str(self) -> &'static str {
        match self {
            AcquisitionStrategy::Sequential => "SEQUENTIAL",
        }
    }

    pub fn from_name(name: &str) -> Option<AcquisitionStrategy> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

const SUBSYSTEM_ATTRIBUTES: &[AttributeDefinition] = &[];

const PROCESS_ENGINE_ATTRIBUTES: &[AttributeDefinition] = &[
    // unnamed engines are given the default name by the parser
    def(Attribute::Name, ValueShape::String, false),
    def(Attribute::Default, ValueShape::Boolean, false),
    def(Attribute::Datasource, ValueShape::String, false),
    def(Attribute::HistoryLevel, ValueShape::String, false),
    def(Attribute::Configuration, ValueShape::String, false),
    def(Attribute::Properties, ValueShape::Properties, false),
];

const JOB_EXECUTOR_ATTRIBUTES: &[AttributeDefinition] =
    &[def(Attribute::ThreadPoolName, ValueShape::String, true)];

const JOB_ACQUISITION_ATTRIBUTES: &[AttributeDefinition] = &[
    def(Attribute::Name, ValueShape::String, true),
    def(
        Attribute::AcquisitionStrategy,
        ValueShape::Enum(AcquisitionStrategy::NAMES),
        true,
    ),
    def(Attribute::Properties, ValueShape::Properties, false),
];

/// Addressable resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceType {
    Subsystem,
    ProcessEngine,
    JobExecutor,
    JobAcquisition,
}

impl ResourceType {
    pub const ALL: [ResourceType; 4] = [
        ResourceType::Subsystem,
        ResourceType::ProcessEngine,
        ResourceType::JobExecutor,
        ResourceType::JobAcquisition,
    ];

    /// Element that declares a resource of this type
    pub const fn element(self) -> Element {
        match self {
            ResourceType::Subsystem => Element::Subsystem,
            ResourceType::ProcessEngine => Element::ProcessEngine,
            ResourceType::JobExecutor => Element::JobExecutor,
            ResourceType::JobAcquisition => Element::JobAcquisition,
        }
    }

    /// Path segment key
    pub const fn key(self) -> &'static str {
        self.element().local_name()
    }

    pub fn from_key(key: &str) -> Option<ResourceType> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }

    /// Human-readable name used in error messages
    pub const fn display_name(self) -> &'static str {
        match self {
            ResourceType::Subsystem => "subsystem",
            ResourceType::ProcessEngine => "process engine",
            ResourceType::JobExecutor => "job executor",
            ResourceType::JobAcquisition => "job acquisition",
        }
    }

    /// Type of the resource this type is nested under
    pub const fn parent(self) -> Option<ResourceType> {
        match self {
            ResourceType::Subsystem => None,
            ResourceType::ProcessEngine | ResourceType::JobExecutor => {
                Some(ResourceType::Subsystem)
            }
            ResourceType::JobAcquisition => Some(ResourceType::JobExecutor),
        }
    }

    /// Declared attributes, in marshalling order
    pub const fn attributes(self) -> &'static [AttributeDefinition] {
        match self {
            ResourceType::Subsystem => SUBSYSTEM_ATTRIBUTES,
            ResourceType::ProcessEngine => PROCESS_ENGINE_ATTRIBUTES,
            ResourceType::JobExecutor => JOB_EXECUTOR_ATTRIBUTES,
            ResourceType::JobAcquisition => JOB_ACQUISITION_ATTRIBUTES,
        }
    }

    pub fn definition(self, attribute: Attribute) -> Option<&'static AttributeDefinition> {
        self.attributes().iter().find(|d| d.attribute == attribute)
    }

    /// Declaration carried by a child element of this resource's element
    pub fn definition_for_element(self, element: Element) -> Option<&'static AttributeDefinition> {
        self.attributes()
            .iter()
            .find(|d| d.attribute.element() == Some(element))
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for ResourceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}
