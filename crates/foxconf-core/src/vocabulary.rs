//! Closed vocabulary of the subsystem schema
//!
//! Every element and attribute name the parser accepts and the marshaller
//! writes comes from the tables in this module. `local_name()` is an
//! exhaustive match; `from_local_name()` searches the same `ALL` table, so
//! both directions of translation are driven by one mapping.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Name of the subsystem, used as the value of the root path segment
pub const SUBSYSTEM_NAME: &str = "fox-platform";

/// Canonical name given to unnamed engines and to the job executor singleton
pub const DEFAULT_NAME: &str = "default";

/// A name that is not part of the vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown name '{0}'")]
pub struct UnknownName(pub String);

/// Markup element recognised by the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    Subsystem,
    ProcessEngines,
    ProcessEngine,
    Configuration,
    Datasource,
    HistoryLevel,
    Properties,
    Property,
    JobExecutor,
    JobAcquisition,
    AcquisitionStrategy,
    ThreadPoolName,
}

impl Element {
    pub const ALL: [Element; 12] = [
        Element::Subsystem,
        Element::ProcessEngines,
        Element::ProcessEngine,
        Element::Configuration,
        Element::Datasource,
        Element::HistoryLevel,
        Element::Properties,
        Element::Property,
        Element::JobExecutor,
        Element::JobAcquisition,
        Element::AcquisitionStrategy,
        Element::ThreadPoolName,
    ];

    /// Canonical markup name
    pub const fn local_name(self) -> &'static str {
        match self {
            Element::Subsystem => "subsystem",
            Element::ProcessEngines => "process-engines",
            Element::ProcessEngine => "process-engine",
            Element::Configuration => "configuration",
            Element::Datasource => "datasource",
            Element::HistoryLevel => "history-level",
            Element::Properties => "properties",
            Element::Property => "property",
            Element::JobExecutor => "job-executor",
            Element::JobAcquisition => "job-acquisition",
            Element::AcquisitionStrategy => "acquisition-strategy",
            Element::ThreadPoolName => "thread-pool-name",
        }
    }

    pub fn from_local_name(name: &str) -> Option<Element> {
        Self::ALL.into_iter().find(|e| e.local_name() == name)
    }
}

impl FromStr for Element {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Element::from_local_name(s).ok_or_else(|| UnknownName(s.to_string()))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_name())
    }
}

/// Attribute key of a resource
///
/// `Name` and `Default` are written as markup attributes; every other key is
/// written as a child element whose name is given by [`Attribute::element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    Name,
    Default,
    Datasource,
    HistoryLevel,
    Configuration,
    Properties,
    ThreadPoolName,
    AcquisitionStrategy,
}

impl Attribute {
    pub const ALL: [Attribute; 8] = [
        Attribute::Name,
        Attribute::Default,
        Attribute::Datasource,
        Attribute::HistoryLevel,
        Attribute::Configuration,
        Attribute::Properties,
        Attribute::ThreadPoolName,
        Attribute::AcquisitionStrategy,
    ];

    /// Canonical key name
    pub const fn local_name(self) -> &'static str {
        match self {
            Attribute::Name => "name",
            Attribute::Default => "default",
            Attribute::Datasource => Element::Datasource.local_name(),
            Attribute::HistoryLevel => Element::HistoryLevel.local_name(),
            Attribute::Configuration => Element::Configuration.local_name(),
            Attribute::Properties => Element::Properties.local_name(),
            Attribute::ThreadPoolName => Element::ThreadPoolName.local_name(),
            Attribute::AcquisitionStrategy => Element::AcquisitionStrategy.local_name(),
        }
    }

    pub fn from_local_name(name: &str) -> Option<Attribute> {
        Self::ALL.into_iter().find(|a| a.local_name() == name)
    }

    /// Child element carrying this attribute, or `None` for markup attributes
    pub const fn element(self) -> Option<Element> {
        match self {
            Attribute::Name | Attribute::Default => None,
            Attribute::Datasource => Some(Element::Datasource),
            Attribute::HistoryLevel => Some(Element::HistoryLevel),
            Attribute::Configuration => Some(Element::Configuration),
            Attribute::Properties => Some(Element::Properties),
            Attribute::ThreadPoolName => Some(Element::ThreadPoolName),
            Attribute::AcquisitionStrategy => Some(Element::AcquisitionStrategy),
        }
    }

    /// Attribute carried by a child element, if that element is a leaf
    pub fn for_element(element: Element) -> Option<Attribute> {
        Self::ALL.into_iter().find(|a| a.element() == Some(element))
    }

    /// Whether this attribute is written as a markup attribute
    pub const fn is_markup(self) -> bool {
        self.element().is_none()
    }
}

impl FromStr for Attribute {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::from_local_name(s).ok_or_else(|| UnknownName(s.to_string()))
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_name())
    }
}

impl Serialize for Attribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.local_name())
    }
}

/// Schema namespace of the subsystem document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    FoxPlatform1_1,
}

impl Namespace {
    pub const ALL: [Namespace; 1] = [Namespace::FoxPlatform1_1];

    /// Namespace written by the marshaller
    pub const CURRENT: Namespace = Namespace::FoxPlatform1_1;

    pub const fn uri(self) -> &'static str {
        match self {
            Namespace::FoxPlatform1_1 => "urn:com.camunda.fox.fox-platform:1.1",
        }
    }

    pub fn from_uri(uri: &str) -> Option<Namespace> {
        Self::ALL.into_iter().find(|ns| ns.uri() == uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_element_names_round_trip() {
        for element in Element::ALL {
            assert_eq!(Element::from_local_name(element.local_name()), Some(element));
            assert_eq!(element.local_name().parse::<Element>(), Ok(element));
        }
    }

    #[test]
    fn test_element_names_are_unique() {
        let names: HashSet<_> = Element::ALL.iter().map(|e| e.local_name()).collect();
        assert_eq!(names.len(), Element::ALL.len());
    }

    #[test]
    fn test_attribute_names_round_trip() {
        for attribute in Attribute::ALL {
            assert_eq!(
                Attribute::from_local_name(attribute.local_name()),
                Some(attribute)
            );
        }
        let names: HashSet<_> = Attribute::ALL.iter().map(|a| a.local_name()).collect();
        assert_eq!(names.len(), Attribute::ALL.len());
    }

    #[test]
    fn test_unknown_names_rejected() {
        assert_eq!(Element::from_local_name("process-engine-x"), None);
        assert_eq!(
            "ProcessEngine".parse::<Element>(),
            Err(UnknownName("ProcessEngine".to_string()))
        );
        assert!("NAME".parse::<Attribute>().is_err());
    }

    #[test]
    fn test_leaf_attributes_map_to_elements() {
        assert!(Attribute::Name.is_markup());
        assert!(Attribute::Default.is_markup());
        assert_eq!(
            Attribute::for_element(Element::ThreadPoolName),
            Some(Attribute::ThreadPoolName)
        );
        assert_eq!(Attribute::for_element(Element::JobAcquisition), None);
        for attribute in Attribute::ALL {
            if let Some(element) = attribute.element() {
                assert_eq!(attribute.local_name(), element.local_name());
            }
        }
    }

    #[test]
    fn test_namespace_lookup() {
        assert_eq!(
            Namespace::from_uri("urn:com.camunda.fox.fox-platform:1.1"),
            Some(Namespace::FoxPlatform1_1)
        );
        assert_eq!(Namespace::from_uri("urn:jboss:domain:1.1"), None);
    }
}
