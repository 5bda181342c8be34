use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::resource_type::ResourceType;
use crate::vocabulary::{DEFAULT_NAME, SUBSYSTEM_NAME};

/// One `(type, name)` segment of a [`PathAddress`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathElement {
    resource_type: ResourceType,
    name: String,
}

impl PathElement {
    pub fn new(resource_type: ResourceType, name: impl Into<String>) -> Self {
        Self {
            resource_type,
            name: name.into(),
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    /// Segment key (the resource type's canonical name)
    pub fn key(&self) -> &'static str {
        self.resource_type.key()
    }

    /// Segment value (the resource name)
    pub fn value(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key(), self.name)
    }
}

impl Serialize for PathElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key(), &self.name)?;
        map.end()
    }
}

/// Ordered segments locating a resource; the identity of a resource
///
/// Addresses built with the constructors below always start at the
/// subsystem root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct PathAddress {
    elements: Vec<PathElement>,
}

impl PathAddress {
    pub fn new(elements: Vec<PathElement>) -> Self {
        Self { elements }
    }

    /// `subsystem=fox-platform`
    pub fn subsystem() -> Self {
        Self::new(vec![PathElement::new(ResourceType::Subsystem, SUBSYSTEM_NAME)])
    }

    /// `subsystem=fox-platform/process-engine=<name>`
    pub fn process_engine(name: impl Into<String>) -> Self {
        Self::subsystem().append(PathElement::new(ResourceType::ProcessEngine, name))
    }

    /// `subsystem=fox-platform/job-executor=default`
    pub fn job_executor() -> Self {
        Self::subsystem().append(PathElement::new(ResourceType::JobExecutor, DEFAULT_NAME))
    }

    /// `subsystem=fox-platform/job-executor=default/job-acquisition=<name>`
    pub fn job_acquisition(name: impl Into<String>) -> Self {
        Self::job_executor().append(PathElement::new(ResourceType::JobAcquisition, name))
    }

    pub fn append(mut self, element: PathElement) -> Self {
        self.elements.push(element);
        self
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn element(&self, index: usize) -> Option<&PathElement> {
        self.elements.get(index)
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn last(&self) -> Option<&PathElement> {
        self.elements.last()
    }

    /// Type of the addressed resource
    pub fn resource_type(&self) -> Option<ResourceType> {
        self.last().map(PathElement::resource_type)
    }

    /// Name of the addressed resource
    pub fn name(&self) -> Option<&str> {
        self.last().map(PathElement::value)
    }

    /// Address with the last segment removed; `None` for the root or empty address
    pub fn parent(&self) -> Option<PathAddress> {
        match self.elements.split_last() {
            Some((_, rest)) if !rest.is_empty() => Some(Self::new(rest.to_vec())),
            _ => None,
        }
    }

    /// Whether `self` is the direct parent of `child`
    pub fn is_parent_of(&self, child: &PathAddress) -> bool {
        child.len() == self.len() + 1 && child.elements.starts_with(&self.elements)
    }
}

impl fmt::Display for PathAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for element in &self.elements {
            if !first {
                f.write_str("/")?;
            }
            write!(f, "{}", element)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_executor_address_has_two_segments() {
        let address = PathAddress::job_executor();
        assert_eq!(address.len(), 2);
        let root = address.element(0).unwrap();
        assert_eq!(root.key(), "subsystem");
        assert_eq!(root.value(), "fox-platform");
        let executor = address.element(1).unwrap();
        assert_eq!(executor.key(), "job-executor");
        assert_eq!(executor.value(), "default");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            PathAddress::job_acquisition("anders").to_string(),
            "subsystem=fox-platform/job-executor=default/job-acquisition=anders"
        );
        assert_eq!(PathAddress::default().to_string(), "");
    }

    #[test]
    fn test_parent() {
        let acquisition = PathAddress::job_acquisition("a");
        assert_eq!(acquisition.parent(), Some(PathAddress::job_executor()));
        assert_eq!(
            PathAddress::job_executor().parent(),
            Some(PathAddress::subsystem())
        );
        assert_eq!(PathAddress::subsystem().parent(), None);
        assert!(PathAddress::subsystem().is_parent_of(&PathAddress::process_engine("e")));
        assert!(!PathAddress::subsystem().is_parent_of(&acquisition));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(PathAddress::process_engine("__test")).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"subsystem": "fox-platform"}, {"process-engine": "__test"}])
        );
    }
}
