use indexmap::IndexMap;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::model::{Attributes, PathAddress, ResourceType};
use crate::vocabulary::Attribute;

/// A resource held in the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    resource_type: ResourceType,
    attributes: Attributes,
}

impl Resource {
    pub fn new(resource_type: ResourceType, attributes: Attributes) -> Self {
        Self {
            resource_type,
            attributes,
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// String content of a defined `String`/`Enum` attribute
    pub fn get_str(&self, attribute: Attribute) -> Option<&str> {
        self.attributes.get_str(attribute)
    }
}

/// In-memory resource tree keyed by address
///
/// Resources are kept in insertion order, which is the order the marshaller
/// writes repeated elements in. Equality is order-sensitive for the same
/// reason.
///
/// Not synchronised: a host that shares a tree between threads must hold its
/// own lock around every writer.
#[derive(Debug, Clone, Default)]
pub struct ResourceTree {
    pub(crate) resources: IndexMap<PathAddress, Resource>,
}

impl ResourceTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self {
            resources: IndexMap::new(),
        }
    }

    pub fn get(&self, address: &PathAddress) -> Option<&Resource> {
        self.resources.get(address)
    }

    pub fn contains(&self, address: &PathAddress) -> bool {
        self.resources.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// All resources in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&PathAddress, &Resource)> {
        self.resources.iter()
    }

    /// Direct children of `parent` of one type, in insertion order
    pub fn children(
        &self,
        parent: PathAddress,
        resource_type: ResourceType,
    ) -> impl Iterator<Item = (&PathAddress, &Resource)> + '_ {
        self.resources.iter().filter(move |(address, _)| {
            address.resource_type() == Some(resource_type) && parent.is_parent_of(address)
        })
    }

    /// Process engines, in insertion order
    pub fn process_engines(&self) -> Vec<(&PathAddress, &Resource)> {
        self.children(PathAddress::subsystem(), ResourceType::ProcessEngine)
            .collect()
    }

    pub fn job_executor(&self) -> Option<&Resource> {
        self.get(&PathAddress::job_executor())
    }

    /// Job acquisitions, in insertion order
    pub fn job_acquisitions(&self) -> Vec<(&PathAddress, &Resource)> {
        self.children(PathAddress::job_executor(), ResourceType::JobAcquisition)
            .collect()
    }

    /// Insert a resource
    ///
    /// This is an internal method used by the applier, which has already
    /// checked that the address is free.
    pub(crate) fn insert(&mut self, address: PathAddress, resource: Resource) {
        self.resources.insert(address, resource);
    }
}

impl PartialEq for ResourceTree {
    fn eq(&self, other: &Self) -> bool {
        self.resources.len() == other.resources.len()
            && self.resources.iter().eq(other.resources.iter())
    }
}

impl Eq for ResourceTree {}

#[derive(Serialize)]
struct Entry<'a> {
    address: &'a PathAddress,
    #[serde(flatten)]
    resource: &'a Resource,
}

impl Serialize for ResourceTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.resources.len()))?;
        for (address, resource) in &self.resources {
            seq.serialize_element(&Entry { address, resource })?;
        }
        seq.end()
    }
}
