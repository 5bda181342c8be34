//! Service-count projection
//!
//! The host instantiates runtime services from a finished resource tree.
//! [`ServiceProjection`] is the seam the host implements; [`ReferenceProjection`]
//! reproduces the reference service layout so that service counts can be
//! asserted without a running host.

use std::fmt;

use serde::Serialize;

use crate::model::PathAddress;
use crate::ops::ResourceTree;
use crate::vocabulary::{DEFAULT_NAME, SUBSYSTEM_NAME};

/// Dotted name of a runtime service, e.g. `fox-platform.process-engine.default`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ServiceName(String);

impl ServiceName {
    pub fn new(segments: &[&str]) -> Self {
        Self(segments.join("."))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps a resource tree to the services a host installs for it
pub trait ServiceProjection {
    /// Service names, in installation order
    fn services(&self, tree: &ResourceTree) -> Vec<ServiceName>;

    fn service_count(&self, tree: &ResourceTree) -> usize {
        self.services(tree).len()
    }
}

/// Reference service layout
///
/// - four subsystem services once the subsystem root exists
/// - one service per process engine
/// - one service for the job executor; acquisitions run inside it
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceProjection;

impl ReferenceProjection {
    pub const SUBSYSTEM_SERVICES: [&'static str; 4] = [
        "platform",
        "process-engine-controller",
        "job-executor-registry",
        "process-archive-registry",
    ];
}

impl ServiceProjection for ReferenceProjection {
    fn services(&self, tree: &ResourceTree) -> Vec<ServiceName> {
        if !tree.contains(&PathAddress::subsystem()) {
            return Vec::new();
        }

        let mut services: Vec<ServiceName> = Self::SUBSYSTEM_SERVICES
            .into_iter()
            .map(|service| ServiceName::new(&[SUBSYSTEM_NAME, service]))
            .collect();

        for (address, _) in tree.process_engines() {
            let name = address.name().unwrap_or(DEFAULT_NAME);
            services.push(ServiceName::new(&[SUBSYSTEM_NAME, "process-engine", name]));
        }

        if tree.job_executor().is_some() {
            services.push(ServiceName::new(&[SUBSYSTEM_NAME, "job-executor", DEFAULT_NAME]));
        }

        services
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::install;

    #[test]
    fn test_empty_tree_has_no_services() {
        assert_eq!(ReferenceProjection.service_count(&ResourceTree::new()), 0);
    }

    #[test]
    fn test_bare_container_installs_subsystem_services() {
        let tree = install("<process-engines/>").unwrap();
        let services = ReferenceProjection.services(&tree);
        assert_eq!(services.len(), 4);
        assert_eq!(services[0].as_str(), "fox-platform.platform");
    }

    #[test]
    fn test_engine_and_executor_services() {
        let tree = install(
            "<subsystem>\
               <process-engine name=\"e1\"/>\
               <job-executor>\
                 <thread-pool-name>tp</thread-pool-name>\
                 <job-acquisition name=\"a\"><acquisition-strategy>SEQUENTIAL</acquisition-strategy></job-acquisition>\
                 <job-acquisition name=\"b\"><acquisition-strategy>SEQUENTIAL</acquisition-strategy></job-acquisition>\
               </job-executor>\
             </subsystem>",
        )
        .unwrap();
        let names: Vec<String> = ReferenceProjection
            .services(&tree)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names.len(), 6);
        assert!(names.contains(&"fox-platform.process-engine.e1".to_string()));
        assert!(names.contains(&"fox-platform.job-executor.default".to_string()));
    }
}
