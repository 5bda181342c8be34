pub mod resource_ops;
pub mod tree;

pub use tree::{Resource, ResourceTree};
