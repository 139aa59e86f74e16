pub mod avl_graph;
#[allow(dead_code)]
pub mod indexing;
pub mod memory_backing;

pub use avl_graph::{EdgeRef, NodeRef};
pub use indexing::NodeIndex;