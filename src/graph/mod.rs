//! Core node model
//!
//! Snapshots of nodes in an external graph store: kinds, scalar attributes,
//! and declared relationships. Relationship peers are never carried inline;
//! they are materialized through `store::NodeStore`.

mod node;
mod relationship;
mod value;


pub use node::{Member, Node, NodeId, NodeMetadata};
pub use relationship::{Cardinality, PARENT_LINK};
pub use value::AttributeValue;
