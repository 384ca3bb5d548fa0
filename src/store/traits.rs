//! Store trait definitions

use crate::graph::{Cardinality, Node, NodeId};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during store operations
///
/// These describe faults at the store boundary (dangling references,
/// cardinality misuse, an unreachable backend). "No node in the chain
/// defines this attribute" is not a store fault; that outcome belongs to
/// `resolve::ResolveError`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An operation referenced a node the store does not hold
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// An operation named a relationship its node does not declare
    #[error("unknown relationship {relationship} on {kind}")]
    UnknownRelationship { kind: String, relationship: String },

    /// A fetch used the wrong arity for a declared relationship
    #[error("relationship {relationship} on {kind} is to-{actual}, expected to-{expected}")]
    CardinalityMismatch {
        kind: String,
        relationship: String,
        expected: Cardinality,
        actual: Cardinality,
    },

    /// The backing service could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Read access to nodes and their relationship peers
///
/// The store is the only place peers come from: a node snapshot declares a
/// relationship, and the peer behind it stays unloaded until fetched here.
/// Every method may suspend on I/O. Implementations must be thread-safe
/// (Send + Sync) to support concurrent resolutions over one store.
#[async_trait]
pub trait NodeStore: Send + Sync {
    /// Load a node snapshot by ID
    async fn get(&self, id: &NodeId) -> StoreResult<Option<Node>>;

    /// Materialize the peer of a declared to-one relationship
    ///
    /// `Ok(None)` means the relationship is declared but holds no peer.
    async fn fetch_one(&self, id: &NodeId, relationship: &str) -> StoreResult<Option<Node>>;

    /// Materialize the peers of a declared to-many relationship
    async fn fetch_many(&self, id: &NodeId, relationship: &str) -> StoreResult<Vec<Node>>;
}
