//! Inherited attribute resolution
//!
//! An attribute missing on a node may still have an effective value: the
//! nearest ancestor along the parent link that defines it. `ResolveQuery`
//! walks that chain, fetching one ancestor per hop, and distinguishes
//! scalar attributes from to-one relationship peers along the way.

use crate::graph::{AttributeValue, Cardinality, Member, Node, PARENT_LINK};
use crate::store::{NodeStore, StoreError};
use thiserror::Error;
use tracing::debug;

/// Default hop budget for a resolution walk
///
/// Deep enough for any realistic location hierarchy; shallow enough that a
/// cyclic parent chain fails fast instead of walking forever.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Errors that can occur during a resolution walk
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The chain ended without any node defining the attribute
    ///
    /// `kind` names the node where the walk stopped, not the origin.
    /// Callers that treat an unresolved attribute as "not configured"
    /// match on this variant and substitute their own default.
    #[error("could not resolve {attribute} for {kind}")]
    Exhausted { kind: String, attribute: String },

    /// The name resolved to a to-many relationship
    ///
    /// A set of peers has no single inherited value, so the walk stops
    /// rather than picking one arbitrarily.
    #[error("cannot inherit {attribute} for {kind}: to-many relationship")]
    MultiValued { kind: String, attribute: String },

    /// The walk used up its hop budget before terminating
    ///
    /// Kept distinct from `Exhausted` so a cyclic parent chain is never
    /// mistaken for a merely unconfigured attribute.
    #[error("parent chain exceeded {limit} hops resolving {attribute}")]
    DepthExceeded { attribute: String, limit: usize },

    /// The store failed; not a resolution outcome
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A successfully resolved member
#[derive(Debug, Clone)]
pub enum Resolved {
    /// A scalar attribute value
    Value(AttributeValue),
    /// The peer of a populated to-one relationship
    Node(Node),
}

impl Resolved {
    /// Get the scalar value, if the walk resolved an attribute
    pub fn as_value(&self) -> Option<&AttributeValue> {
        match self {
            Self::Value(value) => Some(value),
            Self::Node(_) => None,
        }
    }

    /// Consume into the scalar value, if the walk resolved an attribute
    pub fn into_value(self) -> Option<AttributeValue> {
        match self {
            Self::Value(value) => Some(value),
            Self::Node(_) => None,
        }
    }

    /// Get the peer node, if the walk resolved a to-one relationship
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            Self::Value(_) => None,
        }
    }

    /// Consume into the peer node, if the walk resolved a to-one relationship
    pub fn into_node(self) -> Option<Node> {
        match self {
            Self::Node(node) => Some(node),
            Self::Value(_) => None,
        }
    }
}

/// Query for resolving the effective value of a member on a node
///
/// Each hop checks the current node for the member. A concrete attribute
/// resolves immediately; a populated to-one relationship resolves to its
/// peer; a to-many relationship fails; otherwise the walk fetches the
/// parent and climbs. A node that defines the member directly costs zero
/// store fetches.
#[derive(Debug, Clone)]
pub struct ResolveQuery {
    /// Node the walk starts from
    pub origin: Node,
    /// Name of the attribute or relationship to resolve
    pub attribute: String,
    /// Link climbed toward ancestors
    pub parent_link: String,
    /// Maximum ancestor hops before the walk fails (0 = origin only)
    pub max_depth: usize,
}

impl ResolveQuery {
    /// Create a query resolving `attribute` from `origin`
    pub fn new(origin: Node, attribute: impl Into<String>) -> Self {
        Self {
            origin,
            attribute: attribute.into(),
            parent_link: PARENT_LINK.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Climb a link other than `"parent"`
    pub fn parent_link(mut self, name: impl Into<String>) -> Self {
        self.parent_link = name.into();
        self
    }

    /// Set the maximum number of ancestor hops
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Execute the walk against a store
    pub async fn execute(&self, store: &dyn NodeStore) -> Result<Resolved, ResolveError> {
        let mut current = self.origin.clone();
        let mut hops = 0usize;

        loop {
            match current.member(&self.attribute) {
                Member::Attribute(value) => {
                    debug!(kind = %current.kind, attribute = %self.attribute, hops, "resolved scalar attribute");
                    return Ok(Resolved::Value(value.clone()));
                }
                Member::Relationship(Cardinality::One) => {
                    if let Some(peer) = store.fetch_one(&current.id, &self.attribute).await? {
                        debug!(
                            kind = %current.kind,
                            attribute = %self.attribute,
                            peer = %peer.id,
                            hops,
                            "resolved to-one peer"
                        );
                        return Ok(Resolved::Node(peer));
                    }
                    // Declared but unpopulated: not a value, keep climbing
                }
                Member::Relationship(Cardinality::Many) => {
                    return Err(ResolveError::MultiValued {
                        kind: current.kind.clone(),
                        attribute: self.attribute.clone(),
                    });
                }
                Member::Absent => {}
            }

            match current.relationship(&self.parent_link) {
                None => {
                    debug!(kind = %current.kind, attribute = %self.attribute, hops, "chain exhausted at top");
                    return Err(ResolveError::Exhausted {
                        kind: current.kind.clone(),
                        attribute: self.attribute.clone(),
                    });
                }
                Some(Cardinality::Many) => {
                    return Err(ResolveError::MultiValued {
                        kind: current.kind.clone(),
                        attribute: self.parent_link.clone(),
                    });
                }
                Some(Cardinality::One) => {}
            }

            if hops >= self.max_depth {
                return Err(ResolveError::DepthExceeded {
                    attribute: self.attribute.clone(),
                    limit: self.max_depth,
                });
            }
            hops += 1;

            match store.fetch_one(&current.id, &self.parent_link).await? {
                Some(parent) => {
                    debug!(from = %current.kind, to = %parent.kind, hops, "climbing parent link");
                    current = parent;
                }
                None => {
                    debug!(kind = %current.kind, attribute = %self.attribute, hops, "parent link empty, chain exhausted");
                    return Err(ResolveError::Exhausted {
                        kind: current.kind.clone(),
                        attribute: self.attribute.clone(),
                    });
                }
            }
        }
    }

    /// Execute, treating an exhausted chain as "no value configured"
    ///
    /// Only `Exhausted` maps to `Ok(None)`. Cardinality misuse, depth
    /// overruns, and store faults still surface as errors.
    pub async fn execute_or_none(&self, store: &dyn NodeStore) -> Result<Option<Resolved>, ResolveError> {
        match self.execute(store).await {
            Ok(resolved) => Ok(Some(resolved)),
            Err(ResolveError::Exhausted { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
