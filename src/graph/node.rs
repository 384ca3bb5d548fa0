//! Node snapshots from the external graph store

use super::relationship::{Cardinality, PARENT_LINK};
use super::value::AttributeValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for a node
///
/// Serializes as a plain string (UUID or semantic ID like "suite-325")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a new random NodeId (UUID-based)
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create a NodeId from a string (semantic ID)
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Node metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeMetadata {
    /// When the snapshot was created
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    /// When the owning store last wrote the node
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// A named member of a node, classified
///
/// Every name on a node is exactly one of these: a scalar attribute with a
/// concrete value, a declared relationship, or nothing at all. The resolver
/// matches on this instead of probing a node twice.
#[derive(Debug, Clone, PartialEq)]
pub enum Member<'a> {
    /// A scalar attribute with a concrete value
    Attribute(&'a AttributeValue),
    /// A declared relationship; peers live behind the store boundary
    Relationship(Cardinality),
    /// Nothing by this name
    Absent,
}

/// A snapshot of a node in the external graph store
///
/// Carries the node's kind, its scalar attributes, and the relationships it
/// declares. Relationship peers are not part of the snapshot; they are
/// materialized through a store fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,
    /// Schema kind (e.g., "LocationSuite", "Device")
    pub kind: String,
    /// Scalar attributes with concrete values
    #[serde(default)]
    pub attributes: HashMap<String, AttributeValue>,
    /// Declared relationships and their cardinality
    #[serde(default)]
    pub relationships: HashMap<String, Cardinality>,
    /// Node metadata
    #[serde(default)]
    pub metadata: NodeMetadata,
}

impl Node {
    /// Create a new node of the given kind with a random ID
    pub fn new(kind: impl Into<String>) -> Self {
        Self::with_id(NodeId::new(), kind)
    }

    /// Create a new node with a specific ID and kind
    pub fn with_id(id: NodeId, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
            attributes: HashMap::new(),
            relationships: HashMap::new(),
            metadata: NodeMetadata {
                created_at: Some(chrono::Utc::now()),
                ..Default::default()
            },
        }
    }

    /// Add a scalar attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Declare a relationship with the given cardinality
    pub fn with_relationship(mut self, name: impl Into<String>, cardinality: Cardinality) -> Self {
        self.relationships.insert(name.into(), cardinality);
        self
    }

    /// True if the node carries a concrete value for `name`
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Get the concrete value for `name`, if the node carries one
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// True if the node declares a relationship named `name`
    pub fn has_relationship(&self, name: &str) -> bool {
        self.relationships.contains_key(name)
    }

    /// Get the declared cardinality of relationship `name`
    pub fn relationship(&self, name: &str) -> Option<Cardinality> {
        self.relationships.get(name).copied()
    }

    /// True if the node declares the conventional parent link
    pub fn has_parent_link(&self) -> bool {
        self.has_relationship(PARENT_LINK)
    }

    /// Classify `name` as attribute, relationship, or absent
    ///
    /// A concrete attribute wins if a data set declares both; fixture
    /// loading rejects such sets up front.
    pub fn member(&self, name: &str) -> Member<'_> {
        if let Some(value) = self.attributes.get(name) {
            return Member::Attribute(value);
        }
        match self.relationship(name) {
            Some(cardinality) => Member::Relationship(cardinality),
            None => Member::Absent,
        }
    }
}
