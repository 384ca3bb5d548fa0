//! Declarative node-set fixtures
//!
//! Loads a YAML or JSON document describing nodes, attributes, and links
//! into a `MemoryStore`. The shape mirrors a hierarchy export: a flat node
//! list, with relationships naming their peers by ID.
//!
//! ```yaml
//! nodes:
//!   - id: europe
//!     kind: LocationContinent
//!     attributes:
//!       transit_policy_in: RM_TRANSIT_EMEA_IN
//!   - id: frankfurt
//!     kind: LocationMetro
//!     relationships:
//!       parent: { cardinality: one, peers: [europe] }
//! ```

use crate::graph::{AttributeValue, Cardinality, Node, NodeId};
use crate::store::{MemoryStore, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading or validating a fixture
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported fixture extension: {0:?}")]
    UnsupportedFormat(String),

    #[error("duplicate node id: {0}")]
    DuplicateNode(NodeId),

    #[error("{node}: {name} is declared as both an attribute and a relationship")]
    DuplicateMember { node: NodeId, name: String },

    #[error("{node}: relationship {relationship} names unknown peer {peer}")]
    UnknownPeer {
        node: NodeId,
        relationship: String,
        peer: NodeId,
    },

    #[error("{node}: to-one relationship {relationship} lists {count} peers")]
    TooManyPeers {
        node: NodeId,
        relationship: String,
        count: usize,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A declared relationship in a fixture document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureRelationship {
    pub cardinality: Cardinality,
    /// IDs of linked peers; empty means declared but unpopulated
    #[serde(default)]
    pub peers: Vec<NodeId>,
}

/// A node entry in a fixture document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureNode {
    pub id: NodeId,
    pub kind: String,
    #[serde(default)]
    pub attributes: HashMap<String, AttributeValue>,
    #[serde(default)]
    pub relationships: HashMap<String, FixtureRelationship>,
}

/// A parsed fixture document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub nodes: Vec<FixtureNode>,
}

impl Fixture {
    /// Parse a YAML fixture document
    pub fn from_yaml_str(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a JSON fixture document
    pub fn from_json_str(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a fixture from a `.yaml`/`.yml` or `.json` file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            Some("json") => Self::from_json_str(&text),
            other => Err(FixtureError::UnsupportedFormat(other.unwrap_or("").to_string())),
        }
    }

    /// Number of node entries in the document
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Validate the document and load it into a fresh `MemoryStore`
    ///
    /// Validation runs before any insert: IDs must be unique, no name may
    /// be both an attribute and a relationship on one node, every peer must
    /// name a node in the document, and a to-one relationship may list at
    /// most one peer.
    pub fn into_store(self) -> Result<MemoryStore, FixtureError> {
        let mut known: HashSet<NodeId> = HashSet::new();
        for entry in &self.nodes {
            if !known.insert(entry.id.clone()) {
                return Err(FixtureError::DuplicateNode(entry.id.clone()));
            }
            for name in entry.relationships.keys() {
                if entry.attributes.contains_key(name) {
                    return Err(FixtureError::DuplicateMember {
                        node: entry.id.clone(),
                        name: name.clone(),
                    });
                }
            }
        }

        for entry in &self.nodes {
            for (name, relationship) in &entry.relationships {
                if relationship.cardinality == Cardinality::One && relationship.peers.len() > 1 {
                    return Err(FixtureError::TooManyPeers {
                        node: entry.id.clone(),
                        relationship: name.clone(),
                        count: relationship.peers.len(),
                    });
                }
                for peer in &relationship.peers {
                    if !known.contains(peer) {
                        return Err(FixtureError::UnknownPeer {
                            node: entry.id.clone(),
                            relationship: name.clone(),
                            peer: peer.clone(),
                        });
                    }
                }
            }
        }

        let store = MemoryStore::new();
        for entry in &self.nodes {
            let mut node = Node::with_id(entry.id.clone(), entry.kind.clone());
            for (name, value) in &entry.attributes {
                node = node.with_attribute(name.clone(), value.clone());
            }
            for (name, relationship) in &entry.relationships {
                node = node.with_relationship(name.clone(), relationship.cardinality);
            }
            store.insert(node);
        }
        for entry in &self.nodes {
            for (name, relationship) in &entry.relationships {
                for peer in &relationship.peers {
                    store.link(&entry.id, name, peer)?;
                }
            }
        }

        debug!(nodes = self.nodes.len(), "fixture loaded into memory store");
        Ok(store)
    }
}
