//! In-memory node store
//!
//! Backs tests and local experiments. Holds node snapshots plus a per-node
//! link table; all mutation goes through `&self` so one store can be shared
//! across concurrent tasks.

use super::traits::{NodeStore, StoreError, StoreResult};
use crate::graph::{Cardinality, Node, NodeId};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::collections::HashMap;
use tracing::trace;

/// A stored node and its outbound links
#[derive(Debug, Clone)]
struct Record {
    node: Node,
    links: HashMap<String, Vec<NodeId>>,
}

/// In-memory `NodeStore` backed by a concurrent map
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: DashMap<NodeId, Record>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Insert or replace a node, returning its ID
    ///
    /// Stamps `metadata.updated_at`. Replacing an existing node clears its
    /// outbound links; inbound links from other nodes are untouched.
    pub fn insert(&self, node: Node) -> NodeId {
        let mut node = node;
        node.metadata.updated_at = Some(Utc::now());
        let id = node.id.clone();
        self.records.insert(
            id.clone(),
            Record {
                node,
                links: HashMap::new(),
            },
        );
        id
    }

    /// Link a declared relationship on `source` to `target`
    ///
    /// Both endpoints must already be inserted and `source` must declare the
    /// relationship. A to-one link replaces any existing peer; a to-many
    /// link appends, ignoring duplicates.
    pub fn link(&self, source: &NodeId, relationship: &str, target: &NodeId) -> StoreResult<()> {
        if !self.records.contains_key(target) {
            return Err(StoreError::NodeNotFound(target.clone()));
        }

        let mut record = self
            .records
            .get_mut(source)
            .ok_or_else(|| StoreError::NodeNotFound(source.clone()))?;

        let cardinality = record.node.relationship(relationship).ok_or_else(|| {
            StoreError::UnknownRelationship {
                kind: record.node.kind.clone(),
                relationship: relationship.to_string(),
            }
        })?;

        let peers = record.links.entry(relationship.to_string()).or_default();
        match cardinality {
            Cardinality::One => {
                peers.clear();
                peers.push(target.clone());
            }
            Cardinality::Many => {
                if !peers.contains(target) {
                    peers.push(target.clone());
                }
            }
        }
        Ok(())
    }

    /// Number of stored nodes
    pub fn node_count(&self) -> usize {
        self.records.len()
    }

    /// True if the store holds no nodes
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn snapshot(&self, id: &NodeId) -> StoreResult<Node> {
        self.records
            .get(id)
            .map(|record| record.node.clone())
            .ok_or_else(|| StoreError::NodeNotFound(id.clone()))
    }

    /// Declared cardinality and linked peers for one relationship
    fn peers_of(&self, id: &NodeId, relationship: &str) -> StoreResult<(String, Cardinality, Vec<NodeId>)> {
        let record = self
            .records
            .get(id)
            .ok_or_else(|| StoreError::NodeNotFound(id.clone()))?;

        let kind = record.node.kind.clone();
        let cardinality = record.node.relationship(relationship).ok_or_else(|| {
            StoreError::UnknownRelationship {
                kind: kind.clone(),
                relationship: relationship.to_string(),
            }
        })?;
        let peers = record.links.get(relationship).cloned().unwrap_or_default();
        Ok((kind, cardinality, peers))
    }
}

#[async_trait]
impl NodeStore for MemoryStore {
    async fn get(&self, id: &NodeId) -> StoreResult<Option<Node>> {
        Ok(self.records.get(id).map(|record| record.node.clone()))
    }

    async fn fetch_one(&self, id: &NodeId, relationship: &str) -> StoreResult<Option<Node>> {
        let (kind, cardinality, peers) = self.peers_of(id, relationship)?;
        if cardinality != Cardinality::One {
            return Err(StoreError::CardinalityMismatch {
                kind,
                relationship: relationship.to_string(),
                expected: Cardinality::One,
                actual: cardinality,
            });
        }

        trace!(node = %id, relationship, populated = !peers.is_empty(), "fetch to-one peer");
        match peers.first() {
            Some(peer) => Ok(Some(self.snapshot(peer)?)),
            None => Ok(None),
        }
    }

    async fn fetch_many(&self, id: &NodeId, relationship: &str) -> StoreResult<Vec<Node>> {
        let (kind, cardinality, peers) = self.peers_of(id, relationship)?;
        if cardinality != Cardinality::Many {
            return Err(StoreError::CardinalityMismatch {
                kind,
                relationship: relationship.to_string(),
                expected: Cardinality::Many,
                actual: cardinality,
            });
        }

        trace!(node = %id, relationship, peers = peers.len(), "fetch to-many peers");
        peers.iter().map(|peer| self.snapshot(peer)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PARENT_LINK;

    fn rack() -> Node {
        Node::with_id(NodeId::from_string("rack-3255"), "LocationRack")
            .with_attribute("name", "rack-3255")
            .with_relationship(PARENT_LINK, Cardinality::One)
    }

    fn suite() -> Node {
        Node::with_id(NodeId::from_string("suite-325"), "LocationSuite")
            .with_attribute("name", "suite-325")
            .with_relationship("children", Cardinality::Many)
    }

    #[tokio::test]
    async fn insert_and_get_roundtrip() {
        let store = MemoryStore::new();
        let id = store.insert(rack());

        let loaded = store.get(&id).await.unwrap().unwrap();
        assert_eq!(loaded.kind, "LocationRack");
        assert_eq!(loaded.attribute("name").and_then(|v| v.as_str()), Some("rack-3255"));
    }

    #[tokio::test]
    async fn get_unknown_node_is_none() {
        let store = MemoryStore::new();
        let missing = store.get(&NodeId::from_string("nope")).await.unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn insert_stamps_updated_at() {
        let store = MemoryStore::new();
        let node = rack();
        assert!(node.metadata.updated_at.is_none());

        let id = store.insert(node);
        let record = store.snapshot(&id).unwrap();
        assert!(record.metadata.updated_at.is_some());
    }

    #[test]
    fn link_requires_declared_relationship() {
        let store = MemoryStore::new();
        let rack_id = store.insert(rack());
        let suite_id = store.insert(suite());

        let err = store.link(&rack_id, "power_feed", &suite_id).unwrap_err();
        assert!(matches!(err, StoreError::UnknownRelationship { .. }));
    }

    #[test]
    fn link_requires_both_endpoints() {
        let store = MemoryStore::new();
        let rack_id = store.insert(rack());

        let err = store
            .link(&rack_id, PARENT_LINK, &NodeId::from_string("ghost"))
            .unwrap_err();
        assert!(matches!(err, StoreError::NodeNotFound(_)));
    }

    #[tokio::test]
    async fn to_one_link_replaces_existing_peer() {
        let store = MemoryStore::new();
        let rack_id = store.insert(rack());
        let first = store.insert(Node::with_id(NodeId::from_string("suite-1"), "LocationSuite"));
        let second = store.insert(Node::with_id(NodeId::from_string("suite-2"), "LocationSuite"));

        store.link(&rack_id, PARENT_LINK, &first).unwrap();
        store.link(&rack_id, PARENT_LINK, &second).unwrap();

        let peer = store.fetch_one(&rack_id, PARENT_LINK).await.unwrap().unwrap();
        assert_eq!(peer.id, second);
    }

    #[tokio::test]
    async fn to_many_link_appends_and_dedupes() {
        let store = MemoryStore::new();
        let suite_id = store.insert(suite());
        let rack_id = store.insert(rack());
        let rack2_id = store.insert(Node::with_id(NodeId::from_string("rack-3256"), "LocationRack"));

        store.link(&suite_id, "children", &rack_id).unwrap();
        store.link(&suite_id, "children", &rack_id).unwrap();
        store.link(&suite_id, "children", &rack2_id).unwrap();

        let peers = store.fetch_many(&suite_id, "children").await.unwrap();
        let ids: Vec<&str> = peers.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["rack-3255", "rack-3256"]);
    }

    #[tokio::test]
    async fn fetch_one_on_unlinked_relationship_is_none() {
        let store = MemoryStore::new();
        let rack_id = store.insert(rack());

        let peer = store.fetch_one(&rack_id, PARENT_LINK).await.unwrap();
        assert!(peer.is_none());
    }

    #[tokio::test]
    async fn fetch_one_rejects_to_many_relationship() {
        let store = MemoryStore::new();
        let suite_id = store.insert(suite());

        let err = store.fetch_one(&suite_id, "children").await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::CardinalityMismatch {
                expected: Cardinality::One,
                actual: Cardinality::Many,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn fetch_many_rejects_to_one_relationship() {
        let store = MemoryStore::new();
        let rack_id = store.insert(rack());

        let err = store.fetch_many(&rack_id, PARENT_LINK).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::CardinalityMismatch {
                expected: Cardinality::Many,
                actual: Cardinality::One,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn reinsert_clears_outbound_links() {
        let store = MemoryStore::new();
        let rack_id = store.insert(rack());
        let suite_id = store.insert(suite());
        store.link(&rack_id, PARENT_LINK, &suite_id).unwrap();

        store.insert(rack());

        let peer = store.fetch_one(&rack_id, PARENT_LINK).await.unwrap();
        assert!(peer.is_none());
    }

    #[test]
    fn node_count_tracks_inserts() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.insert(rack());
        store.insert(suite());
        assert_eq!(store.node_count(), 2);

        // Re-inserting the same ID is an upsert, not a new node
        store.insert(rack());
        assert_eq!(store.node_count(), 2);
    }
}
