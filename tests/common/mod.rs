//! Common test utilities for inheritance walks
//!
//! Shared helpers for loading the location fixture and wrapping stores with
//! fetch counting or injected faults.

use async_trait::async_trait;
use lineage::{Fixture, MemoryStore, Node, NodeId, NodeStore, StoreError, StoreResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a fmt subscriber once so walk logs show up under `--nocapture`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// Load the location hierarchy fixture into a fresh store
///
/// Continents carry transit policies and a NOC contact; metros, buildings,
/// suites, and racks below them carry only their own names.
pub fn location_store() -> MemoryStore {
    let fixture =
        Fixture::from_yaml_str(include_str!("../fixtures/locations.yaml")).expect("locations fixture parses");
    fixture.into_store().expect("locations fixture loads")
}

/// Load the node a walk will start from
pub async fn origin(store: &dyn NodeStore, id: &str) -> Node {
    store
        .get(&NodeId::from_string(id))
        .await
        .expect("store reachable")
        .expect("origin node exists")
}

/// Store wrapper that counts relationship fetches
pub struct CountingStore {
    inner: MemoryStore,
    fetches: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NodeStore for CountingStore {
    async fn get(&self, id: &NodeId) -> StoreResult<Option<Node>> {
        self.inner.get(id).await
    }

    async fn fetch_one(&self, id: &NodeId, relationship: &str) -> StoreResult<Option<Node>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_one(id, relationship).await
    }

    async fn fetch_many(&self, id: &NodeId, relationship: &str) -> StoreResult<Vec<Node>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_many(id, relationship).await
    }
}

/// Store whose fetches always fail, for fault-propagation tests
pub struct FailingStore;

#[async_trait]
impl NodeStore for FailingStore {
    async fn get(&self, _id: &NodeId) -> StoreResult<Option<Node>> {
        Err(StoreError::Unavailable("injected outage".to_string()))
    }

    async fn fetch_one(&self, _id: &NodeId, _relationship: &str) -> StoreResult<Option<Node>> {
        Err(StoreError::Unavailable("injected outage".to_string()))
    }

    async fn fetch_many(&self, _id: &NodeId, _relationship: &str) -> StoreResult<Vec<Node>> {
        Err(StoreError::Unavailable("injected outage".to_string()))
    }
}
