//! Lineage: Hierarchical Attribute Inheritance
//!
//! Nodes in a graph-backed network inventory rarely carry every attribute
//! directly: a suite inherits its transit policies from the building, the
//! metro, or the continent above it. Lineage models those node snapshots,
//! the async store boundary they are fetched through, and the walk that
//! finds an attribute's effective value along the parent chain.
//!
//! # Core Concepts
//!
//! - **Nodes**: Snapshots of inventory objects with kinds, scalar
//!   attributes, and declared relationships
//! - **Stores**: The async read boundary peers are fetched through, one
//!   fetch per ancestor hop
//! - **Resolution**: The inheritance walk, with an explicit hop budget
//!
//! # Example
//!
//! ```
//! use lineage::{Cardinality, MemoryStore, Node, NodeStore, ResolveQuery, PARENT_LINK};
//!
//! tokio_test::block_on(async {
//!     let store = MemoryStore::new();
//!     let continent = store.insert(
//!         Node::new("LocationContinent").with_attribute("transit_policy_in", "RM_TRANSIT_EMEA_IN"),
//!     );
//!     let country = store.insert(
//!         Node::new("LocationCountry").with_relationship(PARENT_LINK, Cardinality::One),
//!     );
//!     store.link(&country, PARENT_LINK, &continent).unwrap();
//!
//!     let origin = store.get(&country).await.unwrap().unwrap();
//!     let policy = ResolveQuery::new(origin, "transit_policy_in")
//!         .execute(&store)
//!         .await
//!         .unwrap();
//!     assert_eq!(policy.as_value().and_then(|v| v.as_str()), Some("RM_TRANSIT_EMEA_IN"));
//! });
//! ```

mod graph;
pub mod fixture;
pub mod resolve;
pub mod store;

pub use fixture::{Fixture, FixtureError, FixtureNode, FixtureRelationship};
pub use graph::{AttributeValue, Cardinality, Member, Node, NodeId, NodeMetadata, PARENT_LINK};
pub use resolve::{Resolved, ResolveError, ResolveQuery, DEFAULT_MAX_DEPTH};
pub use store::{MemoryStore, NodeStore, StoreError, StoreResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
