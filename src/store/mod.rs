//! Store boundary
//!
//! Nodes live in an external system of record; `NodeStore` is the async read
//! boundary the resolver walks through. `MemoryStore` is the bundled
//! implementation for tests and fixture-backed experiments.

mod memory;
mod traits;

pub use memory::MemoryStore;
pub use traits::{NodeStore, StoreError, StoreResult};
