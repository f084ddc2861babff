//! Vector backend adapters
//!
//! Implementations of the [`VectorBackend`](vault_application::VectorBackend)
//! port, one per storage engine family.

mod disk;
mod encrypted;
mod factory;
mod flat_index;
mod in_memory;

pub use disk::DiskBackend;
pub use encrypted::{EncryptedIndexSettings, EncryptedRemoteBackend};
pub use factory::{BackendFactory, build_embedder};
pub use flat_index::{FlatIndex, IndexEntry};
pub use in_memory::{InMemoryBackend, build_index};
