//! Adapters behind the domain ports: storage backends, artifact generators
//! and the mock vertical services.

pub mod artifacts;
pub mod in_memory;
pub mod mock;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
