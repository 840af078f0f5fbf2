//! Adapters for the domain ports: storage backends, the remote HTTP client
//! and logging.

pub mod http_remote;
pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
pub mod telemetry;
