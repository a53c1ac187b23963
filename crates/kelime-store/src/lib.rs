//! kelime-store — progress persistence backends.
//!
//! Implements the `ProgressStore` trait for the remote per-user document
//! store and the local single-blob file, plus an in-memory double for
//! tests, and the configuration that selects a backend per session.

pub mod config;
pub mod local;
pub mod memory;
pub mod remote;

pub use config::{create_store, load_config, KelimeConfig, RemoteConfig};
pub use local::LocalStore;
pub use memory::MemoryStore;
pub use remote::RemoteStore;
