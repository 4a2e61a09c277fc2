//! Bundled scene backends
//!
//! - [`MemoryBackend`]: in-memory scenes, nothing persisted
//! - [`SceneCacheBackend`]: `.scc` files, registered with the registry by default

mod memory;
mod scene_cache;

pub use memory::MemoryBackend;
pub use scene_cache::SceneCacheBackend;
