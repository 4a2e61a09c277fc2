//! Hierarchical scene storage
//!
//! A scene is a tree of named nodes addressed by slash-delimited [`Path`]s.
//! Each node carries a time-sampled bound, transform, optional object and any
//! number of named attributes. Scenes are opened through the [`registry`],
//! which picks a backend from the file extension, and navigated through
//! [`SceneInterface`] handles.
//!
//! ## Architecture
//!
//! ```text
//! SceneInterface (handle: node id + path)
//!      ↓   open-mode checks
//! SceneBackend (one per opened scene)
//!      ↓
//! SceneArena (slot map of nodes) ⇄ SceneDocument (on disk)
//! ```

pub mod path;
pub mod open_mode;
pub mod error;
pub mod data;
pub mod samples;
pub mod document;
pub mod arena;
pub mod backend;
pub mod registry;
pub mod interface;

#[cfg(test)]
mod tests;

pub use path::{path_to_string, string_to_path, string_to_path_with, Name, Path, PathPolicy};
pub use open_mode::OpenMode;
pub use error::{SceneError, SceneField, SceneResult};
pub use data::{
    AttributeValue, Bound3, Camera, MeshPrimitive, PointsPrimitive, SceneObject, TransformData,
};
pub use samples::Sampled;
pub use document::{NodeData, NodeDocument, SceneDocument, DOCUMENT_VERSION};
pub use arena::{NodeId, SceneArena};
pub use backend::SceneBackend;
pub use registry::{
    backend_modes, register_backend, supported_extensions, unregister_backend, BackendFactory,
};
pub use interface::{MissingBehaviour, SceneInterface};
