//! # Scene IO
//!
//! Hierarchical, path-addressed storage for time-varying 3D scenes.
//!
//! ## Features
//!
//! - **Path Addressing**: Nodes are located by slash-delimited paths of unbounded depth
//! - **Pluggable Backends**: Formats register by file extension and supported open modes
//! - **Open Modes**: Read, Write and Append sessions with enforced mutation rules
//! - **Missing-Entity Policies**: Throw, return `None`, or create on every lookup
//! - **Time Sampling**: Bounds, transforms, objects and attributes are sampled over time
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_io::prelude::*;
//!
//! fn main() -> Result<(), SceneError> {
//!     let root = SceneInterface::create("/tmp/shot.scc", OpenMode::WRITE)?;
//!     let geo = root.create_child("geo")?;
//!     geo.write_bound(&Bound3::from_corners([0.0; 3], [1.0; 3]), 0.0)?;
//!     drop((geo, root));
//!
//!     let root = SceneInterface::create("/tmp/shot.scc", OpenMode::READ)?;
//!     let geo = root.child_or_throw("geo")?;
//!     println!("{:?}", geo.read_bound(0.0)?);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod foundation;
pub mod config;
pub mod scene;
pub mod backends;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        backends::{MemoryBackend, SceneCacheBackend},
        config::{Config, SceneIoConfig},
        foundation::math::{Mat4, Quat, TransformComponents, Vec3},
        scene::{
            path_to_string, string_to_path, AttributeValue, Bound3, MissingBehaviour, Name,
            OpenMode, Path, SceneError, SceneInterface, SceneObject, SceneResult, TransformData,
        },
    };
}
