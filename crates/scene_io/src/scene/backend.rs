//! Backend abstraction for scene storage
//!
//! A backend owns the storage of one opened scene (a session). Nodes are
//! addressed by [`NodeId`]s the backend hands out; [`SceneInterface`] pairs an
//! id with its path and the shared session, and performs the open-mode checks
//! before any of these methods is called.
//!
//! Backends are not required to be `Send` or `Sync`: a session is used from
//! one thread at a time.
//!
//! [`SceneInterface`]: super::interface::SceneInterface

use std::path::Path as FilePath;

use super::arena::NodeId;
use super::data::{AttributeValue, Bound3, SceneObject, TransformData};
use super::error::SceneResult;
use super::open_mode::OpenMode;
use super::path::Name;

/// Storage contract every scene backend implements
pub trait SceneBackend {
    /// Mode the session was opened with
    fn mode(&self) -> OpenMode;

    /// File backing the session, if any
    fn file_name(&self) -> Option<&FilePath>;

    /// Id of the root node
    fn root(&self) -> NodeId;

    /// Parent of a node, `None` for the root
    fn node_parent(&self, node: NodeId) -> SceneResult<Option<NodeId>>;

    /// Look up a child by name, loading it on demand
    fn child(&mut self, parent: NodeId, name: &Name) -> SceneResult<Option<NodeId>>;

    /// Whether a child exists
    fn has_child(&self, parent: NodeId, name: &Name) -> SceneResult<bool>;

    /// Child names, in a stable order
    fn child_names(&self, parent: NodeId) -> SceneResult<Vec<Name>>;

    /// Create a child, failing with `DuplicateEntity` if it exists
    fn create_child(&mut self, parent: NodeId, name: &Name) -> SceneResult<NodeId>;

    /// Whether the node holds an object
    fn has_object(&self, node: NodeId) -> SceneResult<bool>;

    /// Read the object at a time
    fn read_object(&self, node: NodeId, time: f64) -> SceneResult<SceneObject>;

    /// Write the object at a time
    fn write_object(&mut self, node: NodeId, object: &SceneObject, time: f64) -> SceneResult<()>;

    /// Whether the node holds the named attribute
    fn has_attribute(&self, node: NodeId, name: &Name) -> SceneResult<bool>;

    /// Names of the node's attributes
    fn attribute_names(&self, node: NodeId) -> SceneResult<Vec<Name>>;

    /// Read an attribute at a time
    fn read_attribute(&self, node: NodeId, name: &Name, time: f64) -> SceneResult<AttributeValue>;

    /// Write an attribute at a time
    fn write_attribute(
        &mut self,
        node: NodeId,
        name: &Name,
        value: &AttributeValue,
        time: f64,
    ) -> SceneResult<()>;

    /// Whether the node holds a bound
    fn has_bound(&self, node: NodeId) -> SceneResult<bool>;

    /// Read the bound at a time
    fn read_bound(&self, node: NodeId, time: f64) -> SceneResult<Bound3>;

    /// Write the bound at a time
    fn write_bound(&mut self, node: NodeId, bound: &Bound3, time: f64) -> SceneResult<()>;

    /// Whether the node holds a transform
    fn has_transform(&self, node: NodeId) -> SceneResult<bool>;

    /// Read the transform at a time
    fn read_transform(&self, node: NodeId, time: f64) -> SceneResult<TransformData>;

    /// Write the transform at a time
    fn write_transform(
        &mut self,
        node: NodeId,
        transform: &TransformData,
        time: f64,
    ) -> SceneResult<()>;

    /// Persist pending writes
    fn flush(&mut self) -> SceneResult<()>;
}
