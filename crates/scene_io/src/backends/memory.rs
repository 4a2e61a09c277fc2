//! In-memory backend
//!
//! Scratch scenes and tests. Nothing is persisted; `flush` does nothing and
//! the content disappears with the session.

use std::path::Path as FilePath;

use crate::scene::{
    AttributeValue, Bound3, Name, NodeDocument, NodeId, OpenMode, SceneArena, SceneBackend,
    SceneObject, SceneResult, TransformData,
};

/// Scene held entirely in memory
#[derive(Debug)]
pub struct MemoryBackend {
    mode: OpenMode,
    arena: SceneArena,
}

impl MemoryBackend {
    /// Start an empty scene
    pub fn new(mode: OpenMode) -> Self {
        Self {
            mode,
            arena: SceneArena::new(),
        }
    }

    /// Start from an existing tree
    ///
    /// In append mode the tree's samples count as finalized.
    pub fn from_document(document: NodeDocument, mode: OpenMode) -> Self {
        Self {
            mode,
            arena: SceneArena::from_document(document, mode == OpenMode::APPEND),
        }
    }

    fn protect_finalized(&self) -> bool {
        self.mode == OpenMode::APPEND
    }
}

impl SceneBackend for MemoryBackend {
    fn mode(&self) -> OpenMode {
        self.mode
    }

    fn file_name(&self) -> Option<&FilePath> {
        None
    }

    fn root(&self) -> NodeId {
        self.arena.root()
    }

    fn node_parent(&self, node: NodeId) -> SceneResult<Option<NodeId>> {
        self.arena.parent(node)
    }

    fn child(&mut self, parent: NodeId, name: &Name) -> SceneResult<Option<NodeId>> {
        self.arena.child(parent, name)
    }

    fn has_child(&self, parent: NodeId, name: &Name) -> SceneResult<bool> {
        self.arena.has_child(parent, name)
    }

    fn child_names(&self, parent: NodeId) -> SceneResult<Vec<Name>> {
        self.arena.child_names(parent)
    }

    fn create_child(&mut self, parent: NodeId, name: &Name) -> SceneResult<NodeId> {
        self.arena.create_child(parent, name)
    }

    fn has_object(&self, node: NodeId) -> SceneResult<bool> {
        self.arena.has_object(node)
    }

    fn read_object(&self, node: NodeId, time: f64) -> SceneResult<SceneObject> {
        self.arena.read_object(node, time)
    }

    fn write_object(&mut self, node: NodeId, object: &SceneObject, time: f64) -> SceneResult<()> {
        let protect = self.protect_finalized();
        self.arena.write_object(node, object, time, protect)
    }

    fn has_attribute(&self, node: NodeId, name: &Name) -> SceneResult<bool> {
        self.arena.has_attribute(node, name)
    }

    fn attribute_names(&self, node: NodeId) -> SceneResult<Vec<Name>> {
        self.arena.attribute_names(node)
    }

    fn read_attribute(&self, node: NodeId, name: &Name, time: f64) -> SceneResult<AttributeValue> {
        self.arena.read_attribute(node, name, time)
    }

    fn write_attribute(
        &mut self,
        node: NodeId,
        name: &Name,
        value: &AttributeValue,
        time: f64,
    ) -> SceneResult<()> {
        let protect = self.protect_finalized();
        self.arena.write_attribute(node, name, value, time, protect)
    }

    fn has_bound(&self, node: NodeId) -> SceneResult<bool> {
        self.arena.has_bound(node)
    }

    fn read_bound(&self, node: NodeId, time: f64) -> SceneResult<Bound3> {
        self.arena.read_bound(node, time)
    }

    fn write_bound(&mut self, node: NodeId, bound: &Bound3, time: f64) -> SceneResult<()> {
        let protect = self.protect_finalized();
        self.arena.write_bound(node, bound, time, protect)
    }

    fn has_transform(&self, node: NodeId) -> SceneResult<bool> {
        self.arena.has_transform(node)
    }

    fn read_transform(&self, node: NodeId, time: f64) -> SceneResult<TransformData> {
        self.arena.read_transform(node, time)
    }

    fn write_transform(
        &mut self,
        node: NodeId,
        transform: &TransformData,
        time: f64,
    ) -> SceneResult<()> {
        let protect = self.protect_finalized();
        self.arena.write_transform(node, transform, time, protect)
    }

    fn flush(&mut self) -> SceneResult<()> {
        Ok(())
    }
}
