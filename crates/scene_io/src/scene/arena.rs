//! Session-owned node table
//!
//! Nodes live in a slot map keyed by [`NodeId`]; parents and children refer
//! to each other by id. Children loaded from a [`NodeDocument`] stay pending
//! until first navigated, so opening a large cache only materializes the
//! nodes a client actually visits. Nodes are never removed during a session,
//! so every id handed out stays valid for the arena's lifetime.

use std::collections::BTreeMap;

use slotmap::SlotMap;

use super::data::{AttributeValue, Bound3, SceneObject, TransformData};
use super::document::{NodeData, NodeDocument};
use super::error::{SceneError, SceneField, SceneResult};
use super::path::{Name, Path};
use super::samples::{FinalizedSample, Sampled};

slotmap::new_key_type! {
    /// Stable id of a node within one session
    pub struct NodeId;
}

/// A child slot: either materialized in the arena or still a parsed document
#[derive(Debug)]
enum ChildEntry {
    Loaded(NodeId),
    Pending(Box<NodeDocument>),
}

/// One node of the scene
#[derive(Debug)]
struct NodeRecord {
    name: Option<Name>,
    parent: Option<NodeId>,
    data: NodeData,
    children: BTreeMap<Name, ChildEntry>,
}

/// Node table for one scene session
#[derive(Debug)]
pub struct SceneArena {
    nodes: SlotMap<NodeId, NodeRecord>,
    root: NodeId,
    finalize_loaded: bool,
}

impl Default for SceneArena {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneArena {
    /// Create an arena holding only an empty root
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeRecord {
            name: None,
            parent: None,
            data: NodeData::default(),
            children: BTreeMap::new(),
        });
        Self {
            nodes,
            root,
            finalize_loaded: false,
        }
    }

    /// Create an arena from a document tree
    ///
    /// With `finalize`, every sample read from the document is marked
    /// finalized as its node is materialized.
    pub fn from_document(document: NodeDocument, finalize: bool) -> Self {
        let mut nodes = SlotMap::with_key();
        let mut arena_root = NodeRecord {
            name: None,
            parent: None,
            data: document.data,
            children: BTreeMap::new(),
        };
        if finalize {
            arena_root.data.finalize();
        }
        arena_root.children = document
            .children
            .into_iter()
            .map(|(name, child)| (name, ChildEntry::Pending(Box::new(child))))
            .collect();

        let root = nodes.insert(arena_root);
        Self {
            nodes,
            root,
            finalize_loaded: finalize,
        }
    }

    /// Id of the root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of materialized nodes
    pub fn loaded_count(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, id: NodeId) -> SceneResult<&NodeRecord> {
        self.nodes
            .get(id)
            .ok_or_else(|| SceneError::BackendIo(format!("stale node id {id:?}")))
    }

    fn node_mut(&mut self, id: NodeId) -> SceneResult<&mut NodeRecord> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| SceneError::BackendIo(format!("stale node id {id:?}")))
    }

    /// Parent of a node, `None` for the root
    pub fn parent(&self, id: NodeId) -> SceneResult<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    /// Full path of a node
    pub fn path(&self, id: NodeId) -> SceneResult<Path> {
        let mut segments = Vec::new();
        let mut current = self.node(id)?;
        while let Some(parent) = current.parent {
            if let Some(name) = &current.name {
                segments.push(name.clone());
            }
            current = self.node(parent)?;
        }
        segments.reverse();
        Ok(Path::from_names(segments))
    }

    /// Look up a child, materializing it if it is still pending
    pub fn child(&mut self, parent: NodeId, name: &Name) -> SceneResult<Option<NodeId>> {
        let record = self.node_mut(parent)?;
        match record.children.get(name) {
            None => return Ok(None),
            Some(ChildEntry::Loaded(id)) => return Ok(Some(*id)),
            Some(ChildEntry::Pending(_)) => {}
        }

        let Some(ChildEntry::Pending(document)) = record.children.remove(name) else {
            return Ok(None);
        };
        let id = self.insert_document(parent, name.clone(), *document);
        self.node_mut(parent)?
            .children
            .insert(name.clone(), ChildEntry::Loaded(id));

        log::debug!("Materialized {}", self.path(id)?);
        Ok(Some(id))
    }

    fn insert_document(&mut self, parent: NodeId, name: Name, document: NodeDocument) -> NodeId {
        let mut data = document.data;
        if self.finalize_loaded {
            data.finalize();
        }
        let children = document
            .children
            .into_iter()
            .map(|(name, child)| (name, ChildEntry::Pending(Box::new(child))))
            .collect();

        self.nodes.insert(NodeRecord {
            name: Some(name),
            parent: Some(parent),
            data,
            children,
        })
    }

    /// Whether a child exists, without materializing it
    pub fn has_child(&self, parent: NodeId, name: &Name) -> SceneResult<bool> {
        Ok(self.node(parent)?.children.contains_key(name))
    }

    /// Child names in sorted order
    pub fn child_names(&self, parent: NodeId) -> SceneResult<Vec<Name>> {
        Ok(self.node(parent)?.children.keys().cloned().collect())
    }

    /// Add an empty child, failing if the name is taken
    pub fn create_child(&mut self, parent: NodeId, name: &Name) -> SceneResult<NodeId> {
        if self.has_child(parent, name)? {
            return Err(SceneError::DuplicateEntity {
                path: self.path(parent)?.child(name.clone()),
            });
        }

        let id = self.nodes.insert(NodeRecord {
            name: Some(name.clone()),
            parent: Some(parent),
            data: NodeData::default(),
            children: BTreeMap::new(),
        });
        self.node_mut(parent)?
            .children
            .insert(name.clone(), ChildEntry::Loaded(id));

        log::debug!("Created {}", self.path(id)?);
        Ok(id)
    }

    fn read_sample<T: Clone>(
        &self,
        id: NodeId,
        samples: Option<&Sampled<T>>,
        time: f64,
        field: SceneField,
    ) -> SceneResult<T> {
        match samples.and_then(|samples| samples.get(time)) {
            Some(value) => Ok(value.clone()),
            None => Err(SceneError::NoDataAtPath {
                path: self.path(id)?,
                field,
            }),
        }
    }

    fn finalized_error(
        &self,
        id: NodeId,
        field: SceneField,
        rejected: FinalizedSample,
    ) -> SceneError {
        match self.path(id) {
            Ok(path) => SceneError::FinalizedData {
                path,
                field,
                time: rejected.time,
            },
            Err(error) => error,
        }
    }

    /// Whether any object sample exists
    pub fn has_object(&self, id: NodeId) -> SceneResult<bool> {
        Ok(!self.node(id)?.data.objects.is_empty())
    }

    /// Object sample for a time
    pub fn read_object(&self, id: NodeId, time: f64) -> SceneResult<SceneObject> {
        let samples = &self.node(id)?.data.objects;
        self.read_sample(id, Some(samples), time, SceneField::Object)
    }

    /// Store an object sample
    pub fn write_object(
        &mut self,
        id: NodeId,
        object: &SceneObject,
        time: f64,
        protect_finalized: bool,
    ) -> SceneResult<()> {
        let result = self
            .node_mut(id)?
            .data
            .objects
            .insert(time, object.clone(), protect_finalized);
        result.map_err(|rejected| self.finalized_error(id, SceneField::Object, rejected))
    }

    /// Whether an attribute has any sample
    pub fn has_attribute(&self, id: NodeId, name: &Name) -> SceneResult<bool> {
        Ok(self.node(id)?.data.attributes.contains_key(name))
    }

    /// Attribute names in sorted order
    pub fn attribute_names(&self, id: NodeId) -> SceneResult<Vec<Name>> {
        Ok(self.node(id)?.data.attributes.keys().cloned().collect())
    }

    /// Attribute sample for a time
    pub fn read_attribute(
        &self,
        id: NodeId,
        name: &Name,
        time: f64,
    ) -> SceneResult<AttributeValue> {
        let samples = self.node(id)?.data.attributes.get(name);
        self.read_sample(id, samples, time, SceneField::Attribute(name.to_string()))
    }

    /// Store an attribute sample
    pub fn write_attribute(
        &mut self,
        id: NodeId,
        name: &Name,
        value: &AttributeValue,
        time: f64,
        protect_finalized: bool,
    ) -> SceneResult<()> {
        let result = self
            .node_mut(id)?
            .data
            .attributes
            .entry(name.clone())
            .or_default()
            .insert(time, value.clone(), protect_finalized);
        result.map_err(|rejected| {
            self.finalized_error(id, SceneField::Attribute(name.to_string()), rejected)
        })
    }

    /// Whether any bound sample exists
    pub fn has_bound(&self, id: NodeId) -> SceneResult<bool> {
        Ok(!self.node(id)?.data.bounds.is_empty())
    }

    /// Bound sample for a time
    pub fn read_bound(&self, id: NodeId, time: f64) -> SceneResult<Bound3> {
        let samples = &self.node(id)?.data.bounds;
        self.read_sample(id, Some(samples), time, SceneField::Bound)
    }

    /// Store a bound sample
    pub fn write_bound(
        &mut self,
        id: NodeId,
        bound: &Bound3,
        time: f64,
        protect_finalized: bool,
    ) -> SceneResult<()> {
        let result = self
            .node_mut(id)?
            .data
            .bounds
            .insert(time, *bound, protect_finalized);
        result.map_err(|rejected| self.finalized_error(id, SceneField::Bound, rejected))
    }

    /// Whether any transform sample exists
    pub fn has_transform(&self, id: NodeId) -> SceneResult<bool> {
        Ok(!self.node(id)?.data.transforms.is_empty())
    }

    /// Transform sample for a time
    pub fn read_transform(&self, id: NodeId, time: f64) -> SceneResult<TransformData> {
        let samples = &self.node(id)?.data.transforms;
        self.read_sample(id, Some(samples), time, SceneField::Transform)
    }

    /// Store a transform sample
    pub fn write_transform(
        &mut self,
        id: NodeId,
        transform: &TransformData,
        time: f64,
        protect_finalized: bool,
    ) -> SceneResult<()> {
        let result = self
            .node_mut(id)?
            .data
            .transforms
            .insert(time, transform.clone(), protect_finalized);
        result.map_err(|rejected| self.finalized_error(id, SceneField::Transform, rejected))
    }

    /// Copy the whole scene, pending subtrees included, into a document
    pub fn to_document(&self) -> SceneResult<NodeDocument> {
        self.node_to_document(self.root)
    }

    fn node_to_document(&self, id: NodeId) -> SceneResult<NodeDocument> {
        let record = self.node(id)?;
        let mut children = BTreeMap::new();
        for (name, entry) in &record.children {
            let child = match entry {
                ChildEntry::Loaded(child_id) => self.node_to_document(*child_id)?,
                ChildEntry::Pending(document) => document.as_ref().clone(),
            };
            children.insert(name.clone(), child);
        }

        Ok(NodeDocument {
            data: record.data.clone(),
            children,
        })
    }
}
