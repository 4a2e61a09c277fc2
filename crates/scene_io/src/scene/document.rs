//! Serializable tree form of a scene
//!
//! Backends that persist whole scenes (the `.scc` cache) read and write this
//! tree; the in-session representation is the [`SceneArena`](super::arena::SceneArena).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::data::{AttributeValue, Bound3, SceneObject, TransformData};
use super::path::Name;
use super::samples::Sampled;

/// Current layout version of [`SceneDocument`]
pub const DOCUMENT_VERSION: u32 = 1;

/// Time-sampled fields of one node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeData {
    /// Bounding box samples
    pub bounds: Sampled<Bound3>,
    /// Local transform samples
    pub transforms: Sampled<TransformData>,
    /// Object payload samples
    pub objects: Sampled<SceneObject>,
    /// Attribute samples by name
    pub attributes: BTreeMap<Name, Sampled<AttributeValue>>,
}

impl NodeData {
    /// Mark every sample as finalized
    pub fn finalize(&mut self) {
        self.bounds.finalize();
        self.transforms.finalize();
        self.objects.finalize();
        for samples in self.attributes.values_mut() {
            samples.finalize();
        }
    }
}

/// One node and its subtree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeDocument {
    /// The node's own fields
    pub data: NodeData,
    /// Children by name
    pub children: BTreeMap<Name, NodeDocument>,
}

impl NodeDocument {
    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(Self::node_count).sum::<usize>()
    }
}

/// A whole scene as written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Layout version, see [`DOCUMENT_VERSION`]
    pub version: u32,
    /// Root node
    pub root: NodeDocument,
}

impl SceneDocument {
    /// Wrap a root node at the current layout version
    pub fn new(root: NodeDocument) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            root,
        }
    }
}
