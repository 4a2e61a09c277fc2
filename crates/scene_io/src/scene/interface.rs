//! Scene handles
//!
//! A [`SceneInterface`] is a view of one node of an opened scene: the
//! node's id and path plus a shared reference to the session's backend.
//! Cloning a handle is cheap and yields another view of the same node.
//! The session ends, flushing pending writes, when its last handle is
//! dropped.
//!
//! Handles are `!Send`. Handles of one session must stay on the thread that
//! opened it; independent sessions may live on different threads. Opening
//! the same file twice at once is undefined and must be avoided.

use std::cell::RefCell;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

use super::arena::NodeId;
use super::backend::SceneBackend;
use super::data::{AttributeValue, Bound3, SceneObject, TransformData};
use super::error::{SceneError, SceneResult};
use super::open_mode::OpenMode;
use super::path::{path_to_string, Name, Path, ROOT_NAME};
use super::registry;
use crate::foundation::math::Mat4;

/// What navigation does when the requested node does not exist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingBehaviour {
    /// Fail with `EntityNotFound`
    #[default]
    ThrowIfMissing,
    /// Return `None`
    NullIfMissing,
    /// Create the node; only legal on writable sessions
    CreateIfMissing,
}

type Session = Rc<RefCell<dyn SceneBackend>>;

/// Handle to one node of an opened scene
#[derive(Clone)]
pub struct SceneInterface {
    session: Session,
    node: NodeId,
    path: Path,
}

impl fmt::Debug for SceneInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneInterface")
            .field("path", &path_to_string(&self.path))
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}

impl SceneInterface {
    /// Open a scene file through the backend registered for its extension
    pub fn create(path: impl AsRef<std::path::Path>, mode: OpenMode) -> SceneResult<Self> {
        registry::create(path.as_ref(), mode)
    }

    /// Extensions whose backends support any of `modes`
    pub fn supported_extensions(modes: OpenMode) -> Vec<String> {
        registry::supported_extensions(modes)
    }

    /// Start a session over a backend and return its root handle
    pub fn from_backend<B: SceneBackend + 'static>(backend: B) -> Self {
        let node = backend.root();
        let session: Session = Rc::new(RefCell::new(backend));
        Self {
            session,
            node,
            path: Path::root(),
        }
    }

    fn handle(&self, node: NodeId, path: Path) -> Self {
        Self {
            session: Rc::clone(&self.session),
            node,
            path,
        }
    }

    fn guard_write(&self, operation: &'static str) -> SceneResult<()> {
        if self.mode().is_read_only() {
            return Err(SceneError::ReadOnlyViolation {
                operation,
                path: self.path.clone(),
            });
        }
        Ok(())
    }

    /// Mode the session was opened with
    pub fn mode(&self) -> OpenMode {
        self.session.borrow().mode()
    }

    /// File backing the session, if any
    pub fn file_name(&self) -> Option<PathBuf> {
        self.session.borrow().file_name().map(std::path::Path::to_path_buf)
    }

    /// Last path segment, `/` for the root
    pub fn name(&self) -> &str {
        self.path.name().map_or(ROOT_NAME, Name::as_str)
    }

    /// Path from the root
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path from the root in string form
    pub fn path_as_string(&self) -> String {
        path_to_string(&self.path)
    }

    /// Whether two handles view the same node of the same session
    pub fn same_node(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.session, &other.session) && self.node == other.node
    }

    /// Handle to the root of this session
    pub fn root(&self) -> Self {
        let node = self.session.borrow().root();
        self.handle(node, Path::root())
    }

    /// Handle to the parent, `None` at the root
    pub fn parent(&self) -> SceneResult<Option<Self>> {
        let Some(parent_path) = self.path.parent() else {
            return Ok(None);
        };
        let parent = self.session.borrow().node_parent(self.node)?;
        Ok(parent.map(|node| self.handle(node, parent_path)))
    }

    /// Whether a child of that name exists
    pub fn has_child(&self, name: &str) -> SceneResult<bool> {
        let name = Name::new(name)?;
        self.session.borrow().has_child(self.node, &name)
    }

    /// Names of the children, in stable sorted order
    pub fn child_names(&self) -> SceneResult<Vec<Name>> {
        self.session.borrow().child_names(self.node)
    }

    /// Look up a child under a missing-entity policy
    pub fn child(&self, name: &str, missing: MissingBehaviour) -> SceneResult<Option<Self>> {
        let name = Name::new(name)?;
        self.child_by_name(&name, missing)
    }

    /// Look up a child, failing if it is missing
    pub fn child_or_throw(&self, name: &str) -> SceneResult<Self> {
        self.child(name, MissingBehaviour::ThrowIfMissing)?
            .ok_or_else(|| SceneError::EntityNotFound {
                path: self.path.clone(),
            })
    }

    fn child_by_name(&self, name: &Name, missing: MissingBehaviour) -> SceneResult<Option<Self>> {
        if missing == MissingBehaviour::CreateIfMissing {
            self.guard_write("create child")?;
        }

        let found = self.session.borrow_mut().child(self.node, name)?;
        let path = self.path.child(name.clone());
        match (found, missing) {
            (Some(node), _) => Ok(Some(self.handle(node, path))),
            (None, MissingBehaviour::ThrowIfMissing) => Err(SceneError::EntityNotFound { path }),
            (None, MissingBehaviour::NullIfMissing) => Ok(None),
            (None, MissingBehaviour::CreateIfMissing) => {
                let node = self.session.borrow_mut().create_child(self.node, name)?;
                Ok(Some(self.handle(node, path)))
            }
        }
    }

    /// Resolve a path relative to this node under a missing-entity policy
    ///
    /// The policy applies at the first missing segment. `CreateIfMissing`
    /// creates every missing segment along the way, not only the leaf.
    pub fn scene(&self, path: &Path, missing: MissingBehaviour) -> SceneResult<Option<Self>> {
        if missing == MissingBehaviour::CreateIfMissing {
            self.guard_write("create scene")?;
        }

        let mut current = self.clone();
        for segment in path.segments() {
            match current.child_by_name(segment, missing)? {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Resolve a path relative to this node, failing if any segment is missing
    pub fn scene_or_throw(&self, path: &Path) -> SceneResult<Self> {
        self.scene(path, MissingBehaviour::ThrowIfMissing)?
            .ok_or_else(|| SceneError::EntityNotFound {
                path: self.path.join(path),
            })
    }

    /// Create a new child, failing if the name is taken
    pub fn create_child(&self, name: &str) -> SceneResult<Self> {
        self.guard_write("create child")?;
        let name = Name::new(name)?;
        let node = self.session.borrow_mut().create_child(self.node, &name)?;
        Ok(self.handle(node, self.path.child(name)))
    }

    /// Whether the node holds an object
    pub fn has_object(&self) -> SceneResult<bool> {
        self.session.borrow().has_object(self.node)
    }

    /// Read the object at a time
    pub fn read_object(&self, time: f64) -> SceneResult<SceneObject> {
        self.session.borrow().read_object(self.node, time)
    }

    /// Write the object at a time
    pub fn write_object(&self, object: &SceneObject, time: f64) -> SceneResult<()> {
        self.guard_write("write object")?;
        self.session.borrow_mut().write_object(self.node, object, time)
    }

    /// Whether the node holds the named attribute
    pub fn has_attribute(&self, name: &str) -> SceneResult<bool> {
        let name = Name::new(name)?;
        self.session.borrow().has_attribute(self.node, &name)
    }

    /// Names of the node's attributes
    pub fn read_attribute_names(&self) -> SceneResult<Vec<Name>> {
        self.session.borrow().attribute_names(self.node)
    }

    /// Read an attribute at a time
    pub fn read_attribute(&self, name: &str, time: f64) -> SceneResult<AttributeValue> {
        let name = Name::new(name)?;
        self.session.borrow().read_attribute(self.node, &name, time)
    }

    /// Write an attribute at a time
    pub fn write_attribute(
        &self,
        name: &str,
        value: &AttributeValue,
        time: f64,
    ) -> SceneResult<()> {
        self.guard_write("write attribute")?;
        let name = Name::new(name)?;
        self.session
            .borrow_mut()
            .write_attribute(self.node, &name, value, time)
    }

    /// Whether the node holds a bound
    pub fn has_bound(&self) -> SceneResult<bool> {
        self.session.borrow().has_bound(self.node)
    }

    /// Read the bound at a time
    pub fn read_bound(&self, time: f64) -> SceneResult<Bound3> {
        self.session.borrow().read_bound(self.node, time)
    }

    /// Write the bound at a time
    pub fn write_bound(&self, bound: &Bound3, time: f64) -> SceneResult<()> {
        self.guard_write("write bound")?;
        self.session.borrow_mut().write_bound(self.node, bound, time)
    }

    /// Whether the node holds a transform
    pub fn has_transform(&self) -> SceneResult<bool> {
        self.session.borrow().has_transform(self.node)
    }

    /// Read the transform in its stored representation
    pub fn read_transform(&self, time: f64) -> SceneResult<TransformData> {
        self.session.borrow().read_transform(self.node, time)
    }

    /// Read the transform flattened to a matrix
    pub fn read_transform_as_matrix(&self, time: f64) -> SceneResult<Mat4> {
        Ok(self.read_transform(time)?.to_matrix())
    }

    /// Write the transform at a time
    pub fn write_transform(&self, transform: &TransformData, time: f64) -> SceneResult<()> {
        self.guard_write("write transform")?;
        self.session
            .borrow_mut()
            .write_transform(self.node, transform, time)
    }

    /// Persist pending writes now instead of when the session ends
    pub fn flush(&self) -> SceneResult<()> {
        self.session.borrow_mut().flush()
    }
}
