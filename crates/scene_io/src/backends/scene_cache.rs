//! File-backed `.scc` scene cache
//!
//! The whole scene is stored as one RON [`SceneDocument`]. Opening for
//! reading or appending parses the file up front but only materializes nodes
//! as they are navigated. Writes accumulate in the session's arena and reach
//! disk on [`flush`](SceneBackend::flush) or when the session ends. Each
//! flush writes a temporary file in the target's directory and renames it
//! over the target, so a failed write leaves neither a truncated cache nor a
//! stray temporary file.

use std::fs;
use std::io::Write;
use std::path::{Path as FilePath, PathBuf};

use tempfile::NamedTempFile;

use crate::config::SceneIoConfig;
use crate::scene::{
    AttributeValue, Bound3, Name, NodeId, OpenMode, SceneArena, SceneBackend, SceneDocument,
    SceneError, SceneInterface, SceneObject, SceneResult, TransformData, DOCUMENT_VERSION,
};

/// Scene session persisted to a `.scc` file
#[derive(Debug)]
pub struct SceneCacheBackend {
    file_name: PathBuf,
    mode: OpenMode,
    arena: SceneArena,
    config: SceneIoConfig,
    dirty: bool,
}

impl SceneCacheBackend {
    /// File extension handled by this backend
    pub const EXTENSION: &'static str = "scc";

    /// Modes this backend can open files in
    pub const MODES: OpenMode = OpenMode::all();

    /// Open a cache with the default configuration and return its root handle
    pub fn open(path: &FilePath, mode: OpenMode) -> SceneResult<SceneInterface> {
        Self::open_with_config(path, mode, SceneIoConfig::default())
    }

    /// Open a cache and return its root handle
    pub fn open_with_config(
        path: &FilePath,
        mode: OpenMode,
        config: SceneIoConfig,
    ) -> SceneResult<SceneInterface> {
        Ok(SceneInterface::from_backend(Self::new(path, mode, config)?))
    }

    /// Open a cache as a bare backend
    pub fn new(path: &FilePath, mode: OpenMode, config: SceneIoConfig) -> SceneResult<Self> {
        let arena = if mode == OpenMode::WRITE {
            SceneArena::new()
        } else if mode == OpenMode::READ || mode == OpenMode::APPEND {
            let document = Self::load(path)?;
            SceneArena::from_document(document.root, mode == OpenMode::APPEND)
        } else {
            return Err(SceneError::UnsupportedMode {
                extension: Self::EXTENSION.to_string(),
                mode,
            });
        };

        let mut backend = Self {
            file_name: path.to_path_buf(),
            mode,
            arena,
            config,
            dirty: false,
        };

        // Write truncates immediately, so an unwritable target fails at open.
        if mode == OpenMode::WRITE {
            backend.write_document()?;
        }

        log::info!("Opened scene cache {} ({mode:?})", path.display());
        Ok(backend)
    }

    fn load(path: &FilePath) -> SceneResult<SceneDocument> {
        let contents = fs::read_to_string(path).map_err(|e| {
            SceneError::BackendIo(format!("cannot read {}: {e}", path.display()))
        })?;
        let document: SceneDocument = ron::from_str(&contents).map_err(|e| {
            SceneError::BackendIo(format!("cannot parse {}: {e}", path.display()))
        })?;

        if document.version != DOCUMENT_VERSION {
            return Err(SceneError::BackendIo(format!(
                "{} has layout version {}, expected {DOCUMENT_VERSION}",
                path.display(),
                document.version
            )));
        }

        log::debug!(
            "Loaded {} nodes from {}",
            document.root.node_count(),
            path.display()
        );
        Ok(document)
    }

    fn write_document(&mut self) -> SceneResult<()> {
        let document = SceneDocument::new(self.arena.to_document()?);
        let contents = if self.config.pretty_print {
            ron::ser::to_string_pretty(&document, ron::ser::PrettyConfig::default())?
        } else {
            ron::to_string(&document)?
        };

        let directory = match self.file_name.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => FilePath::new("."),
        };
        let write_error = |e: std::io::Error| {
            SceneError::BackendIo(format!("cannot write {}: {e}", self.file_name.display()))
        };

        // Dropping the temporary file on any error path deletes it.
        let mut temp = NamedTempFile::new_in(directory).map_err(write_error)?;
        temp.write_all(contents.as_bytes()).map_err(write_error)?;
        temp.persist(&self.file_name).map_err(|e| {
            SceneError::BackendIo(format!(
                "cannot replace {}: {}",
                self.file_name.display(),
                e.error
            ))
        })?;

        self.dirty = false;
        log::info!("Flushed scene cache {}", self.file_name.display());
        Ok(())
    }

    fn protect_finalized(&self) -> bool {
        self.mode == OpenMode::APPEND
    }

    fn mark_dirty<T>(&mut self, result: SceneResult<T>) -> SceneResult<T> {
        if result.is_ok() {
            self.dirty = true;
        }
        result
    }
}

impl SceneBackend for SceneCacheBackend {
    fn mode(&self) -> OpenMode {
        self.mode
    }

    fn file_name(&self) -> Option<&FilePath> {
        Some(&self.file_name)
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
        let result = self.arena.create_child(parent, name);
        self.mark_dirty(result)
    }

    fn has_object(&self, node: NodeId) -> SceneResult<bool> {
        self.arena.has_object(node)
    }

    fn read_object(&self, node: NodeId, time: f64) -> SceneResult<SceneObject> {
        self.arena.read_object(node, time)
    }

    fn write_object(&mut self, node: NodeId, object: &SceneObject, time: f64) -> SceneResult<()> {
        let protect = self.protect_finalized();
        let result = self.arena.write_object(node, object, time, protect);
        self.mark_dirty(result)
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
        let result = self.arena.write_attribute(node, name, value, time, protect);
        self.mark_dirty(result)
    }

    fn has_bound(&self, node: NodeId) -> SceneResult<bool> {
        self.arena.has_bound(node)
    }

    fn read_bound(&self, node: NodeId, time: f64) -> SceneResult<Bound3> {
        self.arena.read_bound(node, time)
    }

    fn write_bound(&mut self, node: NodeId, bound: &Bound3, time: f64) -> SceneResult<()> {
        let protect = self.protect_finalized();
        let result = self.arena.write_bound(node, bound, time, protect);
        self.mark_dirty(result)
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
        let result = self.arena.write_transform(node, transform, time, protect);
        self.mark_dirty(result)
    }

    fn flush(&mut self) -> SceneResult<()> {
        if self.mode.is_read_only() || !self.dirty {
            return Ok(());
        }
        self.write_document()
    }
}

impl Drop for SceneCacheBackend {
    fn drop(&mut self) {
        if !self.config.flush_on_drop {
            return;
        }
        if let Err(error) = self.flush() {
            log::error!(
                "Failed to flush scene cache {} on close: {error}",
                self.file_name.display()
            );
        }
    }
}
