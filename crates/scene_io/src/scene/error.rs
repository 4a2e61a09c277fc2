//! Scene storage errors

use thiserror::Error;

use super::open_mode::OpenMode;
use super::path::Path;

/// Result type for scene operations
pub type SceneResult<T> = Result<T, SceneError>;

/// Which per-node field a read or write addressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneField {
    /// The node's object payload
    Object,
    /// The node's bounding box
    Bound,
    /// The node's local transform
    Transform,
    /// A named attribute
    Attribute(String),
}

impl std::fmt::Display for SceneField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Object => f.write_str("object"),
            Self::Bound => f.write_str("bound"),
            Self::Transform => f.write_str("transform"),
            Self::Attribute(name) => write!(f, "attribute '{name}'"),
        }
    }
}

/// Scene storage errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// Navigation missed under `ThrowIfMissing`
    #[error("No entity at path {path}")]
    EntityNotFound {
        /// Path that was looked up
        path: Path,
    },

    /// `create_child` on a name that already exists
    #[error("Entity already exists at path {path}")]
    DuplicateEntity {
        /// Path of the existing entity
        path: Path,
    },

    /// Mutation attempted on a session opened for reading
    #[error("Cannot {operation} at {path}: scene is open for reading only")]
    ReadOnlyViolation {
        /// Name of the rejected operation
        operation: &'static str,
        /// Node the operation targeted
        path: Path,
    },

    /// The node exists but the field was never written
    #[error("No {field} stored at path {path}")]
    NoDataAtPath {
        /// Node that was read
        path: Path,
        /// Field that has no samples
        field: SceneField,
    },

    /// No backend is registered for the extension
    #[error("Unsupported scene format: {0}")]
    UnsupportedFormat(String),

    /// The backend cannot open files in the requested mode
    #[error("Backend '{extension}' does not support open mode {mode:?}")]
    UnsupportedMode {
        /// Normalized file extension
        extension: String,
        /// Requested mode
        mode: OpenMode,
    },

    /// Invalid name or string path
    #[error("Malformed path: {0}")]
    MalformedPath(String),

    /// Append session tried to overwrite data that was already on disk
    #[error("Cannot overwrite finalized {field} sample at time {time} on {path} in append mode")]
    FinalizedData {
        /// Node that was written
        path: Path,
        /// Field that was written
        field: SceneField,
        /// Sample time that already holds finalized data
        time: f64,
    },

    /// Underlying storage failure
    #[error("Backend IO error: {0}")]
    BackendIo(String),
}

impl From<std::io::Error> for SceneError {
    fn from(error: std::io::Error) -> Self {
        Self::BackendIo(error.to_string())
    }
}

impl From<ron::Error> for SceneError {
    fn from(error: ron::Error) -> Self {
        Self::BackendIo(error.to_string())
    }
}

impl From<ron::error::SpannedError> for SceneError {
    fn from(error: ron::error::SpannedError) -> Self {
        Self::BackendIo(error.to_string())
    }
}

impl SceneError {
    /// Whether this error reports a missing entity rather than missing data
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EntityNotFound { .. })
    }
}
