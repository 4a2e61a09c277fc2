//! Local transforms

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Mat4, TransformComponents};

/// Native transform representation stored on a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransformData {
    /// An already flattened matrix
    Matrix(Mat4),
    /// Translate, rotate, scale and pivot
    Components(TransformComponents),
}

impl TransformData {
    /// The identity transform
    pub fn identity() -> Self {
        Self::Matrix(Mat4::identity())
    }

    /// Flatten into a matrix
    pub fn to_matrix(&self) -> Mat4 {
        match self {
            Self::Matrix(matrix) => *matrix,
            Self::Components(components) => components.to_matrix(),
        }
    }
}

impl Default for TransformData {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Mat4> for TransformData {
    fn from(matrix: Mat4) -> Self {
        Self::Matrix(matrix)
    }
}

impl From<TransformComponents> for TransformData {
    fn from(components: TransformComponents) -> Self {
        Self::Components(components)
    }
}
