//! Math utilities and types
//!
//! Scene data is stored in double precision: cached transforms are composed
//! down deep hierarchies and single precision drifts visibly.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Unit, UnitQuaternion, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f64>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f64>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f64>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f64>;

/// Transform decomposed into translate, rotate, scale and a pivot
///
/// Rotation and scale are applied about `pivot`, so the flattened matrix is
/// `T * P * R * S * P^-1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformComponents {
    /// Translation relative to the parent
    pub translate: Vec3,

    /// Rotation quaternion
    pub rotate: Quat,

    /// Scale factors
    pub scale: Vec3,

    /// Point that rotation and scale are applied about
    pub pivot: Vec3,
}

impl Default for TransformComponents {
    fn default() -> Self {
        Self {
            translate: Vec3::zeros(),
            rotate: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            pivot: Vec3::zeros(),
        }
    }
}

impl TransformComponents {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only a translation
    pub fn from_translation(translate: Vec3) -> Self {
        Self {
            translate,
            ..Default::default()
        }
    }

    /// Create a transform with translation, rotation and scale about the origin
    pub fn from_trs(translate: Vec3, rotate: Quat, scale: Vec3) -> Self {
        Self {
            translate,
            rotate,
            scale,
            pivot: Vec3::zeros(),
        }
    }

    /// Set the pivot
    #[must_use]
    pub fn with_pivot(mut self, pivot: Vec3) -> Self {
        self.pivot = pivot;
        self
    }

    /// Flatten into a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        let to_pivot = Mat4::new_translation(&self.pivot);
        let from_pivot = Mat4::new_translation(&-self.pivot);

        Mat4::new_translation(&self.translate)
            * to_pivot
            * self.rotate.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
            * from_pivot
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: &Point3) -> Point3 {
        self.to_matrix().transform_point(point)
    }
}

/// Math utility functions
pub mod utils {
    use super::{Mat4, Point3, Vec3};

    /// Transform a point by an affine matrix
    pub fn transform_point(matrix: &Mat4, point: &Vec3) -> Vec3 {
        matrix.transform_point(&Point3::from(*point)).coords
    }
}
