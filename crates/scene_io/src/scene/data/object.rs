//! Geometric payloads attached to scene nodes

use serde::{Deserialize, Serialize};

use super::bound::Bound3;
use crate::foundation::math::Vec3;

/// Polygon mesh with per-face vertex counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshPrimitive {
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Number of vertices in each face
    pub vertices_per_face: Vec<u32>,
    /// Position index for each face vertex
    pub vertex_ids: Vec<u32>,
}

impl MeshPrimitive {
    /// Number of faces
    pub fn face_count(&self) -> usize {
        self.vertices_per_face.len()
    }
}

/// Point cloud with optional per-point widths
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointsPrimitive {
    /// Point positions
    pub positions: Vec<Vec3>,
    /// Per-point width, empty when constant
    pub widths: Vec<f64>,
}

/// Perspective or orthographic camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// `"perspective"` or `"orthographic"`
    pub projection: String,
    /// Field of view in degrees, perspective only
    pub field_of_view: f64,
    /// Near and far clipping planes
    pub clipping_planes: (f64, f64),
    /// Output resolution in pixels
    pub resolution: (u32, u32),
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            projection: "perspective".to_string(),
            field_of_view: 50.0,
            clipping_planes: (0.01, 100_000.0),
            resolution: (640, 480),
        }
    }
}

/// Object payload stored on a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneObject {
    /// Polygon mesh
    Mesh(MeshPrimitive),
    /// Point cloud
    Points(PointsPrimitive),
    /// Camera
    Camera(Camera),
}

impl SceneObject {
    /// Bound of the object's positions, empty for cameras
    pub fn bound(&self) -> Bound3 {
        let positions = match self {
            Self::Mesh(mesh) => &mesh.positions,
            Self::Points(points) => &points.positions,
            Self::Camera(_) => return Bound3::empty(),
        };

        let mut bound = Bound3::empty();
        for position in positions {
            bound.extend_by_point(position);
        }
        bound
    }
}
