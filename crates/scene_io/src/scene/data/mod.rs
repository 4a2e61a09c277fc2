//! Per-node payload types: bounds, transforms, attributes and objects

mod attribute;
mod bound;
mod object;
mod transform;

pub use attribute::AttributeValue;
pub use bound::Bound3;
pub use object::{Camera, MeshPrimitive, PointsPrimitive, SceneObject};
pub use transform::TransformData;
