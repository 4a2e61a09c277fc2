//! Axis-aligned bounding boxes

use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Mat4, Vec3};

/// Axis-aligned bounding box in double precision
///
/// An empty box has `min > max` on every axis, so extending it by any point
/// yields that point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound3 {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Bound3 {
    /// Create a bound from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create a bound from two `[x, y, z]` corners
    pub fn from_corners(min: [f64; 3], max: [f64; 3]) -> Self {
        Self {
            min: Vec3::from(min),
            max: Vec3::from(max),
        }
    }

    /// The empty bound
    pub fn empty() -> Self {
        Self {
            min: Vec3::repeat(f64::INFINITY),
            max: Vec3::repeat(f64::NEG_INFINITY),
        }
    }

    /// Whether the bound contains no points
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Center of the bound
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths of the bound
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::zeros();
        }
        self.max - self.min
    }

    /// Grow the bound to include a point
    pub fn extend_by_point(&mut self, point: &Vec3) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Smallest bound containing both bounds
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Check if this bound contains a point
    pub fn contains_point(&self, point: &Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Bound of the eight corners after transformation
    #[must_use]
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        if self.is_empty() {
            return *self;
        }

        let mut out = Self::empty();
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            out.extend_by_point(&utils::transform_point(matrix, &corner));
        }
        out
    }
}

impl Default for Bound3 {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bound() {
        let bound = Bound3::empty();
        assert!(bound.is_empty());
        assert_eq!(bound.size(), Vec3::zeros());
        assert!(!bound.contains_point(&Vec3::zeros()));
    }

    #[test]
    fn test_extend_and_union() {
        let mut bound = Bound3::empty();
        bound.extend_by_point(&Vec3::new(1.0, -1.0, 0.0));
        bound.extend_by_point(&Vec3::new(-1.0, 2.0, 3.0));
        assert_eq!(bound, Bound3::from_corners([-1.0, -1.0, 0.0], [1.0, 2.0, 3.0]));

        let other = Bound3::from_corners([0.0, 0.0, 0.0], [5.0, 0.5, 0.5]);
        let merged = bound.union(&other);
        assert_eq!(merged, Bound3::from_corners([-1.0, -1.0, 0.0], [5.0, 2.0, 3.0]));
        assert_eq!(Bound3::empty().union(&other), other);
    }

    #[test]
    fn test_transformed_by_translation() {
        let bound = Bound3::from_corners([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let moved = bound.transformed(&Mat4::new_translation(&Vec3::new(2.0, 0.0, -1.0)));
        assert_eq!(moved, Bound3::from_corners([2.0, 0.0, -1.0], [3.0, 1.0, 0.0]));
        assert_eq!(moved.center(), Vec3::new(2.5, 0.5, -0.5));
    }
}
