//! Typed attribute values

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Mat4, Vec3};

/// Value blob stored under an attribute name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// Boolean flag
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Floating point scalar
    Float(f64),
    /// Text
    String(String),
    /// 3D vector or color
    V3(Vec3),
    /// 4x4 matrix
    M44(Mat4),
    /// Array of integers
    IntVector(Vec<i64>),
    /// Array of floats
    FloatVector(Vec<f64>),
    /// Array of strings
    StringVector(Vec<String>),
    /// Opaque bytes
    Bytes(Vec<u8>),
}

impl AttributeValue {
    /// Name of the value's type, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Bool",
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
            Self::String(_) => "String",
            Self::V3(_) => "V3",
            Self::M44(_) => "M44",
            Self::IntVector(_) => "IntVector",
            Self::FloatVector(_) => "FloatVector",
            Self::StringVector(_) => "StringVector",
            Self::Bytes(_) => "Bytes",
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec3> for AttributeValue {
    fn from(value: Vec3) -> Self {
        Self::V3(value)
    }
}
