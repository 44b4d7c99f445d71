//! Named attribute storage attached to a curve dataset.

use std::fmt;
use std::sync::Arc;

use crv_math::{Color3, Vector3};
use half::f16;
use serde::{Deserialize, Serialize};

/// The granularity at which a primitive variable stores its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// One value for the whole dataset.
    Constant,
    /// One value per curve.
    Uniform,
    /// One value per segment endpoint.
    Varying,
    /// One value per control vertex.
    Vertex,
    /// Stored like `Varying`, but not meaningful for curve evaluation.
    FaceVarying,
}

impl Interpolation {
    pub fn name(self) -> &'static str {
        match self {
            Self::Constant => "Constant",
            Self::Uniform => "Uniform",
            Self::Varying => "Varying",
            Self::Vertex => "Vertex",
            Self::FaceVarying => "FaceVarying",
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Element type of a primitive variable's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Float,
    Int,
    Half,
    Vector,
    Color,
    String,
}

impl DataType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Int => "int",
            Self::Half => "half",
            Self::Vector => "vector",
            Self::Color => "color",
            Self::String => "string",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A flat, typed value array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum VariableData {
    Float(Vec<f64>),
    Int(Vec<i32>),
    Half(Vec<f16>),
    Vector(Vec<Vector3>),
    Color(Vec<Color3>),
    String(Vec<String>),
}

impl VariableData {
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Float(_) => DataType::Float,
            Self::Int(_) => DataType::Int,
            Self::Half(_) => DataType::Half,
            Self::Vector(_) => DataType::Vector,
            Self::Color(_) => DataType::Color,
            Self::String(_) => DataType::String,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Float(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::Half(v) => v.len(),
            Self::Vector(v) => v.len(),
            Self::Color(v) => v.len(),
            Self::String(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named attribute: its granularity plus shared, immutable storage.
///
/// Cloning is cheap; the values are reference counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveVariable {
    pub name: String,
    pub interpolation: Interpolation,
    pub data: Arc<VariableData>,
}

impl PrimitiveVariable {
    pub fn new(name: impl Into<String>, interpolation: Interpolation, data: VariableData) -> Self {
        Self {
            name: name.into(),
            interpolation,
            data: Arc::new(data),
        }
    }

    pub fn data_type(&self) -> DataType {
        self.data.data_type()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_and_len() {
        let pv = PrimitiveVariable::new(
            "id",
            Interpolation::Uniform,
            VariableData::Int(vec![3, 4]),
        );
        assert_eq!(pv.data_type(), DataType::Int);
        assert_eq!(pv.len(), 2);
        assert!(!pv.is_empty());
    }

    #[test]
    fn test_clone_shares_storage() {
        let pv = PrimitiveVariable::new(
            "width",
            Interpolation::Varying,
            VariableData::Float(vec![1.0, 2.0]),
        );
        let copy = pv.clone();
        assert!(Arc::ptr_eq(&pv.data, &copy.data));
    }

    #[test]
    fn test_json_layout() {
        let pv = PrimitiveVariable::new(
            "name",
            Interpolation::Constant,
            VariableData::String(vec!["hair".into()]),
        );
        let json = serde_json::to_value(&pv).unwrap();
        assert_eq!(json["interpolation"], "constant");
        assert_eq!(json["data"]["type"], "string");
        assert_eq!(json["data"]["values"][0], "hair");
    }
}
