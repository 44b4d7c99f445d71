//! Typed reconstruction of attribute values from weighted samples.

use crv_math::{Color3, Vector3};
use crv_primitive::{f16, DataType, VariableData};

/// A value type that attribute accessors can read and blend.
pub trait PrimVarValue: Clone {
    const DATA_TYPE: DataType;

    /// The typed value array, or `None` when the storage holds another type.
    fn values(data: &VariableData) -> Option<&[Self]>;

    /// Weighted sum of four samples.
    fn blend(samples: [&Self; 4], weights: [f64; 4]) -> Self;
}

impl PrimVarValue for f64 {
    const DATA_TYPE: DataType = DataType::Float;

    fn values(data: &VariableData) -> Option<&[Self]> {
        match data {
            VariableData::Float(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    fn blend(samples: [&Self; 4], weights: [f64; 4]) -> Self {
        samples.iter().zip(weights).map(|(&&s, w)| s * w).sum()
    }
}

impl PrimVarValue for i32 {
    const DATA_TYPE: DataType = DataType::Int;

    fn values(data: &VariableData) -> Option<&[Self]> {
        match data {
            VariableData::Int(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Blended in floating point, then rounded to the nearest integer.
    fn blend(samples: [&Self; 4], weights: [f64; 4]) -> Self {
        let sum: f64 = samples.iter().zip(weights).map(|(&&s, w)| s as f64 * w).sum();
        sum.round() as i32
    }
}

impl PrimVarValue for f16 {
    const DATA_TYPE: DataType = DataType::Half;

    fn values(data: &VariableData) -> Option<&[Self]> {
        match data {
            VariableData::Half(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    fn blend(samples: [&Self; 4], weights: [f64; 4]) -> Self {
        let sum: f64 = samples.iter().zip(weights).map(|(s, w)| s.to_f64() * w).sum();
        f16::from_f64(sum)
    }
}

impl PrimVarValue for Vector3 {
    const DATA_TYPE: DataType = DataType::Vector;

    fn values(data: &VariableData) -> Option<&[Self]> {
        match data {
            VariableData::Vector(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    fn blend(samples: [&Self; 4], weights: [f64; 4]) -> Self {
        samples
            .iter()
            .zip(weights)
            .fold(Vector3::ZERO, |acc, (&&s, w)| acc + s * w)
    }
}

impl PrimVarValue for Color3 {
    const DATA_TYPE: DataType = DataType::Color;

    fn values(data: &VariableData) -> Option<&[Self]> {
        match data {
            VariableData::Color(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    fn blend(samples: [&Self; 4], weights: [f64; 4]) -> Self {
        samples
            .iter()
            .zip(weights)
            .fold(Color3::BLACK, |acc, (&&s, w)| acc + s * w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_float_blend() {
        let v = f64::blend([&1.0, &2.0, &3.0, &4.0], [0.1, 0.2, 0.3, 0.4]);
        assert_relative_eq!(v, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_int_blend_rounds() {
        assert_eq!(i32::blend([&0, &10, &0, &0], [0.36, 0.64, 0.0, 0.0]), 6);
        assert_eq!(i32::blend([&-4, &0, &0, &0], [1.0, 0.0, 0.0, 0.0]), -4);
    }

    #[test]
    fn test_half_blend() {
        let a = f16::from_f32(1.0);
        let b = f16::from_f32(3.0);
        let v = f16::blend([&a, &b, &a, &a], [0.5, 0.5, 0.0, 0.0]);
        assert_eq!(v, f16::from_f32(2.0));
    }

    #[test]
    fn test_values_type_check() {
        let data = VariableData::Int(vec![1, 2]);
        assert_eq!(i32::values(&data), Some(&[1, 2][..]));
        assert!(f64::values(&data).is_none());
        assert!(Color3::values(&data).is_none());
    }
}
