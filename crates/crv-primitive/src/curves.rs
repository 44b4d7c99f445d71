//! The curve dataset: ragged per-curve vertex counts over flattened storage.

use std::collections::BTreeMap;

use crv_core::error::{CurvesError, Result};
use crv_core::traits::{BoundingBox, Validate};
use crv_math::{Aabb3, Point3};
use serde::{Deserialize, Serialize};

use crate::basis::{CubicBasis, Stencil};
use crate::variable::{Interpolation, PrimitiveVariable, VariableData};

/// Name of the vertex-interpolated position variable.
pub const POSITION: &str = "P";

/// A set of independent curves sharing one basis, one periodicity flag, and
/// a flattened store of primitive variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurvesPrimitive {
    vertices_per_curve: Vec<usize>,
    #[serde(default)]
    basis: CubicBasis,
    #[serde(default)]
    periodic: bool,
    #[serde(default)]
    variables: BTreeMap<String, PrimitiveVariable>,
}

impl CurvesPrimitive {
    /// Build a dataset with its vertex-interpolated `P` variable.
    pub fn new(
        vertices_per_curve: Vec<usize>,
        basis: CubicBasis,
        periodic: bool,
        positions: Vec<Point3>,
    ) -> Result<Self> {
        let mut curves = Self {
            vertices_per_curve,
            basis,
            periodic,
            variables: BTreeMap::new(),
        };
        curves.check_vertex_counts()?;
        curves.add_variable(PrimitiveVariable::new(
            POSITION,
            Interpolation::Vertex,
            VariableData::Vector(positions),
        ))?;
        Ok(curves)
    }

    pub fn vertices_per_curve(&self) -> &[usize] {
        &self.vertices_per_curve
    }

    pub fn num_curves(&self) -> usize {
        self.vertices_per_curve.len()
    }

    pub fn basis(&self) -> &CubicBasis {
        &self.basis
    }

    pub fn periodic(&self) -> bool {
        self.periodic
    }

    /// Evaluation stencil for one curve, chosen by its vertex count.
    pub fn stencil(&self, curve_index: usize) -> Result<Stencil> {
        let n = self.num_vertices(curve_index)?;
        Ok(Stencil::for_curve(&self.basis, n))
    }

    pub fn num_vertices(&self, curve_index: usize) -> Result<usize> {
        self.vertices_per_curve
            .get(curve_index)
            .copied()
            .ok_or(CurvesError::CurveIndexOutOfRange {
                index: curve_index,
                count: self.num_curves(),
            })
    }

    pub fn num_segments(&self, curve_index: usize) -> Result<usize> {
        let n = self.num_vertices(curve_index)?;
        Ok(Stencil::for_curve(&self.basis, n).num_segments(n, self.periodic))
    }

    /// Number of values a variable of the given granularity must hold.
    pub fn variable_size(&self, interpolation: Interpolation) -> usize {
        match interpolation {
            Interpolation::Constant => 1,
            Interpolation::Uniform => self.num_curves(),
            Interpolation::Vertex => self.vertices_per_curve.iter().sum(),
            Interpolation::Varying | Interpolation::FaceVarying => self
                .vertices_per_curve
                .iter()
                .map(|&n| Stencil::for_curve(&self.basis, n).num_varying(n, self.periodic))
                .sum(),
        }
    }

    pub fn variable(&self, name: &str) -> Option<&PrimitiveVariable> {
        self.variables.get(name)
    }

    pub fn variables(&self) -> impl Iterator<Item = &PrimitiveVariable> {
        self.variables.values()
    }

    /// Attach a variable, replacing any previous one with the same name.
    pub fn add_variable(&mut self, variable: PrimitiveVariable) -> Result<()> {
        self.check_variable(&variable)?;
        if self.variables.contains_key(&variable.name) {
            log::debug!("replacing primitive variable \"{}\"", variable.name);
        }
        self.variables.insert(variable.name.clone(), variable);
        Ok(())
    }

    pub fn remove_variable(&mut self, name: &str) -> Option<PrimitiveVariable> {
        self.variables.remove(name)
    }

    pub fn positions(&self) -> Option<&[Point3]> {
        match self.variable(POSITION).map(|pv| pv.data.as_ref()) {
            Some(VariableData::Vector(points)) => Some(points.as_slice()),
            _ => None,
        }
    }

    /// Bounds of every control vertex, `None` without positions.
    pub fn bound(&self) -> Option<Aabb3> {
        self.positions().and_then(Aabb3::from_points)
    }

    fn check_vertex_counts(&self) -> Result<()> {
        match self.vertices_per_curve.iter().position(|&n| n == 0) {
            Some(i) => Err(CurvesError::InvalidArgument(format!(
                "curve {} has no vertices",
                i
            ))),
            None => Ok(()),
        }
    }

    fn check_variable(&self, variable: &PrimitiveVariable) -> Result<()> {
        let expected = self.variable_size(variable.interpolation);
        if variable.len() != expected {
            return Err(CurvesError::InvalidVariable {
                name: variable.name.clone(),
                reason: format!(
                    "{} interpolation needs {} values, found {}",
                    variable.interpolation,
                    expected,
                    variable.len()
                ),
            });
        }
        Ok(())
    }
}

impl Validate for CurvesPrimitive {
    fn validate(&self) -> Result<()> {
        self.check_vertex_counts()?;
        for (name, variable) in &self.variables {
            if *name != variable.name {
                return Err(CurvesError::InvalidVariable {
                    name: name.clone(),
                    reason: format!("stored under a different name \"{}\"", variable.name),
                });
            }
            self.check_variable(variable)?;
        }
        Ok(())
    }
}

impl BoundingBox for CurvesPrimitive {
    type Point = Point3;

    fn bounding_box(&self) -> (Point3, Point3) {
        self.bound()
            .map_or((Point3::ZERO, Point3::ZERO), |aabb| (aabb.min, aabb.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crv_math::dvec3;

    fn line_points(n: usize, y: f64) -> Vec<Point3> {
        (0..n).map(|i| dvec3(i as f64, y, 0.0)).collect()
    }

    #[test]
    fn test_variable_sizes() {
        let mut points = line_points(4, 0.0);
        points.extend(line_points(6, 1.0));
        points.push(dvec3(5.0, 5.0, 5.0));
        let curves =
            CurvesPrimitive::new(vec![4, 6, 1], CubicBasis::catmull_rom(), false, points).unwrap();

        assert_eq!(curves.num_curves(), 3);
        assert_eq!(curves.variable_size(Interpolation::Constant), 1);
        assert_eq!(curves.variable_size(Interpolation::Uniform), 3);
        assert_eq!(curves.variable_size(Interpolation::Vertex), 11);
        assert_eq!(curves.variable_size(Interpolation::Varying), 11);
        assert_eq!(curves.num_segments(0).unwrap(), 3);
        assert_eq!(curves.num_segments(1).unwrap(), 5);
        assert_eq!(curves.num_segments(2).unwrap(), 1);
    }

    #[test]
    fn test_periodic_segments() {
        let curves =
            CurvesPrimitive::new(vec![5], CubicBasis::b_spline(), true, line_points(5, 0.0))
                .unwrap();
        assert_eq!(curves.num_segments(0).unwrap(), 5);
        assert_eq!(curves.variable_size(Interpolation::Varying), 5);
    }

    #[test]
    fn test_zero_vertex_curve_rejected() {
        let err = CurvesPrimitive::new(vec![2, 0], CubicBasis::default(), false, line_points(2, 0.0))
            .unwrap_err();
        assert!(matches!(err, CurvesError::InvalidArgument(_)));
    }

    #[test]
    fn test_position_size_mismatch() {
        let err = CurvesPrimitive::new(vec![4], CubicBasis::default(), false, line_points(3, 0.0))
            .unwrap_err();
        assert!(matches!(err, CurvesError::InvalidVariable { .. }));
    }

    #[test]
    fn test_add_variable_checks_size() {
        let mut curves =
            CurvesPrimitive::new(vec![4, 2], CubicBasis::default(), false, line_points(6, 0.0))
                .unwrap();
        let bad = PrimitiveVariable::new("id", Interpolation::Uniform, VariableData::Int(vec![1]));
        assert!(curves.add_variable(bad).is_err());
        let good =
            PrimitiveVariable::new("id", Interpolation::Uniform, VariableData::Int(vec![1, 2]));
        curves.add_variable(good).unwrap();
        assert_eq!(curves.variable("id").unwrap().len(), 2);
        assert!(curves.remove_variable("id").is_some());
        assert!(curves.variable("id").is_none());
    }

    #[test]
    fn test_out_of_range_curve() {
        let curves =
            CurvesPrimitive::new(vec![2], CubicBasis::default(), false, line_points(2, 0.0))
                .unwrap();
        assert_eq!(
            curves.num_segments(1),
            Err(CurvesError::CurveIndexOutOfRange { index: 1, count: 1 })
        );
    }

    #[test]
    fn test_bounding_box() {
        let curves = CurvesPrimitive::new(
            vec![3],
            CubicBasis::default(),
            false,
            vec![dvec3(0.0, -1.0, 2.0), dvec3(3.0, 1.0, 0.0), dvec3(1.0, 4.0, -2.0)],
        )
        .unwrap();
        let (min, max) = curves.bounding_box();
        assert_eq!(min, dvec3(0.0, -1.0, -2.0));
        assert_eq!(max, dvec3(3.0, 4.0, 2.0));
    }
}
