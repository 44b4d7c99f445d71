//! Cubic basis matrices and the per-curve evaluation stencil.

use crv_math::{DMat4, DVec4};
use serde::{Deserialize, Serialize};

/// The family of spline used to blend control vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasisKind {
    Linear,
    #[default]
    CatmullRom,
    BSpline,
}

/// A power-basis matrix. Row `i` holds the weights of `u^(3-i)` for each
/// of the four stencil vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "BasisKind", into = "BasisKind")]
pub struct CubicBasis {
    kind: BasisKind,
    matrix: DMat4,
}

const LINEAR: [[f64; 4]; 4] = [
    [0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0],
    [-1.0, 1.0, 0.0, 0.0],
    [1.0, 0.0, 0.0, 0.0],
];

const CATMULL_ROM: [[f64; 4]; 4] = [
    [-0.5, 1.5, -1.5, 0.5],
    [1.0, -2.5, 2.0, -0.5],
    [-0.5, 0.0, 0.5, 0.0],
    [0.0, 1.0, 0.0, 0.0],
];

const B_SPLINE: [[f64; 4]; 4] = [
    [-1.0 / 6.0, 3.0 / 6.0, -3.0 / 6.0, 1.0 / 6.0],
    [3.0 / 6.0, -6.0 / 6.0, 3.0 / 6.0, 0.0],
    [-3.0 / 6.0, 0.0, 3.0 / 6.0, 0.0],
    [1.0 / 6.0, 4.0 / 6.0, 1.0 / 6.0, 0.0],
];

impl CubicBasis {
    pub fn linear() -> Self {
        Self::from(BasisKind::Linear)
    }

    pub fn catmull_rom() -> Self {
        Self::from(BasisKind::CatmullRom)
    }

    pub fn b_spline() -> Self {
        Self::from(BasisKind::BSpline)
    }

    pub fn kind(&self) -> BasisKind {
        self.kind
    }

    /// Weights of the four stencil vertices at local parameter `u`.
    pub fn coefficients(&self, u: f64) -> [f64; 4] {
        // Rows are stored as glam columns, so `matrix * powers` sums rows.
        (self.matrix * DVec4::new(u * u * u, u * u, u, 1.0)).to_array()
    }

    /// Derivative of [`coefficients`](Self::coefficients) with respect to `u`.
    pub fn derivative_coefficients(&self, u: f64) -> [f64; 4] {
        (self.matrix * DVec4::new(3.0 * u * u, 2.0 * u, 1.0, 0.0)).to_array()
    }
}

impl Default for CubicBasis {
    fn default() -> Self {
        Self::from(BasisKind::default())
    }
}

impl From<BasisKind> for CubicBasis {
    fn from(kind: BasisKind) -> Self {
        let rows = match kind {
            BasisKind::Linear => &LINEAR,
            BasisKind::CatmullRom => &CATMULL_ROM,
            BasisKind::BSpline => &B_SPLINE,
        };
        Self {
            kind,
            matrix: DMat4::from_cols_array_2d(rows),
        }
    }
}

impl From<CubicBasis> for BasisKind {
    fn from(basis: CubicBasis) -> Self {
        basis.kind
    }
}

/// How many control vertices a curve blends, resolved once per curve from
/// its vertex count.
///
/// Segments always join consecutive control vertices. A cubic stencil
/// reaches one vertex before and one after its segment; open curves repeat
/// their end vertices to fill it, periodic curves wrap around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stencil {
    /// A single vertex: every parameter maps onto it.
    Constant,
    /// Two vertices per segment, blended linearly.
    Linear,
    /// Four vertices per segment, blended by the curve basis.
    Cubic,
}

impl Stencil {
    pub fn for_curve(basis: &CubicBasis, num_vertices: usize) -> Self {
        match num_vertices {
            0 | 1 => Self::Constant,
            2 | 3 => Self::Linear,
            _ if basis.kind() == BasisKind::Linear => Self::Linear,
            _ => Self::Cubic,
        }
    }

    pub fn num_segments(self, num_vertices: usize, periodic: bool) -> usize {
        match self {
            Self::Constant => 1,
            _ if periodic => num_vertices,
            _ => num_vertices.saturating_sub(1),
        }
    }

    /// Number of varying values the curve contributes: one per segment
    /// endpoint, shared across segments.
    pub fn num_varying(self, num_vertices: usize, periodic: bool) -> usize {
        match self {
            Self::Constant => 1,
            _ if periodic => self.num_segments(num_vertices, periodic),
            _ => self.num_segments(num_vertices, periodic) + 1,
        }
    }

    /// Curve-local vertex indices feeding `segment`. Slots the stencil does
    /// not use repeat the first index and always get a zero coefficient.
    pub fn vertex_indices(self, segment: usize, num_vertices: usize, periodic: bool) -> [usize; 4] {
        let n = num_vertices.max(1);
        let wrap = |i: isize| -> usize {
            if periodic {
                i.rem_euclid(n as isize) as usize
            } else {
                i.clamp(0, n as isize - 1) as usize
            }
        };
        let s = segment as isize;
        match self {
            Self::Constant => [0; 4],
            Self::Linear => {
                let first = wrap(s);
                [first, wrap(s + 1), first, first]
            }
            Self::Cubic => [wrap(s - 1), wrap(s), wrap(s + 1), wrap(s + 2)],
        }
    }

    /// Curve-local varying indices of the two endpoints of `segment`.
    pub fn varying_indices(self, segment: usize, num_vertices: usize, periodic: bool) -> [usize; 2] {
        match self {
            Self::Constant => [0, 0],
            _ if periodic => [segment, (segment + 1) % self.num_segments(num_vertices, periodic)],
            _ => [segment, segment + 1],
        }
    }

    /// Basis weights and their derivatives at local parameter `u`.
    pub fn coefficients(self, basis: &CubicBasis, u: f64) -> ([f64; 4], [f64; 4]) {
        match self {
            Self::Constant => ([1.0, 0.0, 0.0, 0.0], [0.0; 4]),
            Self::Linear => {
                let linear = CubicBasis::linear();
                (linear.coefficients(u), linear.derivative_coefficients(u))
            }
            Self::Cubic => (basis.coefficients(u), basis.derivative_coefficients(u)),
        }
    }
}
