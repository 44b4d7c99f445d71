//! Linear RGB color value.

use std::ops::{Add, Mul};

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// An RGB triple blended component-wise like any other vector quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Color3 {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color3 {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

impl From<DVec3> for Color3 {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Color3> for DVec3 {
    fn from(c: Color3) -> Self {
        DVec3::new(c.r, c.g, c.b)
    }
}

impl Add for Color3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl Mul<f64> for Color3 {
    type Output = Self;

    fn mul(self, s: f64) -> Self {
        Self::new(self.r * s, self.g * s, self.b * s)
    }
}
