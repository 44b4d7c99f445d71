use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A ray in 3D space defined by origin and direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vector3,
}

impl Ray {
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec3;

    #[test]
    fn test_direction_is_normalized() {
        let ray = Ray::new(dvec3(1.0, 0.0, 0.0), dvec3(0.0, 3.0, 0.0));
        assert!((ray.direction.length() - 1.0).abs() < 1e-10);
        assert_eq!(ray.origin, dvec3(1.0, 0.0, 0.0));
    }
}
