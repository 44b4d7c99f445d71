pub mod aabb;
pub mod color;
pub mod ray;

pub use glam::{dvec2, dvec3, DMat4, DVec2, DVec3, DVec4};
pub use aabb::Aabb3;
pub use color::Color3;
pub use ray::Ray;

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector3 = DVec3;
