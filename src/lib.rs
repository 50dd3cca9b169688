pub mod consts;
pub mod error;

pub mod vector;
pub mod ray;

pub mod intersect;
pub mod geometry;
pub mod shape;
pub mod world;

pub mod shade;
pub mod camera;
pub mod canvas;
pub mod parallel;

pub mod scene;

use crate::consts::FEQ_EPSILON;

/// Approximate floating point equality, used by tests and `Vector3`'s
/// `PartialEq`. Intersection math never goes through this.
pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < FEQ_EPSILON
}
