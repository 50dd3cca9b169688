use std::ops::{ Add, Sub, Neg, Mul, Div };

use crate::feq;
use crate::error::{ RenderError, Result };

/// A three-component vector, used for both points and directions.
///
/// Equality is approximate (see `feq`); the intersection routines compare
/// raw components instead.
#[derive(Debug, Default, Copy, Clone, PartialOrd)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PartialEq for Vector3 {
    fn eq(&self, other: &Vector3) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z)
    }
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3 { x, y, z }
    }

    pub const fn zero() -> Vector3 {
        Vector3 { x: 0.0, y: 0.0, z: 0.0 }
    }

    pub fn magnitude(&self) -> f64 {
        f64::sqrt(
            self.x.powi(2)
            + self.y.powi(2)
            + self.z.powi(2)
        )
    }

    /// Returns the unit vector pointing along `self`.
    ///
    /// Fails with `RenderError::DegenerateVector` when the magnitude is
    /// exactly zero.
    ///
    /// ```
    /// use pinhole_tracer::vector::Vector3;
    ///
    /// let v = Vector3::new(4.0, 0.0, 0.0);
    /// assert_eq!(v.unit().unwrap(), Vector3::new(1.0, 0.0, 0.0));
    /// assert!(Vector3::zero().unit().is_err());
    /// ```
    pub fn unit(&self) -> Result<Vector3> {
        let mag = self.magnitude();
        if mag == 0.0 {
            return Err(RenderError::DegenerateVector);
        }

        Ok(*self / mag)
    }

    pub fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x
            + self.y * other.y
            + self.z * other.z
    }

    pub fn cross(&self, other: &Vector3) -> Vector3 {
        Vector3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Angle in radians between two non-zero vectors.
    ///
    /// The cosine is clamped to `[-1, 1]` so rounding on (anti)parallel
    /// vectors never produces NaN.
    pub fn angle(&self, other: &Vector3) -> f64 {
        let cos = self.dot(other) / (self.magnitude() * other.magnitude());
        cos.clamp(-1.0, 1.0).acos()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(v: [f64; 3]) -> Vector3 {
        Vector3::new(v[0], v[1], v[2])
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// Implements scalar right-multiplication for a vector.
///
/// ```
/// use pinhole_tracer::vector::Vector3;
///
/// let v = Vector3::new(1.0, 2.0, 3.0);
/// assert_eq!(v * 5.0, Vector3::new(5.0, 10.0, 15.0));
/// ```
impl Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self {
            x: self.x * other,
            y: self.y * other,
            z: self.z * other,
        }
    }
}

/// Implements scalar left-multiplication for a vector.
///
/// ```
/// use pinhole_tracer::vector::Vector3;
///
/// let v = Vector3::new(1.0, 2.0, 3.0);
/// assert_eq!(5.0 * v, Vector3::new(5.0, 10.0, 15.0));
/// ```
impl Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, other: Vector3) -> Vector3 {
        Vector3 {
            x: self * other.x,
            y: self * other.y,
            z: self * other.z,
        }
    }
}

/// Divides every component by a scalar. Dividing by zero yields infinities;
/// use `unit` when normalizing.
impl Div<f64> for Vector3 {
    type Output = Self;

    fn div(self, other: f64) -> Self {
        Self {
            x: self.x / other,
            y: self.y / other,
            z: self.z / other,
        }
    }
}

/* Tests */

#[test]
fn add_vectors() {
    let a1 = Vector3::new(3.0, -2.0, 5.0);
    let a2 = Vector3::new(-2.0, 3.0, 1.0);

    assert_eq!(a1 + a2, Vector3::new(1.0, 1.0, 6.0));
}

#[test]
fn sub_vectors() {
    let p1 = Vector3::new(3.0, 2.0, 1.0);
    let p2 = Vector3::new(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Vector3::new(-2.0, -4.0, -6.0));
}

#[test]
fn neg_vector() {
    let a = Vector3::new(1.0, -2.0, 3.0);

    assert_eq!(-a, Vector3::new(-1.0, 2.0, -3.0));
}

#[test]
fn mul_fraction() {
    let a = Vector3::new(1.0, -2.0, 3.0);

    assert_eq!(a * 0.5, Vector3::new(0.5, -1.0, 1.5));
}

#[test]
fn div_scalar() {
    let a = Vector3::new(2.0, -4.0, 6.0);

    assert_eq!(a / 2.0, Vector3::new(1.0, -2.0, 3.0));
}

#[test]
fn magnitude_neg() {
    let v = Vector3::new(-1.0, -2.0, -3.0);

    assert_eq!(v.magnitude(), f64::sqrt(14.0));
}

#[test]
fn unit_dirty() {
    let v = Vector3::new(1.0, 2.0, 3.0);
    let e = Vector3::new(
        1.0 / f64::sqrt(14.0),
        2.0 / f64::sqrt(14.0),
        3.0 / f64::sqrt(14.0)
    );

    assert_eq!(v.unit().unwrap(), e);
}

#[test]
fn unit_has_magnitude_one() {
    let vs = [
        Vector3::new(1e-8, 0.0, 0.0),
        Vector3::new(-3.0, 4.0, 12.0),
        Vector3::new(1e8, -1e8, 5.0),
        Vector3::new(0.1, 0.2, -0.3),
    ];

    for v in vs.iter() {
        assert!(crate::feq(v.unit().unwrap().magnitude(), 1.0));
    }
}

#[test]
fn unit_of_zero_is_degenerate() {
    match Vector3::zero().unit() {
        Err(RenderError::DegenerateVector) => (),
        other => panic!("expected DegenerateVector, got {:?}", other),
    }
}

#[test]
fn dot_vectors() {
    let a = Vector3::new(1.0, 2.0, 3.0);
    let b = Vector3::new(2.0, 3.0, 4.0);

    assert_eq!(a.dot(&b), 20.0);
}

#[test]
fn cross_vectors() {
    let a = Vector3::new(1.0, 2.0, 3.0);
    let b = Vector3::new(2.0, 3.0, 4.0);

    assert_eq!(a.cross(&b), Vector3::new(-1.0, 2.0, -1.0));
    assert_eq!(b.cross(&a), Vector3::new(1.0, -2.0, 1.0));
}

#[test]
fn cross_is_orthogonal_to_operands() {
    let pairs = [
        (Vector3::new(1.0, 2.0, 3.0), Vector3::new(2.0, 3.0, 4.0)),
        (Vector3::new(-5.0, 0.5, 9.0), Vector3::new(0.0, 7.0, -2.0)),
        (Vector3::new(1.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)),
    ];

    for (v, w) in pairs.iter() {
        let c = v.cross(w);
        assert!(crate::feq(c.dot(v), 0.0));
        assert!(crate::feq(c.dot(w), 0.0));
    }
}

#[test]
fn angle_between_vectors() {
    let x = Vector3::new(1.0, 0.0, 0.0);
    let y = Vector3::new(0.0, 2.0, 0.0);

    assert!(crate::feq(x.angle(&y), std::f64::consts::FRAC_PI_2));
    assert!(crate::feq(x.angle(&-x), std::f64::consts::PI));
    assert_eq!(x.angle(&(x * 3.0)), 0.0);
}
