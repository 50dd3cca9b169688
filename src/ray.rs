use crate::vector::Vector3;
use crate::error::Result;

/// A ray, `origin + t * direction`.
///
/// The direction does not have to be normalized. A zero direction is a
/// degenerate ray; check `is_degenerate` before handing it to anything that
/// normalizes.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray {
    pub origin: Vector3,
    pub direction: Vector3,
}

impl Ray {
    pub fn new(origin: Vector3, direction: Vector3) -> Ray {
        Ray { origin, direction }
    }

    pub fn position(&self, t: f64) -> Vector3 {
        self.origin + (t * self.direction)
    }

    pub fn is_degenerate(&self) -> bool {
        self.direction.magnitude() == 0.0
    }

    /// The same ray with a unit-length direction.
    pub fn normalized(&self) -> Result<Ray> {
        Ok(Ray { origin: self.origin, direction: self.direction.unit()? })
    }
}

#[test]
fn ray_position() {
    let r = Ray::new(
                Vector3::new(2.0, 3.0, 4.0),
                Vector3::new(1.0, 0.0, 0.0)
            );

    assert_eq!(r.position(0.0), Vector3::new(2.0, 3.0, 4.0));
    assert_eq!(r.position(1.0), Vector3::new(3.0, 3.0, 4.0));
    assert_eq!(r.position(-1.0), Vector3::new(1.0, 3.0, 4.0));
    assert_eq!(r.position(2.5), Vector3::new(4.5, 3.0, 4.0));
}

#[test]
fn degenerate_ray() {
    let r = Ray::new(Vector3::new(0.0, 0.0, -100.0), Vector3::zero());

    assert!(r.is_degenerate());
    assert!(r.normalized().is_err());
}

#[test]
fn normalized_ray_keeps_origin() {
    let r = Ray::new(
                Vector3::new(1.0, 2.0, 3.0),
                Vector3::new(0.0, 0.0, 10.0)
            );
    let n = r.normalized().unwrap();

    assert_eq!(n.origin, r.origin);
    assert_eq!(n.direction, Vector3::new(0.0, 0.0, 1.0));
}
