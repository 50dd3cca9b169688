use crate::vector::Vector3;
use crate::ray::Ray;
use crate::intersect::Intersection;
use crate::geometry::{ Plane, Cuboid, Sphere };
use crate::error::Result;

/// Any primitive that can sit in a `World`.
///
/// The only capability shared by the variants is intersection, so a plain
/// enum is enough; no variant has state beyond its geometry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Shape {
    /// An unbounded plane. Every non-parallel ray hits it.
    Plane(Plane),

    /// An axis-aligned box.
    Cuboid(Cuboid),

    /// A sphere.
    Sphere(Sphere),
}

impl Shape {
    pub fn plane(normal: Vector3, offset: f64) -> Result<Shape> {
        Ok(Shape::Plane(Plane::new(normal, offset)?))
    }

    pub fn cuboid(corner: Vector3, width: f64, height: f64, depth: f64)
        -> Result<Shape> {
        Ok(Shape::Cuboid(Cuboid::new(corner, width, height, depth)?))
    }

    pub fn sphere(center: Vector3, radius: f64) -> Result<Shape> {
        Ok(Shape::Sphere(Sphere::new(center, radius)?))
    }

    /// Short name of the variant, used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Plane(_) => "plane",
            Shape::Cuboid(_) => "box",
            Shape::Sphere(_) => "sphere",
        }
    }

    /// Intersects a ray with the shape, returning at most one hit.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        match self {
            Shape::Plane(p) => p.intersect(ray),
            Shape::Cuboid(b) => b.intersect(ray),
            Shape::Sphere(s) => s.intersect(ray),
        }
    }
}

impl From<Plane> for Shape {
    fn from(p: Plane) -> Shape {
        Shape::Plane(p)
    }
}

impl From<Cuboid> for Shape {
    fn from(b: Cuboid) -> Shape {
        Shape::Cuboid(b)
    }
}

impl From<Sphere> for Shape {
    fn from(s: Sphere) -> Shape {
        Shape::Sphere(s)
    }
}

#[test]
fn shape_dispatches_to_primitive() {
    let r = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));

    let sphere = Shape::sphere(Vector3::zero(), 1.0).unwrap();
    let cuboid = Shape::cuboid(Vector3::new(-1.0, -1.0, -1.0), 2.0, 2.0, 2.0).unwrap();
    let plane = Shape::plane(Vector3::new(0.0, 0.0, -1.0), 1.0).unwrap();

    assert_eq!(sphere.intersect(&r).unwrap().t, 4.0);
    assert_eq!(cuboid.intersect(&r).unwrap().t, 4.0);
    assert_eq!(plane.intersect(&r).unwrap().t, 4.0);
}

#[test]
fn shape_constructors_validate() {
    assert!(Shape::sphere(Vector3::zero(), 0.0).is_err());
    assert!(Shape::cuboid(Vector3::zero(), -1.0, 1.0, 1.0).is_err());
    assert!(Shape::plane(Vector3::zero(), 1.0).is_err());
}

#[test]
fn shape_kinds() {
    let s: Shape = Sphere::new(Vector3::zero(), 1.0).unwrap().into();
    assert_eq!(s.kind(), "sphere");
}
