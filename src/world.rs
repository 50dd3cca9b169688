use crate::ray::Ray;
use crate::shape::Shape;
use crate::intersect::{ Intersection, nearest };
use crate::error::Result;

/// An ordered collection of shapes.
///
/// Worlds own no state besides their shapes. Insertion order only matters
/// when two shapes are hit at exactly the same distance: the earlier shape
/// wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct World {
    pub objects: Vec<Shape>,
}

impl World {
    /// Creates an empty world. Every ray cast into it misses.
    pub fn empty() -> World {
        World { objects: Vec::new() }
    }

    pub fn new(objects: Vec<Shape>) -> World {
        World { objects }
    }

    pub fn add(&mut self, shape: Shape) {
        self.objects.push(shape);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Intersects a ray against all objects in the world, returning the
    /// nearest hit in front of the ray origin.
    ///
    /// The direction is normalized before it reaches the shapes, so the
    /// returned `t` is a distance in world units no matter which primitive
    /// produced it. Shapes only report crossings in front of the origin, so a
    /// solid enclosing the origin is seen from the inside. Plane hits with
    /// `t < 0` lie behind the origin and are dropped here.
    ///
    /// Fails with `RenderError::DegenerateVector` for a zero direction.
    pub fn intersect(&self, r: &Ray) -> Result<Option<Intersection>> {
        let r = r.normalized()?;

        let hits = self.objects.iter()
            .filter_map(|obj| obj.intersect(&r))
            .filter(|i| i.t >= 0.0);

        Ok(nearest(hits))
    }
}

#[cfg(test)]
use crate::vector::Vector3;

#[test]
fn empty_world_misses() {
    let w = World::empty();
    let r = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));

    assert!(w.is_empty());
    assert_eq!(w.intersect(&r).unwrap(), None);
}

#[test]
fn nearer_of_two_shapes() {
    let mut w = World::empty();
    w.add(Shape::sphere(Vector3::new(0.0, 0.0, 11.0), 1.0).unwrap());
    w.add(Shape::cuboid(Vector3::new(-1.0, -1.0, 5.0), 2.0, 2.0, 2.0).unwrap());

    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, 3.0));
    let hit = w.intersect(&r).unwrap().unwrap();

    assert_eq!(hit.t, 5.0);
    assert_eq!(hit.normal, Vector3::new(0.0, 0.0, -1.0));
}

#[test]
fn insertion_order_breaks_ties() {
    let behind_first = Shape::cuboid(Vector3::new(-1.0, -1.0, 5.0), 2.0, 2.0, 1.0).unwrap();
    let behind_second = Shape::plane(Vector3::new(0.0, 0.0, 1.0), 5.0).unwrap();

    let w = World::new(vec![behind_first, behind_second]);
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, 1.0));
    let hit = w.intersect(&r).unwrap().unwrap();

    assert_eq!(hit.t, 5.0);
    assert_eq!(hit.normal, Vector3::new(0.0, 0.0, -1.0));

    let w = World::new(vec![behind_second, behind_first]);
    let hit = w.intersect(&r).unwrap().unwrap();
    assert_eq!(hit.normal, Vector3::new(0.0, 0.0, 1.0));
}

#[test]
fn hits_behind_origin_are_ignored() {
    let w = World::new(vec![
        Shape::cuboid(Vector3::new(-1.0, -1.0, -10.0), 2.0, 2.0, 2.0).unwrap(),
    ]);
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, 1.0));

    assert_eq!(w.intersect(&r).unwrap(), None);
}

#[test]
fn degenerate_ray_is_an_error() {
    let w = World::new(vec![Shape::sphere(Vector3::zero(), 1.0).unwrap()]);
    let r = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::zero());

    assert!(w.intersect(&r).is_err());
}

#[test]
fn solid_around_origin_is_seen_from_inside() {
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, 1.0));

    let w = World::new(vec![Shape::sphere(Vector3::zero(), 10.0).unwrap()]);
    let hit = w.intersect(&r).unwrap().unwrap();
    assert_eq!(hit.t, 10.0);
    assert_eq!(hit.normal, Vector3::new(0.0, 0.0, 1.0));

    let w = World::new(vec![
        Shape::cuboid(Vector3::new(-0.5, -0.5, -0.5), 1.0, 1.0, 1.0).unwrap(),
    ]);
    let hit = w.intersect(&r).unwrap().unwrap();
    assert_eq!(hit.t, 0.5);
    assert_eq!(hit.normal, Vector3::new(0.0, 0.0, 1.0));
}

#[test]
fn enclosing_solid_does_not_hide_nearer_shape() {
    let w = World::new(vec![
        Shape::sphere(Vector3::zero(), 10.0).unwrap(),
        Shape::cuboid(Vector3::new(-1.0, -1.0, 3.0), 2.0, 2.0, 2.0).unwrap(),
    ]);
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, 2.0));
    let hit = w.intersect(&r).unwrap().unwrap();

    assert_eq!(hit.t, 3.0);
    assert_eq!(hit.normal, Vector3::new(0.0, 0.0, -1.0));
}
