//! The three primitive solids and their ray intersection tests.
//!
//! Comparisons in this module are exact. No tolerance is applied to the
//! "ray parallel to plane" check or to the box face bounds, so which of two
//! adjacent faces wins on an exact edge is decided by face order alone.

use crate::vector::Vector3;
use crate::ray::Ray;
use crate::intersect::{ Intersection, nearest };
use crate::error::{ RenderError, Result };

/// An infinite plane: every point `p` with `normal . p == offset`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    normal: Vector3,
    offset: f64,
}

impl Plane {
    /// Creates a plane, normalizing `normal`.
    pub fn new(normal: Vector3, offset: f64) -> Result<Plane> {
        if !normal.is_finite() || !offset.is_finite() {
            return Err(RenderError::InvalidPrimitive(
                format!("plane normal {:?} / offset {} is not finite", normal, offset)
            ));
        }

        Ok(Plane { normal: normal.unit()?, offset })
    }

    /// Creates the plane through `point` with the given normal.
    pub fn through(point: Vector3, normal: Vector3) -> Result<Plane> {
        let normal = normal.unit()?;
        Plane::new(normal, normal.dot(&point))
    }

    /// Creates the plane through the origin spanned by `v` and `w`.
    ///
    /// Parallel `v` and `w` span no plane and fail as a degenerate normal.
    pub fn containing(v: Vector3, w: Vector3) -> Result<Plane> {
        Plane::through(Vector3::zero(), v.cross(&w))
    }

    /// Axis-aligned plane; the normal is already unit length.
    fn axis(normal: Vector3, offset: f64) -> Plane {
        Plane { normal, offset }
    }

    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Intersects a ray with the plane.
    ///
    /// Returns `None` only when the ray is parallel to the plane (including a
    /// ray lying in it). Any other ray crosses the plane exactly once, in
    /// front of or behind its origin, and that crossing is returned.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let denom = ray.direction.dot(&self.normal);
        if denom == 0.0 {
            return None;
        }

        let t = (ray.origin.dot(&self.normal) - self.offset) / (-denom);
        Some(Intersection::new(t, ray.position(t), self.normal))
    }
}

/// An axis-aligned box spanning `corner` to `corner + (width, height, depth)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cuboid {
    corner: Vector3,
    width: f64,
    height: f64,
    depth: f64,
}

impl Cuboid {
    /// Creates a box from its minimum corner and its extents along x, y, z.
    ///
    /// Extents may be zero (a flat box) but not negative.
    pub fn new(corner: Vector3, width: f64, height: f64, depth: f64)
        -> Result<Cuboid> {
        if !corner.is_finite() {
            return Err(RenderError::InvalidPrimitive(
                format!("box corner {:?} is not finite", corner)
            ));
        }

        for (name, extent) in [("width", width), ("height", height), ("depth", depth)].iter() {
            if !extent.is_finite() || *extent < 0.0 {
                return Err(RenderError::InvalidPrimitive(
                    format!("box {} must be finite and non-negative, got {}", name, extent)
                ));
            }
        }

        Ok(Cuboid { corner, width, height, depth })
    }

    pub fn corner(&self) -> Vector3 {
        self.corner
    }

    /// The corner opposite `corner`.
    pub fn far_corner(&self) -> Vector3 {
        self.corner + Vector3::new(self.width, self.height, self.depth)
    }

    pub fn center(&self) -> Vector3 {
        self.corner + Vector3::new(self.width, self.height, self.depth) * 0.5
    }

    /// The six bounding planes with outward normals, paired with the axis
    /// (0 = x, 1 = y, 2 = z) they are perpendicular to.
    ///
    /// Order is z-min, z-max, y-min, y-max, x-min, x-max. When two faces are
    /// hit at the same `t`, the earlier one is reported.
    pub fn faces(&self) -> [(usize, Plane); 6] {
        let min = self.corner;
        let max = self.far_corner();

        [
            (2, Plane::axis(Vector3::new(0.0, 0.0, -1.0), -min.z)),
            (2, Plane::axis(Vector3::new(0.0, 0.0, 1.0), max.z)),
            (1, Plane::axis(Vector3::new(0.0, -1.0, 0.0), -min.y)),
            (1, Plane::axis(Vector3::new(0.0, 1.0, 0.0), max.y)),
            (0, Plane::axis(Vector3::new(-1.0, 0.0, 0.0), -min.x)),
            (0, Plane::axis(Vector3::new(1.0, 0.0, 0.0), max.x)),
        ]
    }

    /// Closed bounding test on all three axes.
    pub fn contains(&self, p: &Vector3) -> bool {
        (0..3).all(|axis| self.within(p, axis))
    }

    fn within(&self, p: &Vector3, axis: usize) -> bool {
        let (lo, hi) = (component(&self.corner, axis), component(&self.far_corner(), axis));
        let v = component(p, axis);
        lo <= v && v <= hi
    }

    /// Intersects a ray with the box.
    ///
    /// Each face plane is intersected; a face hit counts only if its point
    /// falls inside the face (closed bounds on the two other axes). The hit
    /// point is pinned onto the face plane along the face's own axis, so
    /// rounding in `origin + t * direction` cannot push a genuine face hit
    /// outside the box. The nearest surviving face hit with `t >= 0` is
    /// returned, so a ray starting inside the box sees the face it exits
    /// through.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let faces = self.faces();

        let hits = faces.iter().filter_map(|(axis, face)| {
            let mut hit = face.intersect(ray)?;
            if hit.t < 0.0 {
                return None;
            }

            // Pinned onto its own axis, so only the other two can fail.
            set_component(&mut hit.point, *axis, face_value(face, *axis));
            if self.contains(&hit.point) { Some(hit) } else { None }
        });

        nearest(hits)
    }
}

/// The coordinate of an axis-aligned plane along its axis.
fn face_value(face: &Plane, axis: usize) -> f64 {
    face.offset / component(&face.normal, axis)
}

fn component(v: &Vector3, axis: usize) -> f64 {
    match axis {
        0 => v.x,
        1 => v.y,
        _ => v.z,
    }
}

fn set_component(v: &mut Vector3, axis: usize, value: f64) {
    match axis {
        0 => v.x = value,
        1 => v.y = value,
        _ => v.z = value,
    }
}

/// A sphere with a strictly positive radius.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    center: Vector3,
    radius: f64,
}

impl Sphere {
    pub fn new(center: Vector3, radius: f64) -> Result<Sphere> {
        if !center.is_finite() {
            return Err(RenderError::InvalidPrimitive(
                format!("sphere center {:?} is not finite", center)
            ));
        }

        if !radius.is_finite() || radius <= 0.0 {
            return Err(RenderError::InvalidPrimitive(
                format!("sphere radius must be finite and positive, got {}", radius)
            ));
        }

        Ok(Sphere { center, radius })
    }

    pub fn center(&self) -> Vector3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Intersects a ray with the sphere.
    ///
    /// The direction is normalized first, so the returned `t` is measured in
    /// units of the *unit* direction and the hit point is rebuilt from that
    /// same unit direction. A degenerate ray hits nothing.
    ///
    /// Of the two crossings the lower non-negative `t` is returned: the far
    /// one when the origin is inside the sphere, none when the sphere lies
    /// entirely behind the origin.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let direction = ray.direction.unit().ok()?;
        let oc = ray.origin - self.center;

        let b = direction.dot(&oc);
        let nabla = b.powi(2) - (oc.dot(&oc) - self.radius.powi(2));

        let t = if nabla < 0.0 {
            return None;
        } else if nabla == 0.0 {
            -b
        } else {
            let root = nabla.sqrt();
            let t1 = -b - root;
            let t2 = -b + root;
            if t1 >= 0.0 { t1 } else { t2 }
        };

        if t < 0.0 {
            return None;
        }

        let point = ray.origin + direction * t;
        let normal = (point - self.center).unit().ok()?;

        Some(Intersection::new(t, point, normal))
    }
}

/* Tests */

#[test]
fn plane_normal_is_stored_normalized() {
    let p = Plane::new(Vector3::new(0.0, 3.0, 4.0), 2.0).unwrap();

    assert_eq!(p.normal(), Vector3::new(0.0, 0.6, 0.8));
    assert_eq!(p.offset(), 2.0);
}

#[test]
fn plane_with_zero_normal_is_degenerate() {
    assert!(matches!(
        Plane::new(Vector3::zero(), 1.0),
        Err(RenderError::DegenerateVector)
    ));
}

#[test]
fn ray_straight_at_plane() {
    let normal = Vector3::new(0.0, 0.0, 1.0);
    let p = Plane::new(normal, 3.0).unwrap();
    let r = Ray::new(Vector3::new(1.0, -2.0, 10.0), Vector3::new(0.0, 0.0, -1.0));

    let hit = p.intersect(&r).unwrap();
    assert!(crate::feq(hit.t, 7.0));
    assert!(crate::feq(hit.point.dot(&p.normal()), p.offset()));
    assert_eq!(hit.normal, normal);
}

#[test]
fn oblique_ray_at_tilted_plane() {
    let p = Plane::through(
        Vector3::new(0.0, 0.0, 5.0),
        Vector3::new(1.0, 1.0, 1.0)
    ).unwrap();
    let r = Ray::new(Vector3::new(-4.0, 2.0, -3.0), Vector3::new(0.5, 0.25, 1.0));

    let hit = p.intersect(&r).unwrap();
    assert!(crate::feq(hit.point.dot(&p.normal()), p.offset()));
    assert_eq!(hit.point, r.position(hit.t));
}

#[test]
fn plane_hit_behind_ray_has_negative_t() {
    let p = Plane::new(Vector3::new(0.0, 1.0, 0.0), 0.0).unwrap();
    let r = Ray::new(Vector3::new(0.0, 2.0, 0.0), Vector3::new(0.0, 1.0, 0.0));

    assert_eq!(p.intersect(&r).unwrap().t, -2.0);
}

#[test]
fn ray_parallel_to_plane() {
    let p = Plane::new(Vector3::new(0.0, 1.0, 0.0), 0.0).unwrap();
    let above = Ray::new(Vector3::new(0.0, 10.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
    let within = Ray::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 1.0));

    assert_eq!(p.intersect(&above), None);
    assert_eq!(p.intersect(&within), None);
}

#[test]
fn plane_containing_two_vectors() {
    let p = Plane::containing(
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0)
    ).unwrap();

    assert_eq!(p.normal(), Vector3::new(0.0, 0.0, 1.0));
    assert_eq!(p.offset(), 0.0);
    assert!(Plane::containing(
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(2.0, 0.0, 0.0)
    ).is_err());
}

#[test]
fn box_rejects_negative_extent() {
    assert!(Cuboid::new(Vector3::zero(), 1.0, -1.0, 1.0).is_err());
    assert!(Cuboid::new(Vector3::zero(), 1.0, f64::NAN, 1.0).is_err());
    assert!(Cuboid::new(Vector3::zero(), 0.0, 0.0, 0.0).is_ok());
}

#[test]
fn box_faces_point_outward() {
    let b = Cuboid::new(Vector3::new(-1.0, -1.0, -1.0), 2.0, 2.0, 2.0).unwrap();
    let center = b.center();

    for (_, face) in b.faces().iter() {
        // The centre is on the inner side of every face.
        assert!(face.normal().dot(&center) < face.offset());
    }
}

#[test]
fn ray_at_box_center_hits_a_face() {
    let b = Cuboid::new(Vector3::new(0.0, -120.0, 40.0), 100.0, 100.0, 100.0).unwrap();
    let origin = Vector3::new(-30.0, 25.0, -100.0);
    let r = Ray::new(origin, b.center() - origin);

    let hit = b.intersect(&r).unwrap();
    let face_normals: Vec<Vector3> = b.faces().iter().map(|(_, f)| f.normal()).collect();
    assert!(face_normals.contains(&hit.normal));

    let (lo, hi) = (b.corner(), b.far_corner());
    let p = hit.point;
    assert!(b.contains(&p));
    assert!(p.x == lo.x || p.x == hi.x || p.y == lo.y || p.y == hi.y
        || p.z == lo.z || p.z == hi.z);
}

#[test]
fn ray_along_axis_hits_near_face() {
    let b = Cuboid::new(Vector3::new(-1.0, -1.0, 2.0), 2.0, 2.0, 2.0).unwrap();
    let r = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));

    let hit = b.intersect(&r).unwrap();
    assert_eq!(hit.t, 7.0);
    assert_eq!(hit.normal, Vector3::new(0.0, 0.0, -1.0));
    assert_eq!(hit.point, Vector3::new(0.0, 0.0, 2.0));
}

#[test]
fn ray_missing_box() {
    let b = Cuboid::new(Vector3::new(0.0, 0.0, 0.0), 1.0, 1.0, 1.0).unwrap();
    let parallel = Ray::new(Vector3::new(5.0, 0.5, -5.0), Vector3::new(0.0, 0.0, 1.0));
    let skew = Ray::new(Vector3::new(-5.0, 3.0, 0.5), Vector3::new(1.0, 0.0, 0.0));

    assert_eq!(b.intersect(&parallel), None);
    assert_eq!(b.intersect(&skew), None);
}

#[test]
fn ray_through_box_edge_picks_first_face() {
    // Aimed exactly at the edge shared by the z-min and y-max faces.
    let b = Cuboid::new(Vector3::new(0.0, 0.0, 0.0), 2.0, 2.0, 2.0).unwrap();
    let r = Ray::new(Vector3::new(1.0, 4.0, -2.0), Vector3::new(0.0, -1.0, 1.0));

    let hit = b.intersect(&r).unwrap();
    assert_eq!(hit.t, 2.0);
    assert_eq!(hit.normal, Vector3::new(0.0, 0.0, -1.0));
}

#[test]
fn ray_from_inside_box_hits_exit_face() {
    let b = Cuboid::new(Vector3::new(-1.0, -1.0, -1.0), 2.0, 2.0, 2.0).unwrap();
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, 1.0));

    let hit = b.intersect(&r).unwrap();
    assert_eq!(hit.t, 1.0);
    assert_eq!(hit.point, Vector3::new(0.0, 0.0, 1.0));
    assert_eq!(hit.normal, Vector3::new(0.0, 0.0, 1.0));
}

#[test]
fn box_behind_ray_is_missed() {
    let b = Cuboid::new(Vector3::new(-1.0, -1.0, -10.0), 2.0, 2.0, 2.0).unwrap();
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, 1.0));

    assert_eq!(b.intersect(&r), None);
}

#[test]
fn sphere_rejects_bad_radius() {
    assert!(Sphere::new(Vector3::zero(), 0.0).is_err());
    assert!(Sphere::new(Vector3::zero(), -2.0).is_err());
    assert!(Sphere::new(Vector3::zero(), f64::INFINITY).is_err());
}

#[test]
fn ray_missing_sphere() {
    let s = Sphere::new(Vector3::zero(), 1.0).unwrap();
    let r = Ray::new(Vector3::new(0.0, 2.0, -5.0), Vector3::new(0.0, 0.0, 1.0));

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn ray_tangent_to_sphere() {
    let s = Sphere::new(Vector3::zero(), 1.0).unwrap();
    let r = Ray::new(Vector3::new(0.0, 1.0, -5.0), Vector3::new(0.0, 0.0, 1.0));

    let hit = s.intersect(&r).unwrap();
    assert_eq!(hit.t, 5.0);
    assert_eq!(hit.point, Vector3::new(0.0, 1.0, 0.0));
    assert_eq!(hit.normal, Vector3::new(0.0, 1.0, 0.0));
}

#[test]
fn ray_through_sphere_returns_nearer_root() {
    let s = Sphere::new(Vector3::new(0.0, 0.0, 50.0), 40.0).unwrap();
    let r = Ray::new(Vector3::new(0.0, 0.0, -100.0), Vector3::new(0.0, 0.0, 1.0));

    let hit = s.intersect(&r).unwrap();
    assert_eq!(hit.t, 110.0);
    assert_eq!(hit.point, Vector3::new(0.0, 0.0, 10.0));
    assert_eq!(hit.normal, Vector3::new(0.0, 0.0, -1.0));
}

#[test]
fn ray_from_inside_sphere_hits_far_side() {
    let s = Sphere::new(Vector3::zero(), 10.0).unwrap();
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, 1.0));

    let hit = s.intersect(&r).unwrap();
    assert_eq!(hit.t, 10.0);
    assert_eq!(hit.point, Vector3::new(0.0, 0.0, 10.0));
    assert_eq!(hit.normal, Vector3::new(0.0, 0.0, 1.0));
}

#[test]
fn sphere_behind_ray_is_missed() {
    let s = Sphere::new(Vector3::new(0.0, 0.0, -20.0), 5.0).unwrap();
    let r = Ray::new(Vector3::zero(), Vector3::new(0.0, 0.0, 1.0));

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn sphere_t_is_in_unit_direction_units() {
    let s = Sphere::new(Vector3::zero(), 1.0).unwrap();
    let r = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 100.0));

    let hit = s.intersect(&r).unwrap();
    assert_eq!(hit.t, 4.0);
    assert_eq!(hit.point, Vector3::new(0.0, 0.0, -1.0));
}

#[test]
fn degenerate_ray_misses_sphere() {
    let s = Sphere::new(Vector3::zero(), 1.0).unwrap();
    let r = Ray::new(Vector3::new(0.0, 0.0, -5.0), Vector3::zero());

    assert_eq!(s.intersect(&r), None);
}
