use crate::vector::Vector3;

/// An intersection.
///
/// This structure assumes that some ray produced a hit. Parameter `t` is the
/// ray parameter of the hit (the offset from the ray origin in units of the
/// ray's direction), so it only orders hits along a single ray.
///
/// `normal` is unit length and points away from the primitive's interior.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Intersection {
    pub t: f64,
    pub point: Vector3,
    pub normal: Vector3,
}

impl Intersection {
    pub fn new(t: f64, point: Vector3, normal: Vector3) -> Intersection {
        Intersection { t, point, normal }
    }
}

/// Picks the hit with the lowest `t`.
///
/// Ties go to the earliest hit in iteration order, so callers control the
/// tie-break by the order they feed hits in.
pub fn nearest<I>(hits: I) -> Option<Intersection>
    where I: IntoIterator<Item = Intersection> {
    let mut closest: Option<Intersection> = None;

    for hit in hits {
        match closest {
            Some(c) if c.t <= hit.t => (),
            _ => closest = Some(hit),
        }
    }

    closest
}

#[test]
fn nearest_of_nothing() {
    assert_eq!(nearest(Vec::new()), None);
}

#[test]
fn nearest_picks_lowest_t() {
    let n = Vector3::new(0.0, 0.0, -1.0);
    let hits = vec![
        Intersection::new(10.0, Vector3::zero(), n),
        Intersection::new(5.0, Vector3::zero(), n),
        Intersection::new(7.0, Vector3::zero(), n),
    ];

    assert_eq!(nearest(hits).unwrap().t, 5.0);
}

#[test]
fn nearest_tie_keeps_first() {
    let first = Intersection::new(5.0, Vector3::zero(), Vector3::new(1.0, 0.0, 0.0));
    let second = Intersection::new(5.0, Vector3::zero(), Vector3::new(0.0, 1.0, 0.0));

    let hit = nearest(vec![first, second]).unwrap();
    assert_eq!(hit.normal, Vector3::new(1.0, 0.0, 0.0));
}
