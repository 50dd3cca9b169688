//! Angle-based shading.
//!
//! There are no lights or materials. A hit is as bright as the surface is
//! square-on to the viewer: the intensity falls off linearly with the angle
//! between the surface normal and the eye vector (the reversed ray).

use crate::vector::Vector3;
use crate::intersect::Intersection;
use crate::consts::{ MAX_INTENSITY, DEFAULT_FALLOFF, BACKDROP_DISTANCE };
use crate::error::{ RenderError, Result };

/// The intensity law applied to every hit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Shader {
    /// `255 - falloff * angle`.
    Angular { falloff: f64 },

    /// `255 - falloff * angle / (distance / falloff_unit)`.
    ///
    /// A hit at distance zero is shaded as `Angular`.
    Attenuated { falloff: f64, falloff_unit: f64 },
}

impl Default for Shader {
    fn default() -> Shader {
        Shader::Angular { falloff: DEFAULT_FALLOFF }
    }
}

impl Shader {
    pub fn angular(falloff: f64) -> Result<Shader> {
        if !falloff.is_finite() {
            return Err(RenderError::InvalidShading(
                format!("shading falloff must be finite, got {}", falloff)
            ));
        }

        Ok(Shader::Angular { falloff })
    }

    pub fn attenuated(falloff: f64, falloff_unit: f64) -> Result<Shader> {
        if !falloff_unit.is_finite() || falloff_unit <= 0.0 {
            return Err(RenderError::InvalidShading(
                format!("falloff unit must be finite and positive, got {}", falloff_unit)
            ));
        }

        Shader::angular(falloff)?;
        Ok(Shader::Attenuated { falloff, falloff_unit })
    }

    /// Intensity of a surface with `normal`, seen along `direction` from
    /// `distance` away. `direction` must be non-zero.
    pub fn intensity(&self, normal: Vector3, direction: Vector3, distance: f64) -> f64 {
        let theta = normal.angle(&-direction);

        match *self {
            Shader::Angular { falloff } => MAX_INTENSITY - falloff * theta,
            Shader::Attenuated { falloff, falloff_unit } => {
                if distance == 0.0 {
                    MAX_INTENSITY - falloff * theta
                } else {
                    MAX_INTENSITY - (falloff * theta) / (distance / falloff_unit)
                }
            },
        }
    }

    /// Shades a hit produced by a ray travelling along `direction`.
    pub fn shade(&self, hit: &Intersection, direction: &Vector3) -> f64 {
        self.intensity(hit.normal, *direction, hit.t)
    }
}

/// The sentinel hit used when a ray strikes nothing.
///
/// The backdrop is a flat card behind the scene. It is shaded once against
/// the camera's optical axis rather than per ray, so it has the same
/// intensity at every pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Backdrop {
    pub distance: f64,
    pub normal: Vector3,
}

impl Default for Backdrop {
    fn default() -> Backdrop {
        Backdrop {
            distance: BACKDROP_DISTANCE,
            normal: Vector3::new(0.0, 0.0, 1.0),
        }
    }
}

impl Backdrop {
    pub fn new(distance: f64, normal: Vector3) -> Result<Backdrop> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(RenderError::InvalidPrimitive(
                format!("backdrop distance must be finite and non-negative, got {}", distance)
            ));
        }

        let normal = normal.unit().map_err(|_| RenderError::InvalidPrimitive(
            format!("backdrop normal {:?} has no direction", normal)
        ))?;

        Ok(Backdrop { distance, normal })
    }

    /// Intensity of the backdrop for a camera looking along `axis`.
    pub fn intensity(&self, shader: &Shader, axis: Vector3) -> f64 {
        shader.intensity(self.normal, axis, self.distance)
    }
}

/* Tests */

#[test]
fn head_on_surface_is_brightest() {
    let s = Shader::default();
    let i = s.intensity(
        Vector3::new(0.0, 0.0, -1.0),
        Vector3::new(0.0, 0.0, 5.0),
        10.0
    );

    assert_eq!(i, MAX_INTENSITY);
}

#[test]
fn grazing_surface_loses_falloff_times_right_angle() {
    let s = Shader::default();
    let i = s.intensity(
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
        10.0
    );

    assert!(crate::feq(i, MAX_INTENSITY - DEFAULT_FALLOFF * std::f64::consts::FRAC_PI_2));
}

#[test]
fn surface_facing_away_is_darkest() {
    let s = Shader::angular(80.0).unwrap();
    let i = s.intensity(
        Vector3::new(0.0, 0.0, 1.0),
        Vector3::new(0.0, 0.0, 1.0),
        10.0
    );

    assert!(crate::feq(i, 255.0 - 80.0 * std::f64::consts::PI));
}

#[test]
fn attenuated_shading_scales_with_distance() {
    let s = Shader::attenuated(80.0, 100.0).unwrap();
    let normal = Vector3::new(0.0, 1.0, 0.0);
    let direction = Vector3::new(0.0, 0.0, 1.0);
    let loss = 80.0 * std::f64::consts::FRAC_PI_2;

    assert!(crate::feq(s.intensity(normal, direction, 100.0), 255.0 - loss));
    assert!(crate::feq(s.intensity(normal, direction, 200.0), 255.0 - loss / 2.0));
    assert!(crate::feq(s.intensity(normal, direction, 0.0), 255.0 - loss));
}

#[test]
fn attenuated_shading_needs_positive_unit() {
    assert!(Shader::attenuated(80.0, 0.0).is_err());
    assert!(Shader::attenuated(f64::NAN, 1.0).is_err());
}

#[test]
fn shade_uses_hit_normal_and_distance() {
    let s = Shader::attenuated(80.0, 10.0).unwrap();
    let hit = Intersection::new(
        20.0,
        Vector3::zero(),
        Vector3::new(0.0, 1.0, 0.0)
    );

    let i = s.shade(&hit, &Vector3::new(0.0, 0.0, 1.0));
    assert!(crate::feq(i, 255.0 - 40.0 * std::f64::consts::FRAC_PI_2));
}

#[test]
fn default_backdrop_is_dark_and_fixed() {
    let b = Backdrop::default();
    let s = Shader::default();
    let axis = Vector3::new(0.0, 0.0, 1.0);

    assert!(crate::feq(b.intensity(&s, axis), 255.0 - 80.0 * std::f64::consts::PI));
}

#[test]
fn backdrop_normal_is_normalized() {
    let b = Backdrop::new(300.0, Vector3::new(0.0, 0.0, 4.0)).unwrap();

    assert_eq!(b.normal, Vector3::new(0.0, 0.0, 1.0));
    assert!(Backdrop::new(-1.0, Vector3::new(0.0, 0.0, 1.0)).is_err());
}

#[test]
fn backdrop_with_zero_normal_is_invalid() {
    assert!(matches!(
        Backdrop::new(300.0, Vector3::zero()),
        Err(RenderError::InvalidPrimitive(_))
    ));
}
