use log::{ debug, info };

use crate::ray::Ray;
use crate::vector::Vector3;
use crate::world::World;
use crate::canvas::Canvas;
use crate::shade::{ Shader, Backdrop };
use crate::consts::{ JITTER_PATTERN, MAX_INTENSITY, MIN_INTENSITY };
use crate::error::{ RenderError, Result };

/// How many rays are cast through each pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Sampling {
    /// One ray through the pixel's reference point.
    Single,

    /// Four rays offset by `JITTER_PATTERN`, averaged.
    Jittered,
}

impl Default for Sampling {
    fn default() -> Sampling {
        Sampling::Jittered
    }
}

impl Sampling {
    /// Sub-pixel offsets of every sample in a pixel.
    pub fn offsets(&self) -> &'static [(f64, f64)] {
        match self {
            Sampling::Single => &[(0.0, 0.0)],
            Sampling::Jittered => &JITTER_PATTERN,
        }
    }
}

/// A pinhole camera looking through a virtual screen.
///
/// The screen is centred on the world origin in the `z = 0` plane and is
/// `screen_width` by `screen_height` world units. Rays start at the focal
/// point and pass through points on the screen. With the default focal point
/// on the negative z axis the camera looks towards +z.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// The horizontal size of the resultant canvas, in pixels.
    pub hsize: usize,

    /// The vertical size of the resultant canvas, in pixels.
    pub vsize: usize,

    pub screen_width: f64,
    pub screen_height: f64,

    /// Where every ray starts.
    pub focal_point: Vector3,

    pub sampling: Sampling,
}

impl Camera {
    /// Creates a camera whose focal point sits `focal_length` behind the
    /// screen, on the negative z axis.
    pub fn new(hsize: usize, vsize: usize, screen_width: f64,
        screen_height: f64, focal_length: f64) -> Result<Camera> {
        if hsize == 0 || vsize == 0 {
            return Err(RenderError::InvalidCamera(
                format!("canvas must be at least 1x1, got {}x{}", hsize, vsize)
            ));
        }

        if !(screen_width.is_finite() && screen_width > 0.0)
            || !(screen_height.is_finite() && screen_height > 0.0) {
            return Err(RenderError::InvalidCamera(
                format!("screen must have positive size, got {}x{}", screen_width, screen_height)
            ));
        }

        if !focal_length.is_finite() {
            return Err(RenderError::InvalidCamera(
                format!("focal length must be finite, got {}", focal_length)
            ));
        }

        Ok(Camera {
            hsize,
            vsize,
            screen_width,
            screen_height,
            focal_point: Vector3::new(0.0, 0.0, -focal_length),
            sampling: Sampling::default(),
        })
    }

    pub fn with_focal_point(mut self, focal_point: Vector3) -> Camera {
        self.focal_point = focal_point;
        self
    }

    pub fn with_sampling(mut self, sampling: Sampling) -> Camera {
        self.sampling = sampling;
        self
    }

    /// Unit direction from the focal point to the centre of the screen.
    ///
    /// Falls back to +z when the focal point sits on the screen centre.
    pub fn optical_axis(&self) -> Vector3 {
        (-self.focal_point).unit().unwrap_or(Vector3::new(0.0, 0.0, 1.0))
    }

    /// The ray through row `py`, column `px`, shifted by a sub-pixel offset
    /// `(jx, jy)`.
    ///
    /// The direction is left unnormalized and is zero when the screen point
    /// coincides with the focal point.
    pub fn ray_for_sample(&self, px: usize, py: usize, jitter: (f64, f64)) -> Ray {
        let (jx, jy) = jitter;
        let w = self.hsize as f64;
        let h = self.vsize as f64;

        let x = ((px as f64 + jx) - w / 2.0) * self.screen_width / w;
        let y = ((py as f64 + jy) - h / 2.0) * self.screen_height / h;

        Ray::new(self.focal_point, Vector3::new(x, y, 0.0) - self.focal_point)
    }

    /// The unjittered ray through a pixel.
    pub fn ray_for_pixel(&self, px: usize, py: usize) -> Ray {
        self.ray_for_sample(px, py, (0.0, 0.0))
    }

    /// Every sample ray through a pixel, in pattern order.
    pub fn rays_for_pixel(&self, px: usize, py: usize)
        -> impl Iterator<Item = Ray> + '_ {
        self.sampling.offsets()
            .iter()
            .map(move |&jitter| self.ray_for_sample(px, py, jitter))
    }

    /// Intensity seen along a single ray.
    ///
    /// A degenerate ray scores full intensity. A ray that hits nothing takes
    /// the backdrop's intensity, or zero without a backdrop.
    pub fn sample(&self, ray: &Ray, world: &World, shader: &Shader,
        backdrop: Option<&Backdrop>) -> Result<f64> {
        if ray.is_degenerate() {
            return Ok(MAX_INTENSITY);
        }

        let intensity = match world.intersect(ray)? {
            Some(hit) => shader.shade(&hit, &ray.direction),
            None => match backdrop {
                Some(b) => b.intensity(shader, self.optical_axis()),
                None => MIN_INTENSITY,
            },
        };

        Ok(intensity)
    }

    /// Mean intensity of all samples through a pixel.
    pub fn pixel_intensity(&self, px: usize, py: usize, world: &World,
        shader: &Shader, backdrop: Option<&Backdrop>) -> Result<f64> {
        let mut total = 0.0;
        let mut count = 0;

        for ray in self.rays_for_pixel(px, py) {
            total += self.sample(&ray, world, shader, backdrop)?;
            count += 1;
        }

        Ok(total / count as f64)
    }

    /// Fills one row of pixels. `row.len()` must equal `hsize`.
    pub fn render_row(&self, py: usize, row: &mut [f64], world: &World,
        shader: &Shader, backdrop: Option<&Backdrop>) -> Result<()> {
        for (px, pixel) in row.iter_mut().enumerate() {
            *pixel = self.pixel_intensity(px, py, world, shader, backdrop)?;
        }

        Ok(())
    }

    /// Renders the world on the calling thread.
    pub fn render(&self, world: &World, shader: &Shader,
        backdrop: Option<&Backdrop>) -> Result<Canvas> {
        info!("Rendering {}x{} with {} sample(s) per pixel, {} object(s)",
            self.hsize, self.vsize, self.sampling.offsets().len(), world.len());

        let mut image = Canvas::new(self.hsize, self.vsize);
        for (py, row) in image.rows_mut().enumerate() {
            self.render_row(py, row, world, shader, backdrop)?;
        }

        debug!("Finished serial render");
        Ok(image)
    }
}

#[cfg(test)]
use crate::shape::Shape;

#[test]
fn camera_rejects_empty_canvas() {
    assert!(Camera::new(0, 10, 1.0, 1.0, 1.0).is_err());
    assert!(Camera::new(10, 10, 0.0, 1.0, 1.0).is_err());
    assert!(Camera::new(10, 10, 1.0, 1.0, f64::NAN).is_err());
}

#[test]
fn ray_on_optical_axis() {
    let c = Camera::new(100, 100, 100.0, 100.0, 100.0).unwrap();
    let r = c.ray_for_pixel(50, 50);

    assert_eq!(r.origin, Vector3::new(0.0, 0.0, -100.0));
    assert_eq!(r.direction.unit().unwrap(), Vector3::new(0.0, 0.0, 1.0));
}

#[test]
fn ray_through_corner() {
    let c = Camera::new(100, 50, 200.0, 100.0, 10.0).unwrap();
    let r = c.ray_for_pixel(0, 0);

    assert_eq!(r.direction, Vector3::new(-100.0, -50.0, 10.0));
}

#[test]
fn jitter_shifts_screen_point() {
    let c = Camera::new(4, 4, 8.0, 8.0, 1.0).unwrap();
    let r = c.ray_for_sample(2, 2, (-0.25, 0.75));

    // One pixel is two world units wide here.
    assert_eq!(r.direction, Vector3::new(-0.5, 1.5, 1.0));
}

#[test]
fn jitter_pattern_taps() {
    assert_eq!(Sampling::Jittered.offsets(), &[
        (-0.25, 0.75),
        (0.75, 1.0 / 3.0),
        (-0.75, -0.25),
        (0.25, -0.75),
    ]);
    assert_eq!(Sampling::Single.offsets(), &[(0.0, 0.0)]);
}

#[test]
fn jittered_sampling_casts_four_rays() {
    let c = Camera::new(10, 10, 10.0, 10.0, 5.0).unwrap();
    assert_eq!(c.rays_for_pixel(3, 3).count(), 4);

    let c = c.with_sampling(Sampling::Single);
    assert_eq!(c.rays_for_pixel(3, 3).count(), 1);
}

#[test]
fn degenerate_sample_is_full_intensity() {
    // Focal point on the screen plane, exactly where pixel (1, 1) projects.
    let c = Camera::new(2, 2, 2.0, 2.0, 0.0).unwrap()
        .with_sampling(Sampling::Single);
    let w = World::new(vec![Shape::sphere(Vector3::new(0.0, 0.0, 5.0), 1.0).unwrap()]);
    let r = c.ray_for_pixel(1, 1);

    assert!(r.is_degenerate());
    assert_eq!(c.sample(&r, &w, &Shader::default(), None).unwrap(), MAX_INTENSITY);
}

#[test]
fn miss_without_backdrop_is_black() {
    let c = Camera::new(2, 2, 2.0, 2.0, 10.0).unwrap();
    let r = c.ray_for_pixel(0, 0);

    assert_eq!(c.sample(&r, &World::empty(), &Shader::default(), None).unwrap(), 0.0);
}

#[test]
fn pixel_intensity_is_mean_of_samples() {
    let c = Camera::new(10, 10, 100.0, 100.0, 100.0).unwrap();
    let w = World::new(vec![Shape::sphere(Vector3::new(0.0, 0.0, 50.0), 40.0).unwrap()]);
    let s = Shader::default();
    let b = Backdrop::default();

    let expected: f64 = c.rays_for_pixel(5, 5)
        .map(|r| c.sample(&r, &w, &s, Some(&b)).unwrap())
        .sum::<f64>() / 4.0;

    assert!(crate::feq(c.pixel_intensity(5, 5, &w, &s, Some(&b)).unwrap(), expected));
}

#[test]
fn sphere_center_brighter_than_backdrop_corner() {
    let c = Camera::new(10, 10, 100.0, 100.0, 100.0).unwrap();
    let w = World::new(vec![Shape::sphere(Vector3::new(0.0, 0.0, 50.0), 40.0).unwrap()]);
    let b = Backdrop::default();

    let image = c.render(&w, &Shader::default(), Some(&b)).unwrap();
    let center = image.read_pixel(5, 5).unwrap();
    let corner = image.read_pixel(0, 0).unwrap();

    assert!(center > corner);
    assert!(center > 200.0);
    assert!(crate::feq(corner, b.intensity(&Shader::default(), c.optical_axis())));
}

#[test]
fn empty_scene_is_uniform() {
    let c = Camera::new(10, 8, 100.0, 80.0, 100.0).unwrap();
    let image = c.render(&World::empty(), &Shader::default(), Some(&Backdrop::default())).unwrap();

    let first = image.read_pixel(0, 0).unwrap();
    assert!(image.rows().all(|row| row.iter().all(|&v| v == first)));
}

#[test]
fn box_face_seen_head_on_is_bright() {
    let c = Camera::new(9, 9, 9.0, 9.0, 100.0).unwrap()
        .with_sampling(Sampling::Single);
    let w = World::new(vec![
        Shape::cuboid(Vector3::new(-50.0, -50.0, 40.0), 100.0, 100.0, 100.0).unwrap(),
    ]);

    let image = c.render(&w, &Shader::default(), None).unwrap();
    let v = image.read_pixel(4, 4).unwrap();
    assert!(v > 254.0 && v <= 255.0);
}
