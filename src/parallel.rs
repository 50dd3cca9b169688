use std::sync::atomic::{ AtomicBool, Ordering };
use std::time::Instant;

use log::{ debug, info };
use rayon::prelude::*;

use crate::world::World;
use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::shade::{ Shader, Backdrop };
use crate::error::{ RenderError, Result };

/// Renders the world across the rayon pool, one row per task.
///
/// Rows are disjoint slices of the canvas, so no worker shares mutable
/// state with another and nothing is locked. The output is identical to
/// `Camera::render`.
///
/// When `cancel` is given it is polled before each row; once it reads
/// `true` the remaining rows are skipped and `RenderError::Cancelled` is
/// returned.
pub fn render(camera: &Camera, world: &World, shader: &Shader,
    backdrop: Option<&Backdrop>, cancel: Option<&AtomicBool>) -> Result<Canvas> {
    info!("Rendering {}x{} using {} threads...",
        camera.hsize, camera.vsize, rayon::current_num_threads());
    let start = Instant::now();

    let mut canvas = Canvas::new(camera.hsize, camera.vsize);
    canvas.rows_mut()
        .collect::<Vec<&mut [f64]>>()
        .into_par_iter()
        .enumerate()
        .try_for_each(|(py, row)| {
            if let Some(flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    return Err(RenderError::Cancelled);
                }
            }

            camera.render_row(py, row, world, shader, backdrop)
        })?;

    debug!("...done in {:.2}s", start.elapsed().as_secs_f32());
    Ok(canvas)
}

/// Runs `render` on a dedicated pool of `threads` workers instead of the
/// global one. Zero leaves the choice to rayon.
pub fn render_with_threads(threads: usize, camera: &Camera, world: &World,
    shader: &Shader, backdrop: Option<&Backdrop>, cancel: Option<&AtomicBool>)
    -> Result<Canvas> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;

    pool.install(|| render(camera, world, shader, backdrop, cancel))
}

#[cfg(test)]
use crate::{ vector::Vector3, shape::Shape };

#[cfg(test)]
fn busy_world() -> World {
    World::new(vec![
        Shape::cuboid(Vector3::new(0.0, -120.0, 40.0), 100.0, 100.0, 100.0).unwrap(),
        Shape::cuboid(Vector3::new(-100.0, -20.0, 50.0), 50.0, 50.0, 50.0).unwrap(),
        Shape::sphere(Vector3::new(30.0, 45.0, 60.0), 20.0).unwrap(),
    ])
}

#[test]
fn parallel_matches_serial() {
    let camera = Camera::new(24, 18, 300.0, 225.0, 100.0).unwrap();
    let world = busy_world();
    let shader = Shader::default();
    let backdrop = Backdrop::default();

    let serial = camera.render(&world, &shader, Some(&backdrop)).unwrap();
    let parallel = render(&camera, &world, &shader, Some(&backdrop), None).unwrap();

    assert_eq!(serial, parallel);
}

#[test]
fn dedicated_pool_matches_serial() {
    let camera = Camera::new(16, 16, 300.0, 300.0, 100.0).unwrap();
    let world = busy_world();
    let shader = Shader::attenuated(80.0, 100.0).unwrap();

    let serial = camera.render(&world, &shader, None).unwrap();
    let pooled = render_with_threads(3, &camera, &world, &shader, None, None).unwrap();

    assert_eq!(serial, pooled);
}

#[test]
fn cancelled_render_reports_cancellation() {
    let camera = Camera::new(8, 8, 10.0, 10.0, 10.0).unwrap();
    let cancel = AtomicBool::new(true);

    let result = render(&camera, &World::empty(), &Shader::default(), None, Some(&cancel));
    assert!(matches!(result, Err(RenderError::Cancelled)));
}
