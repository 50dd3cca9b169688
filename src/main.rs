mod cli;
mod logger;

use std::process;

use clap::Parser;
use log::{ error, info };

use pinhole_tracer::camera::Sampling;
use pinhole_tracer::error::Result;
use pinhole_tracer::parallel;
use pinhole_tracer::scene::Scene;

use cli::Args;
use logger::init_logger;

fn run(args: &Args) -> Result<()> {
    let mut scene = match &args.scene {
        Some(path) => Scene::load(path)?,
        None => {
            info!("No scene given, rendering the built-in scene");
            Scene::default_scene()?
        },
    };

    if args.no_antialias {
        scene.camera.sampling = Sampling::Single;
    }

    let canvas = if args.serial {
        scene.camera.render(&scene.world, &scene.shader, scene.backdrop.as_ref())?
    } else {
        parallel::render_with_threads(args.threads, &scene.camera, &scene.world,
            &scene.shader, scene.backdrop.as_ref(), None)?
    };

    if let Some((lo, hi)) = canvas.min_max() {
        info!("Intensities range from {:.2} to {:.2}", lo, hi);
    }

    canvas.save_pgm(&args.output)?;
    info!("Saved render to {}.", args.output.display());
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logger(args.log_level.into());

    info!("pinhole-tracer {}", clap::crate_version!());

    if let Err(e) = run(&args) {
        error!("{}", e);
        process::exit(1);
    }
}
