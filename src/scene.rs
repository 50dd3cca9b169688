//! Scene descriptions.
//!
//! A scene file is JSON: a camera block, optional shading and backdrop
//! blocks, and a list of shapes tagged by `ty`. Everything is validated while
//! the `Scene` is built, so a loaded scene renders without precondition
//! failures.

use std::fs;
use std::path::Path;

use log::{ debug, info };
use serde::{ Serialize, Deserialize };

use crate::vector::Vector3;
use crate::shape::Shape;
use crate::world::World;
use crate::camera::{ Camera, Sampling };
use crate::shade::{ Shader, Backdrop };
use crate::consts::{ DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT,
    DEFAULT_FOCAL_LENGTH, DEFAULT_FALLOFF, BACKDROP_DISTANCE };
use crate::error::Result;

/// Everything a render needs.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub world: World,
    pub camera: Camera,
    pub shader: Shader,
    pub backdrop: Option<Backdrop>,
}

impl Scene {
    /// Reads and validates a JSON scene file.
    pub fn load(path: &Path) -> Result<Scene> {
        info!("Loading scene from {}", path.display());
        let text = fs::read_to_string(path)?;
        Scene::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Scene> {
        let scene_json: SceneJson = serde_json::from_str(text)?;
        Scene::build(scene_json)
    }

    /// Three boxes seen from 100 units behind a 300x300 screen.
    pub fn default_scene() -> Result<Scene> {
        let world = World::new(vec![
            Shape::cuboid(Vector3::new(0.0, -120.0, 40.0), 100.0, 100.0, 100.0)?,
            Shape::cuboid(Vector3::new(-100.0, -20.0, 50.0), 50.0, 50.0, 50.0)?,
            Shape::cuboid(Vector3::new(20.0, 30.0, 40.0), 30.0, 30.0, 30.0)?,
        ]);

        let camera = Camera::new(
            DEFAULT_CANVAS_WIDTH,
            DEFAULT_CANVAS_HEIGHT,
            DEFAULT_CANVAS_WIDTH as f64,
            DEFAULT_CANVAS_HEIGHT as f64,
            DEFAULT_FOCAL_LENGTH,
        )?;

        Ok(Scene {
            world,
            camera,
            shader: Shader::default(),
            backdrop: Some(Backdrop::default()),
        })
    }

    fn build(scene_json: SceneJson) -> Result<Scene> {
        let cam = scene_json.camera;
        let mut camera = Camera::new(
            cam.width,
            cam.height,
            cam.screen_width.unwrap_or(cam.width as f64),
            cam.screen_height.unwrap_or(cam.height as f64),
            cam.focal_length,
        )?.with_sampling(cam.sampling.into());

        if let Some(p) = cam.focal_point {
            camera = camera.with_focal_point(p.into());
        }

        let shader = match scene_json.shading.falloff_unit {
            Some(unit) => Shader::attenuated(scene_json.shading.falloff, unit)?,
            None => Shader::angular(scene_json.shading.falloff)?,
        };

        let backdrop = match scene_json.backdrop {
            Some(b) => Some(Backdrop::new(b.distance, b.normal.into())?),
            None => None,
        };

        let mut world = World::empty();
        for shape_json in scene_json.shapes {
            let shape = shape_json.into_shape()?;
            debug!("Adding {} to the world", shape.kind());
            world.add(shape);
        }

        info!("Scene has {} object(s), {}x{} canvas", world.len(), camera.hsize, camera.vsize);
        Ok(Scene { world, camera, shader, backdrop })
    }
}

#[derive(Serialize, Deserialize)]
pub struct SceneJson {
    camera: CameraJson,

    #[serde(default)]
    shading: ShadingJson,

    /// Missing means the default backdrop, `null` means none.
    #[serde(default = "default_backdrop")]
    backdrop: Option<BackdropJson>,

    #[serde(default)]
    shapes: Vec<ShapeJson>,
}

#[derive(Clone, Serialize, Deserialize)]
struct CameraJson {
    width: usize,
    height: usize,
    screen_width: Option<f64>,
    screen_height: Option<f64>,

    #[serde(default = "default_focal_length")]
    focal_length: f64,

    /// Overrides `focal_length` when present.
    focal_point: Option<[f64; 3]>,

    #[serde(default)]
    sampling: SamplingJson,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum SamplingJson {
    Single,
    Jittered,
}

impl Default for SamplingJson {
    fn default() -> SamplingJson {
        SamplingJson::Jittered
    }
}

impl From<SamplingJson> for Sampling {
    fn from(s: SamplingJson) -> Sampling {
        match s {
            SamplingJson::Single => Sampling::Single,
            SamplingJson::Jittered => Sampling::Jittered,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct ShadingJson {
    #[serde(default = "default_falloff")]
    falloff: f64,
    falloff_unit: Option<f64>,
}

impl Default for ShadingJson {
    fn default() -> ShadingJson {
        ShadingJson { falloff: DEFAULT_FALLOFF, falloff_unit: None }
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct BackdropJson {
    #[serde(default = "default_backdrop_distance")]
    distance: f64,
    normal: [f64; 3],
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "ty", rename_all = "lowercase")]
enum ShapeJson {
    Plane { normal: [f64; 3], offset: f64 },
    #[serde(rename = "box")]
    Cuboid { corner: [f64; 3], width: f64, height: f64, depth: f64 },
    Sphere { center: [f64; 3], radius: f64 },
}

impl ShapeJson {
    fn into_shape(self) -> Result<Shape> {
        match self {
            ShapeJson::Plane { normal, offset }
                => Shape::plane(normal.into(), offset),
            ShapeJson::Cuboid { corner, width, height, depth }
                => Shape::cuboid(corner.into(), width, height, depth),
            ShapeJson::Sphere { center, radius }
                => Shape::sphere(center.into(), radius),
        }
    }
}

fn default_focal_length() -> f64 {
    DEFAULT_FOCAL_LENGTH
}

fn default_falloff() -> f64 {
    DEFAULT_FALLOFF
}

fn default_backdrop_distance() -> f64 {
    BACKDROP_DISTANCE
}

fn default_backdrop() -> Option<BackdropJson> {
    let b = Backdrop::default();
    Some(BackdropJson {
        distance: b.distance,
        normal: [b.normal.x, b.normal.y, b.normal.z],
    })
}

/* Tests */

#[cfg(test)]
use crate::error::RenderError;

#[test]
fn load_full_scene() {
    let scene = Scene::from_json(r#"{
        "camera": { "width": 30, "height": 20, "screen_width": 60.0,
                    "screen_height": 40.0, "focal_length": 50.0,
                    "sampling": "single" },
        "shading": { "falloff": 60.0, "falloff_unit": 100.0 },
        "backdrop": { "distance": 500.0, "normal": [0.0, 0.0, 2.0] },
        "shapes": [
            { "ty": "box", "corner": [0, -120, 40], "width": 100, "height": 100, "depth": 100 },
            { "ty": "sphere", "center": [0, 0, 50], "radius": 40 },
            { "ty": "plane", "normal": [0, 1, 0], "offset": -200 }
        ]
    }"#).unwrap();

    assert_eq!(scene.world.len(), 3);
    assert_eq!(scene.world.objects[0].kind(), "box");
    assert_eq!(scene.world.objects[2].kind(), "plane");

    assert_eq!(scene.camera.hsize, 30);
    assert_eq!(scene.camera.screen_width, 60.0);
    assert_eq!(scene.camera.focal_point, Vector3::new(0.0, 0.0, -50.0));
    assert_eq!(scene.camera.sampling, Sampling::Single);

    assert_eq!(scene.shader, Shader::Attenuated { falloff: 60.0, falloff_unit: 100.0 });
    assert_eq!(scene.backdrop, Some(Backdrop {
        distance: 500.0,
        normal: Vector3::new(0.0, 0.0, 1.0),
    }));
}

#[test]
fn minimal_scene_uses_defaults() {
    let scene = Scene::from_json(r#"{ "camera": { "width": 10, "height": 10 } }"#).unwrap();

    assert!(scene.world.is_empty());
    assert_eq!(scene.camera.screen_height, 10.0);
    assert_eq!(scene.camera.focal_point, Vector3::new(0.0, 0.0, -DEFAULT_FOCAL_LENGTH));
    assert_eq!(scene.camera.sampling, Sampling::Jittered);
    assert_eq!(scene.shader, Shader::default());
    assert_eq!(scene.backdrop, Some(Backdrop::default()));
}

#[test]
fn null_backdrop_disables_it() {
    let scene = Scene::from_json(r#"{
        "camera": { "width": 10, "height": 10, "focal_point": [5, 5, -20] },
        "backdrop": null
    }"#).unwrap();

    assert_eq!(scene.backdrop, None);
    assert_eq!(scene.camera.focal_point, Vector3::new(5.0, 5.0, -20.0));
}

#[test]
fn invalid_sphere_fails_at_load() {
    let result = Scene::from_json(r#"{
        "camera": { "width": 10, "height": 10 },
        "shapes": [ { "ty": "sphere", "center": [0, 0, 0], "radius": -1 } ]
    }"#);

    assert!(matches!(result, Err(RenderError::InvalidPrimitive(_))));
}

#[test]
fn unknown_shape_is_a_scene_error() {
    let result = Scene::from_json(r#"{
        "camera": { "width": 10, "height": 10 },
        "shapes": [ { "ty": "torus" } ]
    }"#);

    assert!(matches!(result, Err(RenderError::Scene(_))));
}

#[test]
fn zero_sized_camera_fails_at_load() {
    let result = Scene::from_json(r#"{ "camera": { "width": 0, "height": 10 } }"#);

    assert!(matches!(result, Err(RenderError::InvalidCamera(_))));
}

#[test]
fn default_scene_has_three_boxes() {
    let scene = Scene::default_scene().unwrap();

    assert_eq!(scene.world.len(), 3);
    assert!(scene.world.objects.iter().all(|s| s.kind() == "box"));
    assert_eq!(scene.camera.focal_point, Vector3::new(0.0, 0.0, -100.0));
}

#[test]
fn load_scene_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenes/mixed.json");
    let scene = Scene::load(&path).unwrap();

    assert_eq!(scene.world.len(), 4);
    assert_eq!(scene.camera.hsize, 300);
    assert_eq!(scene.backdrop, Some(Backdrop::default()));
}
