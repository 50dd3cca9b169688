// Floating point comparisons (tests and vector equality only)
pub const FEQ_EPSILON: f64 = 0.0001;

// Intensity range handed to the sink
pub const MAX_INTENSITY: f64 = 255.0;
pub const MIN_INTENSITY: f64 = 0.0;

// Shading
pub const DEFAULT_FALLOFF: f64 = 80.0;
pub const BACKDROP_DISTANCE: f64 = 300.0;

/// Sub-pixel offsets `(x, y)` of the antialiasing pattern, four taps per pixel.
pub const JITTER_PATTERN: [(f64, f64); 4] = [
    (-0.25, 0.75),
    (0.75, 1.0 / 3.0),
    (-0.75, -0.25),
    (0.25, -0.75),
];

// Built-in scene
pub const DEFAULT_CANVAS_WIDTH: usize = 300;
pub const DEFAULT_CANVAS_HEIGHT: usize = 300;
pub const DEFAULT_FOCAL_LENGTH: f64 = 100.0;
pub const DEFAULT_OUT_FILE: &str = "./out.pgm";
