use std::path::PathBuf;

use clap::{ ArgEnum, Parser };
use log::LevelFilter;

use pinhole_tracer::consts::DEFAULT_OUT_FILE;

/// Log levels selectable on the command line.
#[derive(Debug, Clone, Copy, ArgEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Render a scene of boxes, spheres and planes to a grayscale PGM image.
#[derive(Parser, Debug)]
#[clap(name = "pinhole-tracer", version)]
pub struct Args {
    /// JSON scene description; the built-in three-box scene when omitted
    #[clap(short, long, parse(from_os_str))]
    pub scene: Option<PathBuf>,

    /// Output PGM file
    #[clap(short, long, parse(from_os_str), default_value = DEFAULT_OUT_FILE)]
    pub output: PathBuf,

    /// Number of render threads (0 lets the pool decide)
    #[clap(short, long, default_value = "0")]
    pub threads: usize,

    /// Render on the calling thread only
    #[clap(long)]
    pub serial: bool,

    /// Cast one ray per pixel instead of the four-tap jitter pattern
    #[clap(long)]
    pub no_antialias: bool,

    /// Logging level
    #[clap(long, arg_enum, default_value = "info")]
    pub log_level: LogLevel,
}
