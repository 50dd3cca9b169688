use std::io;
use std::io::Write;
use std::fs::File;
use std::path::Path;

use crate::consts::{ MAX_INTENSITY, MIN_INTENSITY };

/// A grid of scalar intensities.
///
/// This is what a render hands to the outside world: `height` rows of
/// `width` intensities each. Values are nominally in `[0, 255]` but are
/// stored unclamped; whoever displays them decides how to quantize.
///
/// The only export built in is plain PGM.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored row-major as a flattened vector.
    pixels: Vec<f64>,
}

impl Canvas {
    /// Creates a new zero-filled canvas with specified width and height.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![0.0; width * height]
        }
    }

    /// Writes an intensity to a location on the `Canvas`.
    ///
    /// Out-of-bounds pixels are ignored. `y` is the row of the pixel and `x`
    /// the column, both zero-indexed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pinhole_tracer::canvas::Canvas;
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, 128.0);
    /// assert_eq!(canvas.read_pixel(4, 2), Some(128.0));
    /// assert_eq!(canvas.read_pixel(8, 2), None);
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, value: f64) {
        // Silently ignore out-of-bounds pixels
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[(y * self.width) + x] = value;
    }

    /// Reads an intensity from a location on the `Canvas`, or `None` when
    /// the location is out-of-bounds.
    pub fn read_pixel(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None
        }

        Some(self.pixels[(y * self.width) + x])
    }

    /// Iterates over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks() panics on a zero chunk size
        self.pixels.chunks(self.width.max(1))
    }

    /// Mutable access to the rows, for renderers that fill the canvas a row
    /// at a time.
    pub fn rows_mut(&mut self) -> std::slice::ChunksMut<'_, f64> {
        self.pixels.chunks_mut(self.width.max(1))
    }

    /// Smallest and largest intensity, or `None` for an empty canvas.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut it = self.pixels.iter().copied();
        let first = it.next()?;

        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Saves a canvas to a plain (P2) PGM file.
    ///
    /// Each intensity is clamped to `[0, 255]` and rounded. Lines are kept
    /// within 70 columns.
    pub fn save_pgm(&self, path: &Path) -> io::Result<()> {
        let mut out = io::BufWriter::new(File::create(path)?);
        self.write_pgm(&mut out)?;
        out.flush()
    }

    /// Writes the PGM encoding of the canvas to any writer.
    pub fn write_pgm<W: Write>(&self, out: &mut W) -> io::Result<()> {
        // Write PGM header, as well as metadata
        writeln!(out, "P2")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "{}", MAX_INTENSITY as usize)?;

        for row in self.rows() {
            let mut col = 0;
            for &value in row.iter() {
                let level = value.clamp(MIN_INTENSITY, MAX_INTENSITY).round() as usize;
                let s = level.to_string();

                // Wrap before a value would cross the 70 column mark
                if col == 0 {
                    write!(out, "{}", s)?;
                    col = s.len();
                } else if col + 1 + s.len() > 70 {
                    write!(out, "\n{}", s)?;
                    col = s.len();
                } else {
                    write!(out, " {}", s)?;
                    col += 1 + s.len();
                }
            }

            writeln!(out)?;
        }

        Ok(())
    }
}

#[test]
fn new_canvas_is_black() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.rows().count(), 20);
    assert!(c.rows().all(|row| row.len() == 10 && row.iter().all(|&v| v == 0.0)));
}

#[test]
fn min_max_of_canvas() {
    let mut c = Canvas::new(3, 2);
    c.write_pixel(0, 0, -4.0);
    c.write_pixel(2, 1, 300.0);

    assert_eq!(c.min_max(), Some((-4.0, 300.0)));
    assert_eq!(Canvas::new(0, 0).min_max(), None);
}

#[test]
fn pgm_header_and_clamping() {
    let mut c = Canvas::new(3, 2);
    c.write_pixel(0, 0, -12.0);
    c.write_pixel(1, 0, 127.6);
    c.write_pixel(2, 0, 400.0);
    c.write_pixel(1, 1, 3.68);

    let mut out = Vec::new();
    c.write_pgm(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(text, "P2\n3 2\n255\n0 128 255\n0 4 0\n");
}

#[test]
fn pgm_lines_stay_under_70_columns() {
    let mut c = Canvas::new(40, 1);
    for x in 0..40 {
        c.write_pixel(x, 0, 255.0);
    }

    let mut out = Vec::new();
    c.write_pgm(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.lines().all(|l| l.len() <= 70));
    assert_eq!(text.lines().skip(3).flat_map(|l| l.split_whitespace()).count(), 40);
}
