//! Image and JSON input/output.
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use image::{GrayImage, Luma, Rgb, RgbImage};
use map_placement::prelude::{BinaryMask, Grid, ScalarField, VectorField2D};
use serde::Serialize;

/// Loads any supported image as 8-bit grayscale normalized to [0, 1].
pub fn load_scalar_field(path: impl AsRef<Path>) -> Result<ScalarField> {
    let path = path.as_ref();
    let img = image::open(path)
        .with_context(|| format!("failed to open image {}", path.display()))?
        .to_luma8();
    let (w, h) = img.dimensions();
    let field = ScalarField::from_luma8(w as usize, h as usize, img.as_raw())?;
    Ok(field)
}

pub fn load_rgb_image(path: impl AsRef<Path>) -> Result<RgbImage> {
    let path = path.as_ref();
    Ok(image::open(path)
        .with_context(|| format!("failed to open image {}", path.display()))?
        .to_rgb8())
}

fn gray_from<T>(grid: &Grid<T>, mut f: impl FnMut(&T) -> u8) -> GrayImage {
    GrayImage::from_fn(grid.width() as u32, grid.height() as u32, |x, y| {
        Luma([f(&grid[(x as usize, y as usize)])])
    })
}

/// Candidate masks are written white on black.
pub fn save_mask_png(mask: &BinaryMask, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    gray_from(mask, |&b| if b { 255 } else { 0 })
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Writes `value / max` as grayscale, clamped to [0, 255].
pub fn save_field_png(field: &ScalarField, max: f32, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let scale = if max > 0.0 { 255.0 / max } else { 0.0 };
    gray_from(field, |&v| (v * scale).round().clamp(0.0, 255.0) as u8)
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Encodes each vector as red = `(x + 1) / 2`, green = `(y + 1) / 2`.
pub fn save_orientation_png(field: &VectorField2D, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let encode = |c: f32| ((c + 1.0) * 0.5 * 255.0).round().clamp(0.0, 255.0) as u8;
    RgbImage::from_fn(field.width() as u32, field.height() as u32, |x, y| {
        let v = field[(x as usize, y as usize)];
        Rgb([encode(v.x), encode(v.y), 0])
    })
    .save(path)
    .with_context(|| format!("failed to write {}", path.display()))
}

/// Pretty-prints `value` as JSON with two-space indentation.
pub fn write_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("failed to write {}", path.display()))
}
