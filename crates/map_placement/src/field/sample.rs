//! Bilinear sampling and world-to-field mapping.
//!
//! Field space has texel `(c, r)` centred at `(c + 0.5, height - r - 0.5)`: the
//! vertical axis is flipped because row 0 of a stored field is the visual top,
//! while world-space forward maps to increasing rows.
use glam::Vec2;

use crate::field::grid::{Grid, ScalarField};

/// Bilinear interpolation over the 2x2 neighbourhood around `(x, y)` in field space.
///
/// Sampling at the centre of an interior texel returns the stored value exactly.
///
/// When the rounded sample index lands on the first or last row or column there is no
/// full neighbourhood. The index is then wrapped periodically (`rem_euclid`) and the
/// nearest texel is returned unfiltered. Wrapping rather than clamping means the
/// last row and column read from the opposite edge. This is intentional and kept
/// for compatibility with existing height maps.
pub fn sample_bilinear(field: &ScalarField, x: f32, y: f32) -> f32 {
    let (w, h) = field.size();
    if w == 0 || h == 0 {
        return 0.0;
    }

    let y = h as f32 - y;
    let i = x.round() as isize;
    let j = y.round() as isize;

    if i <= 0 || j <= 0 || i >= w as isize || j >= h as isize {
        let wi = i.rem_euclid(w as isize) as usize;
        let wj = j.rem_euclid(h as isize) as usize;
        return field[(wi, wj)];
    }

    let (i, j) = (i as usize, j as usize);
    let t = x - i as f32 + 0.5;
    let s = y - j as f32 + 0.5;

    field[(i - 1, j - 1)] * (1.0 - t) * (1.0 - s)
        + field[(i, j - 1)] * t * (1.0 - s)
        + field[(i - 1, j)] * (1.0 - t) * s
        + field[(i, j)] * t * s
}

/// Placement of a field in world space: the field is centred on the origin and
/// each texel covers `pixel_size` world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldFrame {
    pub width: usize,
    pub height: usize,
    pub pixel_size: f32,
}

impl FieldFrame {
    pub fn new(width: usize, height: usize, pixel_size: f32) -> Self {
        Self {
            width,
            height,
            pixel_size,
        }
    }

    pub fn for_grid<T>(grid: &Grid<T>, pixel_size: f32) -> Self {
        Self::new(grid.width(), grid.height(), pixel_size)
    }

    /// World extent `(x, z)` covered by the field.
    pub fn extent(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.pixel_size,
            self.height as f32 * self.pixel_size,
        )
    }

    /// Map a world position on the ground plane to field-space coordinates suitable
    /// for [`sample_bilinear`].
    pub fn world_to_field(&self, x: f32, z: f32) -> Vec2 {
        let extent = self.extent();
        let u = x / extent.x + 0.5;
        let v = -z / extent.y + 0.5;
        Vec2::new(u * self.width as f32, v * self.height as f32)
    }

    /// Texel containing a world position, using the same convention as
    /// [`world_to_field`](Self::world_to_field) and clamped to the field.
    pub fn world_to_texel(&self, x: f32, z: f32) -> (usize, usize) {
        let p = self.world_to_field(x, z);
        let col = p.x.floor().clamp(0.0, self.width.saturating_sub(1) as f32) as usize;
        let row = (self.height as f32 - p.y)
            .floor()
            .clamp(0.0, self.height.saturating_sub(1) as f32) as usize;
        (col, row)
    }
}
