//! Row-major 2D grids used for every field in the pipeline.
//!
//! [`Grid`] stores `width * height` cells with `(x, y)` addressing, where `x` is the
//! column and `y` the row (row 0 is the top row of the source image).
use std::ops::{Index, IndexMut};

use glam::Vec2;

use crate::error::{Error, Result};

/// A dense 2D grid of cells stored row by row.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

/// Continuous values: densities and heights in [0, 1], distances in [0, 254].
pub type ScalarField = Grid<f32>;
/// Boolean cells, e.g. dithered candidates or road pixels.
pub type BinaryMask = Grid<bool>;
/// Per-cell 2D direction vectors.
pub type VectorField2D = Grid<Vec2>;

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Wrap an existing row-major buffer, checking its length.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != width * height {
            return Err(Error::InvalidConfig(format!(
                "grid buffer has {} cells, expected {}x{} = {}",
                data.len(),
                width,
                height,
                width * height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Nearest-neighbour upsampling: every cell becomes a `ratio x ratio` block.
    pub fn upsample(&self, ratio: usize) -> Self {
        if ratio <= 1 {
            return self.clone();
        }
        Self::from_fn(self.width * ratio, self.height * ratio, |x, y| {
            self[(x / ratio, y / ratio)].clone()
        })
    }

    /// Nearest-neighbour resampling to an arbitrary size.
    pub fn resize_nearest(&self, width: usize, height: usize) -> Self {
        if width == self.width && height == self.height {
            return self.clone();
        }
        if self.is_empty() {
            return Self {
                width: 0,
                height: 0,
                data: Vec::new(),
            };
        }
        let sx = self.width as f32 / width.max(1) as f32;
        let sy = self.height as f32 / height.max(1) as f32;
        Self::from_fn(width, height, |x, y| {
            let src_x = (((x as f32 + 0.5) * sx) as usize).min(self.width - 1);
            let src_y = (((y as f32 + 0.5) * sy) as usize).min(self.height - 1);
            self[(src_x, src_y)].clone()
        })
    }

    /// Apply `f` to every cell, producing a grid of the same shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T> Grid<T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if self.contains(x, y) {
            Some(&self.data[self.offset(x, y)])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if self.contains(x, y) {
            let i = self.offset(x, y);
            Some(&mut self.data[i])
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterate rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.width.max(1))
    }

    /// Iterate `(x, y, value)` in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let w = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(i, v)| (i % w, i / w, v))
    }

    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.size() == other.size()
    }

    /// Combine two grids of the same shape cell by cell.
    pub fn zip_map<U, V>(&self, other: &Grid<U>, mut f: impl FnMut(&T, &U) -> V) -> Result<Grid<V>> {
        if !self.same_shape(other) {
            return Err(Error::ShapeMismatch {
                what: "zipped grid".into(),
                expected: self.size(),
                actual: other.size(),
            });
        }
        Ok(Grid {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| f(a, b))
                .collect(),
        })
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &T {
        debug_assert!(self.contains(x, y), "({x}, {y}) outside grid");
        &self.data[self.offset(x, y)]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        debug_assert!(self.contains(x, y), "({x}, {y}) outside grid");
        let i = self.offset(x, y);
        &mut self.data[i]
    }
}

impl ScalarField {
    pub fn zeros(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0.0)
    }

    /// Normalize 8-bit grayscale samples to [0, 1].
    pub fn from_luma8(width: usize, height: usize, pixels: &[u8]) -> Result<Self> {
        Self::from_vec(
            width,
            height,
            pixels.iter().map(|&p| p as f32 / 255.0).collect(),
        )
    }

    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Box-filter resampling: every target cell holds the mean of the source cells
    /// its footprint touches. Thin features survive downsampling as partial coverage.
    pub fn resize_box(&self, width: usize, height: usize) -> Self {
        if width == self.width && height == self.height {
            return self.clone();
        }
        if self.is_empty() {
            return Self::zeros(width, height);
        }
        let span = |i: usize, src: usize, dst: usize| {
            let start = (i * src / dst).min(src - 1);
            let end = ((i + 1) * src).div_ceil(dst).clamp(start + 1, src);
            start..end
        };
        Self::from_fn(width, height, |x, y| {
            let (xs, ys) = (span(x, self.width, width), span(y, self.height, height));
            let count = (xs.len() * ys.len()) as f32;
            let total: f32 = ys
                .flat_map(|sy| xs.clone().map(move |sx| (sx, sy)))
                .map(|cell| self[cell])
                .sum();
            total / count
        })
    }

    /// Cells strictly above `threshold` become `true`.
    pub fn threshold(&self, threshold: f32) -> BinaryMask {
        self.map(|&v| v > threshold)
    }
}

impl BinaryMask {
    /// Number of `true` cells.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }

    /// `1.0` for set cells, `0.0` otherwise.
    pub fn to_scalar(&self) -> ScalarField {
        self.map(|&b| if b { 1.0 } else { 0.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_rejects_wrong_length() {
        assert!(Grid::from_vec(2, 2, vec![0.0f32; 3]).is_err());
        assert!(Grid::from_vec(2, 2, vec![0.0f32; 4]).is_ok());
    }

    #[test]
    fn indexing_is_column_then_row() {
        let grid = Grid::from_fn(3, 2, |x, y| x + 10 * y);
        assert_eq!(grid[(2, 0)], 2);
        assert_eq!(grid[(0, 1)], 10);
        assert_eq!(grid.as_slice(), &[0, 1, 2, 10, 11, 12]);
        assert!(grid.get(3, 0).is_none());
    }

    #[test]
    fn upsample_replicates_blocks() {
        let grid = Grid::from_vec(2, 1, vec![true, false]).unwrap();
        let up = grid.upsample(2);
        assert_eq!(up.size(), (4, 2));
        assert_eq!(up.as_slice(), &[true, true, false, false, true, true, false, false]);
    }

    #[test]
    fn upsample_by_one_is_identity() {
        let grid = Grid::from_fn(3, 3, |x, y| (x * y) as f32);
        assert_eq!(grid.upsample(1), grid);
    }

    #[test]
    fn resize_nearest_downsamples_by_picking_centres() {
        let grid = Grid::from_fn(4, 4, |x, y| (x + 4 * y) as f32);
        let small = grid.resize_nearest(2, 2);
        assert_eq!(small.as_slice(), &[5.0, 7.0, 13.0, 15.0]);
    }

    #[test]
    fn resize_box_averages_covered_cells() {
        let grid = Grid::from_fn(4, 4, |x, y| (x + 4 * y) as f32);
        let small = grid.resize_box(2, 2);
        assert_eq!(small.as_slice(), &[2.5, 4.5, 10.5, 12.5]);
    }

    #[test]
    fn resize_box_keeps_thin_lines_as_partial_coverage() {
        let line = Grid::from_fn(20, 20, |x, _| if x == 6 { 1.0 } else { 0.0 });
        let small = line.resize_box(4, 4);
        for y in 0..4 {
            assert_eq!(small[(0, y)], 0.0);
            assert!((small[(1, y)] - 0.2).abs() < 1e-6);
            assert_eq!(small[(2, y)], 0.0);
        }
    }

    #[test]
    fn zip_map_checks_shape() {
        let a = ScalarField::zeros(2, 2);
        let b = ScalarField::zeros(3, 2);
        assert!(matches!(a.zip_map(&b, |x, y| x + y), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn threshold_and_count() {
        let field = ScalarField::from_luma8(3, 1, &[0, 128, 255]).unwrap();
        let mask = field.threshold(0.5);
        assert_eq!(mask.as_slice(), &[false, true, true]);
        assert_eq!(mask.count(), 2);
        assert_eq!(mask.to_scalar().sum(), 2.0);
    }

    #[test]
    fn iter_cells_reports_coordinates() {
        let grid = Grid::from_fn(2, 2, |x, y| (x, y));
        for (x, y, v) in grid.iter_cells() {
            assert_eq!((x, y), *v);
        }
    }
}
