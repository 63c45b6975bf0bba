//! Ordered dithering with a 4x4 Bayer matrix.
use crate::dithering::Discretizer;
use crate::field::{BinaryMask, ScalarField};

/// Threshold matrix indexed by `[row % 4][col % 4]`.
pub const THRESHOLD_MAP: [[f32; 4]; 4] = [
    [0.0 / 16.0, 8.0 / 16.0, 2.0 / 16.0, 10.0 / 16.0],
    [12.0 / 16.0, 4.0 / 16.0, 14.0 / 16.0, 6.0 / 16.0],
    [3.0 / 16.0, 11.0 / 16.0, 1.0 / 16.0, 9.0 / 16.0],
    [15.0 / 16.0, 7.0 / 16.0, 13.0 / 16.0, 5.0 / 16.0],
];

/// Ordered dithering. A cell is a candidate iff its density is strictly greater
/// than its threshold; ties count as below.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedDithering;

impl Discretizer for OrderedDithering {
    fn discretize(&self, density: &ScalarField) -> BinaryMask {
        BinaryMask::from_fn(density.width(), density.height(), |x, y| {
            density[(x, y)] > THRESHOLD_MAP[y % 4][x % 4]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_input_gives_identical_output() {
        let density = ScalarField::from_fn(23, 19, |x, y| ((x * 7 + y * 3) % 17) as f32 / 16.0);
        let a = OrderedDithering.discretize(&density);
        let b = OrderedDithering.discretize(&density);
        assert_eq!(a, b);
    }

    #[test]
    fn uniform_density_fills_matching_fraction_of_each_tile() {
        for k in 0..=16 {
            let value = k as f32 / 16.0 + 1e-4;
            let density = ScalarField::filled(8, 8, value.min(1.0));
            let count = OrderedDithering.discretize(&density).count();
            assert_eq!(count, 4 * (k + 1).min(16), "k = {k}");
        }
    }

    #[test]
    fn threshold_ties_are_below() {
        // 0.5 equals the threshold at (1, 0).
        let density = ScalarField::filled(4, 4, 0.5);
        let mask = OrderedDithering.discretize(&density);
        assert!(!mask[(1, 0)]);
        assert_eq!(mask.count(), 8);
    }

    #[test]
    fn pattern_repeats_every_four_cells() {
        let density = ScalarField::filled(12, 12, 0.3);
        let mask = OrderedDithering.discretize(&density);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(mask[(x, y)], mask[(x + 4, y + 4)]);
            }
        }
    }
}
