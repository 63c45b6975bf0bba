//! Road-derived fields: binary road mask, distance to road and orientation.
//!
//! A road map is optional input. When present, [`RoadNetwork`] bundles the fields
//! derived from it so the placement sampler can align objects with nearby roads and
//! the scene assembler can keep roads clear of objects.
use tracing::debug;

use crate::error::{Error, Result};
use crate::field::{BinaryMask, FieldFrame, ScalarField, VectorField2D};

pub mod distance;
pub mod orientation;

pub use distance::{distance_field, MAX_DISTANCE};
pub use orientation::{orientation_angle, orientation_field};

/// Normalized intensity above which a road map texel is road (5% of full scale).
pub const ROAD_THRESHOLD: f32 = 0.05;

/// Default half-width of the orientation sampling window (a 5-cell window).
pub const DEFAULT_ORIENTATION_RADIUS: usize = 2;

/// High-pass a grayscale road map into a binary road mask.
pub fn road_mask_from_intensity(intensity: &ScalarField, threshold: f32) -> BinaryMask {
    intensity.threshold(threshold)
}

/// Road mask plus the distance and orientation fields derived from it.
#[derive(Clone, Debug)]
pub struct RoadNetwork {
    mask: BinaryMask,
    distance: ScalarField,
    orientation: VectorField2D,
    frame: FieldFrame,
}

impl RoadNetwork {
    /// Builds all road fields from a binary mask whose texels cover `pixel_size` world units.
    pub fn from_mask(mask: BinaryMask, pixel_size: f32, orientation_radius: usize) -> Result<Self> {
        if mask.is_empty() {
            return Err(Error::missing("road mask has no cells"));
        }
        if !(pixel_size.is_finite() && pixel_size > 0.0) {
            return Err(Error::InvalidConfig("road pixel size must be > 0".into()));
        }
        let distance = distance_field(&mask);
        let orientation = orientation_field(&distance, orientation_radius);
        let frame = FieldFrame::for_grid(&mask, pixel_size);
        debug!(
            "Road network {}x{}: {} road cells.",
            frame.width,
            frame.height,
            mask.count()
        );
        Ok(Self {
            mask,
            distance,
            orientation,
            frame,
        })
    }

    /// High-passes a grayscale road map and builds all road fields from it.
    pub fn from_intensity(
        intensity: &ScalarField,
        pixel_size: f32,
        threshold: f32,
        orientation_radius: usize,
    ) -> Result<Self> {
        Self::from_mask(
            road_mask_from_intensity(intensity, threshold),
            pixel_size,
            orientation_radius,
        )
    }

    pub fn mask(&self) -> &BinaryMask {
        &self.mask
    }

    pub fn distance(&self) -> &ScalarField {
        &self.distance
    }

    pub fn orientation(&self) -> &VectorField2D {
        &self.orientation
    }

    pub fn frame(&self) -> FieldFrame {
        self.frame
    }

    /// Orientation angle at world position `(x, z)`, or `None` on a flat cell.
    pub fn angle_at(&self, x: f32, z: f32) -> Option<f32> {
        let (col, row) = self.frame.world_to_texel(x, z);
        orientation_angle(self.orientation[(col, row)])
    }

    /// Road coverage resampled to `width x height` and high-passed at `threshold` into
    /// a 0/1 field, used to pre-claim road area before any ecotope is placed.
    ///
    /// Coverage is box-filtered, so a road narrower than a target cell still claims
    /// every cell it crosses.
    pub fn claimed_mask(&self, width: usize, height: usize, threshold: f32) -> ScalarField {
        self.mask
            .to_scalar()
            .resize_box(width, height)
            .threshold(threshold)
            .to_scalar()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    #[test]
    fn high_pass_uses_strict_threshold() {
        let intensity = ScalarField::from_vec(4, 1, vec![0.0, 0.05, 0.051, 1.0]).unwrap();
        let mask = road_mask_from_intensity(&intensity, ROAD_THRESHOLD);
        assert_eq!(mask.as_slice(), &[false, false, true, true]);
    }

    #[test]
    fn from_mask_rejects_empty_or_bad_pixel_size() {
        assert!(RoadNetwork::from_mask(BinaryMask::filled(0, 0, false), 1.0, 2).is_err());
        assert!(RoadNetwork::from_mask(BinaryMask::filled(2, 2, false), 0.0, 2).is_err());
    }

    #[test]
    fn angle_at_reads_orientation_under_position() {
        // Vertical road through column 10 of a 21x21 map with 1-unit texels.
        let mask = BinaryMask::from_fn(21, 21, |x, _| x == 10);
        let roads = RoadNetwork::from_mask(mask, 1.0, 2).unwrap();
        // x = 5 lands in column 15, to the right of the road.
        assert_eq!(roads.angle_at(5.0, 0.0), Some(0.0));
        let left = roads.angle_at(-5.0, 0.0).unwrap();
        assert!((left - std::f32::consts::PI).abs() < 1e-6);
        assert_eq!(roads.orientation()[(15, 10)], Vec2::X);
    }

    #[test]
    fn angle_is_none_far_from_roads() {
        let roads = RoadNetwork::from_mask(BinaryMask::filled(8, 8, false), 1.0, 2).unwrap();
        assert_eq!(roads.angle_at(0.0, 0.0), None);
    }

    #[test]
    fn claimed_mask_downsamples_roads() {
        let mask = BinaryMask::from_fn(8, 8, |x, _| x < 4);
        let roads = RoadNetwork::from_mask(mask, 1.0, 2).unwrap();
        let claimed = roads.claimed_mask(2, 2, ROAD_THRESHOLD);
        assert_eq!(claimed.as_slice(), &[1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn thin_road_off_cell_centres_claims_its_cells() {
        // One texel wide road at column 6; 5x5 texel blocks are centred on column 7.
        let mask = BinaryMask::from_fn(20, 20, |x, _| x == 6);
        let roads = RoadNetwork::from_mask(mask, 1.0, 2).unwrap();
        let claimed = roads.claimed_mask(4, 4, ROAD_THRESHOLD);
        for y in 0..4 {
            assert_eq!(claimed[(0, y)], 0.0);
            assert_eq!(claimed[(1, y)], 1.0);
            assert_eq!(claimed[(2, y)], 0.0);
            assert_eq!(claimed[(3, y)], 0.0);
        }
    }

    #[test]
    fn sparse_coverage_below_threshold_is_not_claimed() {
        // A single road texel in a 5x5 block covers 4% of it.
        let mask = BinaryMask::from_fn(5, 5, |x, y| x == 0 && y == 0);
        let roads = RoadNetwork::from_mask(mask, 1.0, 2).unwrap();
        assert_eq!(roads.claimed_mask(1, 1, ROAD_THRESHOLD).as_slice(), &[0.0]);
        assert_eq!(roads.claimed_mask(1, 1, 0.0).as_slice(), &[1.0]);
    }
}
