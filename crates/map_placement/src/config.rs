//! Map-level configuration shared by every stage of a generation run.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dithering::DitherMode;
use crate::error::{Error, Result};
use crate::placement::AssetId;
use crate::roads::{DEFAULT_ORIENTATION_RADIUS, ROAD_THRESHOLD};

/// Configuration for one generated map.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    /// Side length of the square map in world units.
    pub map_size: f32,
    /// World units covered by one height map texel.
    pub height_map_pixel_size: f32,
    /// World units covered by one density map texel.
    pub density_map_pixel_size: f32,
    /// World height of a height map value of 1.0.
    pub max_height: f32,
    /// Discretization used for density maps.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dither_mode: DitherMode,
    /// Half-width, in texels, of the window used to differentiate the road distance field.
    #[cfg_attr(feature = "serde", serde(default = "default_orientation_radius"))]
    pub orientation_radius: usize,
    /// Normalized intensity above which a road map texel counts as road.
    #[cfg_attr(feature = "serde", serde(default = "default_road_threshold"))]
    pub road_threshold: f32,
    /// Fixed placements appended after all ecotopes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub landmarks: Vec<Landmark>,
}

#[cfg(feature = "serde")]
fn default_orientation_radius() -> usize {
    DEFAULT_ORIENTATION_RADIUS
}

#[cfg(feature = "serde")]
fn default_road_threshold() -> f32 {
    ROAD_THRESHOLD
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            map_size: 200.0,
            height_map_pixel_size: 1.0,
            density_map_pixel_size: 5.0,
            max_height: 50.0,
            dither_mode: DitherMode::default(),
            orientation_radius: DEFAULT_ORIENTATION_RADIUS,
            road_threshold: ROAD_THRESHOLD,
            landmarks: Vec::new(),
        }
    }
}

impl MapConfig {
    /// Creates a new [`MapConfig`] with the given map size and pixel sizes.
    pub fn new(map_size: f32, height_map_pixel_size: f32, density_map_pixel_size: f32) -> Self {
        Self {
            map_size,
            height_map_pixel_size,
            density_map_pixel_size,
            ..Default::default()
        }
    }

    pub fn with_max_height(mut self, max_height: f32) -> Self {
        self.max_height = max_height;
        self
    }

    pub fn with_dither_mode(mut self, mode: DitherMode) -> Self {
        self.dither_mode = mode;
        self
    }

    pub fn with_orientation_radius(mut self, radius: usize) -> Self {
        self.orientation_radius = radius;
        self
    }

    pub fn with_road_threshold(mut self, threshold: f32) -> Self {
        self.road_threshold = threshold;
        self
    }

    pub fn with_landmark(mut self, landmark: Landmark) -> Self {
        self.landmarks.push(landmark);
        self
    }

    /// Density map dimensions `(width, height)` for a height map of the given size.
    pub fn density_map_size(&self, height_map_size: (usize, usize)) -> (usize, usize) {
        let scale = |n: usize| {
            (n as f32 * self.height_map_pixel_size / self.density_map_pixel_size)
                .ceil()
                .max(1.0) as usize
        };
        let (w, h) = (scale(height_map_size.0), scale(height_map_size.1));
        (w, h)
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !positive(self.map_size) {
            return Err(Error::InvalidConfig("map_size must be > 0".into()));
        }
        if !positive(self.height_map_pixel_size) {
            return Err(Error::InvalidConfig(
                "height_map_pixel_size must be > 0".into(),
            ));
        }
        if !positive(self.density_map_pixel_size) {
            return Err(Error::InvalidConfig(
                "density_map_pixel_size must be > 0".into(),
            ));
        }
        if !(self.max_height.is_finite() && self.max_height >= 0.0) {
            return Err(Error::InvalidConfig("max_height must be >= 0".into()));
        }
        if self.orientation_radius == 0 {
            return Err(Error::InvalidConfig(
                "orientation_radius must be >= 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.road_threshold) {
            return Err(Error::InvalidConfig(
                "road_threshold must be in [0, 1]".into(),
            ));
        }
        Ok(())
    }
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

/// A single hand-placed object, e.g. a landmark building.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Landmark {
    pub asset_id: AssetId,
    pub x: f32,
    pub z: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rotation: f32,
    #[cfg_attr(feature = "serde", serde(default = "default_landmark_scale"))]
    pub scale: f32,
}

#[cfg(feature = "serde")]
fn default_landmark_scale() -> f32 {
    1.0
}

impl Landmark {
    pub fn new(asset_id: AssetId, x: f32, z: f32) -> Self {
        Self {
            asset_id,
            x,
            z,
            rotation: 0.0,
            scale: 1.0,
        }
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        MapConfig::default().validate().unwrap();
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(MapConfig::new(0.0, 1.0, 5.0).validate().is_err());
        assert!(MapConfig::new(100.0, -1.0, 5.0).validate().is_err());
        assert!(MapConfig::new(100.0, 1.0, 0.0).validate().is_err());
        assert!(MapConfig::new(100.0, 1.0, 5.0)
            .with_orientation_radius(0)
            .validate()
            .is_err());
        assert!(MapConfig::new(100.0, 1.0, 5.0)
            .with_road_threshold(1.5)
            .validate()
            .is_err());
        assert!(MapConfig::new(f32::NAN, 1.0, 5.0).validate().is_err());
    }

    #[test]
    fn density_map_size_rounds_up() {
        let config = MapConfig::new(320.0, 1.0, 5.0);
        assert_eq!(config.density_map_size((320, 320)), (64, 64));
        assert_eq!(config.density_map_size((321, 7)), (65, 2));
    }

    #[test]
    fn landmark_builder_sets_fields() {
        let config = MapConfig::default()
            .with_landmark(Landmark::new(11, 34.0, -67.0).with_rotation(1.5).with_scale(3.0));
        assert_eq!(config.landmarks.len(), 1);
        assert_eq!(config.landmarks[0].asset_id, 11);
        assert_eq!(config.landmarks[0].rotation, 1.5);
        assert_eq!(config.landmarks[0].scale, 3.0);
    }
}
