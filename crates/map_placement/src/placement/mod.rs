//! Ecotopes, asset definitions and the placement sampler.
//!
//! An [`Ecotope`] is a named placement category (forest, urban, ...) with a priority and
//! an ordered list of [`AssetDefinition`]s. Each asset carries a probability that is
//! accumulated in list order when a candidate cell draws which asset to place.
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod record;
pub mod rotation;
pub mod sampler;
pub mod selection;

pub use rotation::{Rotation, RotationAllowance};

/// Renderer-side identifier of a placeable asset.
pub type AssetId = u32;

/// One weighted choice within an ecotope.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct AssetDefinition {
    #[cfg_attr(feature = "serde", serde(rename = "assetId"))]
    pub id: AssetId,
    /// Weight accumulated in list order against a uniform draw.
    pub probability: f32,
    /// Maximum position jitter, in cells, spread over `[-0.5, 0.5] * allow_offset`.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub allow_offset: Option<f32>,
    /// Maximum scale jitter; scale becomes `1 - u * allow_scale` with `u` in `[-0.5, 0.5]`.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub allow_scale: Option<f32>,
    /// Draw scale jitter independently per axis instead of once for all three.
    #[cfg_attr(feature = "serde", serde(default))]
    pub per_axis_scale: bool,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub allow_rotation: Option<RotationAllowance>,
    /// Fixed correction added to every resolved rotation, aligning the asset's local
    /// facing with the road orientation convention.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub rotation_offset: Option<f32>,
}

impl AssetDefinition {
    pub fn new(id: AssetId, probability: f32) -> Self {
        Self {
            id,
            probability,
            allow_offset: None,
            allow_scale: None,
            per_axis_scale: false,
            allow_rotation: None,
            rotation_offset: None,
        }
    }

    pub fn with_offset(mut self, allow_offset: f32) -> Self {
        self.allow_offset = Some(allow_offset);
        self
    }

    pub fn with_scale(mut self, allow_scale: f32) -> Self {
        self.allow_scale = Some(allow_scale);
        self
    }

    pub fn with_per_axis_scale(mut self, per_axis: bool) -> Self {
        self.per_axis_scale = per_axis;
        self
    }

    pub fn with_rotation(mut self, allow_rotation: RotationAllowance) -> Self {
        self.allow_rotation = Some(allow_rotation);
        self
    }

    pub fn with_rotation_offset(mut self, offset: f32) -> Self {
        self.rotation_offset = Some(offset);
        self
    }
}

/// A named placement category processed in ascending `priority` order.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Ecotope {
    pub name: String,
    pub priority: i32,
    /// World units per placement unit. Smaller than the density cell means several
    /// candidates per density cell.
    pub footprint: f32,
    #[cfg_attr(feature = "serde", serde(rename = "data"))]
    pub assets: Vec<AssetDefinition>,
}

impl Ecotope {
    pub fn new(name: impl Into<String>, priority: i32, footprint: f32) -> Self {
        Self {
            name: name.into(),
            priority,
            footprint,
            assets: Vec::new(),
        }
    }

    pub fn with_asset(mut self, asset: AssetDefinition) -> Self {
        self.assets.push(asset);
        self
    }

    pub fn with_assets(mut self, assets: Vec<AssetDefinition>) -> Self {
        self.assets.extend(assets);
        self
    }

    /// Sum of all asset probabilities.
    pub fn total_probability(&self) -> f32 {
        self.assets.iter().map(|a| a.probability).sum()
    }

    /// Checks the fields the sampler cannot work without.
    pub fn validate(&self) -> Result<()> {
        if !(self.footprint.is_finite() && self.footprint > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "ecotope '{}': footprint must be > 0",
                self.name
            )));
        }
        if let Some(asset) = self
            .assets
            .iter()
            .find(|a| !(a.probability.is_finite() && a.probability >= 0.0))
        {
            return Err(Error::InvalidConfig(format!(
                "ecotope '{}': asset {} has an invalid probability",
                self.name, asset.id
            )));
        }
        Ok(())
    }
}

/// Uniform float in `[0, 1]`.
#[inline]
pub(crate) fn rand01(rng: &mut dyn Rng) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

#[cfg(test)]
pub(crate) mod test_rng {
    use core::convert::Infallible;
    use rand::TryRng;

    /// RNG that always yields the same word, i.e. the same `rand01` value.
    pub(crate) struct FixedRng {
        pub(crate) value: u32,
    }

    impl FixedRng {
        pub(crate) fn at(unit: f32) -> Self {
            Self {
                value: (unit as f64 * u32::MAX as f64) as u32,
            }
        }
    }

    impl TryRng for FixedRng {
        type Error = Infallible;

        fn try_next_u32(&mut self) -> Result<u32, Infallible> {
            Ok(self.value)
        }

        fn try_next_u64(&mut self) -> Result<u64, Infallible> {
            Ok(self.value as u64)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Infallible> {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 4];
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_rng::FixedRng;
    use super::*;

    #[test]
    fn builders_set_optional_fields() {
        let asset = AssetDefinition::new(7, 0.25)
            .with_offset(0.5)
            .with_scale(0.2)
            .with_per_axis_scale(true)
            .with_rotation(RotationAllowance::Full)
            .with_rotation_offset(1.0);
        assert_eq!(asset.id, 7);
        assert_eq!(asset.allow_offset, Some(0.5));
        assert_eq!(asset.allow_scale, Some(0.2));
        assert!(asset.per_axis_scale);
        assert_eq!(asset.allow_rotation, Some(RotationAllowance::Full));
        assert_eq!(asset.rotation_offset, Some(1.0));
    }

    #[test]
    fn total_probability_may_exceed_one() {
        let ecotope = Ecotope::new("urban", 1, 2.5)
            .with_asset(AssetDefinition::new(1, 0.7))
            .with_asset(AssetDefinition::new(2, 0.6));
        assert!((ecotope.total_probability() - 1.3).abs() < 1e-6);
        ecotope.validate().unwrap();
    }

    #[test]
    fn validate_names_the_ecotope() {
        let err = Ecotope::new("forest", 0, 0.0).validate().unwrap_err();
        assert!(err.to_string().contains("forest"));
        let err = Ecotope::new("rocks", 0, 1.0)
            .with_asset(AssetDefinition::new(3, -0.1))
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("rocks"));
    }

    #[test]
    fn rand01_stays_below_one() {
        let mut rng = FixedRng { value: u32::MAX };
        let v = rand01(&mut rng);
        assert!((0.0..=1.0).contains(&v));
        let mut rng = FixedRng { value: 0 };
        assert_eq!(rand01(&mut rng), 0.0);
    }

    #[test]
    fn fixed_rng_hits_requested_unit_value() {
        let mut rng = FixedRng::at(0.9);
        assert!((rand01(&mut rng) - 0.9).abs() < 1e-6);
    }
}
