//! Placement records: the output consumed by renderers.
use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use crate::placement::rotation::Rotation;
use crate::placement::AssetId;

/// Round to 3 decimal places, normalizing negative zero.
#[inline]
pub fn round3(v: f32) -> f32 {
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

/// World-space position.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Per-axis scale factors.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for Scale3 {
    fn default() -> Self {
        Self::from(Vec3::ONE)
    }
}

impl Point3 {
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

impl Scale3 {
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

impl From<Vec3> for Point3 {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vec3> for Scale3 {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Point3> for mint::Point3<f32> {
    fn from(p: Point3) -> Self {
        mint::Point3 {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

impl From<Scale3> for mint::Vector3<f32> {
    fn from(s: Scale3) -> Self {
        mint::Vector3 {
            x: s.x,
            y: s.y,
            z: s.z,
        }
    }
}

/// One placed object. Every float is rounded to 3 decimals on construction.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRecord {
    pub asset_id: AssetId,
    pub position: Point3,
    pub rotation: Rotation,
    pub scale: Scale3,
}

impl PlacementRecord {
    pub fn new(asset_id: AssetId, position: Vec3, rotation: Rotation, scale: Vec3) -> Self {
        let rotation = match rotation {
            Rotation::Fixed(a) => Rotation::Fixed(round3(a)),
            Rotation::Full => Rotation::Full,
        };
        Self {
            asset_id,
            position: Point3::from(Vec3::from(position.to_array().map(round3))),
            rotation,
            scale: Scale3::from(Vec3::from(scale.to_array().map(round3))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round3_rounds_half_away_and_drops_negative_zero() {
        assert_eq!(round3(1.23449), 1.234);
        assert_eq!(round3(-2.0006), -2.001);
        assert_eq!(round3(-0.0001).to_bits(), 0.0f32.to_bits());
    }

    #[test]
    fn record_rounds_every_component() {
        let record = PlacementRecord::new(
            3,
            Vec3::new(1.23456, -0.00049, 7.0),
            Rotation::Fixed(3.14159),
            Vec3::new(0.95551, 1.0, 1.0),
        );
        assert_eq!(record.position, Point3 { x: 1.235, y: 0.0, z: 7.0 });
        assert_eq!(record.rotation, Rotation::Fixed(3.142));
        assert_eq!(record.scale.x, 0.956);
    }

    #[test]
    fn full_rotation_is_kept() {
        let record = PlacementRecord::new(1, Vec3::ZERO, Rotation::Full, Vec3::ONE);
        assert!(record.rotation.is_full());
        assert_eq!(record.scale, Scale3::default());
    }

    #[test]
    fn converts_to_mint() {
        let p: mint::Point3<f32> = Point3 { x: 1.0, y: 2.0, z: 3.0 }.into();
        assert_eq!((p.x, p.y, p.z), (1.0, 2.0, 3.0));
        let s: mint::Vector3<f32> = Scale3::default().into();
        assert_eq!((s.x, s.y, s.z), (1.0, 1.0, 1.0));
    }
}
