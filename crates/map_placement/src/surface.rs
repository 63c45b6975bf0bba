//! Terrain height surface and its serializable descriptor.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::{sample_bilinear, FieldFrame, ScalarField};

/// A normalized height field placed in world space.
#[derive(Clone, Debug)]
pub struct HeightSurface {
    field: ScalarField,
    pixel_size: f32,
    max_height: f32,
}

impl HeightSurface {
    /// Creates a surface from a height field normalized to [0, 1].
    pub fn new(field: ScalarField, pixel_size: f32, max_height: f32) -> Result<Self> {
        if field.is_empty() {
            return Err(Error::missing("height field"));
        }
        if !(pixel_size.is_finite() && pixel_size > 0.0) {
            return Err(Error::InvalidConfig(
                "height map pixel size must be > 0".into(),
            ));
        }
        if !(max_height.is_finite() && max_height >= 0.0) {
            return Err(Error::InvalidConfig("max height must be >= 0".into()));
        }
        Ok(Self {
            field,
            pixel_size,
            max_height,
        })
    }

    pub fn field(&self) -> &ScalarField {
        &self.field
    }

    pub fn pixel_size(&self) -> f32 {
        self.pixel_size
    }

    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    pub fn frame(&self) -> FieldFrame {
        FieldFrame::for_grid(&self.field, self.pixel_size)
    }

    /// Terrain height in world units at world position `(x, z)`.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let p = self.frame().world_to_field(x, z);
        sample_bilinear(&self.field, p.x, p.y) * self.max_height
    }

    /// Snapshot of the surface for the renderer.
    pub fn descriptor(&self) -> SurfaceDescriptor {
        SurfaceDescriptor {
            height_map: self.field.rows().map(<[f32]>::to_vec).collect(),
            max_height: self.max_height,
            pixel_size: self.pixel_size,
            height: self.field.height(),
            width: self.field.width(),
        }
    }
}

/// Everything a renderer needs to rebuild the terrain mesh.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceDescriptor {
    /// Normalized heights, one inner vector per row.
    pub height_map: Vec<Vec<f32>>,
    pub max_height: f32,
    pub pixel_size: f32,
    pub height: usize,
    pub width: usize,
}
