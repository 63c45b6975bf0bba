//! Turns a candidate mask into placement records for one ecotope.
//!
//! Each `true` cell gets one selection draw. When the ecotope's footprint is smaller
//! than a density cell the mask is first upsampled by the integer ratio between the
//! two, so one density cell can hold several independent candidates.
//!
//! Random draws per candidate happen in a fixed order: selection, offset (x then z),
//! scale (one draw, or three when drawn per axis), rotation.
use std::borrow::Cow;

use glam::{Vec2, Vec3};
use rand::Rng;
use tracing::{debug, warn};

use crate::context::GenerationContext;
use crate::field::BinaryMask;
use crate::placement::record::PlacementRecord;
use crate::placement::rotation::{Rotation, RotationAllowance};
use crate::placement::selection::pick_asset;
use crate::placement::{AssetDefinition, Ecotope};

/// Result of placing one ecotope.
#[derive(Debug, Clone, Default)]
pub struct PlacementOutcome {
    pub records: Vec<PlacementRecord>,
    /// Candidate cells visited, after upsampling.
    pub candidates: usize,
    /// Candidates whose draw exceeded the total probability.
    pub skipped: usize,
    /// Effective world size of one candidate cell.
    pub footprint: f32,
    /// Upsampling ratio applied to the mask.
    pub ratio: usize,
}

/// Integer upsampling ratio for an ecotope footprint inside a density cell.
///
/// `floor(cell / footprint)`, never below 1.
pub fn footprint_ratio(cell: f32, footprint: f32) -> usize {
    let ratio = (cell / footprint).floor();
    if ratio.is_finite() && ratio >= 1.0 {
        ratio as usize
    } else {
        1
    }
}

/// Places `ecotope` on every candidate of `mask`.
///
/// `mask` is expected at density resolution, i.e. one cell covers
/// `config.density_map_pixel_size` world units.
pub fn place<R: Rng>(
    mask: &BinaryMask,
    ecotope: &Ecotope,
    ctx: &mut GenerationContext<'_, R>,
) -> PlacementOutcome {
    let cell = ctx.config.density_map_pixel_size;
    if ecotope.footprint > cell {
        warn!(
            "Ecotope '{}' footprint {} exceeds the density cell {}; placing one candidate per cell.",
            ecotope.name, ecotope.footprint, cell
        );
    }

    let ratio = footprint_ratio(cell, ecotope.footprint);
    let candidates: Cow<'_, BinaryMask> = if ratio > 1 {
        Cow::Owned(mask.upsample(ratio))
    } else {
        Cow::Borrowed(mask)
    };
    let footprint = cell / ratio as f32;
    let (w, h) = candidates.size();
    let half = Vec2::new(w as f32, h as f32) / 2.0;

    let mut outcome = PlacementOutcome {
        footprint,
        ratio,
        ..Default::default()
    };

    for (i, j, &set) in candidates.iter_cells() {
        if !set {
            continue;
        }
        outcome.candidates += 1;

        let p = ctx.rand01();
        let Some(asset) = pick_asset(&ecotope.assets, p) else {
            outcome.skipped += 1;
            continue;
        };

        let centre = Vec2::new(i as f32, j as f32) - half + Vec2::splat(0.5);
        outcome
            .records
            .push(place_asset(asset, centre, footprint, ctx));
    }

    debug!(
        "Ecotope '{}': {} candidates at ratio {}, {} placed, {} skipped.",
        ecotope.name,
        outcome.candidates,
        ratio,
        outcome.records.len(),
        outcome.skipped
    );
    outcome
}

/// Resolves position, scale and rotation of one selected asset at a cell centre
/// given in footprint units.
fn place_asset<R: Rng>(
    asset: &AssetDefinition,
    centre: Vec2,
    footprint: f32,
    ctx: &mut GenerationContext<'_, R>,
) -> PlacementRecord {
    let offset = match asset.allow_offset {
        Some(amount) => {
            let ox = (ctx.rand01() - 0.5) * amount;
            let oz = (ctx.rand01() - 0.5) * amount;
            Vec2::new(ox, oz)
        }
        None => Vec2::ZERO,
    };
    let ground = (centre + offset) * footprint;
    let position = Vec3::new(
        ground.x,
        ctx.surface.height_at(ground.x, ground.y),
        ground.y,
    );

    let scale = match asset.allow_scale {
        Some(amount) if asset.per_axis_scale => {
            let sx = 1.0 - (ctx.rand01() - 0.5) * amount;
            let sy = 1.0 - (ctx.rand01() - 0.5) * amount;
            let sz = 1.0 - (ctx.rand01() - 0.5) * amount;
            Vec3::new(sx, sy, sz)
        }
        Some(amount) => Vec3::splat(1.0 - (ctx.rand01() - 0.5) * amount),
        None => Vec3::ONE,
    };

    let rotation = match asset.allow_rotation {
        Some(RotationAllowance::Full) => Rotation::Full,
        Some(RotationAllowance::Bounded(max)) => Rotation::Fixed(ctx.rand01() * max),
        None => Rotation::Fixed(
            ctx.roads
                .and_then(|roads| roads.angle_at(ground.x, ground.y))
                .unwrap_or(0.0),
        ),
    };
    let rotation = match (rotation, asset.rotation_offset) {
        (Rotation::Fixed(angle), Some(correction)) => Rotation::Fixed(angle + correction),
        (rotation, _) => rotation,
    };

    PlacementRecord::new(asset.id, position, rotation, scale)
}
