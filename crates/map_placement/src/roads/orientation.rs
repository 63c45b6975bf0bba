//! Orientation field derived from the gradient of the road distance field.
use glam::Vec2;

use crate::field::{ScalarField, VectorField2D};

/// Unit vector pointing away from the nearest road, from a central difference taken
/// `radius` cells apart on each side.
///
/// `x` grows with columns and `y` grows towards lower rows, i.e. upwards in the
/// source image. Sample windows are clamped at the field borders. Flat cells, where
/// both differences vanish, hold [`Vec2::ZERO`].
pub fn orientation_field(distance: &ScalarField, radius: usize) -> VectorField2D {
    let (w, h) = distance.size();
    let r = radius.max(1);

    VectorField2D::from_fn(w, h, |x, y| {
        let left = x.saturating_sub(r);
        let right = (x + r).min(w - 1);
        let up = y.saturating_sub(r);
        let down = (y + r).min(h - 1);

        let dx = distance[(right, y)] - distance[(left, y)];
        let dy = distance[(x, up)] - distance[(x, down)];
        Vec2::new(dx, dy).normalize_or_zero()
    })
}

/// Rotation angle in `[-pi, pi]` encoded by an orientation vector: `acos(x)`,
/// negated when `y < 0`. Returns `None` for the zero vector of a flat cell.
pub fn orientation_angle(v: Vec2) -> Option<f32> {
    if v == Vec2::ZERO || !v.is_finite() {
        return None;
    }
    let angle = v.x.clamp(-1.0, 1.0).acos();
    Some(if v.y < 0.0 { -angle } else { angle })
}
