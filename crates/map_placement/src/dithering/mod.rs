//! Discretization of continuous density fields into candidate masks.
//!
//! A density field holds per-cell placement likelihoods in [0, 1]. Dithering turns it
//! into a [`BinaryMask`] where each `true` cell is one placement candidate, so that
//! the local fraction of candidates tracks the local density.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::field::{BinaryMask, ScalarField};

pub mod error_diffusion;
pub mod ordered;

pub use error_diffusion::ErrorDiffusionDithering;
pub use ordered::OrderedDithering;

/// Trait for density discretization.
pub trait Discretizer {
    fn discretize(&self, density: &ScalarField) -> BinaryMask;
}

/// Built-in discretization strategies.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DitherMode {
    /// Serpentine Floyd-Steinberg error diffusion. Best density fidelity.
    #[default]
    ErrorDiffusion,
    /// 4x4 Bayer threshold matrix. Stateless and regular.
    Ordered,
}

impl Discretizer for DitherMode {
    fn discretize(&self, density: &ScalarField) -> BinaryMask {
        match self {
            DitherMode::ErrorDiffusion => ErrorDiffusionDithering.discretize(density),
            DitherMode::Ordered => OrderedDithering.discretize(density),
        }
    }
}

/// Discretize `density` with the given mode.
pub fn dither(density: &ScalarField, mode: DitherMode) -> BinaryMask {
    mode.discretize(density)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_error_diffusion() {
        assert_eq!(DitherMode::default(), DitherMode::ErrorDiffusion);
    }

    #[test]
    fn dither_dispatches_on_mode() {
        let density = ScalarField::from_fn(8, 8, |x, y| ((x + y) % 5) as f32 / 4.0);
        assert_eq!(
            dither(&density, DitherMode::Ordered),
            OrderedDithering.discretize(&density)
        );
        assert_eq!(
            dither(&density, DitherMode::ErrorDiffusion),
            ErrorDiffusionDithering.discretize(&density)
        );
    }

    #[test]
    fn saturated_fields_are_preserved_by_both_modes() {
        let ones = ScalarField::filled(6, 5, 1.0);
        let zeros = ScalarField::zeros(6, 5);
        for mode in [DitherMode::ErrorDiffusion, DitherMode::Ordered] {
            assert_eq!(dither(&ones, mode).count(), 30);
            assert_eq!(dither(&zeros, mode).count(), 0);
        }
    }
}
