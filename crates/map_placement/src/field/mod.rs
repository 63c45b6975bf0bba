//! Field storage and sampling.
//!
//! All generators in the crate produce [`Grid`]s; consumers read them through
//! [`sample_bilinear`] or the world mapping in [`FieldFrame`].
pub mod grid;
pub mod sample;

pub use grid::{BinaryMask, Grid, ScalarField, VectorField2D};
pub use sample::{sample_bilinear, FieldFrame};
