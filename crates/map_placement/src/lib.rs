#![forbid(unsafe_code)]
//! map_placement: procedural placement of scene objects driven by density maps.
//!
//! Modules:
//! - field: 2D grids (scalar, binary, vector), resampling and bilinear height sampling
//! - dithering: turn continuous density fields into candidate masks
//! - roads: road mask high-pass, distance flood fill and orientation fields
//! - placement: ecotopes, asset definitions, weighted selection and the placement sampler
//! - scene: priority-ordered assembly of all ecotopes into a serializable scene
//!
//! The crate performs no I/O. Loading images and manifests is left to the caller.
pub mod config;
pub mod context;
pub mod dithering;
pub mod error;
pub mod field;
pub mod placement;
pub mod roads;
pub mod scene;
pub mod surface;

/// Convenient re-exports for common types. Import with `use map_placement::prelude::*;`.
pub mod prelude {
    pub use crate::config::{Landmark, MapConfig};
    pub use crate::context::GenerationContext;
    pub use crate::dithering::{
        dither, DitherMode, Discretizer, ErrorDiffusionDithering, OrderedDithering,
    };
    pub use crate::error::{Error, Result};
    pub use crate::field::{sample_bilinear, BinaryMask, FieldFrame, Grid, ScalarField, VectorField2D};
    pub use crate::placement::record::{PlacementRecord, Point3, Rotation, Scale3};
    pub use crate::placement::sampler::{place, PlacementOutcome};
    pub use crate::placement::selection::pick_asset;
    pub use crate::placement::{AssetDefinition, AssetId, Ecotope, RotationAllowance};
    pub use crate::roads::{
        distance_field, orientation_angle, orientation_field, road_mask_from_intensity,
        RoadNetwork,
    };
    pub use crate::scene::assembler::{assemble_scene, SceneAssembler};
    pub use crate::scene::events::{
        EventSink, FnSink, MultiSink, PlacementEvent, PlacementEventKind, VecSink,
    };
    pub use crate::scene::{DensityRegistry, EcotopeSummary, Scene, SceneStats};
    pub use crate::surface::{HeightSurface, SurfaceDescriptor};
}
