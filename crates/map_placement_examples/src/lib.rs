#![forbid(unsafe_code)]
//! File-based collaborators for `map_placement`: PNG maps in, JSON scenes out.

mod io;
mod manifest;
mod painting;
mod pipeline;

pub use io::{
    load_rgb_image, load_scalar_field, save_field_png, save_mask_png, save_orientation_png,
    write_json,
};
pub use manifest::{load_ecotopes, load_map_config, MapManifest};
pub use painting::paint_surface;
pub use pipeline::{generate_map, MapDirectory, PipelineOptions};

/// Installs a `tracing` fmt subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
