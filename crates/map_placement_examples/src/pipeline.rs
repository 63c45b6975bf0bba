//! End-to-end generation for one map directory.
//!
//! A map directory holds:
//! - `config.json` (or `config.ron`): [`map_placement::prelude::MapConfig`] plus an optional `roadColor`
//! - `ecotopes.json` (or `ecotopes.ron`): the ecotope manifest
//! - `height_map.png`, optional `road_map.png` and optional `ground.png`
//! - `<ecotope>_density_map.png` for every ecotope
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use map_placement::prelude::{
    DensityRegistry, DitherMode, HeightSurface, PlacementEvent, PlacementEventKind, RoadNetwork,
    Scene, SceneAssembler, VecSink,
};
use map_placement::error::Error;
use map_placement::roads::MAX_DISTANCE;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::io::{
    load_rgb_image, load_scalar_field, save_field_png, save_mask_png, save_orientation_png,
    write_json,
};
use crate::manifest::{load_ecotopes, load_map_config};
use crate::painting::paint_surface;

pub const PLACEMENT_FILENAME: &str = "placement.json";
pub const SURFACE_FILENAME: &str = "surface.json";
pub const SURFACE_TEXTURE_FILENAME: &str = "surface.png";
pub const DIST_MAP_FILENAME: &str = "dist_map.png";
pub const ORIENT_MAP_FILENAME: &str = "orient_map.png";

/// Paths of the inputs of one map.
#[derive(Debug, Clone)]
pub struct MapDirectory {
    root: PathBuf,
}

impl MapDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map name, taken from the directory name.
    pub fn name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "map".into())
    }

    fn document(&self, stem: &str) -> PathBuf {
        let ron = self.root.join(format!("{stem}.ron"));
        if ron.is_file() {
            ron
        } else {
            self.root.join(format!("{stem}.json"))
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.document("config")
    }

    pub fn ecotopes_path(&self) -> PathBuf {
        self.document("ecotopes")
    }

    pub fn height_map_path(&self) -> PathBuf {
        self.root.join("height_map.png")
    }

    pub fn road_map_path(&self) -> PathBuf {
        self.root.join("road_map.png")
    }

    pub fn ground_texture_path(&self) -> PathBuf {
        self.root.join("ground.png")
    }

    pub fn density_map_path(&self, ecotope: &str) -> PathBuf {
        self.root.join(format!("{ecotope}_density_map.png"))
    }
}

/// Knobs of a generation run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub seed: u64,
    /// Overrides the dither mode of the map config.
    pub dither_mode: Option<DitherMode>,
    /// Where `placement.json`, `surface.json` and `surface.png` go.
    pub output_dir: PathBuf,
    /// Where candidate masks and road fields go, if anywhere.
    pub debug_dir: Option<PathBuf>,
}

impl PipelineOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            seed: 0,
            dither_mode: None,
            output_dir: output_dir.into(),
            debug_dir: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_dither_mode(mut self, mode: Option<DitherMode>) -> Self {
        self.dither_mode = mode;
        self
    }

    pub fn with_debug_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.debug_dir = dir;
        self
    }
}

/// Loads every input of `map`, assembles the scene and writes the outputs.
pub fn generate_map(map: &MapDirectory, options: &PipelineOptions) -> Result<Scene> {
    let manifest = load_map_config(map.config_path())?;
    let mut config = manifest.config;
    if let Some(mode) = options.dither_mode {
        config = config.with_dither_mode(mode);
    }
    fs::create_dir_all(&options.output_dir)
        .with_context(|| format!("failed to create {}", options.output_dir.display()))?;
    if let Some(dir) = &options.debug_dir {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let height = load_scalar_field(map.height_map_path())?;
    let surface = HeightSurface::new(height, config.height_map_pixel_size, config.max_height)?;
    info!(
        "Map '{}': height map {}x{}.",
        map.name(),
        surface.field().width(),
        surface.field().height()
    );

    let road_path = map.road_map_path();
    let road_intensity = if road_path.is_file() {
        let intensity = load_scalar_field(&road_path)?;
        // Roads share the height map's texel size, so both maps must line up.
        if intensity.size() != surface.field().size() {
            return Err(Error::ShapeMismatch {
                what: format!("road map {}", road_path.display()),
                expected: surface.field().size(),
                actual: intensity.size(),
            }
            .into());
        }
        Some(intensity)
    } else {
        debug!("No road map at {}.", road_path.display());
        None
    };
    let roads = road_intensity
        .as_ref()
        .map(|intensity| {
            RoadNetwork::from_intensity(
                intensity,
                config.height_map_pixel_size,
                config.road_threshold,
                config.orientation_radius,
            )
        })
        .transpose()?;
    if let (Some(roads), Some(dir)) = (&roads, &options.debug_dir) {
        save_field_png(roads.distance(), MAX_DISTANCE as f32, dir.join(DIST_MAP_FILENAME))?;
        save_orientation_png(roads.orientation(), dir.join(ORIENT_MAP_FILENAME))?;
    }

    let ecotopes = load_ecotopes(map.ecotopes_path())?;
    let mut densities = DensityRegistry::with_capacity(ecotopes.len());
    for ecotope in &ecotopes {
        let path = map.density_map_path(&ecotope.name);
        let density = load_scalar_field(&path)
            .with_context(|| format!("density map of ecotope '{}'", ecotope.name))?;
        densities.register(ecotope.name.clone(), density);
    }

    let mut assembler = SceneAssembler::try_new(&config, &surface, &densities)?;
    if let Some(roads) = &roads {
        assembler = assembler.with_roads(roads);
    }
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut sink = VecSink::only([PlacementEventKind::CandidatesDiscretized]);
    let scene = if options.debug_dir.is_some() {
        assembler.run_with_events(&ecotopes, &mut rng, &mut sink)?
    } else {
        assembler.run(&ecotopes, &mut rng)?
    };

    if let Some(dir) = &options.debug_dir {
        for event in sink.into_inner() {
            if let PlacementEvent::CandidatesDiscretized { name, mask, .. } = event {
                save_mask_png(&mask, dir.join(format!("{name}_placement_map.png")))?;
            }
        }
    }

    write_json(options.output_dir.join(PLACEMENT_FILENAME), &scene.placements)?;
    write_json(options.output_dir.join(SURFACE_FILENAME), &scene.surface)?;

    let ground_path = map.ground_texture_path();
    match (&road_intensity, manifest.road_color, ground_path.is_file()) {
        (Some(road), Some(color), true) => {
            let ground = load_rgb_image(&ground_path)?;
            let texture = paint_surface(road, color, &ground)?;
            let out = options.output_dir.join(SURFACE_TEXTURE_FILENAME);
            texture
                .save(&out)
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!("Surface texture written to {}.", out.display());
        }
        (Some(_), None, true) => {
            warn!("Ground texture found but the config has no roadColor; skipping surface texture.");
        }
        _ => {}
    }

    info!(
        "Wrote {} placements for '{}' to {}.",
        scene.len(),
        map.name(),
        options.output_dir.display()
    );
    Ok(scene)
}
