//! Map config and ecotope manifest loading, as JSON or RON by file extension.
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use map_placement::prelude::{Ecotope, MapConfig};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Map config plus renderer-side settings stored in the same file.
#[derive(Debug, Clone)]
pub struct MapManifest {
    pub config: MapConfig,
    /// Road colour used when painting the surface texture.
    pub road_color: Option<[u8; 3]>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaintSettings {
    #[serde(default)]
    road_color: Option<[u8; 3]>,
}

fn parse<T: DeserializeOwned>(path: &Path, text: &str) -> Result<T> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(text)
            .with_context(|| format!("invalid JSON in {}", path.display())),
        Some("ron") => {
            ron::from_str(text).with_context(|| format!("invalid RON in {}", path.display()))
        }
        other => bail!(
            "unsupported manifest extension {:?} for {}",
            other,
            path.display()
        ),
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Loads and validates a map config.
pub fn load_map_config(path: impl AsRef<Path>) -> Result<MapManifest> {
    let path = path.as_ref();
    let text = read(path)?;
    let config: MapConfig = parse(path, &text)?;
    config
        .validate()
        .with_context(|| format!("invalid map config {}", path.display()))?;
    let paint: PaintSettings = parse(path, &text)?;
    Ok(MapManifest {
        config,
        road_color: paint.road_color,
    })
}

/// Loads and validates an ecotope manifest.
pub fn load_ecotopes(path: impl AsRef<Path>) -> Result<Vec<Ecotope>> {
    let path = path.as_ref();
    let ecotopes: Vec<Ecotope> = parse(path, &read(path)?)?;
    for ecotope in &ecotopes {
        ecotope
            .validate()
            .with_context(|| format!("invalid ecotope manifest {}", path.display()))?;
    }
    Ok(ecotopes)
}
