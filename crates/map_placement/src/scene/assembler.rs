//! Priority-ordered scene assembly with overlap exclusion.
use glam::Vec3;
use rand::Rng;
use tracing::{info, warn};

use crate::config::MapConfig;
use crate::context::GenerationContext;
use crate::dithering::dither;
use crate::error::{Error, Result};
use crate::field::ScalarField;
use crate::placement::record::PlacementRecord;
use crate::placement::rotation::Rotation;
use crate::placement::sampler::place;
use crate::placement::Ecotope;
use crate::roads::RoadNetwork;
use crate::scene::events::{EventSink, PlacementEvent, PlacementEventKind};
use crate::scene::{DensityRegistry, EcotopeSummary, Scene, SceneStats};
use crate::surface::HeightSurface;

/// Runs every ecotope of a map against shared inputs.
pub struct SceneAssembler<'a> {
    /// Map configuration, validated on construction.
    pub config: &'a MapConfig,
    pub surface: &'a HeightSurface,
    /// Road fields; when present they pre-claim road area and drive orientation.
    pub roads: Option<&'a RoadNetwork>,
    /// Density field per ecotope name.
    pub densities: &'a DensityRegistry,
}

impl<'a> SceneAssembler<'a> {
    pub fn try_new(
        config: &'a MapConfig,
        surface: &'a HeightSurface,
        densities: &'a DensityRegistry,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            surface,
            roads: None,
            densities,
        })
    }

    pub fn with_roads(mut self, roads: &'a RoadNetwork) -> Self {
        self.roads = Some(roads);
        self
    }

    /// Assembles the scene for `ecotopes`.
    pub fn run(&mut self, ecotopes: &[Ecotope], rng: &mut impl Rng) -> Result<Scene> {
        assemble_scene(
            ecotopes,
            self.config,
            self.surface,
            self.roads,
            self.densities,
            rng,
            None,
        )
    }

    pub fn run_with_events(
        &mut self,
        ecotopes: &[Ecotope],
        rng: &mut impl Rng,
        sink: &mut dyn EventSink,
    ) -> Result<Scene> {
        assemble_scene(
            ecotopes,
            self.config,
            self.surface,
            self.roads,
            self.densities,
            rng,
            Some(sink),
        )
    }
}

/// Places all `ecotopes` in ascending priority order and appends the configured landmarks.
///
/// Each ecotope only sees the part of its density not yet claimed by roads or by
/// earlier ecotopes: `effective = density * (1 - claimed)`. After placing, the claimed
/// field grows to `max(claimed, effective)`.
///
/// Fails if an ecotope is invalid or has no density field of the expected shape.
pub fn assemble_scene<R: Rng>(
    ecotopes: &[Ecotope],
    config: &MapConfig,
    surface: &HeightSurface,
    roads: Option<&RoadNetwork>,
    densities: &DensityRegistry,
    rng: &mut R,
    sink: Option<&mut dyn EventSink>,
) -> Result<Scene> {
    let inputs = SceneInputs {
        config,
        surface,
        roads,
        densities,
    };
    if let Some(s) = sink {
        assemble_internal(ecotopes, &inputs, rng, s)
    } else {
        assemble_internal(ecotopes, &inputs, rng, &mut ())
    }
}

struct SceneInputs<'a> {
    config: &'a MapConfig,
    surface: &'a HeightSurface,
    roads: Option<&'a RoadNetwork>,
    densities: &'a DensityRegistry,
}

fn assemble_internal<R: Rng>(
    ecotopes: &[Ecotope],
    inputs: &SceneInputs<'_>,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<Scene> {
    let config = inputs.config;
    let surface = inputs.surface;
    let (w, h) = config.density_map_size(surface.field().size());

    let mut order: Vec<&Ecotope> = ecotopes.iter().collect();
    order.sort_by_key(|e| e.priority);

    info!(
        "Assembling scene: {} ecotopes on a {}x{} density grid{}.",
        order.len(),
        w,
        h,
        if inputs.roads.is_some() { " with roads" } else { "" }
    );
    if sink.wants(PlacementEventKind::RunStarted) {
        sink.send(PlacementEvent::RunStarted {
            ecotope_count: order.len(),
            density_size: (w, h),
            has_roads: inputs.roads.is_some(),
        });
    }

    let mut claimed = match inputs.roads {
        Some(roads) => roads.claimed_mask(w, h, config.road_threshold),
        None => ScalarField::zeros(w, h),
    };
    let mut placements = Vec::new();
    let mut summaries = Vec::with_capacity(order.len());
    let mut stats = SceneStats::default();

    for (index, ecotope) in order.into_iter().enumerate() {
        ecotope.validate()?;
        if sink.wants(PlacementEventKind::EcotopeStarted) {
            sink.send(PlacementEvent::EcotopeStarted {
                index,
                name: ecotope.name.clone(),
                priority: ecotope.priority,
            });
        }

        let what = || format!("density field of ecotope '{}'", ecotope.name);
        let density = inputs
            .densities
            .get(&ecotope.name)
            .ok_or_else(|| Error::missing(what()))?;
        if density.size() != (w, h) {
            return Err(Error::ShapeMismatch {
                what: what(),
                expected: (w, h),
                actual: density.size(),
            });
        }

        warn_on_manifest(ecotope, config, sink);

        let effective = density.zip_map(&claimed, |d, c| d * (1.0 - c))?;
        let mask = dither(&effective, config.dither_mode);
        let cells = mask.count();
        if sink.wants(PlacementEventKind::CandidatesDiscretized) {
            sink.send(PlacementEvent::CandidatesDiscretized {
                index,
                name: ecotope.name.clone(),
                candidates: cells,
                mask: mask.clone(),
            });
        }
        if cells == 0 && density.sum() > 0.0 {
            warn!(
                "Ecotope '{}' has no candidates left after exclusion.",
                ecotope.name
            );
            emit_warning(sink, ecotope, "No candidates left after exclusion".into());
        }

        let outcome = {
            let mut ctx = GenerationContext::new(config, surface, rng).with_roads(inputs.roads);
            place(&mask, ecotope, &mut ctx)
        };
        claimed = claimed.zip_map(&effective, |c, e| c.max(*e))?;

        if sink.wants(PlacementEventKind::PlacementMade) {
            for record in &outcome.records {
                sink.send(PlacementEvent::PlacementMade {
                    index,
                    name: ecotope.name.clone(),
                    record: *record,
                });
            }
        }

        let summary = EcotopeSummary {
            name: ecotope.name.clone(),
            priority: ecotope.priority,
            candidates: outcome.candidates,
            placed: outcome.records.len(),
            skipped: outcome.skipped,
        };
        info!(
            "Ecotope '{}' (priority {}): {} candidates, {} placed.",
            summary.name, summary.priority, summary.candidates, summary.placed
        );
        if sink.wants(PlacementEventKind::EcotopeFinished) {
            sink.send(PlacementEvent::EcotopeFinished {
                index,
                summary: summary.clone(),
            });
        }

        stats.candidates += summary.candidates;
        stats.placed += summary.placed;
        stats.skipped += summary.skipped;
        summaries.push(summary);
        placements.extend(outcome.records);
    }

    for landmark in &config.landmarks {
        let position = Vec3::new(
            landmark.x,
            surface.height_at(landmark.x, landmark.z),
            landmark.z,
        );
        let record = PlacementRecord::new(
            landmark.asset_id,
            position,
            Rotation::Fixed(landmark.rotation),
            Vec3::splat(landmark.scale),
        );
        if sink.wants(PlacementEventKind::LandmarkPlaced) {
            sink.send(PlacementEvent::LandmarkPlaced {
                landmark: landmark.clone(),
                record,
            });
        }
        stats.landmarks += 1;
        placements.push(record);
    }

    info!(
        "Scene assembled: {} placements ({} landmarks), {} candidates skipped.",
        placements.len(),
        stats.landmarks,
        stats.skipped
    );
    if sink.wants(PlacementEventKind::RunFinished) {
        sink.send(PlacementEvent::RunFinished { stats });
    }

    Ok(Scene {
        placements,
        surface: surface.descriptor(),
        ecotopes: summaries,
        stats,
    })
}

/// Non-fatal manifest anomalies.
fn warn_on_manifest(ecotope: &Ecotope, config: &MapConfig, sink: &mut dyn EventSink) {
    if ecotope.assets.is_empty() {
        warn!("Ecotope '{}' has no assets; nothing will be placed.", ecotope.name);
        emit_warning(sink, ecotope, "Ecotope has no assets".into());
    }
    let total = ecotope.total_probability();
    if total > 1.0 {
        warn!(
            "Ecotope '{}' has cumulative probability {} > 1; trailing assets are rarely drawn.",
            ecotope.name, total
        );
        emit_warning(
            sink,
            ecotope,
            format!("Cumulative probability {total} exceeds 1"),
        );
    }
    if ecotope.footprint > config.density_map_pixel_size {
        emit_warning(
            sink,
            ecotope,
            format!(
                "Footprint {} exceeds the density cell {}",
                ecotope.footprint, config.density_map_pixel_size
            ),
        );
    }
}

fn emit_warning(sink: &mut dyn EventSink, ecotope: &Ecotope, message: String) {
    if sink.wants(PlacementEventKind::Warning) {
        sink.send(PlacementEvent::Warning {
            context: format!("ecotope:{}", ecotope.name),
            message,
        });
    }
}
