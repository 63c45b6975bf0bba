//! Explicit per-run generation state.
use rand::Rng;

use crate::config::MapConfig;
use crate::placement::rand01;
use crate::roads::RoadNetwork;
use crate::surface::HeightSurface;

/// Everything a placement pass reads, plus the run's single random source.
///
/// All draws within a run go through [`GenerationContext::rng`], in a fixed order, so a
/// seeded generator reproduces a scene exactly.
pub struct GenerationContext<'a, R: Rng> {
    pub config: &'a MapConfig,
    pub surface: &'a HeightSurface,
    /// Road fields, if the map has a road layer.
    pub roads: Option<&'a RoadNetwork>,
    pub rng: &'a mut R,
}

impl<'a, R: Rng> GenerationContext<'a, R> {
    pub fn new(config: &'a MapConfig, surface: &'a HeightSurface, rng: &'a mut R) -> Self {
        Self {
            config,
            surface,
            roads: None,
            rng,
        }
    }

    pub fn with_roads(mut self, roads: Option<&'a RoadNetwork>) -> Self {
        self.roads = roads;
        self
    }

    /// Next uniform draw in `[0, 1]`.
    #[inline]
    pub fn rand01(&mut self) -> f32 {
        rand01(&mut *self.rng)
    }
}
