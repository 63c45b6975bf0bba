//! Scene assembly: priority-ordered placement of every ecotope plus landmarks.
//!
//! - [`assembler`]: [`assembler::SceneAssembler`] runs the ecotope passes with overlap exclusion.
//! - [`events`]: observation of a run through [`events::EventSink`]s.
//!
//! Densities are looked up by ecotope name in a [`DensityRegistry`].
use std::collections::HashMap;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::field::ScalarField;
use crate::placement::record::PlacementRecord;
use crate::surface::SurfaceDescriptor;

pub mod assembler;
pub mod events;

/// The finished output of a run: every placement in priority order plus the surface.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub placements: Vec<PlacementRecord>,
    pub surface: SurfaceDescriptor,
    /// Per-ecotope counts in processing order.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub ecotopes: Vec<EcotopeSummary>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub stats: SceneStats,
}

/// Totals over a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Candidate cells visited by the placement sampler.
    pub candidates: usize,
    /// Records produced by ecotopes.
    pub placed: usize,
    /// Candidates whose draw selected no asset.
    pub skipped: usize,
    /// Records appended from landmarks.
    pub landmarks: usize,
}

/// Counts for one ecotope pass.
#[derive(Debug, Clone, PartialEq)]
pub struct EcotopeSummary {
    pub name: String,
    pub priority: i32,
    pub candidates: usize,
    pub placed: usize,
    pub skipped: usize,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            placements: Vec::new(),
            surface: SurfaceDescriptor {
                height_map: Vec::new(),
                max_height: 0.0,
                pixel_size: 0.0,
                height: 0,
                width: 0,
            },
            ecotopes: Vec::new(),
            stats: SceneStats::default(),
        }
    }
}

impl Scene {
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Summary of the ecotope with the given name, if it was processed.
    pub fn ecotope(&self, name: &str) -> Option<&EcotopeSummary> {
        self.ecotopes.iter().find(|e| e.name == name)
    }
}

/// Density fields keyed by ecotope name.
#[derive(Clone, Debug, Default)]
pub struct DensityRegistry {
    fields: HashMap<String, Arc<ScalarField>>,
}

impl DensityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            fields: HashMap::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Registers the density for `ecotope`, replacing any previous one.
    pub fn register(&mut self, ecotope: impl Into<String>, density: ScalarField) {
        self.fields.insert(ecotope.into(), Arc::new(density));
    }

    pub fn register_arc(&mut self, ecotope: impl Into<String>, density: Arc<ScalarField>) {
        self.fields.insert(ecotope.into(), density);
    }

    /// Returns `true` if a density was registered and removed.
    pub fn unregister(&mut self, ecotope: &str) -> bool {
        self.fields.remove(ecotope).is_some()
    }

    pub fn contains(&self, ecotope: &str) -> bool {
        self.fields.contains_key(ecotope)
    }

    pub fn get(&self, ecotope: &str) -> Option<Arc<ScalarField>> {
        self.fields.get(ecotope).cloned()
    }

    /// Copies every entry of `other` into this registry.
    pub fn extend_from(&mut self, other: &DensityRegistry) {
        for (k, v) in other.fields.iter() {
            self.fields.insert(k.clone(), v.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_register_and_lookup() {
        let mut registry = DensityRegistry::with_capacity(2);
        assert!(registry.is_empty());
        registry.register("forest", ScalarField::zeros(2, 2));
        registry.register_arc("urban", Arc::new(ScalarField::filled(2, 2, 1.0)));
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("forest"));
        assert_eq!(registry.get("urban").unwrap().sum(), 4.0);
        assert!(registry.get("rocks").is_none());
        assert!(registry.unregister("forest"));
        assert!(!registry.unregister("forest"));
    }

    #[test]
    fn registry_extend_shares_fields() {
        let mut base = DensityRegistry::new();
        base.register("forest", ScalarField::zeros(1, 1));
        let mut other = DensityRegistry::new();
        other.extend_from(&base);
        assert!(Arc::ptr_eq(
            &base.get("forest").unwrap(),
            &other.get("forest").unwrap()
        ));
    }

    #[test]
    fn scene_finds_ecotope_summary() {
        let scene = Scene {
            ecotopes: vec![EcotopeSummary {
                name: "forest".into(),
                priority: 1,
                candidates: 3,
                placed: 2,
                skipped: 1,
            }],
            ..Default::default()
        };
        assert!(scene.is_empty());
        assert_eq!(scene.ecotope("forest").unwrap().placed, 2);
        assert!(scene.ecotope("urban").is_none());
    }
}
