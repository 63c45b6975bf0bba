//! Event types and sinks for observing scene assembly.
//!
//! [`PlacementEvent`]s are emitted by [`crate::scene::assembler::SceneAssembler`] at
//! every milestone of a run. Sinks declare which kinds they care about via
//! [`EventSink::wants`], so expensive payloads are only built when someone listens.
use crate::config::Landmark;
use crate::field::BinaryMask;
use crate::placement::record::PlacementRecord;
use crate::scene::{EcotopeSummary, SceneStats};

/// Describes events emitted while assembling a scene.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum PlacementEvent {
    /// Emitted once before the first ecotope.
    RunStarted {
        /// Number of ecotopes in the run.
        ecotope_count: usize,
        /// Density field shape `(width, height)` every ecotope must match.
        density_size: (usize, usize),
        /// Whether a road network pre-claims area.
        has_roads: bool,
    },

    /// Emitted when an ecotope pass starts.
    EcotopeStarted {
        /// Position in priority order.
        index: usize,
        name: String,
        priority: i32,
    },

    /// Emitted after the effective density of an ecotope was dithered.
    CandidatesDiscretized {
        index: usize,
        name: String,
        /// Number of `true` cells in the candidate mask, before upsampling.
        candidates: usize,
        mask: BinaryMask,
    },

    /// Emitted for every placed object.
    PlacementMade {
        index: usize,
        name: String,
        record: PlacementRecord,
    },

    /// Emitted when an ecotope pass finishes.
    EcotopeFinished {
        index: usize,
        summary: EcotopeSummary,
    },

    /// Emitted for every fixed landmark appended after the ecotopes.
    LandmarkPlaced {
        landmark: Landmark,
        record: PlacementRecord,
    },

    /// Emitted once after all placements were made.
    RunFinished { stats: SceneStats },

    /// Non-fatal warning generated during assembly.
    Warning {
        /// Context string (e.g. `ecotope:forest`).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`PlacementEvent`], used for sink filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementEventKind {
    RunStarted,
    EcotopeStarted,
    CandidatesDiscretized,
    PlacementMade,
    EcotopeFinished,
    LandmarkPlaced,
    RunFinished,
    Warning,
}

impl PlacementEvent {
    pub fn kind(&self) -> PlacementEventKind {
        match self {
            PlacementEvent::RunStarted { .. } => PlacementEventKind::RunStarted,
            PlacementEvent::EcotopeStarted { .. } => PlacementEventKind::EcotopeStarted,
            PlacementEvent::CandidatesDiscretized { .. } => {
                PlacementEventKind::CandidatesDiscretized
            }
            PlacementEvent::PlacementMade { .. } => PlacementEventKind::PlacementMade,
            PlacementEvent::EcotopeFinished { .. } => PlacementEventKind::EcotopeFinished,
            PlacementEvent::LandmarkPlaced { .. } => PlacementEventKind::LandmarkPlaced,
            PlacementEvent::RunFinished { .. } => PlacementEventKind::RunFinished,
            PlacementEvent::Warning { .. } => PlacementEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`PlacementEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: PlacementEvent);

    /// Whether events of `kind` should be built and sent at all.
    #[inline]
    fn wants(&mut self, _kind: PlacementEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = PlacementEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: PlacementEvent) {}

    #[inline]
    fn wants(&mut self, _kind: PlacementEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(PlacementEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(PlacementEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(PlacementEvent),
{
    #[inline]
    fn send(&mut self, event: PlacementEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally limited to some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<PlacementEvent>,
    only: Option<Vec<PlacementEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            events: Vec::with_capacity(cap),
            only: None,
        }
    }

    /// Collect only events of the listed kinds.
    pub fn only(kinds: impl IntoIterator<Item = PlacementEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<PlacementEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[PlacementEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: PlacementEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&mut self, kind: PlacementEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks that want it.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: PlacementEvent) {
        let kind = event.kind();
        let targets: Vec<usize> = (0..self.sinks.len())
            .filter(|&i| self.sinks[i].wants(kind))
            .collect();
        let Some((&last, rest)) = targets.split_last() else {
            return;
        };
        for &i in rest {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last].send(event);
    }

    fn wants(&mut self, kind: PlacementEventKind) -> bool {
        self.sinks.iter_mut().any(|s| s.wants(kind))
    }
}
