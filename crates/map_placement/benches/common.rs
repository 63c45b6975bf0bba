use std::time::Duration;

use criterion::{Criterion, Throughput};
use map_placement::prelude::ScalarField;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Smooth density with blobs of high values and uniform noise on top.
#[allow(dead_code)]
pub fn noisy_density(size: usize, seed: u64) -> ScalarField {
    let mut rng = StdRng::seed_from_u64(seed);
    let s = size as f32;
    ScalarField::from_fn(size, size, |x, y| {
        let fx = (x as f32 / s * 6.0).sin();
        let fy = (y as f32 / s * 4.0).cos();
        let base = 0.5 + 0.35 * fx * fy;
        (base + (rng.random::<f32>() - 0.5) * 0.2).clamp(0.0, 1.0)
    })
}
