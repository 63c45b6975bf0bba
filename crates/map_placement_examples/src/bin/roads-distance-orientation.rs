use std::path::PathBuf;

use clap::Parser;
use map_placement::prelude::*;
use map_placement::roads::{DEFAULT_ORIENTATION_RADIUS, MAX_DISTANCE, ROAD_THRESHOLD};
use map_placement_examples::{
    init_tracing, load_scalar_field, save_field_png, save_mask_png, save_orientation_png,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "roads-distance-orientation")]
#[command(about = "Derive road mask, distance and orientation fields from a road map")]
struct Args {
    /// Grayscale road map (default: a synthetic crossing with a diagonal)
    input: Option<PathBuf>,

    /// Normalized intensity above which a texel is road
    #[arg(long, default_value_t = ROAD_THRESHOLD)]
    threshold: f32,

    /// Half-width of the orientation sampling window
    #[arg(long, default_value_t = DEFAULT_ORIENTATION_RADIUS)]
    radius: usize,

    /// Output directory
    #[arg(short, long, default_value = "roads-distance-orientation")]
    out: PathBuf,
}

fn synthetic_roads(size: usize) -> ScalarField {
    ScalarField::from_fn(size, size, |x, y| {
        let on_road = x == size / 3 || y == size / 2 || x == y;
        if on_road {
            1.0
        } else {
            0.0
        }
    })
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    std::fs::create_dir_all(&args.out)?;

    let intensity = match &args.input {
        Some(path) => load_scalar_field(path)?,
        None => synthetic_roads(320),
    };
    let roads = RoadNetwork::from_intensity(&intensity, 1.0, args.threshold, args.radius)?;
    info!(
        "{} road cells, max distance {}.",
        roads.mask().count(),
        roads
            .distance()
            .as_slice()
            .iter()
            .copied()
            .fold(0.0f32, f32::max)
    );

    save_mask_png(roads.mask(), args.out.join("road_mask.png"))?;
    save_field_png(roads.distance(), MAX_DISTANCE as f32, args.out.join("dist_map.png"))?;
    save_orientation_png(roads.orientation(), args.out.join("orient_map.png"))?;
    Ok(())
}
