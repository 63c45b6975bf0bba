use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use map_placement::prelude::DitherMode;
use map_placement_examples::{generate_map, init_tracing, MapDirectory, PipelineOptions};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Dither {
    ErrorDiffusion,
    Ordered,
}

impl From<Dither> for DitherMode {
    fn from(d: Dither) -> Self {
        match d {
            Dither::ErrorDiffusion => DitherMode::ErrorDiffusion,
            Dither::Ordered => DitherMode::Ordered,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "generate-scene")]
#[command(about = "Place assets on a map from its height, road and density maps")]
struct Args {
    /// Map directory holding config, ecotope manifest and maps
    map_dir: PathBuf,

    /// Random seed
    #[arg(short, long, default_value = "0")]
    seed: u64,

    /// Override the dither mode of the map config
    #[arg(long, value_enum)]
    dither: Option<Dither>,

    /// Output directory (default: the map directory)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Write candidate masks and road fields to this directory
    #[arg(long)]
    debug_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let map = MapDirectory::new(&args.map_dir);
    let options = PipelineOptions::new(args.out.unwrap_or_else(|| args.map_dir.clone()))
        .with_seed(args.seed)
        .with_dither_mode(args.dither.map(DitherMode::from))
        .with_debug_dir(args.debug_dir);

    let scene = generate_map(&map, &options)?;
    for summary in &scene.ecotopes {
        println!(
            "{:<16} priority {:>3}: {:>6} candidates, {:>6} placed, {:>6} skipped",
            summary.name, summary.priority, summary.candidates, summary.placed, summary.skipped
        );
    }
    println!(
        "{} placements ({} landmarks)",
        scene.len(),
        scene.stats.landmarks
    );
    Ok(())
}
