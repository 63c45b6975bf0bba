use std::path::PathBuf;

use clap::Parser;
use map_placement::prelude::*;
use map_placement_examples::{init_tracing, load_scalar_field, save_field_png, save_mask_png};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "dithering-modes")]
#[command(about = "Compare error-diffusion and ordered dithering of a density map")]
struct Args {
    /// Grayscale density map (default: a synthetic radial gradient)
    input: Option<PathBuf>,

    /// Size of the synthetic gradient
    #[arg(long, default_value = "256")]
    size: usize,

    /// Output directory
    #[arg(short, long, default_value = "dithering-modes")]
    out: PathBuf,
}

fn radial_gradient(size: usize) -> ScalarField {
    let c = size as f32 / 2.0;
    ScalarField::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - c;
        let dy = y as f32 + 0.5 - c;
        (1.0 - (dx * dx + dy * dy).sqrt() / c).clamp(0.0, 1.0)
    })
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    std::fs::create_dir_all(&args.out)?;

    let density = match &args.input {
        Some(path) => load_scalar_field(path)?,
        None => radial_gradient(args.size),
    };
    save_field_png(&density, 1.0, args.out.join("density.png"))?;
    info!("Density mass {:.1} over {} cells.", density.sum(), density.len());

    for (mode, file) in [
        (DitherMode::ErrorDiffusion, "error_diffusion.png"),
        (DitherMode::Ordered, "ordered.png"),
    ] {
        let mask = dither(&density, mode);
        save_mask_png(&mask, args.out.join(file))?;
        info!("{:?}: {} candidates.", mode, mask.count());
    }
    Ok(())
}
