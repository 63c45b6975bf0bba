//! Surface texture painting: road colour blended over a ground texture.
use anyhow::{ensure, Result};
use image::{Rgb, RgbImage};
use map_placement::prelude::ScalarField;

/// Blends `road_color` over `ground` weighted by the road intensity of each texel.
///
/// `road` and `ground` must have the same dimensions.
pub fn paint_surface(road: &ScalarField, road_color: [u8; 3], ground: &RgbImage) -> Result<RgbImage> {
    let (w, h) = road.size();
    ensure!(
        (w as u32, h as u32) == ground.dimensions(),
        "ground texture is {:?}, road map is {}x{}",
        ground.dimensions(),
        w,
        h
    );

    Ok(RgbImage::from_fn(w as u32, h as u32, |x, y| {
        let weight = road[(x as usize, y as usize)].clamp(0.0, 1.0);
        let ground = ground.get_pixel(x, y).0;
        Rgb(std::array::from_fn(|c| {
            (weight * road_color[c] as f32 + (1.0 - weight) * ground[c] as f32) as u8
        }))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blends_by_road_weight() {
        let road = ScalarField::from_vec(3, 1, vec![0.0, 0.5, 1.0]).unwrap();
        let ground = RgbImage::from_pixel(3, 1, Rgb([0, 100, 200]));
        let out = paint_surface(&road, [200, 100, 0], &ground).unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [0, 100, 200]);
        assert_eq!(out.get_pixel(1, 0).0, [100, 100, 100]);
        assert_eq!(out.get_pixel(2, 0).0, [200, 100, 0]);
    }

    #[test]
    fn rejects_mismatched_texture() {
        let road = ScalarField::zeros(2, 2);
        let ground = RgbImage::new(3, 2);
        assert!(paint_surface(&road, [0, 0, 0], &ground).is_err());
    }
}
