//! Approximate distance-to-road field computed by multi-source flood fill.
use std::collections::VecDeque;

use tracing::debug;

use crate::field::{BinaryMask, ScalarField};

/// Largest distance stored in the field. Cells further away, or unreachable, saturate here.
pub const MAX_DISTANCE: u16 = 254;

const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Ring distance from the nearest road cell over 8-connected neighbours.
///
/// Road cells are 0, a cell first reached in ring `k` holds `min(k, 254)`. The result
/// is a Chebyshev distance, not Euclidean. It feeds the orientation field, which only
/// needs a coarse gradient.
pub fn distance_field(road_mask: &BinaryMask) -> ScalarField {
    let (w, h) = road_mask.size();
    let mut dist: Vec<u16> = vec![MAX_DISTANCE; w * h];
    let mut frontier: VecDeque<(usize, usize)> = VecDeque::new();

    for (x, y, &is_road) in road_mask.iter_cells() {
        if is_road {
            dist[y * w + x] = 0;
            frontier.push_back((x, y));
        }
    }
    let seeds = frontier.len();

    let mut visited: Vec<bool> = road_mask.as_slice().to_vec();
    while let Some((x, y)) = frontier.pop_front() {
        let d = dist[y * w + x];
        if d >= MAX_DISTANCE {
            // Everything beyond this ring keeps the saturated default.
            break;
        }
        for (dx, dy) in NEIGHBORS {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                continue;
            }
            let ni = ny as usize * w + nx as usize;
            if visited[ni] {
                continue;
            }
            visited[ni] = true;
            dist[ni] = d + 1;
            frontier.push_back((nx as usize, ny as usize));
        }
    }

    debug!("Distance field {}x{} from {} road cells.", w, h, seeds);

    ScalarField::from_fn(w, h, |x, y| dist[y * w + x] as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_with(w: usize, h: usize, roads: &[(usize, usize)]) -> BinaryMask {
        BinaryMask::from_fn(w, h, |x, y| roads.contains(&(x, y)))
    }

    #[test]
    fn single_road_gives_chebyshev_rings() {
        let field = distance_field(&mask_with(7, 7, &[(3, 3)]));
        for y in 0..7 {
            for x in 0..7 {
                let expected = (x as isize - 3).abs().max((y as isize - 3).abs()) as f32;
                assert_eq!(field[(x, y)], expected, "cell ({x}, {y})");
            }
        }
    }

    #[test]
    fn zero_exactly_on_roads() {
        let mask = mask_with(9, 5, &[(0, 0), (4, 2), (8, 4)]);
        let field = distance_field(&mask);
        for (x, y, &road) in mask.iter_cells() {
            assert_eq!(field[(x, y)] == 0.0, road);
        }
    }

    #[test]
    fn no_roads_saturates_everything() {
        let field = distance_field(&mask_with(5, 4, &[]));
        assert!(field.as_slice().iter().all(|&d| d == MAX_DISTANCE as f32));
    }

    #[test]
    fn long_strip_caps_at_254() {
        let field = distance_field(&mask_with(300, 1, &[(0, 0)]));
        assert_eq!(field[(253, 0)], 253.0);
        assert_eq!(field[(254, 0)], 254.0);
        assert_eq!(field[(299, 0)], 254.0);
        assert!(field.as_slice().iter().all(|&d| d <= 254.0));
    }

    #[test]
    fn every_cell_is_one_more_than_its_closest_neighbour() {
        let mask = mask_with(20, 15, &[(2, 3), (17, 11), (9, 0)]);
        let field = distance_field(&mask);
        for y in 0..15isize {
            for x in 0..20isize {
                let d = field[(x as usize, y as usize)];
                if d == 0.0 {
                    continue;
                }
                let min_neighbor = NEIGHBORS
                    .iter()
                    .filter_map(|(dx, dy)| field.get((x + dx) as usize, (y + dy) as usize))
                    .fold(f32::INFINITY, |a, &b| a.min(b));
                assert_eq!(d, min_neighbor + 1.0, "cell ({x}, {y})");
            }
        }
    }
}
