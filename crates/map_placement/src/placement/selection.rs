//! Cumulative-probability selection of an asset for one candidate cell.
//!
//! Probabilities are accumulated in list order and the first asset whose running
//! total reaches the draw wins. Totals below 1 leave room for "nothing placed";
//! totals above 1 make the trailing assets unreachable for high draws only.
use crate::placement::AssetDefinition;

/// Pick the first asset whose cumulative probability is `>= p`.
///
/// Returns `None` when `p` exceeds the total probability of the list.
pub fn pick_asset(assets: &[AssetDefinition], p: f32) -> Option<&AssetDefinition> {
    let mut cumulative = 0.0f32;
    for asset in assets {
        cumulative += asset.probability;
        if cumulative >= p {
            return Some(asset);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets() -> Vec<AssetDefinition> {
        vec![
            AssetDefinition::new(1, 0.5),
            AssetDefinition::new(2, 0.25),
            AssetDefinition::new(3, 0.25),
        ]
    }

    #[test]
    fn picks_by_running_total() {
        let assets = assets();
        assert_eq!(pick_asset(&assets, 0.0).unwrap().id, 1);
        assert_eq!(pick_asset(&assets, 0.5).unwrap().id, 1);
        assert_eq!(pick_asset(&assets, 0.6).unwrap().id, 2);
        assert_eq!(pick_asset(&assets, 0.75).unwrap().id, 2);
        assert_eq!(pick_asset(&assets, 0.99).unwrap().id, 3);
    }

    #[test]
    fn draw_above_total_places_nothing() {
        let assets = vec![AssetDefinition::new(4, 0.4)];
        assert!(pick_asset(&assets, 0.9).is_none());
        assert!(pick_asset(&assets, 0.41).is_none());
        assert_eq!(pick_asset(&assets, 0.39).unwrap().id, 4);
    }

    #[test]
    fn empty_list_places_nothing() {
        assert!(pick_asset(&[], 0.0).is_none());
    }

    #[test]
    fn zero_weight_entries_are_skipped_for_positive_draws() {
        let assets = vec![AssetDefinition::new(1, 0.0), AssetDefinition::new(2, 1.0)];
        assert_eq!(pick_asset(&assets, 0.3).unwrap().id, 2);
    }
}
