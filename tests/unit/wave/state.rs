//! Tests for immutable wave snapshots

#[cfg(test)]
mod tests {
    use wavescope::wave::module::ModuleId;
    use wavescope::wave::state::{HistoryEntry, Slot, WaveState};

    fn grid(lengths: &[usize], width: usize) -> WaveState {
        let slots = lengths
            .iter()
            .enumerate()
            .map(|(index, &len)| Slot {
                x: index % width,
                y: index / width,
                superposition: (0..len).map(ModuleId::new).collect(),
            })
            .collect();
        WaveState::new(width, lengths.len() / width, slots, Vec::new())
    }

    // Tests fully collapsed holds iff every slot has exactly one candidate
    // Verified by using any() instead of all()
    #[test]
    fn test_fully_collapsed_iff_all_single() {
        assert!(grid(&[1, 1, 1, 1], 2).is_fully_collapsed());
        assert!(!grid(&[1, 2, 1, 1], 2).is_fully_collapsed());
        assert!(!grid(&[1, 0, 1, 1], 2).is_fully_collapsed());
        assert!(!WaveState::empty(2, 2).is_fully_collapsed());
    }

    // Tests slot lookup is row-major and bounds checked
    #[test]
    fn test_slot_lookup() {
        let wave = grid(&[1, 2, 3, 4, 5, 6], 3);
        assert_eq!(wave.slot(2, 1).map(|s| s.superposition.len()), Some(6));
        assert_eq!(wave.slot(0, 1).map(|s| s.superposition.len()), Some(4));
        assert!(wave.slot(3, 0).is_none());
        assert!(wave.slot(0, 2).is_none());
    }

    // Tests contradiction and candidate totals
    #[test]
    fn test_counts_and_contradiction() {
        let wave = grid(&[3, 1, 0, 2], 2);
        assert_eq!(wave.remaining_candidates(), 6);
        assert_eq!(wave.collapsed_count(), 1);
        let contradiction = wave.contradiction().unwrap();
        assert_eq!((contradiction.x, contradiction.y), (0, 1));
        assert!(contradiction.is_contradiction());
    }

    #[test]
    fn test_history_is_kept_in_order() {
        let history = vec![HistoryEntry { x: 1, y: 0 }, HistoryEntry { x: 0, y: 0 }];
        let wave = WaveState::new(2, 1, Vec::new(), history.clone());
        assert_eq!(wave.history(), history.as_slice());
        assert_eq!(wave.width(), 2);
        assert_eq!(wave.height(), 1);
    }
}
