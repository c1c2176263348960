//! Tests for snapshot rendering

#[cfg(test)]
mod tests {
    use crate::support::solid_catalog;
    use image::Rgba;
    use std::sync::Arc;
    use wavescope::io::configuration::{
        BACKGROUND_COLOR, CONTRADICTION_COLOR, HISTORY_COLOR, TEXT_COLOR,
    };
    use wavescope::render::SnapshotRenderer;
    use wavescope::render::layout::GridLayout;
    use wavescope::render::renderer::status_line;
    use wavescope::run::feed::{RunPhase, Snapshot};
    use wavescope::wave::module::ModuleId;
    use wavescope::wave::state::{HistoryEntry, Slot, WaveState};

    const RED: [u8; 4] = [255, 0, 0, 255];
    const GREEN: [u8; 4] = [0, 255, 0, 255];

    fn slot(x: usize, y: usize, modules: &[usize]) -> Slot {
        Slot {
            x,
            y,
            superposition: modules.iter().copied().map(ModuleId::new).collect(),
        }
    }

    fn snapshot(wave: WaveState, phase: RunPhase) -> Snapshot {
        Snapshot {
            wave,
            phase,
            seed: 0xBEEF,
            run: 3,
            steps: 1,
            finished_runs: 2,
        }
    }

    fn renderer(columns: usize, rows: usize) -> SnapshotRenderer {
        SnapshotRenderer::new(
            GridLayout::new(columns, rows, 40),
            Arc::new(solid_catalog(&[RED, GREEN])),
        )
    }

    // Tests the status line shows the seed only for finished runs
    // Verified by formatting the seed in decimal
    #[test]
    fn test_status_line() {
        let wave = WaveState::empty(1, 1);
        assert_eq!(
            status_line(&snapshot(wave.clone(), RunPhase::Collapsed), 12.5),
            " SEED: 0xBEEF"
        );
        assert_eq!(
            status_line(&snapshot(wave.clone(), RunPhase::Stalled { x: 0, y: 0 }), 12.5),
            " STALLED SEED: 0xBEEF"
        );
        assert_eq!(
            status_line(&snapshot(wave, RunPhase::Running), 59.876),
            " FPS: 59.88"
        );
    }

    // Tests collapsed slots fill their cell and open slots use sub-cells
    // Verified by drawing single candidates into sub-cells
    #[test]
    fn test_slot_contents() {
        let wave = WaveState::new(
            2,
            1,
            vec![slot(0, 0, &[0]), slot(1, 0, &[0, 1])],
            Vec::new(),
        );
        let frame = renderer(2, 1).render(&snapshot(wave, RunPhase::Running), 0.0);

        assert_eq!(frame.image.dimensions(), (80, 40));
        assert_eq!(*frame.image.get_pixel(20, 30), Rgba(RED));
        assert_eq!(*frame.image.get_pixel(39, 39), Rgba(RED));

        // Two candidates: side 3, 13 px sub-cells inset by the margin
        assert_eq!(*frame.image.get_pixel(40 + 8, 8), Rgba(RED));
        assert_eq!(*frame.image.get_pixel(40 + 21, 8), Rgba(GREEN));
        assert_eq!(*frame.image.get_pixel(40 + 35, 35), Rgba(BACKGROUND_COLOR));
        assert_eq!(frame.run, 3);
        assert_eq!(frame.finished_runs, 2);
    }

    // Tests history cells are filled beneath their contents
    #[test]
    fn test_history_fill() {
        let wave = WaveState::new(
            2,
            1,
            vec![slot(0, 0, &[0, 1]), slot(1, 0, &[0, 1])],
            vec![HistoryEntry { x: 0, y: 0 }],
        );
        let frame = renderer(2, 1).render(&snapshot(wave, RunPhase::Running), 0.0);

        assert_eq!(*frame.image.get_pixel(35, 35), Rgba(HISTORY_COLOR));
        assert_eq!(*frame.image.get_pixel(75, 35), Rgba(BACKGROUND_COLOR));
    }

    // Tests an empty slot is drawn red and crossed
    #[test]
    fn test_contradiction_marker() {
        let wave = WaveState::new(1, 1, vec![slot(0, 0, &[])], Vec::new());
        let frame = renderer(1, 1).render(&snapshot(wave, RunPhase::Stalled { x: 0, y: 0 }), 0.0);

        assert_eq!(*frame.image.get_pixel(30, 12), Rgba(CONTRADICTION_COLOR));
        assert_eq!(*frame.image.get_pixel(20, 20), Rgba(TEXT_COLOR));
        assert_eq!(*frame.image.get_pixel(30, 9), Rgba(TEXT_COLOR));
        assert_eq!(frame.status, " STALLED SEED: 0xBEEF");
    }

    // Tests rendering goes through the cache and leaves the snapshot untouched
    // Verified by bypassing the cache for full cells
    #[test]
    fn test_render_reuses_textures() {
        let wave = WaveState::new(
            2,
            1,
            vec![slot(0, 0, &[0]), slot(1, 0, &[0])],
            vec![HistoryEntry { x: 0, y: 0 }],
        );
        let snapshot = snapshot(wave, RunPhase::Collapsed);
        let renderer = renderer(2, 1);

        let first = renderer.render(&snapshot, 0.0);
        let second = renderer.render(&snapshot, 0.0);

        assert_eq!(first.image, second.image);
        assert_eq!(renderer.cache().len(), 1);
        assert_eq!(renderer.cache().stats.misses(), 1);
        assert_eq!(snapshot.wave.history().len(), 1);
        assert_eq!(renderer.layout().frame_size(), (80, 40));
    }

    // Tests each history cell carries its 0-based collapse index at the cell origin
    // Verified by numbering history entries from 1
    #[test]
    fn test_history_indices_drawn_at_cell_origin() {
        let slots = (0..4).map(|i| slot(i % 2, i / 2, &[0, 1])).collect();
        let history = vec![HistoryEntry { x: 1, y: 1 }, HistoryEntry { x: 0, y: 1 }];
        let wave = WaveState::new(2, 2, slots, history);
        let frame = renderer(2, 2).render(&snapshot(wave, RunPhase::Running), 0.0);
        let white = Rgba(TEXT_COLOR);

        // "0" at (40, 40): solid top row, hollow middle
        for x in 41..44 {
            assert_eq!(*frame.image.get_pixel(x, 41), white);
        }
        assert_eq!(*frame.image.get_pixel(41, 42), white);
        assert_ne!(*frame.image.get_pixel(42, 42), white);

        // "1" at (0, 40): single top pixel, then the flag
        assert_eq!(*frame.image.get_pixel(2, 41), white);
        assert_ne!(*frame.image.get_pixel(1, 41), white);
        assert_eq!(*frame.image.get_pixel(1, 42), white);
        assert_ne!(*frame.image.get_pixel(3, 42), white);
    }
}
