//! Projection of a published snapshot into a frame
//!
//! Drawing order: background, history fills, slot contents, history indices,
//! status line. Rendering never mutates the snapshot.

use crate::io::catalog::TileCatalog;
use crate::io::configuration::{
    BACKGROUND_COLOR, CONTRADICTION_COLOR, HISTORY_COLOR, TEXT_BACKDROP, TEXT_COLOR, TEXT_SCALE,
};
use crate::render::cache::ImageCache;
use crate::render::frame::Frame;
use crate::render::glyphs::draw_text;
use crate::render::layout::{GridLayout, Rect};
use crate::run::feed::{RunPhase, Snapshot};
use crate::wave::module::ModuleId;
use crate::wave::state::Slot;
use image::{Rgba, RgbaImage, imageops};
use std::sync::Arc;

/// Status readout for a snapshot
///
/// Finished runs show their seed so they can be replayed; running ones show
/// the measured frame rate.
pub fn status_line(snapshot: &Snapshot, fps: f64) -> String {
    match snapshot.phase {
        RunPhase::Collapsed => format!(" SEED: 0x{:X}", snapshot.seed),
        RunPhase::Stalled { .. } => format!(" STALLED SEED: 0x{:X}", snapshot.seed),
        RunPhase::Running | RunPhase::Reseeding => format!(" FPS: {fps:0.2}"),
    }
}

/// Stateless frame producer sharing its texture cache across frames
pub struct SnapshotRenderer {
    layout: GridLayout,
    catalog: Arc<TileCatalog>,
    cache: ImageCache,
}

impl SnapshotRenderer {
    /// Renderer for `layout` drawing modules from `catalog`
    pub fn new(layout: GridLayout, catalog: Arc<TileCatalog>) -> Self {
        Self {
            layout,
            catalog,
            cache: ImageCache::new(),
        }
    }

    /// Layout used for every frame
    pub const fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Texture cache, exposed for statistics
    pub const fn cache(&self) -> &ImageCache {
        &self.cache
    }

    /// Render one frame of `snapshot`
    pub fn render(&self, snapshot: &Snapshot, fps: f64) -> Frame {
        let (width, height) = self.layout.frame_size();
        let mut image = RgbaImage::from_pixel(width, height, Rgba(BACKGROUND_COLOR));
        let wave = &snapshot.wave;

        for entry in wave.history() {
            let cell = self.layout.cell(entry.x, entry.y).grow(1);
            fill_rect(&mut image, cell, Rgba(HISTORY_COLOR));
        }

        for slot in wave.slots() {
            self.draw_slot(&mut image, slot);
        }

        for (index, entry) in wave.history().iter().enumerate() {
            let cell = self.layout.cell(entry.x, entry.y);
            draw_text(
                &mut image,
                &index.to_string(),
                cell.x,
                cell.y,
                TEXT_SCALE,
                Rgba(TEXT_COLOR),
                Rgba(TEXT_BACKDROP),
            );
        }

        let status = status_line(snapshot, fps);
        draw_text(
            &mut image,
            &status,
            0,
            0,
            TEXT_SCALE,
            Rgba(TEXT_COLOR),
            Rgba(TEXT_BACKDROP),
        );

        Frame {
            image,
            status,
            run: snapshot.run,
            finished_runs: snapshot.finished_runs,
        }
    }

    fn draw_slot(&self, image: &mut RgbaImage, slot: &Slot) {
        match slot.superposition.as_slice() {
            [] => draw_contradiction(image, self.layout.cell(slot.x, slot.y)),
            [module] => self.draw_module(image, *module, self.layout.cell(slot.x, slot.y)),
            candidates => {
                let cells = self.layout.candidate_cells(slot.x, slot.y, candidates.len());
                for (module, rect) in candidates.iter().zip(cells) {
                    self.draw_module(image, *module, rect);
                }
            }
        }
    }

    fn draw_module(&self, image: &mut RgbaImage, module: ModuleId, rect: Rect) {
        let Some(texture) = self.cache.texture(&self.catalog, module) else {
            return;
        };
        if let Some(scaled) = texture.scaled(rect.width, rect.height) {
            imageops::overlay(image, &*scaled, rect.x, rect.y);
        }
    }
}

/// Fill `rect` with `color`, clipped to the frame
pub fn fill_rect(image: &mut RgbaImage, rect: Rect, color: Rgba<u8>) {
    let (frame_width, frame_height) = image.dimensions();
    let left = rect.x.max(0);
    let top = rect.y.max(0);
    let right = (rect.x + i64::from(rect.width)).min(i64::from(frame_width));
    let bottom = (rect.y + i64::from(rect.height)).min(i64::from(frame_height));

    for py in top..bottom {
        for px in left..right {
            if let Some(pixel) = image.get_pixel_mut_checked(px as u32, py as u32) {
                *pixel = color;
            }
        }
    }
}

// Red cell crossed corner to corner
fn draw_contradiction(image: &mut RgbaImage, cell: Rect) {
    fill_rect(image, cell, Rgba(CONTRADICTION_COLOR));

    let span = i64::from(cell.width.min(cell.height));
    for i in 0..span {
        for (px, py) in [
            (cell.x + i, cell.y + i),
            (cell.x + span - 1 - i, cell.y + i),
        ] {
            let (Ok(px), Ok(py)) = (u32::try_from(px), u32::try_from(py)) else {
                continue;
            };
            if let Some(pixel) = image.get_pixel_mut_checked(px, py) {
                *pixel = Rgba(TEXT_COLOR);
            }
        }
    }
}
