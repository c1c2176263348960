//! Animated GIF recording of rendered frames

use crate::io::configuration::MAX_GIF_FRAMES;
use crate::io::error::{Result, VisualizerError};
use crate::render::frame::{Frame, FrameSink};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, RgbaImage};
use std::path::{Path, PathBuf};

/// Frame sink that buffers frames and writes them out as a looping GIF
///
/// Render loops tick much faster than GIF viewers can play back, so only
/// every `keep_every`-th frame is buffered. The final frame is always kept
/// and held longer so the finished grid stays readable.
///
/// At most `frame_limit` frames are buffered (by default
/// [`MAX_GIF_FRAMES`]); later frames only replace the held final frame.
pub struct GifRecorder {
    path: PathBuf,
    frame_delay_ms: u32,
    keep_every: usize,
    frame_limit: usize,
    seen: usize,
    frames: Vec<RgbaImage>,
    last: Option<RgbaImage>,
}

impl GifRecorder {
    /// Record to `path`, keeping every `keep_every`-th frame shown for `frame_delay_ms`
    pub fn new(path: impl Into<PathBuf>, frame_delay_ms: u32, keep_every: usize) -> Self {
        Self {
            path: path.into(),
            frame_delay_ms: frame_delay_ms.max(1),
            keep_every: keep_every.max(1),
            frame_limit: MAX_GIF_FRAMES,
            seen: 0,
            frames: Vec::new(),
            last: None,
        }
    }

    /// Buffer at most `limit` frames besides the final one
    #[must_use]
    pub const fn with_frame_limit(mut self, limit: usize) -> Self {
        self.frame_limit = limit;
        self
    }

    /// Destination of the animation
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of frames buffered for export
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Write the buffered frames as a GIF
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were presented
    /// - The parent directory or file cannot be created
    /// - GIF encoding fails
    pub fn export_gif(&self) -> Result<()> {
        let Some(last) = &self.last else {
            return Err(VisualizerError::InvalidSourceData {
                reason: "No frames captured for visualization".to_string(),
            });
        };

        let delay = Delay::from_numer_denom_ms(self.frame_delay_ms, 1);
        let mut frames: Vec<image::Frame> = self
            .frames
            .iter()
            .map(|image| image::Frame::from_parts(image.clone(), 0, 0, delay))
            .collect();

        // Final frame displays longer for better visibility
        let final_delay = Delay::from_numer_denom_ms(self.frame_delay_ms * 25, 1);
        frames.push(image::Frame::from_parts(last.clone(), 0, 0, final_delay));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| VisualizerError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(&self.path).map_err(|e| VisualizerError::FileSystem {
            path: self.path.clone(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = GifEncoder::new(file);
        encoder
            .set_repeat(Repeat::Infinite)
            .and_then(|()| encoder.encode_frames(frames))
            .map_err(|e| VisualizerError::ImageExport {
                path: self.path.clone(),
                source: e,
            })
    }
}

impl FrameSink for GifRecorder {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        if self.seen % self.keep_every == 0 && self.frames.len() < self.frame_limit {
            self.frames.push(frame.image.clone());
        }
        self.seen += 1;
        self.last = Some(frame.image.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.export_gif()
    }
}
