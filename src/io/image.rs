//! PNG export of rendered frames

use crate::io::error::{Result, VisualizerError};
use crate::render::frame::{Frame, FrameSink};
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Save one frame as a PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn save_frame_png(image: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| VisualizerError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| VisualizerError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}

/// Frame sink that writes the last presented frame to a PNG when finished
pub struct PngSink {
    path: PathBuf,
    last: Option<RgbaImage>,
}

impl PngSink {
    /// Write to `path` on finish
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last: None,
        }
    }

    /// Destination of the image
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FrameSink for PngSink {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.last = Some(frame.image.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let Some(image) = &self.last else {
            return Err(VisualizerError::InvalidSourceData {
                reason: "No frame was rendered".to_string(),
            });
        };
        save_frame_png(image, &self.path)
    }
}
