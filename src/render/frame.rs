use crate::io::error::Result;
use image::RgbaImage;

/// One rendered picture of a published snapshot
#[derive(Debug, Clone)]
pub struct Frame {
    /// Rendered pixels
    pub image: RgbaImage,
    /// Status line drawn into the frame
    pub status: String,
    /// Run the snapshot belonged to
    pub run: u64,
    /// Runs that had reached a terminal phase when the snapshot was taken
    pub finished_runs: u64,
}

/// Destination for rendered frames
pub trait FrameSink {
    /// Accept the frame of the current render tick
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot take the frame
    fn present(&mut self, frame: &Frame) -> Result<()>;

    /// False once the sink wants no more frames
    fn is_open(&self) -> bool {
        true
    }

    /// Flush whatever the sink buffered
    ///
    /// # Errors
    ///
    /// Returns an error if writing the output fails
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Sink that keeps only the most recent frame
#[derive(Debug, Default)]
pub struct LatestFrame {
    frame: Option<Frame>,
    presented: usize,
}

impl LatestFrame {
    /// Create an empty holder
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently presented frame
    pub const fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// Number of frames presented so far
    pub const fn presented(&self) -> usize {
        self.presented
    }
}

impl FrameSink for LatestFrame {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.frame = Some(frame.clone());
        self.presented += 1;
        Ok(())
    }
}

impl<S: FrameSink + ?Sized> FrameSink for Vec<Box<S>> {
    fn present(&mut self, frame: &Frame) -> Result<()> {
        for sink in self.iter_mut() {
            sink.present(frame)?;
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.iter().all(|sink| sink.is_open())
    }

    fn finish(&mut self) -> Result<()> {
        for sink in self.iter_mut() {
            sink.finish()?;
        }
        Ok(())
    }
}
