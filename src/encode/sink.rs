use crate::capture::buffer::FrameRGB;
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::DecodeFxResult;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Playback rate written into the output.
    pub fps: Fps,
}

/// Sink contract for consuming captured frames.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> DecodeFxResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGB) -> DecodeFxResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> DecodeFxResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGB)>,
    finished: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Frames received so far.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGB)] {
        &self.frames
    }

    /// `true` once `end` was called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> DecodeFxResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGB) -> DecodeFxResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> DecodeFxResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Reject a frame whose size differs from the sink configuration.
pub(crate) fn check_frame(cfg: &SinkConfig, frame: &FrameRGB) -> DecodeFxResult<()> {
    if frame.width != cfg.width || frame.height != cfg.height {
        return Err(crate::foundation::error::DecodeFxError::validation(format!(
            "frame size mismatch: got {}x{}, expected {}x{}",
            frame.width, frame.height, cfg.width, cfg.height
        )));
    }
    Ok(())
}
