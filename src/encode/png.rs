use std::path::{Path, PathBuf};

use crate::capture::buffer::FrameRGB;
use crate::encode::sink::{FrameSink, SinkConfig, check_frame};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{DecodeFxError, DecodeFxResult};

/// Writes each frame as `frame_00000.png`, `frame_00001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    cfg: Option<SinkConfig>,
    written: usize,
}

impl PngSequenceSink {
    /// Create a sink writing into `dir` (created on `begin`).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cfg: None,
            written: 0,
        }
    }

    /// Number of files written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Path of the file for frame `idx`.
    pub fn frame_path(dir: &Path, idx: FrameIndex) -> PathBuf {
        dir.join(format!("frame_{:05}.png", idx.0))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> DecodeFxResult<()> {
        use anyhow::Context as _;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create frame directory '{}'", self.dir.display()))?;
        self.cfg = Some(cfg);
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGB) -> DecodeFxResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| DecodeFxError::export("png sink not started"))?;
        check_frame(cfg, frame)?;

        let path = Self::frame_path(&self.dir, idx);
        frame
            .to_rgb_image()?
            .save_with_format(&path, image::ImageFormat::Png)
            .map_err(|e| DecodeFxError::export(format!("write '{}': {e}", path.display())))?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> DecodeFxResult<()> {
        self.cfg = None;
        Ok(())
    }
}
