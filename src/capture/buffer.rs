use crate::foundation::core::Canvas;
use crate::foundation::error::{DecodeFxError, DecodeFxResult};

/// Target format of a recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    /// Looping image sequence (GIF).
    ImageSequence,
    /// Video container (MP4).
    Video,
}

impl ExportKind {
    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::ImageSequence => "gif",
            Self::Video => "mp4",
        }
    }
}

/// A captured frame: tightly packed, row-major RGB8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGB {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGB8 bytes.
    pub data: Vec<u8>,
}

impl FrameRGB {
    /// Wrap RGB8 bytes, checking the length.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> DecodeFxResult<Self> {
        let expected = Canvas { width, height }.rgb_len();
        if data.len() != expected {
            return Err(DecodeFxError::validation(format!(
                "rgb frame has {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// RGB8 pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 3;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Copy into an `image` buffer.
    pub fn to_rgb_image(&self) -> DecodeFxResult<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| DecodeFxError::validation("rgb frame buffer size mismatch"))
    }
}

/// Frames detached from a finished recording.
#[derive(Clone, Debug)]
pub struct Recording {
    /// Frames in render order.
    pub frames: Vec<FrameRGB>,
    /// Requested export format.
    pub kind: ExportKind,
}

/// Accumulates rendered frames while recording is active.
///
/// Growth is unbounded: a recording holds every frame rendered between `start` and `stop`.
#[derive(Debug, Default)]
pub struct CaptureBuffer {
    frames: Vec<FrameRGB>,
    kind: Option<ExportKind>,
}

impl CaptureBuffer {
    /// Create an idle buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear any previous frames and start recording for `kind`.
    pub fn start(&mut self, kind: ExportKind) {
        self.frames.clear();
        self.kind = Some(kind);
    }

    /// Append a frame. Ignored unless recording.
    pub fn push(&mut self, frame: FrameRGB) {
        if self.kind.is_some() {
            self.frames.push(frame);
        }
    }

    /// Detach the captured frames and stop recording.
    ///
    /// Returns `None` when no recording was active.
    pub fn stop(&mut self) -> Option<Recording> {
        let kind = self.kind.take()?;
        Some(Recording {
            frames: std::mem::take(&mut self.frames),
            kind,
        })
    }

    /// Drop frames and recording state.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.kind = None;
    }

    /// `true` while recording.
    pub fn is_recording(&self) -> bool {
        self.kind.is_some()
    }

    /// Active export kind, if recording.
    pub fn kind(&self) -> Option<ExportKind> {
        self.kind
    }

    /// Number of frames captured so far.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` when no frames are held.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/buffer.rs"]
mod tests;
