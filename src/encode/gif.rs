use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};

use crate::capture::buffer::FrameRGB;
use crate::encode::ffmpeg::ensure_parent_dir;
use crate::encode::sink::{FrameSink, SinkConfig, check_frame};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{DecodeFxError, DecodeFxResult};
use crate::foundation::math::rgb8_to_opaque_rgba8;

/// NeuQuant sampling factor: 1 is best quality, 30 is fastest.
const GIF_QUANT_SPEED: i32 = 10;

/// Options for [`GifSink`].
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    /// Output GIF path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
}

impl GifSinkOpts {
    /// Create options for writing a GIF to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
        }
    }
}

/// Looping GIF writer. Every frame is shown for `1000 / fps` milliseconds.
///
/// Each frame is quantized and written to the output file as it arrives, so memory use does not
/// grow with the number of frames. `end` writes the trailer and flushes.
pub struct GifSink {
    opts: GifSinkOpts,
    cfg: Option<SinkConfig>,
    file: Option<SharedFile>,
    encoder: Option<GifEncoder<SharedFile>>,
    written: u64,
}

impl GifSink {
    /// Create a sink writing to `opts.out_path`.
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            cfg: None,
            file: None,
            encoder: None,
            written: 0,
        }
    }

    /// Frames encoded since `begin`.
    pub fn written(&self) -> u64 {
        self.written
    }
}

/// Output file shared between the sink and its encoder.
///
/// The encoder writes the GIF trailer when dropped and offers no way to hand its writer back, so
/// the sink keeps a second handle to flush and report errors after the encoder is gone.
#[derive(Clone)]
struct SharedFile(Arc<Mutex<BufWriter<File>>>);

impl SharedFile {
    fn lock(&self) -> io::Result<MutexGuard<'_, BufWriter<File>>> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("gif output lock poisoned"))
    }
}

impl Write for SharedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock()?.flush()
    }
}

/// Display time of one frame at `fps`.
pub(crate) fn frame_delay(fps: Fps) -> Delay {
    Delay::from_numer_denom_ms(1000 * fps.den, fps.num)
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> DecodeFxResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(DecodeFxError::validation(
                "gif sink width/height must be non-zero",
            ));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(DecodeFxError::validation(
                "gif sink width/height must fit in 16 bits",
            ));
        }
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(DecodeFxError::export(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        let file = File::create(&self.opts.out_path).map_err(|e| {
            DecodeFxError::export(format!(
                "create '{}': {e}",
                self.opts.out_path.display()
            ))
        })?;
        let file = SharedFile(Arc::new(Mutex::new(BufWriter::new(file))));

        let mut encoder = GifEncoder::new_with_speed(file.clone(), GIF_QUANT_SPEED);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| DecodeFxError::export(format!("gif repeat: {e}")))?;

        self.file = Some(file);
        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, frame: &FrameRGB) -> DecodeFxResult<()> {
        let (Some(cfg), Some(encoder), Some(file)) =
            (self.cfg.as_ref(), self.encoder.as_mut(), self.file.as_mut())
        else {
            return Err(DecodeFxError::export("gif sink not started"));
        };
        check_frame(cfg, frame)?;

        let mut rgba = vec![0u8; frame.data.len() / 3 * 4];
        rgb8_to_opaque_rgba8(&mut rgba, &frame.data);
        let rgba = image::RgbaImage::from_raw(frame.width, frame.height, rgba)
            .ok_or_else(|| DecodeFxError::validation("gif frame buffer size mismatch"))?;
        encoder
            .encode_frame(Frame::from_parts(rgba, 0, 0, frame_delay(cfg.fps)))
            .map_err(|e| DecodeFxError::export(format!("gif encode: {e}")))?;
        // Keep the buffer empty so the trailer written on drop never touches the file.
        file.flush()
            .map_err(|e| DecodeFxError::export(format!("gif write: {e}")))?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> DecodeFxResult<()> {
        if self.cfg.take().is_none() {
            return Err(DecodeFxError::export("gif sink not started"));
        }
        let encoder = self.encoder.take();
        let file = self.file.take();
        if self.written == 0 {
            return Err(DecodeFxError::validation("gif sink received no frames"));
        }

        drop(encoder);
        if let Some(mut file) = file {
            file.flush().map_err(|e| {
                DecodeFxError::export(format!(
                    "write '{}': {e}",
                    self.opts.out_path.display()
                ))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
