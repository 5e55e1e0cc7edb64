use std::path::{Path, PathBuf};

use crate::capture::buffer::{ExportKind, FrameRGB, Recording};
use crate::config::ExportSettings;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::gif::{GifSink, GifSinkOpts};
use crate::encode::png::PngSequenceSink;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{DecodeFxError, DecodeFxResult};

/// Push `frames` through `sink` at `fps`.
///
/// All frames must share the size of the first one. An empty sequence is a validation error.
pub fn write_frames(sink: &mut dyn FrameSink, frames: &[FrameRGB], fps: Fps) -> DecodeFxResult<()> {
    let first = frames
        .first()
        .ok_or_else(|| DecodeFxError::validation("no frames captured, nothing to export"))?;
    sink.begin(SinkConfig {
        width: first.width,
        height: first.height,
        fps,
    })?;
    for (i, frame) in frames.iter().enumerate() {
        sink.push_frame(FrameIndex(i as u64), frame)?;
    }
    sink.end()
}

/// Encode `frames` as a looping GIF at `path`.
#[tracing::instrument(skip(frames), fields(frames = frames.len()))]
pub fn encode_image_sequence(frames: &[FrameRGB], path: &Path, fps: Fps) -> DecodeFxResult<()> {
    let mut sink = GifSink::new(GifSinkOpts::new(path));
    write_frames(&mut sink, frames, fps)?;
    tracing::info!(path = %path.display(), "image sequence written");
    Ok(())
}

/// Encode `frames` as an H.264 MP4 at `path` through the system `ffmpeg`.
#[tracing::instrument(skip(frames), fields(frames = frames.len()))]
pub fn encode_video(frames: &[FrameRGB], path: &Path, fps: Fps) -> DecodeFxResult<()> {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(path));
    write_frames(&mut sink, frames, fps)?;
    tracing::info!(path = %path.display(), "video written");
    Ok(())
}

/// Write `frames` as numbered PNG files into `dir`. Returns the number of files written.
#[tracing::instrument(skip(frames), fields(frames = frames.len()))]
pub fn encode_png_frames(frames: &[FrameRGB], dir: &Path, fps: Fps) -> DecodeFxResult<usize> {
    let mut sink = PngSequenceSink::new(dir);
    write_frames(&mut sink, frames, fps)?;
    tracing::info!(dir = %dir.display(), files = sink.written(), "png frames written");
    Ok(sink.written())
}

/// Export a finished recording to the path configured for its kind.
///
/// Returns the written path.
#[tracing::instrument(skip(recording, settings), fields(kind = ?recording.kind, frames = recording.frames.len()))]
pub fn export(recording: &Recording, settings: &ExportSettings) -> DecodeFxResult<PathBuf> {
    let fps = Fps::whole(settings.fps)?;
    let path = output_path(recording.kind, settings).to_path_buf();
    let mut sink: Box<dyn FrameSink> = match recording.kind {
        ExportKind::ImageSequence => Box::new(GifSink::new(GifSinkOpts {
            out_path: path.clone(),
            overwrite: settings.overwrite,
        })),
        ExportKind::Video => Box::new(FfmpegSink::new(FfmpegSinkOpts {
            out_path: path.clone(),
            overwrite: settings.overwrite,
        })),
    };
    write_frames(sink.as_mut(), &recording.frames, fps)?;
    tracing::info!(path = %path.display(), "export finished");
    Ok(path)
}

/// Configured output path for `kind`.
pub fn output_path(kind: ExportKind, settings: &ExportSettings) -> &Path {
    match kind {
        ExportKind::ImageSequence => &settings.gif_path,
        ExportKind::Video => &settings.video_path,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/export.rs"]
mod tests;
