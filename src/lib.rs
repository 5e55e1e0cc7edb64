//! decodefx renders a "decoding" text reveal.
//!
//! A typed string fades in, each character scrambles through random glyphs until it locks onto
//! its true value, the text holds, then characters vanish one at a time. Frames are drawn on the
//! CPU with a layered glow and can be recorded and exported as a looping GIF or an MP4.
//!
//! - [`Animation`] is the per-text state machine, advanced once per tick
//! - [`FrameRenderer`] draws a snapshot onto a [`Surface`] and feeds the capture buffer
//! - [`export`] hands a finished [`Recording`] to the GIF or `ffmpeg` encoder
//! - [`Shell`] wires text entry, keybindings, audio and export together
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

pub(crate) mod animation;
pub(crate) mod audio;
pub(crate) mod capture;
pub(crate) mod config;
pub(crate) mod encode;
pub(crate) mod metrics;
pub(crate) mod render;
pub(crate) mod shell;

pub use crate::foundation::clock::{Clock, ManualClock, SystemClock};
pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Rect, Rgb8};
pub use crate::foundation::error::{DecodeFxError, DecodeFxResult};

pub use crate::assets::font::{FontFace, FontOrigin, OutlineFont, load_font, system_sans_serif};
pub use crate::assets::media::{AudioPcm, decode_audio_f32_stereo};
pub use crate::config::{
    AudioSettings, DEFAULT_GLYPH_POOL, ExportSettings, Settings, Style, Timing,
};
pub use crate::metrics::{FontMetrics, GlyphMetrics};

pub use crate::animation::machine::{Animation, tick_budget};
pub use crate::animation::phase::{Phase, PhaseChange, Slot};
pub use crate::capture::buffer::{CaptureBuffer, ExportKind, FrameRGB, Recording};

pub use crate::render::cpu::FrameRenderer;
pub use crate::render::glow::{GlowLayer, glow_layers};
pub use crate::render::layout::TextBlockLayout;
pub use crate::render::surface::Surface;

pub use crate::encode::export::{
    encode_image_sequence, encode_png_frames, encode_video, export, output_path, write_frames,
};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, ensure_parent_dir, is_ffmpeg_on_path};
pub use crate::encode::gif::{GifSink, GifSinkOpts};
pub use crate::encode::png::PngSequenceSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};

#[cfg(feature = "audio")]
pub use crate::audio::cpal_out::CpalCue;
pub use crate::audio::cue::{AudioCue, SilentCue, load_cue};

pub use crate::shell::headless::{record_run, render_frame_at, run_to_completion};
pub use crate::shell::state::{Shell, ShellAction, ShellKey, ShellMode, Status};
pub use crate::shell::terminal::{map_key, run as run_terminal};
