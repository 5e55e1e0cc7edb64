//! Export encoders.
//!
//! Sinks consume captured frames in order; the free functions in `export` wire a finished
//! recording to the right sink.

pub(crate) mod export;
pub(crate) mod ffmpeg;
pub(crate) mod gif;
pub(crate) mod png;
pub(crate) mod sink;
