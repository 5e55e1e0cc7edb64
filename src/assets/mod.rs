//! External resources: fonts and the audio cue.
//!
//! IO happens here, once, at startup. Renderers and the animation never touch the filesystem.

pub(crate) mod font;
pub(crate) mod media;
pub(crate) mod text;
