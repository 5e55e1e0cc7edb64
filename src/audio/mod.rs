//! Audio cue controller.

#[cfg(feature = "audio")]
pub(crate) mod cpal_out;
pub(crate) mod cue;
