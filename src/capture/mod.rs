//! Frame capture while recording.

pub(crate) mod buffer;
