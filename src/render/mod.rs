//! CPU frame rendering: layout, glow and glyph drawing.

pub(crate) mod cpu;
pub(crate) mod glow;
pub(crate) mod layout;
pub(crate) mod surface;
