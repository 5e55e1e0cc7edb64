//! Glyph metrics over the loaded display face.

use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::font::FontFace;
use crate::assets::text::{ShapedGlyph, ShapedText, TextLayoutEngine};

/// Advance of one block-face glyph, in ems.
pub(crate) const BLOCK_ADVANCE_EM: f32 = 0.6;
/// Baseline of the block face below the line top, in ems.
pub(crate) const BLOCK_BASELINE_EM: f32 = 0.8;

/// Pixel measurements of text in a fixed face and size.
pub trait GlyphMetrics {
    /// Advance width of `text`, including whitespace.
    fn width(&mut self, text: &str) -> f32;
    /// Line height of a single character.
    fn glyph_height(&mut self, ch: char) -> f32;
}

/// [`GlyphMetrics`] backed by a [`FontFace`].
///
/// An outline face is shaped with parley. If the face cannot be registered the provider degrades
/// to the block face instead of failing. Shaped strings are cached by content.
pub struct FontMetrics {
    face: FontFace,
    size_px: f32,
    engine: Option<TextLayoutEngine>,
    cache: HashMap<String, Arc<ShapedText>>,
}

impl std::fmt::Debug for FontMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontMetrics")
            .field("face", &self.face.describe())
            .field("size_px", &self.size_px)
            .field("cached", &self.cache.len())
            .finish()
    }
}

impl FontMetrics {
    /// Build metrics for `face` at `size_px`.
    pub fn new(face: FontFace, size_px: f32) -> Self {
        let (face, engine) = match face {
            FontFace::Outline(font) => match TextLayoutEngine::new(font.bytes.as_slice()) {
                Ok(engine) => {
                    tracing::debug!(family = engine.family_name(), size_px, "shaping engine ready");
                    (FontFace::Outline(font), Some(engine))
                }
                Err(e) => {
                    tracing::warn!(
                        font = %FontFace::Outline(font).describe(),
                        error = %e,
                        "font could not be registered, using built-in block face"
                    );
                    (FontFace::Blocks, None)
                }
            },
            FontFace::Blocks => (FontFace::Blocks, None),
        };
        Self {
            face,
            size_px,
            engine,
            cache: HashMap::new(),
        }
    }

    /// The face actually in use.
    pub fn face(&self) -> &FontFace {
        &self.face
    }

    /// Font size in pixels.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Shape `text` at the provider's size.
    pub(crate) fn shape(&mut self, text: &str) -> Arc<ShapedText> {
        if let Some(shaped) = self.cache.get(text) {
            return shaped.clone();
        }

        let shaped = match self.engine.as_mut() {
            Some(engine) => match engine.shape(text, self.size_px) {
                Ok(s) => s,
                Err(e) => {
                    tracing::warn!(error = %e, text, "shaping failed, measuring as blocks");
                    shape_blocks(text, self.size_px)
                }
            },
            None => shape_blocks(text, self.size_px),
        };
        let shaped = Arc::new(shaped);
        self.cache.insert(text.to_owned(), shaped.clone());
        shaped
    }
}

impl GlyphMetrics for FontMetrics {
    fn width(&mut self, text: &str) -> f32 {
        self.shape(text).width
    }

    fn glyph_height(&mut self, ch: char) -> f32 {
        let mut buf = [0u8; 4];
        self.shape(ch.encode_utf8(&mut buf)).height
    }
}

/// Monospaced pseudo-shaping: one glyph per non-whitespace character.
fn shape_blocks(text: &str, size_px: f32) -> ShapedText {
    let advance = BLOCK_ADVANCE_EM * size_px;
    let mut glyphs = Vec::new();
    let mut width = 0.0;
    for ch in text.chars() {
        if !ch.is_whitespace() {
            glyphs.push(ShapedGlyph {
                id: u32::from(ch),
                x: width,
                y: BLOCK_BASELINE_EM * size_px,
            });
        }
        width += advance;
    }
    ShapedText {
        font_size: size_px,
        width,
        height: size_px,
        glyphs,
    }
}

#[cfg(test)]
#[path = "../tests/unit/metrics/font_metrics.rs"]
mod tests;
