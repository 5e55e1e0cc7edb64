use std::borrow::Cow;

use crate::foundation::error::{DecodeFxError, DecodeFxResult};

/// One glyph positioned relative to the top-left of its layout box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ShapedGlyph {
    pub(crate) id: u32,
    pub(crate) x: f32,
    pub(crate) y: f32,
}

/// A shaped single-line string.
#[derive(Clone, Debug, Default)]
pub(crate) struct ShapedText {
    /// Font size the glyphs were shaped at.
    pub(crate) font_size: f32,
    /// Advance width including trailing whitespace.
    pub(crate) width: f32,
    /// Line height.
    pub(crate) height: f32,
    pub(crate) glyphs: Vec<ShapedGlyph>,
}

/// Parley-based shaper bound to one registered font family.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family: String,
}

impl TextLayoutEngine {
    /// Register `font_bytes` and bind the engine to its first family.
    pub(crate) fn new(font_bytes: &[u8]) -> DecodeFxResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            DecodeFxError::validation("no font families registered from font bytes")
        })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| DecodeFxError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
        })
    }

    pub(crate) fn family_name(&self) -> &str {
        &self.family
    }

    /// Shape `text` as a single unwrapped line.
    pub(crate) fn shape(&mut self, text: &str, size_px: f32) -> DecodeFxResult<ShapedText> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(DecodeFxError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let mut glyphs = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                glyphs.extend(run.positioned_glyphs().map(|g| ShapedGlyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                }));
            }
        }

        Ok(ShapedText {
            font_size: size_px,
            width: layout.full_width(),
            height: layout.height(),
            glyphs,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
