use crate::foundation::core::{Canvas, Point};
use crate::metrics::GlyphMetrics;

/// Fixed per-character positions of a centered single-line text block.
///
/// Horizontal positions are prefix widths of the source text, so they never depend on which
/// substitute glyphs are on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlockLayout {
    left: f32,
    center_y: f32,
    width: f32,
    offsets: Vec<f32>,
    tops: Vec<f32>,
}

impl TextBlockLayout {
    /// Lay out `chars` centered on `canvas`.
    pub fn compute(chars: &[char], canvas: Canvas, metrics: &mut dyn GlyphMetrics) -> Self {
        let text: String = chars.iter().collect();
        let width = metrics.width(&text);
        let center = canvas.center();
        let left = center.x as f32 - width / 2.0;
        let center_y = center.y as f32;

        let mut offsets = Vec::with_capacity(chars.len());
        let mut tops = Vec::with_capacity(chars.len());
        let mut prefix = String::with_capacity(text.len());
        for &ch in chars {
            offsets.push(metrics.width(&prefix));
            tops.push(center_y - metrics.glyph_height(ch) / 2.0);
            prefix.push(ch);
        }

        Self {
            left,
            center_y,
            width,
            offsets,
            tops,
        }
    }

    /// Number of laid-out characters.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// `true` when no characters are laid out.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Total block width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Left edge of the block.
    pub fn left(&self) -> f32 {
        self.left
    }

    /// Vertical center line.
    pub fn center_y(&self) -> f32 {
        self.center_y
    }

    /// Top-left corner of character `i`.
    pub fn glyph_origin(&self, i: usize) -> Option<Point> {
        let dx = *self.offsets.get(i)?;
        let top = *self.tops.get(i)?;
        Some(Point::new(f64::from(self.left + dx), f64::from(top)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
