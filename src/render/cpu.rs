use vello_cpu::kurbo::{Affine, Rect};
use vello_cpu::peniko::{Blob, Color, FontData};

use crate::animation::machine::Animation;
use crate::assets::font::FontFace;
use crate::config::{Settings, Style};
use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{DecodeFxError, DecodeFxResult};
use crate::foundation::math::mul_div255_u8;
use crate::metrics::{BLOCK_ADVANCE_EM, FontMetrics};
use crate::render::glow::{GlowLayer, glow_layers};
use crate::render::layout::TextBlockLayout;
use crate::render::surface::Surface;

/// Draws animation snapshots with `vello_cpu`.
///
/// Each eligible character is drawn on its own: the glow layers first, then the sharp glyph on
/// top. When the animation is recording, the finished surface is snapshotted into its capture
/// buffer.
pub struct FrameRenderer {
    canvas: Canvas,
    style: Style,
    metrics: FontMetrics,
    font: Option<FontData>,
    glow: Vec<GlowLayer>,
    ctx: vello_cpu::RenderContext,
    layout: Option<(String, TextBlockLayout)>,
}

impl std::fmt::Debug for FrameRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameRenderer")
            .field("canvas", &self.canvas)
            .field("metrics", &self.metrics)
            .field("glow_layers", &self.glow.len())
            .finish_non_exhaustive()
    }
}

impl FrameRenderer {
    /// Build a renderer for `settings.canvas` drawing with `face`.
    pub fn new(settings: &Settings, face: FontFace) -> DecodeFxResult<Self> {
        let (w, h) = settings.canvas.to_u16()?;
        let metrics = FontMetrics::new(face, settings.style.font_size);
        let font = match metrics.face() {
            FontFace::Outline(f) => Some(FontData::new(
                Blob::from(f.bytes.as_ref().clone()),
                f.index,
            )),
            FontFace::Blocks => None,
        };
        tracing::debug!(face = %metrics.face().describe(), width = w, height = h, "renderer ready");

        Ok(Self {
            canvas: settings.canvas,
            style: settings.style.clone(),
            metrics,
            font,
            glow: glow_layers(settings.style.glow_radius, settings.style.glow_intensity),
            ctx: vello_cpu::RenderContext::new(w, h),
            layout: None,
        })
    }

    /// Metrics provider used for layout.
    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// Background color.
    pub fn background(&self) -> Rgb8 {
        self.style.background
    }

    /// Layout of `anim`'s text on this renderer's canvas.
    pub fn layout_for(&mut self, anim: &Animation) -> TextBlockLayout {
        self.layout_cached(anim.chars())
    }

    fn layout_cached(&mut self, chars: &[char]) -> TextBlockLayout {
        let text: String = chars.iter().collect();
        if let Some((cached, layout)) = &self.layout {
            if *cached == text {
                return layout.clone();
            }
        }
        let layout = TextBlockLayout::compute(chars, self.canvas, &mut self.metrics);
        self.layout = Some((text, layout.clone()));
        layout
    }

    /// Draw the current state of `anim` onto `surface`, capturing it if recording.
    pub fn render(&mut self, surface: &mut Surface, anim: &mut Animation) -> DecodeFxResult<()> {
        if surface.canvas() != self.canvas {
            return Err(DecodeFxError::render(format!(
                "surface is {}x{}, renderer expects {}x{}",
                surface.canvas().width,
                surface.canvas().height,
                self.canvas.width,
                self.canvas.height
            )));
        }

        let layout = self.layout_cached(anim.chars());
        let size = self.style.font_size;
        let text_alpha = anim.opacity();
        let bg = self.style.background;

        self.ctx.reset();
        self.ctx.set_transform(Affine::IDENTITY);
        self.ctx.set_paint(Color::from_rgba8(bg.r, bg.g, bg.b, 255));
        self.ctx.fill_rect(&Rect::new(
            0.0,
            0.0,
            f64::from(self.canvas.width),
            f64::from(self.canvas.height),
        ));

        for (i, ch) in anim.drawn_glyphs() {
            let Some(origin) = layout.glyph_origin(i) else {
                continue;
            };
            let (x, y) = (origin.x as f32, origin.y as f32);

            for k in 0..self.glow.len() {
                let GlowLayer { offset, alpha } = self.glow[k];
                let alpha = mul_div255_u8(u16::from(alpha), u16::from(text_alpha));
                let rgba = self.style.glow.with_alpha(alpha);
                self.draw_glyph(ch, x - offset, y - offset, size + 2.0 * offset, rgba);
            }
            let rgba = self.style.text.with_alpha(text_alpha);
            self.draw_glyph(ch, x, y, size, rgba);
        }

        self.ctx.flush();
        self.ctx.render_to_pixmap(surface.pixmap_mut());

        if anim.is_recording() {
            anim.capture_frame(surface.snapshot_rgb(bg));
        }
        Ok(())
    }

    /// Draw one character with its layout box's top-left at `(x, top)`.
    fn draw_glyph(&mut self, ch: char, x: f32, top: f32, size_px: f32, rgba: [u8; 4]) {
        if ch.is_whitespace() {
            return;
        }
        let mut buf = [0u8; 4];
        let shaped = self.metrics.shape(ch.encode_utf8(&mut buf));
        let scale = size_px / shaped.font_size;

        self.ctx
            .set_paint(Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3]));
        match &self.font {
            Some(font) => {
                let glyphs = shaped.glyphs.iter().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: x + g.x * scale,
                    y: top + g.y * scale,
                });
                self.ctx
                    .glyph_run(font)
                    .font_size(size_px)
                    .fill_glyphs(glyphs);
            }
            None => {
                for g in &shaped.glyphs {
                    let left = x + g.x * scale;
                    let rect = Rect::new(
                        f64::from(left + 0.1 * BLOCK_ADVANCE_EM * size_px),
                        f64::from(top + 0.1 * size_px),
                        f64::from(left + 0.9 * BLOCK_ADVANCE_EM * size_px),
                        f64::from(top + g.y * scale),
                    );
                    self.ctx.fill_rect(&rect);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
