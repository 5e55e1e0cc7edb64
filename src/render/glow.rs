/// One oversized copy of a glyph drawn behind it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowLayer {
    /// Pixels added on every side; the copy is drawn at `font_size + 2 * offset`.
    pub offset: f32,
    /// Layer opacity, 0..=255.
    pub alpha: u8,
}

const GLOW_ALPHA_MIN: i64 = 5;
const GLOW_ALPHA_MAX: i64 = 60;

/// Glow layers in draw order: outermost radius first.
pub fn glow_layers(radius: u32, intensity: u32) -> Vec<GlowLayer> {
    let mut out = Vec::with_capacity((radius as usize) * (intensity as usize));
    for r in (1..=radius).rev() {
        for j in 0..intensity {
            out.push(GlowLayer {
                offset: r as f32 + 0.5 * j as f32,
                alpha: glow_alpha(r, j),
            });
        }
    }
    out
}

fn glow_alpha(r: u32, j: u32) -> u8 {
    (40 - 10 * i64::from(r) - 5 * i64::from(j)).clamp(GLOW_ALPHA_MIN, GLOW_ALPHA_MAX) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/glow.rs"]
mod tests;
