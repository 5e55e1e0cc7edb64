pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Flatten premultiplied RGBA8 over an opaque background into tightly packed RGB8.
pub(crate) fn flatten_premul_rgba8_to_rgb8(dst: &mut Vec<u8>, src_premul: &[u8], bg: [u8; 3]) {
    dst.clear();
    dst.reserve(src_premul.len() / 4 * 3);
    for s in src_premul.chunks_exact(4) {
        let a = u16::from(s[3]);
        if a == 255 {
            dst.extend_from_slice(&s[..3]);
            continue;
        }
        let inv = 255u16 - a;
        for c in 0..3 {
            let v = u16::from(s[c]) + mul_div255_u16(u16::from(bg[c]), inv);
            dst.push(v.min(255) as u8);
        }
    }
}

/// Expand RGB8 into opaque RGBA8.
pub(crate) fn rgb8_to_opaque_rgba8(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(3)) {
        d[..3].copy_from_slice(s);
        d[3] = 255;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
