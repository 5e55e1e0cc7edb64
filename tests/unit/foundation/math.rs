use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn flatten_premul_alpha_0_returns_bg() {
    let mut dst = Vec::new();
    flatten_premul_rgba8_to_rgb8(&mut dst, &[0, 0, 0, 0], [10, 20, 30]);
    assert_eq!(dst, vec![10, 20, 30]);
}

#[test]
fn flatten_premul_alpha_255_drops_alpha() {
    let mut dst = Vec::new();
    flatten_premul_rgba8_to_rgb8(&mut dst, &[1, 2, 3, 255, 4, 5, 6, 255], [10, 20, 30]);
    assert_eq!(dst, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn flatten_premul_half_red_over_black() {
    // Premultiplied red @ 50% alpha => rgb is 128,0,0 over black.
    let mut dst = Vec::new();
    flatten_premul_rgba8_to_rgb8(&mut dst, &[128, 0, 0, 128], [0, 0, 0]);
    assert_eq!(dst, vec![128, 0, 0]);
}

#[test]
fn rgb_to_rgba_sets_opaque_alpha() {
    let mut dst = vec![0u8; 8];
    rgb8_to_opaque_rgba8(&mut dst, &[1, 2, 3, 4, 5, 6]);
    assert_eq!(dst, vec![1, 2, 3, 255, 4, 5, 6, 255]);
}
