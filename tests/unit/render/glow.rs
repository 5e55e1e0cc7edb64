use super::*;

#[test]
fn default_glow_has_ten_layers_outermost_first() {
    let layers = glow_layers(5, 2);
    assert_eq!(layers.len(), 10);
    assert_eq!(layers[0], GlowLayer { offset: 5.0, alpha: 5 });
    assert_eq!(layers[8], GlowLayer { offset: 1.0, alpha: 30 });
    assert_eq!(layers[9], GlowLayer { offset: 1.5, alpha: 25 });
}

#[test]
fn alpha_is_bounded_and_non_increasing_with_radius() {
    for r in 1..=12 {
        for j in 0..4 {
            let a = glow_alpha(r, j);
            assert!((5..=60).contains(&a));
            assert!(glow_alpha(r + 1, j) <= a);
        }
    }
}

#[test]
fn zero_radius_or_intensity_draws_no_glow() {
    assert!(glow_layers(0, 2).is_empty());
    assert!(glow_layers(5, 0).is_empty());
}
