use super::*;
use crate::animation::phase::Phase;
use crate::capture::buffer::ExportKind;
use crate::foundation::clock::ManualClock;

fn setup(text: &str) -> (FrameRenderer, Surface, Animation, ManualClock) {
    let settings = Settings::default();
    let renderer = FrameRenderer::new(&settings, FontFace::Blocks).unwrap();
    let surface = Surface::new(settings.canvas).unwrap();
    let clock = ManualClock::new();
    let anim = Animation::with_seed(text, &settings, 99).with_clock(clock.clone());
    (renderer, surface, anim, clock)
}

fn run_to(anim: &mut Animation, clock: &ManualClock, phase: Phase) {
    while anim.phase() != phase {
        clock.advance(std::time::Duration::from_millis(17));
        anim.advance();
    }
}

fn rgb_at(frame: &crate::capture::buffer::FrameRGB, x: u32, y: u32) -> [u8; 3] {
    frame.pixel(x, y).unwrap()
}

#[test]
fn fading_in_draws_only_the_background() {
    let (mut r, mut s, mut a, _clock) = setup("GLOW");
    a.advance();
    r.render(&mut s, &mut a).unwrap();
    let frame = s.snapshot_rgb(r.background());
    assert_eq!(frame.data.len(), 800 * 450 * 3);
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn holding_lights_every_non_space_glyph() {
    let (mut r, mut s, mut a, clock) = setup("A B");
    run_to(&mut a, &clock, Phase::Holding);
    r.render(&mut s, &mut a).unwrap();
    let frame = s.snapshot_rgb(r.background());

    let layout = r.layout_for(&a);
    assert_eq!(layout.width(), 72.0);
    for (i, lit) in [(0, true), (1, false), (2, true)] {
        let o = layout.glyph_origin(i).unwrap();
        let px = rgb_at(&frame, o.x as u32 + 12, o.y as u32 + 18);
        if lit {
            assert!(px.iter().all(|&c| c >= 240), "slot {i} not lit: {px:?}");
        } else {
            assert_eq!(px, [0, 0, 0], "space slot {i} drawn");
        }
    }
}

#[test]
fn glow_surrounds_the_sharp_glyph() {
    let (mut r, mut s, mut a, clock) = setup("X");
    run_to(&mut a, &clock, Phase::Holding);
    r.render(&mut s, &mut a).unwrap();
    let frame = s.snapshot_rgb(r.background());

    let o = r.layout_for(&a).glyph_origin(0).unwrap();
    // Just left of the sharp block, inside the innermost glow copy.
    let px = rgb_at(&frame, o.x as u32 + 1, o.y as u32 + 18);
    assert!(px[1] > px[0] && px[1] > 0, "expected green glow, got {px:?}");
}

#[test]
fn disappearing_skips_hidden_slots() {
    let (mut r, mut s, mut a, clock) = setup("AB");
    run_to(&mut a, &clock, Phase::Disappearing);
    for _ in 0..4 {
        a.advance();
    }
    let hidden = a.visible().iter().position(|v| !*v).unwrap();
    let shown = 1 - hidden;
    r.render(&mut s, &mut a).unwrap();
    let frame = s.snapshot_rgb(r.background());
    let layout = r.layout_for(&a);

    let oh = layout.glyph_origin(hidden).unwrap();
    let os = layout.glyph_origin(shown).unwrap();
    assert!(rgb_at(&frame, os.x as u32 + 12, os.y as u32 + 18)[0] >= 240);
    assert!(rgb_at(&frame, oh.x as u32 + 12, oh.y as u32 + 18)[0] < 240);
}

#[test]
fn recording_snapshots_are_deep_copies() {
    let (mut r, mut s, mut a, clock) = setup("HI");
    a.start_recording(ExportKind::ImageSequence);
    r.render(&mut s, &mut a).unwrap();
    run_to(&mut a, &clock, Phase::Holding);
    r.render(&mut s, &mut a).unwrap();

    let rec = a.stop_recording().unwrap();
    assert_eq!(rec.frames.len(), 2);
    assert!(rec.frames[0].data.iter().all(|&b| b == 0));
    assert!(rec.frames[1].data.iter().any(|&b| b != 0));
}

#[test]
fn mismatched_surface_is_rejected() {
    let (mut r, _s, mut a, _clock) = setup("X");
    let mut small = Surface::new(Canvas {
        width: 10,
        height: 10,
    })
    .unwrap();
    assert!(r.render(&mut small, &mut a).is_err());
}
