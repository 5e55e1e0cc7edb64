use super::*;
use crate::foundation::clock::ManualClock;

fn anim(text: &str, seed: u64) -> (Animation, ManualClock) {
    let clock = ManualClock::new();
    let a = Animation::with_seed(text, &Settings::default(), seed).with_clock(clock.clone());
    (a, clock)
}

fn advance_until(a: &mut Animation, phase: Phase, clock: &ManualClock, limit: u64) -> u64 {
    let mut n = 0;
    while a.phase() != phase {
        assert!(n < limit, "phase {phase} not reached within {limit} ticks");
        clock.advance(Duration::from_millis(17));
        a.advance();
        n += 1;
    }
    n
}

#[test]
fn fade_in_lasts_ceil_255_over_fade_speed() {
    let (mut a, _clock) = anim("AB", 1);
    for i in 1..64 {
        assert_eq!(a.advance(), None);
        assert_eq!(a.phase(), Phase::FadingIn);
        assert_eq!(a.opacity(), (i * 4) as u8);
        assert!(a.drawn_glyphs().is_empty());
    }
    assert_eq!(
        a.advance(),
        Some(PhaseChange {
            from: Phase::FadingIn,
            to: Phase::Typing
        })
    );
    assert_eq!(a.opacity(), 255);
    assert_eq!(a.tick(), 64);
}

#[test]
fn typing_entry_initializes_slots() {
    let (mut a, clock) = anim("AB", 2);
    advance_until(&mut a, Phase::Typing, &clock, 100);
    assert_eq!(a.reveal_index(), 0);
    assert_eq!(a.slots().len(), 2);
    for slot in a.slots() {
        assert!(!slot.is_locked);
        assert_eq!(slot.cycle_progress, 0);
        assert!([5, 10, 15, 20, 25].contains(&slot.cycle_target));
        assert!(DEFAULT_GLYPH_POOL.contains(slot.display_glyph));
    }
}

#[test]
fn scenario_ab_runs_through_every_phase() {
    let (mut a, clock) = anim("AB", 3);
    advance_until(&mut a, Phase::Holding, &clock, 200);
    assert_eq!(a.reveal_index(), 2);
    assert!(a.slots().iter().all(|s| s.is_locked));
    assert_eq!(a.drawn_glyphs(), vec![(0, 'A'), (1, 'B')]);

    advance_until(&mut a, Phase::Disappearing, &clock, 200);
    assert_eq!(a.visible(), &[true, true]);

    for _ in 0..3 {
        a.advance();
        assert_eq!(a.visible().iter().filter(|v| **v).count(), 2);
    }
    a.advance();
    assert_eq!(a.visible().iter().filter(|v| **v).count(), 1);
    for _ in 0..3 {
        a.advance();
        assert_eq!(a.visible().iter().filter(|v| **v).count(), 1);
    }
    a.advance();
    assert_eq!(a.visible(), &[false, false]);
    assert_eq!(a.phase(), Phase::Disappearing);

    assert_eq!(
        a.advance(),
        Some(PhaseChange {
            from: Phase::Disappearing,
            to: Phase::Done
        })
    );
    assert!(a.is_done());
    assert_eq!(a.advance(), None);
}

#[test]
fn empty_text_falls_through_to_holding() {
    let (mut a, clock) = anim("", 4);
    advance_until(&mut a, Phase::Typing, &clock, 100);
    assert!(a.slots().is_empty());
    let change = a.advance();
    assert_eq!(
        change,
        Some(PhaseChange {
            from: Phase::Typing,
            to: Phase::Holding
        })
    );
    advance_until(&mut a, Phase::Done, &clock, 500);
}

#[test]
fn every_text_reaches_done_within_budget() {
    let timing = Timing::default();
    for (seed, text) in ["", "A", "AB", "HELLO WORLD", "decode me, 123!"]
        .into_iter()
        .enumerate()
    {
        let clock = ManualClock::new();
        let mut a = Animation::with_seed(text, &Settings::default(), seed as u64)
            .with_clock(clock.clone());
        let budget = tick_budget(text.chars().count(), &timing);
        let mut ticks = 0;
        while !a.is_done() {
            assert!(ticks < budget, "{text:?} exceeded {budget} ticks");
            a.advance();
            clock.advance(Duration::from_secs(1) / 60);
            ticks += 1;
        }
    }
}

#[test]
fn reveal_and_lock_are_monotonic() {
    let (mut a, clock) = anim("MONOTONIC", 5);
    advance_until(&mut a, Phase::Typing, &clock, 100);
    let mut last_reveal = a.reveal_index();
    let mut last_locked: Vec<bool> = a.slots().iter().map(|s| s.is_locked).collect();
    while a.phase() == Phase::Typing {
        a.advance();
        assert!(a.reveal_index() >= last_reveal);
        assert!(a.reveal_index() <= a.len());
        for (was, slot) in last_locked.iter().zip(a.slots()) {
            assert!(!*was || slot.is_locked);
            if slot.is_locked {
                assert_eq!(slot.cycle_progress, slot.cycle_target);
            }
        }
        last_reveal = a.reveal_index();
        last_locked = a.slots().iter().map(|s| s.is_locked).collect();
    }
    assert_eq!(a.phase(), Phase::Holding);
}

#[test]
fn reveal_index_advances_every_interval() {
    let (mut a, clock) = anim("ABCDEFGHIJ", 6);
    advance_until(&mut a, Phase::Typing, &clock, 100);
    for _ in 0..5 {
        a.advance();
    }
    assert_eq!(a.reveal_index(), 0);
    a.advance();
    assert_eq!(a.reveal_index(), 1);
    for _ in 0..6 {
        a.advance();
    }
    assert_eq!(a.reveal_index(), 2);
}

#[test]
fn drawn_glyphs_follow_reveal_index_and_locks() {
    let (mut a, clock) = anim("XYZ", 7);
    advance_until(&mut a, Phase::Typing, &clock, 100);
    while a.phase() == Phase::Typing {
        let drawn = a.drawn_glyphs();
        assert_eq!(drawn.len(), (a.reveal_index() + 1).min(3));
        for (i, ch) in drawn {
            let slot = a.slots()[i];
            if slot.is_locked {
                assert_eq!(ch, a.chars()[i]);
            } else {
                assert_eq!(ch, slot.display_glyph);
            }
        }
        a.advance();
    }
}

#[test]
fn hold_waits_for_the_clock() {
    let (mut a, clock) = anim("HI", 8);
    advance_until(&mut a, Phase::Holding, &clock, 200);
    for _ in 0..1000 {
        a.advance();
    }
    assert_eq!(a.phase(), Phase::Holding);

    clock.advance(Duration::from_millis(1999));
    a.advance();
    assert_eq!(a.phase(), Phase::Holding);

    clock.advance(Duration::from_millis(1));
    a.advance();
    assert_eq!(a.phase(), Phase::Disappearing);
}

#[test]
fn seeded_runs_are_identical() {
    fn trace(seed: u64) -> (Vec<u32>, Vec<usize>) {
        let (mut a, clock) = anim("SEEDED RUN", seed);
        advance_until(&mut a, Phase::Typing, &clock, 100);
        let targets = a.slots().iter().map(|s| s.cycle_target).collect();
        advance_until(&mut a, Phase::Disappearing, &clock, 2000);
        let mut order = Vec::new();
        let mut prev = a.visible().to_vec();
        while !a.is_done() {
            a.advance();
            for (i, (was, now)) in prev.iter().zip(a.visible()).enumerate() {
                if *was && !*now {
                    order.push(i);
                }
            }
            prev = a.visible().to_vec();
        }
        (targets, order)
    }

    let (t1, o1) = trace(42);
    let (t2, o2) = trace(42);
    assert_eq!(t1, t2);
    assert_eq!(o1, o2);
    assert_eq!(o1.len(), 10);
    let mut sorted = o1.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..10).collect::<Vec<_>>());
}

#[test]
fn reset_restores_the_initial_state() {
    let (mut a, clock) = anim("RESET", 9);
    let fresh = Animation::with_seed("RESET", &Settings::default(), 9);
    a.start_recording(ExportKind::Video);
    advance_until(&mut a, Phase::Disappearing, &clock, 2000);
    a.capture_frame(FrameRGB::new(1, 1, vec![0, 0, 0]).unwrap());

    a.reset();
    assert_eq!(a.phase(), fresh.phase());
    assert_eq!(a.opacity(), fresh.opacity());
    assert_eq!(a.reveal_index(), fresh.reveal_index());
    assert_eq!(a.slots(), fresh.slots());
    assert_eq!(a.visible(), fresh.visible());
    assert_eq!(a.tick(), 0);
    assert_eq!(a.text(), "RESET");
    assert!(!a.is_recording());
    assert!(a.stop_recording().is_none());

    advance_until(&mut a, Phase::Done, &clock, 2000);
}

#[test]
fn recording_collects_exactly_the_pushed_frames() {
    let (mut a, _clock) = anim("REC", 10);
    a.capture_frame(FrameRGB::new(1, 1, vec![1, 1, 1]).unwrap());
    assert!(!a.is_recording());

    a.start_recording(ExportKind::ImageSequence);
    for v in 0..4 {
        a.advance();
        a.capture_frame(FrameRGB::new(1, 1, vec![v; 3]).unwrap());
    }
    assert_eq!(a.captured_frames(), 4);

    let rec = a.stop_recording().unwrap();
    assert_eq!(rec.kind, ExportKind::ImageSequence);
    assert_eq!(rec.frames.len(), 4);
    assert_eq!(rec.frames[2].data, vec![2, 2, 2]);
    assert_eq!(a.captured_frames(), 0);
    assert!(!a.is_recording());
}

#[test]
fn custom_timing_is_honored() {
    let mut settings = Settings::default();
    settings.timing.fade_speed = 255;
    settings.timing.disappear_speed = 1;
    settings.timing.hold_ms = 0;
    let mut a = Animation::with_seed("Q", &settings, 11).with_clock(ManualClock::new());
    assert_eq!(a.advance().map(|c| c.to), Some(Phase::Typing));
    while a.phase() == Phase::Typing {
        a.advance();
    }
    assert_eq!(a.advance().map(|c| c.to), Some(Phase::Disappearing));
    a.advance();
    assert_eq!(a.visible(), &[false]);
    assert_eq!(a.advance().map(|c| c.to), Some(Phase::Done));
}

#[test]
fn zero_rates_in_unvalidated_settings_still_terminate() {
    let mut settings = Settings::default();
    settings.timing.fade_speed = 0;
    settings.timing.disappear_speed = 0;
    settings.timing.hold_ms = 0;
    let clock = ManualClock::new();
    let mut a = Animation::with_seed("ZERO", &settings, 2).with_clock(clock.clone());
    assert_eq!(a.timing().fade_speed, 1);
    let budget = tick_budget(4, a.timing());
    advance_until(&mut a, Phase::Done, &clock, budget);
}

#[test]
fn huge_cycle_bounds_saturate_instead_of_overflowing() {
    let mut settings = Settings::default();
    settings.timing.char_cycle_speed = u32::MAX / 2;
    settings.timing.cycle_multiplier_max = 5;
    let mut a = Animation::with_seed("X", &settings, 1);
    for _ in 0..64 {
        a.advance();
    }
    assert_eq!(a.phase(), Phase::Typing);
    assert!(a.slots()[0].cycle_target >= u32::MAX / 2);
    assert_eq!(a.timing().cycle_target_bounds().1, u32::MAX);

    let t = Timing {
        hold_ms: u64::MAX,
        ..Timing::default()
    };
    assert_eq!(tick_budget(usize::MAX, &t), u64::MAX);
}
