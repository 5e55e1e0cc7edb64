use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::animation::phase::{Phase, PhaseChange, Slot};
use crate::capture::buffer::{CaptureBuffer, ExportKind, FrameRGB, Recording};
use crate::config::{DEFAULT_GLYPH_POOL, Settings, Timing};
use crate::foundation::clock::{Clock, SystemClock};

/// One text reveal: fade in, decode character by character, hold, then dissolve.
///
/// The machine is driven by [`Animation::advance`], one call per tick. All phases except
/// `Holding` count ticks; `Holding` measures elapsed time on the injected [`Clock`]. Randomness
/// (substitute glyphs, cycle targets, disappearance order) comes from a single seedable
/// generator, so a seeded animation replays identically.
pub struct Animation {
    text: Vec<char>,
    timing: Timing,
    pool: Vec<char>,
    rng: StdRng,
    clock: Box<dyn Clock>,

    phase: Phase,
    opacity: u8,
    reveal_index: usize,
    slots: Vec<Slot>,
    visible: Vec<bool>,
    typing_timer: u32,
    disappear_timer: u32,
    hold_started: Option<Duration>,
    tick: u64,

    capture: CaptureBuffer,
}

impl std::fmt::Debug for Animation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animation")
            .field("text", &self.text())
            .field("phase", &self.phase)
            .field("opacity", &self.opacity)
            .field("reveal_index", &self.reveal_index)
            .field("tick", &self.tick)
            .field("recording", &self.capture.kind())
            .finish_non_exhaustive()
    }
}

impl Animation {
    /// Create an animation over `text` seeded from OS entropy, timed by the system clock.
    ///
    /// `settings` should have passed [`Settings::validate`]. Zero rates in unvalidated settings
    /// are raised to 1 so the run still terminates.
    pub fn new(text: &str, settings: &Settings) -> Self {
        Self::from_rng(text, settings, StdRng::from_entropy())
    }

    /// Create an animation with a fixed random seed.
    pub fn with_seed(text: &str, settings: &Settings, seed: u64) -> Self {
        Self::from_rng(text, settings, StdRng::seed_from_u64(seed))
    }

    fn from_rng(text: &str, settings: &Settings, rng: StdRng) -> Self {
        let mut pool = settings.glyph_pool();
        if pool.is_empty() {
            pool = DEFAULT_GLYPH_POOL.chars().collect();
        }
        Self {
            text: text.chars().collect(),
            timing: settings.timing.normalized(),
            pool,
            rng,
            clock: Box::new(SystemClock::new()),
            phase: Phase::FadingIn,
            opacity: 0,
            reveal_index: 0,
            slots: Vec::new(),
            visible: Vec::new(),
            typing_timer: 0,
            disappear_timer: 0,
            hold_started: None,
            tick: 0,
            capture: CaptureBuffer::new(),
        }
    }

    /// Replace the clock that times the hold phase.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Source text.
    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    /// Source characters.
    pub fn chars(&self) -> &[char] {
        &self.text
    }

    /// Number of character slots.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// `true` for the empty text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current opacity, 0..=255.
    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    /// Count of slots that have begun revealing.
    pub fn reveal_index(&self) -> usize {
        self.reveal_index
    }

    /// Per-character state. Empty until `Typing` is entered.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Visibility flags. Empty until `Disappearing` is entered.
    pub fn visible(&self) -> &[bool] {
        &self.visible
    }

    /// Ticks advanced since creation or the last reset.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Timing parameters this animation runs with.
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// `true` once the terminal phase is reached.
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Slots eligible for drawing this tick, with the glyph to draw.
    ///
    /// `Typing` and `Holding` draw every slot up to and including `reveal_index`, using the
    /// substitute glyph while unlocked. `Disappearing` draws visible slots with their source
    /// character. Nothing is drawn while fading in or once done.
    pub fn drawn_glyphs(&self) -> Vec<(usize, char)> {
        match self.phase {
            Phase::FadingIn | Phase::Done => Vec::new(),
            Phase::Typing | Phase::Holding => self
                .slots
                .iter()
                .enumerate()
                .take_while(|(i, _)| *i <= self.reveal_index)
                .map(|(i, slot)| {
                    let glyph = if slot.is_locked {
                        self.text[i]
                    } else {
                        slot.display_glyph
                    };
                    (i, glyph)
                })
                .collect(),
            Phase::Disappearing => self
                .visible
                .iter()
                .enumerate()
                .filter(|(_, v)| **v)
                .map(|(i, _)| (i, self.text[i]))
                .collect(),
        }
    }

    /// Advance one tick. Returns the phase transition taken, if any.
    pub fn advance(&mut self) -> Option<PhaseChange> {
        let from = self.phase;
        match self.phase {
            Phase::FadingIn => self.tick_fade_in(),
            Phase::Typing => self.tick_typing(),
            Phase::Holding => self.tick_holding(),
            Phase::Disappearing => self.tick_disappearing(),
            Phase::Done => return None,
        }
        self.tick += 1;

        (self.phase != from).then(|| {
            tracing::debug!(from = %from, to = %self.phase, tick = self.tick, "phase change");
            PhaseChange {
                from,
                to: self.phase,
            }
        })
    }

    fn tick_fade_in(&mut self) {
        self.opacity = self.opacity.saturating_add(self.timing.fade_speed);
        if self.opacity == u8::MAX {
            self.enter_typing();
        }
    }

    fn enter_typing(&mut self) {
        let (lo, _) = self.timing.cycle_target_bounds();
        let max_k = self.timing.cycle_multiplier_max.max(1);
        self.slots = (0..self.text.len())
            .map(|_| {
                let display_glyph = self.random_glyph();
                let cycle_target = lo.saturating_mul(self.rng.gen_range(1..=max_k));
                Slot {
                    is_locked: false,
                    display_glyph,
                    cycle_progress: 0,
                    cycle_target,
                }
            })
            .collect();
        self.reveal_index = 0;
        self.typing_timer = 0;
        self.phase = Phase::Typing;
    }

    fn tick_typing(&mut self) {
        self.typing_timer += 1;

        let n = self.text.len();
        let end = (self.reveal_index + 1).min(n);
        for i in 0..end {
            if self.slots[i].is_locked {
                continue;
            }
            self.slots[i].cycle_progress += 1;
            if self.slots[i].cycle_progress >= self.slots[i].cycle_target {
                self.slots[i].is_locked = true;
                self.slots[i].display_glyph = self.text[i];
            } else {
                self.slots[i].display_glyph = self.random_glyph();
            }
        }

        if self.typing_timer % self.timing.reveal_interval() == 0 && self.reveal_index < n {
            self.reveal_index += 1;
        }

        // Vacuously true for the empty text.
        if self.reveal_index >= n && self.slots.iter().all(|s| s.is_locked) {
            self.hold_started = Some(self.clock.now());
            self.phase = Phase::Holding;
        }
    }

    fn tick_holding(&mut self) {
        let now = self.clock.now();
        let started = *self.hold_started.get_or_insert(now);
        if now.saturating_sub(started) >= Duration::from_millis(self.timing.hold_ms) {
            self.visible = vec![true; self.text.len()];
            self.disappear_timer = 0;
            self.phase = Phase::Disappearing;
        }
    }

    fn tick_disappearing(&mut self) {
        let remaining: Vec<usize> = self
            .visible
            .iter()
            .enumerate()
            .filter(|(_, v)| **v)
            .map(|(i, _)| i)
            .collect();
        if remaining.is_empty() {
            self.phase = Phase::Done;
            return;
        }

        self.disappear_timer += 1;
        if self.disappear_timer >= self.timing.disappear_speed {
            self.disappear_timer = 0;
            let pick = remaining[self.rng.gen_range(0..remaining.len())];
            self.visible[pick] = false;
        }
    }

    fn random_glyph(&mut self) -> char {
        self.pool[self.rng.gen_range(0..self.pool.len())]
    }

    /// Return to the initial `FadingIn` state with the same text.
    ///
    /// Per-character state, timers and any capture in progress are cleared. The random generator
    /// keeps its state, so a replay scrambles differently.
    pub fn reset(&mut self) {
        self.phase = Phase::FadingIn;
        self.opacity = 0;
        self.reveal_index = 0;
        self.slots.clear();
        self.visible.clear();
        self.typing_timer = 0;
        self.disappear_timer = 0;
        self.hold_started = None;
        self.tick = 0;
        self.capture.clear();
    }

    /// Start capturing rendered frames for `kind`, discarding anything captured before.
    pub fn start_recording(&mut self, kind: ExportKind) {
        tracing::info!(kind = ?kind, text = %self.text(), "recording started");
        self.capture.start(kind);
    }

    /// Detach the captured frames. `None` if no recording was active.
    pub fn stop_recording(&mut self) -> Option<Recording> {
        let rec = self.capture.stop()?;
        tracing::info!(kind = ?rec.kind, frames = rec.frames.len(), "recording stopped");
        Some(rec)
    }

    /// `true` while frames are being captured.
    pub fn is_recording(&self) -> bool {
        self.capture.is_recording()
    }

    /// Frames captured so far in the active recording.
    pub fn captured_frames(&self) -> usize {
        self.capture.len()
    }

    /// Append a rendered frame to the active recording. No-op when not recording.
    pub fn capture_frame(&mut self, frame: FrameRGB) {
        self.capture.push(frame);
    }
}

/// Upper bound on the ticks a run over `len` characters needs to reach `Done`, given a hold
/// timed at the tick rate.
pub fn tick_budget(len: usize, timing: &Timing) -> u64 {
    let len = len as u64;
    let fade = 255_u64.div_ceil(u64::from(timing.fade_speed.max(1)));
    let (_, max_target) = timing.cycle_target_bounds();
    let typing = len
        .saturating_mul(u64::from(timing.reveal_interval()))
        .saturating_add(u64::from(max_target))
        .saturating_add(1);
    let hold = timing
        .hold_ms
        .saturating_mul(u64::from(timing.ticks_per_second))
        .div_ceil(1000)
        .saturating_add(2);
    let disappear = len
        .saturating_add(1)
        .saturating_mul(u64::from(timing.disappear_speed.max(1)))
        .saturating_add(1);
    fade.saturating_add(typing)
        .saturating_add(hold)
        .saturating_add(disappear)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/machine.rs"]
mod tests;
