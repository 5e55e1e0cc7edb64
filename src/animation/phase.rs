/// Macro-state of an animation. Transitions only move forward, in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// Opacity ramps up; no glyph is drawn.
    FadingIn,
    /// Slots start cycling one by one and lock onto their source character.
    Typing,
    /// Everything is locked; waits a fixed wall-clock duration.
    Holding,
    /// Characters vanish one at a time in random order.
    Disappearing,
    /// Terminal. Only `reset` leaves it.
    Done,
}

impl Phase {
    /// Lower-case name, used in logs and the terminal UI.
    pub fn name(self) -> &'static str {
        match self {
            Self::FadingIn => "fading_in",
            Self::Typing => "typing",
            Self::Holding => "holding",
            Self::Disappearing => "disappearing",
            Self::Done => "done",
        }
    }

    /// The phase that follows `self`, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::FadingIn => Some(Self::Typing),
            Self::Typing => Some(Self::Holding),
            Self::Holding => Some(Self::Disappearing),
            Self::Disappearing => Some(Self::Done),
            Self::Done => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A transition taken by one `advance` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseChange {
    /// Phase before the tick.
    pub from: Phase,
    /// Phase after the tick.
    pub to: Phase,
}

/// Per-character cycling state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    /// Set once the slot shows its source character for good.
    pub is_locked: bool,
    /// Glyph drawn while unlocked; the source character once locked.
    pub display_glyph: char,
    /// Cycle ticks spent so far.
    pub cycle_progress: u32,
    /// Cycle ticks before lock-in, drawn once when the slot is created.
    pub cycle_target: u32,
}
