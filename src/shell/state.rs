use std::path::PathBuf;
use std::sync::Arc;

use crate::animation::machine::Animation;
use crate::audio::cue::AudioCue;
use crate::capture::buffer::ExportKind;
use crate::config::Settings;
use crate::encode::export::export;
use crate::foundation::clock::{Clock, SystemClock};
use crate::foundation::error::DecodeFxResult;
use crate::render::cpu::FrameRenderer;
use crate::render::surface::Surface;

/// Ticks per half-period of the prompt cursor blink.
const CURSOR_BLINK_TICKS: u64 = 30;

/// Input understood by the shell, already decoded from the terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellKey {
    /// A printable character.
    Char(char),
    /// Submit the typed text.
    Enter,
    /// Delete the last typed character.
    Backspace,
    /// Leave the program.
    Quit,
}

/// What the shell is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellMode {
    /// The user is typing text.
    Editing,
    /// An animation is running or finished.
    Animating,
}

/// Result of handling one key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellAction {
    /// Nothing happened.
    Ignored,
    /// The prompt text changed.
    Edited,
    /// A new animation started.
    Started,
    /// The finished animation restarted.
    Replayed,
    /// Back to the prompt.
    NewText,
    /// The finished animation restarted with recording enabled.
    Recording(ExportKind),
    /// The user asked to quit.
    Quit,
}

/// Message shown below the animation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// An export finished.
    Saved(PathBuf),
    /// An export failed; the animation stays done.
    Failed(String),
}

/// The interactive shell state machine.
///
/// `Shell` owns the renderer, the surface, the audio cue and at most one animation. It knows
/// nothing about the terminal: the presenter feeds it [`ShellKey`]s and calls [`Shell::tick`]
/// at the tick rate.
pub struct Shell {
    settings: Settings,
    renderer: FrameRenderer,
    surface: Surface,
    cue: Box<dyn AudioCue>,
    clock: Arc<dyn Clock>,
    seed: Option<u64>,
    started: u64,

    mode: ShellMode,
    input: String,
    anim: Option<Animation>,
    status: Option<Status>,
    ticks: u64,
}

impl Shell {
    /// Create a shell at the empty prompt.
    pub fn new(
        settings: Settings,
        renderer: FrameRenderer,
        cue: Box<dyn AudioCue>,
    ) -> DecodeFxResult<Self> {
        let surface = Surface::new(settings.canvas)?;
        Ok(Self {
            settings,
            renderer,
            surface,
            cue,
            clock: Arc::new(SystemClock::new()),
            seed: None,
            started: 0,
            mode: ShellMode::Editing,
            input: String::new(),
            anim: None,
            status: None,
            ticks: 0,
        })
    }

    /// Time animations with `clock` instead of the system clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Seed animations deterministically: the n-th animation uses `seed + n`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Current mode.
    pub fn mode(&self) -> ShellMode {
        self.mode
    }

    /// Text typed at the prompt.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The current animation, if any.
    pub fn animation(&self) -> Option<&Animation> {
        self.anim.as_ref()
    }

    /// Last export status.
    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// Last frame rendered for a recording. Untouched by runs that are not recorded.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Active settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// `true` while the prompt cursor should be drawn.
    pub fn cursor_visible(&self) -> bool {
        (self.ticks / CURSOR_BLINK_TICKS).is_multiple_of(2)
    }

    fn done(&self) -> bool {
        self.anim.as_ref().is_some_and(Animation::is_done)
    }

    /// Apply one key.
    pub fn handle_key(&mut self, key: ShellKey) -> ShellAction {
        if key == ShellKey::Quit {
            self.cue.stop();
            return ShellAction::Quit;
        }
        match self.mode {
            ShellMode::Editing => self.handle_editing(key),
            ShellMode::Animating => self.handle_animating(key),
        }
    }

    fn handle_editing(&mut self, key: ShellKey) -> ShellAction {
        match key {
            ShellKey::Char(c) if !c.is_control() => {
                self.input.push(c);
                ShellAction::Edited
            }
            ShellKey::Backspace => {
                if self.input.pop().is_some() {
                    ShellAction::Edited
                } else {
                    ShellAction::Ignored
                }
            }
            ShellKey::Enter => {
                let text = std::mem::take(&mut self.input);
                self.start(&text);
                ShellAction::Started
            }
            ShellKey::Char(_) | ShellKey::Quit => ShellAction::Ignored,
        }
    }

    fn handle_animating(&mut self, key: ShellKey) -> ShellAction {
        let ShellKey::Char(c) = key else {
            return ShellAction::Ignored;
        };
        if !self.done() {
            return ShellAction::Ignored;
        }
        match c.to_ascii_lowercase() {
            'r' => {
                self.restart(None);
                ShellAction::Replayed
            }
            'n' => {
                self.cue.stop();
                self.anim = None;
                self.status = None;
                self.input.clear();
                self.mode = ShellMode::Editing;
                ShellAction::NewText
            }
            'g' => {
                self.restart(Some(ExportKind::ImageSequence));
                ShellAction::Recording(ExportKind::ImageSequence)
            }
            'v' => {
                self.restart(Some(ExportKind::Video));
                ShellAction::Recording(ExportKind::Video)
            }
            _ => ShellAction::Ignored,
        }
    }

    fn start(&mut self, text: &str) {
        let anim = match self.seed {
            Some(seed) => Animation::with_seed(text, &self.settings, seed.wrapping_add(self.started)),
            None => Animation::new(text, &self.settings),
        };
        self.started += 1;
        self.cue.stop();
        self.anim = Some(anim.with_clock(Arc::clone(&self.clock)));
        self.status = None;
        self.mode = ShellMode::Animating;
        tracing::info!(text, "animation started");
    }

    fn restart(&mut self, record: Option<ExportKind>) {
        self.cue.stop();
        self.status = None;
        if let Some(anim) = self.anim.as_mut() {
            anim.reset();
            if let Some(kind) = record {
                anim.start_recording(kind);
            }
        }
    }

    /// Advance one tick, rendering it when recording. Exports a finished recording.
    pub fn tick(&mut self) -> DecodeFxResult<()> {
        self.ticks += 1;
        let Some(anim) = self.anim.as_mut() else {
            return Ok(());
        };

        if let Some(change) = anim.advance() {
            self.cue.on_phase_change(&change);
        }
        // The terminal shows a character preview; pixels are only needed for a capture.
        if anim.is_recording() {
            self.renderer.render(&mut self.surface, anim)?;
        }

        if anim.is_done()
            && let Some(recording) = anim.stop_recording()
        {
            self.status = Some(match export(&recording, &self.settings.export) {
                Ok(path) => Status::Saved(path),
                Err(e) => {
                    tracing::error!(error = %e, "export failed");
                    Status::Failed(e.to_string())
                }
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shell/state.rs"]
mod tests;
