use crate::animation::phase::{Phase, PhaseChange};
use crate::config::AudioSettings;

/// A single sound that follows the animation phases.
///
/// Calls are fire-and-forget: implementations never block the tick loop and swallow playback
/// errors after logging them.
pub trait AudioCue {
    /// Start the cue from the beginning and repeat it until stopped.
    fn play_looping(&mut self);
    /// Stop any playback, then play the cue once from the beginning.
    fn stop_and_play_once(&mut self);
    /// Silence the cue.
    fn stop(&mut self);

    /// React to a phase transition reported by `Animation::advance`.
    ///
    /// Decoding starts the loop; the lock-in of the last character ends it with one last shot.
    fn on_phase_change(&mut self, change: &PhaseChange) {
        match (change.from, change.to) {
            (Phase::FadingIn, Phase::Typing) => self.play_looping(),
            (Phase::Typing, Phase::Holding) => self.stop_and_play_once(),
            _ => {}
        }
    }
}

/// No-op cue used when audio is unavailable.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentCue;

impl AudioCue for SilentCue {
    fn play_looping(&mut self) {}
    fn stop_and_play_once(&mut self) {}
    fn stop(&mut self) {}
}

/// Load the configured cue, falling back to [`SilentCue`] on any failure.
pub fn load_cue(settings: &AudioSettings) -> Box<dyn AudioCue> {
    let Some(path) = settings.cue_path.as_deref() else {
        tracing::debug!("no audio cue configured");
        return Box::new(SilentCue);
    };

    #[cfg(feature = "audio")]
    {
        match crate::audio::cpal_out::CpalCue::open(path, settings.volume) {
            Ok(cue) => {
                tracing::info!(path = %path.display(), "audio cue loaded");
                Box::new(cue)
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "could not load the audio cue, continuing without sound"
                );
                Box::new(SilentCue)
            }
        }
    }

    #[cfg(not(feature = "audio"))]
    {
        tracing::info!(
            path = %path.display(),
            "built without the `audio` feature, cue disabled"
        );
        Box::new(SilentCue)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/cue.rs"]
mod tests;
