use crate::animation::machine::{Animation, tick_budget};
use crate::assets::font::FontFace;
use crate::audio::cue::{AudioCue, SilentCue};
use crate::capture::buffer::{ExportKind, FrameRGB, Recording};
use crate::config::Settings;
use crate::foundation::clock::ManualClock;
use crate::foundation::error::{DecodeFxError, DecodeFxResult};
use crate::render::cpu::FrameRenderer;
use crate::render::surface::Surface;

/// Drive `anim` to `Done`, rendering every tick and advancing `clock` by one tick period.
///
/// Returns the number of ticks taken. Fails if the run exceeds its tick budget.
pub fn run_to_completion(
    anim: &mut Animation,
    renderer: &mut FrameRenderer,
    surface: &mut Surface,
    clock: &ManualClock,
    cue: &mut dyn AudioCue,
) -> DecodeFxResult<u64> {
    let dt = anim.timing().tick_fps()?.frame_duration();
    let budget = tick_budget(anim.len(), anim.timing());
    let mut ticks = 0;
    while !anim.is_done() {
        if ticks >= budget {
            return Err(DecodeFxError::render(format!(
                "animation did not finish within {budget} ticks"
            )));
        }
        clock.advance(dt);
        if let Some(change) = anim.advance() {
            cue.on_phase_change(&change);
        }
        renderer.render(surface, anim)?;
        ticks += 1;
    }
    Ok(ticks)
}

fn animation(text: &str, settings: &Settings, seed: Option<u64>, clock: &ManualClock) -> Animation {
    let anim = match seed {
        Some(seed) => Animation::with_seed(text, settings, seed),
        None => Animation::new(text, settings),
    };
    anim.with_clock(clock.clone())
}

/// Record one full run of `text` without a terminal.
pub fn record_run(
    text: &str,
    settings: &Settings,
    face: FontFace,
    seed: Option<u64>,
    kind: ExportKind,
) -> DecodeFxResult<Recording> {
    let clock = ManualClock::new();
    let mut anim = animation(text, settings, seed, &clock);
    let mut renderer = FrameRenderer::new(settings, face)?;
    let mut surface = Surface::new(settings.canvas)?;

    anim.start_recording(kind);
    let ticks = run_to_completion(&mut anim, &mut renderer, &mut surface, &clock, &mut SilentCue)?;
    tracing::debug!(ticks, "headless run finished");
    anim.stop_recording()
        .ok_or_else(|| DecodeFxError::render("recording was not active"))
}

/// Render the state of `text` after `tick` ticks.
pub fn render_frame_at(
    text: &str,
    settings: &Settings,
    face: FontFace,
    seed: Option<u64>,
    tick: u64,
) -> DecodeFxResult<FrameRGB> {
    let clock = ManualClock::new();
    let mut anim = animation(text, settings, seed, &clock);
    let mut renderer = FrameRenderer::new(settings, face)?;
    let mut surface = Surface::new(settings.canvas)?;

    let dt = settings.timing.tick_fps()?.frame_duration();
    for _ in 0..tick {
        clock.advance(dt);
        anim.advance();
    }
    renderer.render(&mut surface, &mut anim)?;
    Ok(surface.snapshot_rgb(renderer.background()))
}

#[cfg(test)]
#[path = "../../tests/unit/shell/headless.rs"]
mod tests;
