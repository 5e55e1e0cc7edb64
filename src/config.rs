//! Runtime settings.
//!
//! Every tunable constant of the effect lives here with its default, so the interactive shell,
//! the batch CLI and the tests all agree on timing. Settings load from JSON; missing fields take
//! their defaults.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::foundation::core::{Canvas, Fps, Rgb8};
use crate::foundation::error::{DecodeFxError, DecodeFxResult};

/// Substitute glyphs shown while a slot is cycling.
pub const DEFAULT_GLYPH_POOL: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()[]{}|";

/// Complete configuration for one run of the program.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pixel surface size.
    pub canvas: Canvas,
    /// Tick-based timing of the animation phases.
    pub timing: Timing,
    /// Font, colors and glow.
    pub style: Style,
    /// Audio cue.
    pub audio: AudioSettings,
    /// Export targets.
    pub export: ExportSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 800,
                height: 450,
            },
            timing: Timing::default(),
            style: Style::default(),
            audio: AudioSettings::default(),
            export: ExportSettings::default(),
        }
    }
}

/// Phase timing. All durations except `hold_ms` are in ticks.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Ticks per second of the driving loop.
    pub ticks_per_second: u32,
    /// Characters revealed per second.
    pub animation_speed: u32,
    /// Opacity added per fade-in tick.
    pub fade_speed: u8,
    /// Base unit of a slot's cycle target.
    pub char_cycle_speed: u32,
    /// Cycle targets are `char_cycle_speed * k` with `k` uniform in `1..=cycle_multiplier_max`.
    pub cycle_multiplier_max: u32,
    /// Ticks between two disappearances.
    pub disappear_speed: u32,
    /// Wall-clock hold duration.
    pub hold_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            ticks_per_second: 60,
            animation_speed: 10,
            fade_speed: 4,
            char_cycle_speed: 5,
            cycle_multiplier_max: 5,
            disappear_speed: 4,
            hold_ms: 2000,
        }
    }
}

impl Timing {
    /// Ticks between two increments of the reveal index.
    pub fn reveal_interval(&self) -> u32 {
        (self.ticks_per_second / self.animation_speed.max(1)).max(1)
    }

    /// Inclusive bounds of a slot's cycle target.
    pub fn cycle_target_bounds(&self) -> (u32, u32) {
        (
            self.char_cycle_speed,
            self.char_cycle_speed.saturating_mul(self.cycle_multiplier_max),
        )
    }

    /// Copy with every rate raised to at least 1, so a run always terminates.
    pub fn normalized(&self) -> Self {
        Self {
            ticks_per_second: self.ticks_per_second.max(1),
            animation_speed: self.animation_speed.max(1),
            fade_speed: self.fade_speed.max(1),
            char_cycle_speed: self.char_cycle_speed.max(1),
            cycle_multiplier_max: self.cycle_multiplier_max.max(1),
            disappear_speed: self.disappear_speed.max(1),
            hold_ms: self.hold_ms,
        }
    }

    /// Tick rate as an [`Fps`].
    pub fn tick_fps(&self) -> DecodeFxResult<Fps> {
        Fps::whole(self.ticks_per_second)
    }

    fn validate(&self) -> DecodeFxResult<()> {
        if self.ticks_per_second == 0 {
            return Err(DecodeFxError::validation("ticks_per_second must be > 0"));
        }
        if self.animation_speed == 0 {
            return Err(DecodeFxError::validation("animation_speed must be > 0"));
        }
        if self.fade_speed == 0 {
            return Err(DecodeFxError::validation("fade_speed must be > 0"));
        }
        if self.char_cycle_speed == 0 || self.cycle_multiplier_max == 0 {
            return Err(DecodeFxError::validation(
                "char_cycle_speed and cycle_multiplier_max must be > 0",
            ));
        }
        if self.disappear_speed == 0 {
            return Err(DecodeFxError::validation("disappear_speed must be > 0"));
        }
        if self
            .char_cycle_speed
            .checked_mul(self.cycle_multiplier_max)
            .is_none()
        {
            return Err(DecodeFxError::validation(
                "char_cycle_speed * cycle_multiplier_max overflows",
            ));
        }
        if self
            .hold_ms
            .checked_mul(u64::from(self.ticks_per_second))
            .is_none()
        {
            return Err(DecodeFxError::validation(
                "hold_ms * ticks_per_second overflows",
            ));
        }
        Ok(())
    }
}

/// Font, color and glow parameters of the renderer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Style {
    /// Display font file. A missing file falls back to a system face, then to built-in blocks.
    pub font_path: Option<PathBuf>,
    /// Font size in pixels.
    pub font_size: f32,
    /// Surface clear color.
    pub background: Rgb8,
    /// Sharp glyph color.
    pub text: Rgb8,
    /// Glow color.
    pub glow: Rgb8,
    /// Number of glow radius levels.
    pub glow_radius: u32,
    /// Number of glow layers per radius level.
    pub glow_intensity: u32,
    /// Substitute glyph alphabet.
    pub glyph_pool: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font_path: Some(PathBuf::from("BankGothicMediumBT.ttf")),
            font_size: 40.0,
            background: Rgb8::new(0, 0, 0),
            text: Rgb8::new(245, 255, 245),
            glow: Rgb8::new(51, 227, 44),
            glow_radius: 5,
            glow_intensity: 2,
            glyph_pool: DEFAULT_GLYPH_POOL.to_owned(),
        }
    }
}

/// Audio cue parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Cue sound file; `None` disables audio.
    pub cue_path: Option<PathBuf>,
    /// Linear playback gain.
    pub volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            cue_path: Some(PathBuf::from("Decoding Sound.wav")),
            volume: 0.3,
        }
    }
}

/// Export targets.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Playback rate written into exported files.
    pub fps: u32,
    /// Image-sequence (GIF) output path.
    pub gif_path: PathBuf,
    /// Video (MP4) output path.
    pub video_path: PathBuf,
    /// Overwrite existing outputs.
    pub overwrite: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            fps: 30,
            gif_path: PathBuf::from("animation.gif"),
            video_path: PathBuf::from("animation.mp4"),
            overwrite: true,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> DecodeFxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            DecodeFxError::validation(format!("open settings JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Load settings from a JSON reader.
    pub fn from_reader(r: impl Read) -> DecodeFxResult<Self> {
        let settings: Self = serde_json::from_reader(r)
            .map_err(|e| DecodeFxError::serde(format!("parse settings JSON: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check value ranges.
    pub fn validate(&self) -> DecodeFxResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(DecodeFxError::validation("canvas width/height must be > 0"));
        }
        self.canvas.to_u16()?;
        self.timing.validate()?;
        if !self.style.font_size.is_finite() || self.style.font_size <= 0.0 {
            return Err(DecodeFxError::validation(
                "font_size must be finite and > 0",
            ));
        }
        if self.style.glyph_pool.is_empty() {
            return Err(DecodeFxError::validation("glyph_pool must not be empty"));
        }
        if !self.audio.volume.is_finite() || self.audio.volume < 0.0 {
            return Err(DecodeFxError::validation("audio volume must be >= 0"));
        }
        if self.export.fps == 0 {
            return Err(DecodeFxError::validation("export fps must be > 0"));
        }
        Ok(())
    }

    /// Substitute glyph alphabet as characters.
    pub fn glyph_pool(&self) -> Vec<char> {
        self.style.glyph_pool.chars().collect()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/settings.rs"]
mod tests;
