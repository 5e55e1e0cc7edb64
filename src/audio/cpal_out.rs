use std::path::Path;
use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::assets::media::decode_audio_f32_stereo;
use crate::audio::cue::AudioCue;
use crate::foundation::error::{DecodeFxError, DecodeFxResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Stopped,
    Looping,
    Once,
}

#[derive(Debug)]
struct Playback {
    /// Stereo interleaved samples at the device rate.
    samples: Arc<Vec<f32>>,
    /// Next stereo frame to play.
    pos: usize,
    mode: Mode,
}

impl Playback {
    fn restart(&mut self, mode: Mode) {
        self.pos = 0;
        self.mode = mode;
    }

    fn fill(&mut self, out: &mut [f32], channels: usize) {
        let frames = self.samples.len() / 2;
        for frame in out.chunks_mut(channels) {
            if self.mode == Mode::Stopped || frames == 0 {
                frame.fill(0.0);
                continue;
            }
            if self.pos >= frames {
                if self.mode == Mode::Looping {
                    self.pos = 0;
                } else {
                    self.mode = Mode::Stopped;
                    frame.fill(0.0);
                    continue;
                }
            }
            let l = self.samples[self.pos * 2];
            let r = self.samples[self.pos * 2 + 1];
            for (c, s) in frame.iter_mut().enumerate() {
                *s = match c {
                    0 => l,
                    1 => r,
                    _ => 0.5 * (l + r),
                };
            }
            self.pos += 1;
        }
    }
}

/// Cue played through the default `cpal` output device.
///
/// The sound file is decoded once, at the device sample rate, when the cue is opened.
pub struct CpalCue {
    state: Arc<Mutex<Playback>>,
    _stream: cpal::Stream,
}

impl CpalCue {
    /// Decode `path` and open an output stream on the default device.
    pub fn open(path: &Path, volume: f32) -> DecodeFxResult<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| DecodeFxError::audio("no default audio output device"))?;
        let supported = device
            .default_output_config()
            .map_err(|e| DecodeFxError::audio(format!("query output config: {e}")))?;
        if supported.sample_format() != cpal::SampleFormat::F32 {
            return Err(DecodeFxError::audio(format!(
                "unsupported output sample format {:?}",
                supported.sample_format()
            )));
        }
        let config: cpal::StreamConfig = supported.config();
        let channels = usize::from(config.channels);

        let mut pcm = decode_audio_f32_stereo(path, config.sample_rate.0)?;
        pcm.apply_gain(volume);

        let state = Arc::new(Mutex::new(Playback {
            samples: Arc::new(pcm.interleaved_f32),
            pos: 0,
            mode: Mode::Stopped,
        }));
        let cb_state = Arc::clone(&state);
        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| match cb_state.lock() {
                    Ok(mut p) => p.fill(data, channels),
                    Err(_) => data.fill(0.0),
                },
                |err| tracing::warn!(error = %err, "audio output stream error"),
                None,
            )
            .map_err(|e| DecodeFxError::audio(format!("build output stream: {e}")))?;
        stream
            .play()
            .map_err(|e| DecodeFxError::audio(format!("start output stream: {e}")))?;

        Ok(Self {
            state,
            _stream: stream,
        })
    }

    fn set_mode(&self, mode: Mode) {
        match self.state.lock() {
            Ok(mut p) => p.restart(mode),
            Err(_) => tracing::warn!("audio playback state poisoned"),
        }
    }
}

impl AudioCue for CpalCue {
    fn play_looping(&mut self) {
        self.set_mode(Mode::Looping);
    }

    fn stop_and_play_once(&mut self) {
        self.set_mode(Mode::Once);
    }

    fn stop(&mut self) {
        self.set_mode(Mode::Stopped);
    }
}
