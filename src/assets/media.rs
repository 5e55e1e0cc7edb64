use std::path::Path;

use crate::foundation::error::{DecodeFxError, DecodeFxResult};

/// Decoded interleaved floating-point PCM.
#[derive(Clone, Debug, Default)]
pub struct AudioPcm {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// Interleaved `f32` PCM samples.
    pub interleaved_f32: Vec<f32>,
}

impl AudioPcm {
    /// Number of sample frames (samples per channel).
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.interleaved_f32.len() / usize::from(self.channels)
    }

    /// Multiply every sample by `gain`.
    pub fn apply_gain(&mut self, gain: f32) {
        for s in &mut self.interleaved_f32 {
            *s *= gain;
        }
    }
}

/// Decode any audio file `ffmpeg` understands to stereo interleaved `f32` PCM.
pub fn decode_audio_f32_stereo(path: &Path, sample_rate: u32) -> DecodeFxResult<AudioPcm> {
    if !path.is_file() {
        return Err(DecodeFxError::audio(format!(
            "audio file '{}' not found",
            path.display()
        )));
    }

    let out = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-i"])
        .arg(path)
        .args([
            "-vn",
            "-f",
            "f32le",
            "-acodec",
            "pcm_f32le",
            "-ac",
            "2",
            "-ar",
            &sample_rate.to_string(),
            "pipe:1",
        ])
        .output()
        .map_err(|e| DecodeFxError::audio(format!("failed to run ffmpeg for audio decode: {e}")))?;

    if !out.status.success() {
        let msg = String::from_utf8_lossy(&out.stderr);
        return Err(DecodeFxError::audio(format!(
            "ffmpeg audio decode failed for '{}': {}",
            path.display(),
            msg.trim()
        )));
    }

    pcm_from_f32le(&out.stdout, sample_rate, 2)
}

fn pcm_from_f32le(bytes: &[u8], sample_rate: u32, channels: u16) -> DecodeFxResult<AudioPcm> {
    if !bytes.len().is_multiple_of(4) {
        return Err(DecodeFxError::audio(
            "decoded audio byte length is not aligned to f32 samples",
        ));
    }
    let interleaved_f32 = bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    Ok(AudioPcm {
        sample_rate,
        channels,
        interleaved_f32,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/media.rs"]
mod tests;
