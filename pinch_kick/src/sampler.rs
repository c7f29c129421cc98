//! One-shot sample playback — a single shared voice.
//!
//! One wav sample is decoded up front; [`Sampler::trigger`] points the
//! voice at its start with fresh rate/pan/amplitude and lets the cpal
//! callback stream it out. Triggers are last-writer-wins: a new one
//! re-parameterizes and rewinds the voice, cutting off whatever was
//! still playing. There is deliberately no mixing or voice pool.
//!
//! Everything degrades to silence rather than failing the frame loop:
//! no output device, an unsupported stream format, or a missing sample
//! file all leave a `Sampler` that swallows triggers.

use std::path::Path;
use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use thiserror::Error;

use kick_pipeline::mapper::ShotParams;

#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("failed to decode sample: {0}")]
    Wav(#[from] hound::Error),
    #[error("sample has no audio frames")]
    EmptySample,
}

// ════════════════════════════════════════════════════════════════════════════
// Voice — state shared with the audio callback
// ════════════════════════════════════════════════════════════════════════════

/// The single playback voice. Locked briefly by the frame loop on
/// trigger and by the callback per buffer.
#[derive(Debug)]
struct Voice {
    /// Decoded stereo frames.
    frames: Arc<Vec<[f32; 2]>>,
    /// Sample rate the frames were decoded at.
    source_rate: f32,
    /// Read head in frames; fractional for rate scaling.
    pos: f64,
    rate: f32,
    pan: f32,
    amplitude: f32,
    active: bool,
}

impl Voice {
    fn idle(frames: Arc<Vec<[f32; 2]>>, source_rate: f32) -> Self {
        Voice {
            frames,
            source_rate,
            pos: 0.0,
            rate: 1.0,
            pan: 0.0,
            amplitude: 1.0,
            active: false,
        }
    }

    fn restart(&mut self, params: ShotParams) {
        self.rate = params.rate;
        self.pan = params.pan;
        self.amplitude = params.amplitude;
        self.pos = 0.0;
        self.active = true;
    }

    /// Produce the next output frame at `output_rate` Hz.
    fn next_frame(&mut self, output_rate: f32) -> (f32, f32) {
        if !self.active {
            return (0.0, 0.0);
        }
        let index = self.pos as usize;
        if index + 1 >= self.frames.len() {
            self.active = false;
            return (0.0, 0.0);
        }

        // Linear interpolation between adjacent source frames.
        let frac = (self.pos - index as f64) as f32;
        let a = self.frames[index];
        let b = self.frames[index + 1];
        let left = a[0] + (b[0] - a[0]) * frac;
        let right = a[1] + (b[1] - a[1]) * frac;

        let (gain_l, gain_r) = pan_gains(self.pan);
        let out = (
            left * gain_l * self.amplitude,
            right * gain_r * self.amplitude,
        );

        self.pos += (self.rate * self.source_rate / output_rate.max(1.0)) as f64;
        out
    }
}

/// Constant-power pan: -1 hard left, 0 center, +1 hard right.
/// Out-of-range pans (the mapper extrapolates) are clamped here.
fn pan_gains(pan: f32) -> (f32, f32) {
    let angle = (pan.clamp(-1.0, 1.0) + 1.0) * std::f32::consts::FRAC_PI_4;
    (angle.cos(), angle.sin())
}

// ════════════════════════════════════════════════════════════════════════════
// Sampler
// ════════════════════════════════════════════════════════════════════════════

/// Handle to the shared voice and its output stream.
///
/// `_stream` is `None` for the silent sampler (no device, or tests);
/// triggers still update the voice so behavior stays observable.
pub struct Sampler {
    voice: Arc<Mutex<Voice>>,
    _stream: Option<cpal::Stream>,
}

impl Sampler {
    /// Decode `path` and open an output stream for it.
    pub fn from_wav(path: &Path) -> Result<Self, SamplerError> {
        let (frames, source_rate) = decode_wav(path)?;
        let voice = Arc::new(Mutex::new(Voice::idle(Arc::new(frames), source_rate)));
        let stream = open_output(Arc::clone(&voice));
        Ok(Sampler {
            voice,
            _stream: stream,
        })
    }

    /// A sampler with no output stream; triggers are tracked but
    /// inaudible. Used when no sample is configured and in tests.
    pub fn silent() -> Self {
        // A short dummy buffer so the voice math has frames to walk.
        let frames = Arc::new(vec![[0.0, 0.0]; 64]);
        Sampler {
            voice: Arc::new(Mutex::new(Voice::idle(frames, 44_100.0))),
            _stream: None,
        }
    }

    /// Fire the voice with new parameters, restarting from the top.
    pub fn trigger(&self, params: ShotParams) {
        if let Ok(mut voice) = self.voice.lock() {
            voice.restart(params);
        }
    }

    /// Whether the voice is mid-playback.
    pub fn is_active(&self) -> bool {
        self.voice.lock().map(|v| v.active).unwrap_or(false)
    }

    /// Current voice parameters `(rate, pan, amplitude)`.
    pub fn params(&self) -> (f32, f32, f32) {
        self.voice
            .lock()
            .map(|v| (v.rate, v.pan, v.amplitude))
            .unwrap_or((1.0, 0.0, 1.0))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Wav decoding
// ════════════════════════════════════════════════════════════════════════════

/// Decode a wav file into stereo f32 frames plus its sample rate.
/// Mono files are duplicated to both channels; extra channels ignored.
fn decode_wav(path: &Path) -> Result<(Vec<[f32; 2]>, f32), SamplerError> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()?
        }
    };

    let frames: Vec<[f32; 2]> = samples
        .chunks_exact(channels)
        .map(|c| match channels {
            1 => [c[0], c[0]],
            _ => [c[0], c[1]],
        })
        .collect();

    if frames.is_empty() {
        return Err(SamplerError::EmptySample);
    }
    Ok((frames, spec.sample_rate as f32))
}

// ════════════════════════════════════════════════════════════════════════════
// Output stream
// ════════════════════════════════════════════════════════════════════════════

/// Open the default output device, or `None` (silent) when unavailable.
fn open_output(voice: Arc<Mutex<Voice>>) -> Option<cpal::Stream> {
    let host = cpal::default_host();
    let device = match host.default_output_device() {
        Some(d) => d,
        None => {
            log::warn!("no audio output device; running silent");
            return None;
        }
    };
    let config = match device.default_output_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("no default output config ({e}); running silent");
            return None;
        }
    };
    log::info!(
        "audio output: {} @ {} Hz",
        device.name().unwrap_or_else(|_| "unknown".into()),
        config.sample_rate().0
    );

    let stream = match config.sample_format() {
        cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config.into(), voice),
        cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config.into(), voice),
        cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config.into(), voice),
        other => {
            log::warn!("unsupported sample format {other:?}; running silent");
            None
        }
    }?;

    if let Err(e) = stream.play() {
        log::warn!("failed to start audio stream ({e}); running silent");
        return None;
    }
    Some(stream)
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    voice: Arc<Mutex<Voice>>,
) -> Option<cpal::Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let output_rate = config.sample_rate.0 as f32;
    let channels = config.channels as usize;

    let stream = device
        .build_output_stream(
            config,
            move |data: &mut [T], _| {
                let mut voice = match voice.lock() {
                    Ok(v) => v,
                    Err(_) => return,
                };
                for frame in data.chunks_mut(channels) {
                    let (l, r) = voice.next_frame(output_rate);
                    if channels == 1 {
                        frame[0] = T::from_sample((l + r) * 0.5);
                    } else {
                        let stereo = [l, r];
                        for (i, sample) in frame.iter_mut().enumerate() {
                            *sample = T::from_sample(*stereo.get(i).unwrap_or(&0.0));
                        }
                    }
                }
            },
            |err| log::warn!("audio stream error: {err}"),
            None,
        )
        .ok()?;
    Some(stream)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn shot(rate: f32, pan: f32) -> ShotParams {
        ShotParams {
            rate,
            pan,
            amplitude: 1.0,
        }
    }

    #[test]
    fn trigger_is_last_writer_wins() {
        let sampler = Sampler::silent();
        sampler.trigger(shot(0.5, -1.0));
        sampler.trigger(shot(1.3, 0.25));
        let (rate, pan, amp) = sampler.params();
        assert_approx_eq!(rate, 1.3);
        assert_approx_eq!(pan, 0.25);
        assert_approx_eq!(amp, 1.0);
        assert!(sampler.is_active());
    }

    #[test]
    fn retrigger_rewinds_the_voice() {
        let frames = Arc::new(vec![[1.0, 1.0]; 16]);
        let mut voice = Voice::idle(frames, 44_100.0);
        voice.restart(shot(1.0, 0.0));
        for _ in 0..10 {
            voice.next_frame(44_100.0);
        }
        assert!(voice.pos > 0.0);
        voice.restart(shot(2.0, 0.0));
        assert_approx_eq!(voice.pos as f32, 0.0);
        assert!(voice.active);
    }

    #[test]
    fn voice_goes_inactive_at_end_of_sample() {
        let frames = Arc::new(vec![[0.1, 0.1]; 8]);
        let mut voice = Voice::idle(frames, 44_100.0);
        voice.restart(shot(1.0, 0.0));
        for _ in 0..16 {
            voice.next_frame(44_100.0);
        }
        assert!(!voice.active);
        assert_eq!(voice.next_frame(44_100.0), (0.0, 0.0));
    }

    #[test]
    fn rate_scales_the_read_head() {
        let frames = Arc::new(vec![[0.0, 0.0]; 1024]);
        let mut voice = Voice::idle(frames, 44_100.0);
        voice.restart(shot(2.0, 0.0));
        for _ in 0..10 {
            voice.next_frame(44_100.0);
        }
        assert_approx_eq!(voice.pos as f32, 20.0, 1e-3);
    }

    #[test]
    fn pan_gains_constant_power() {
        let (l, r) = pan_gains(0.0);
        assert_approx_eq!(l, r);
        assert_approx_eq!(l * l + r * r, 1.0, 1e-5);

        let (l, r) = pan_gains(-1.0);
        assert_approx_eq!(l, 1.0);
        assert_approx_eq!(r, 0.0);

        // Extrapolated pans clamp at the edges.
        let (l, r) = pan_gains(3.0);
        assert_approx_eq!(l, 0.0);
        assert_approx_eq!(r, 1.0);
    }

    #[test]
    fn inactive_voice_is_silent() {
        let frames = Arc::new(vec![[0.9, 0.9]; 8]);
        let mut voice = Voice::idle(frames, 44_100.0);
        assert_eq!(voice.next_frame(48_000.0), (0.0, 0.0));
    }
}
