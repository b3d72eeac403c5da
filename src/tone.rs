// Fixed-frequency sine tone written as interleaved stereo i16.
//
// The oscillator owns its phase, so whoever drives the audio callback owns
// the only mutable state the audio side has. Nothing here allocates, blocks
// or logs.

use std::f32::consts::TAU;

use crate::error::Error;
use crate::types::SoundBuffer;

pub const DEFAULT_TONE_HZ: u32 = 256;
pub const DEFAULT_TONE_VOLUME: i16 = 3000;

/// Tone parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToneConfig {
    /// Oscillator frequency in Hz.
    pub tone_hz: u32,
    /// Peak sample amplitude.
    pub tone_volume: i16,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            tone_hz: DEFAULT_TONE_HZ,
            tone_volume: DEFAULT_TONE_VOLUME,
        }
    }
}

impl ToneConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.tone_hz == 0 {
            return Err(Error::InvalidParameter("tone_hz must be non-zero".into()));
        }
        if self.tone_volume < 0 {
            return Err(Error::InvalidParameter(format!(
                "tone_volume {} is negative",
                self.tone_volume
            )));
        }
        Ok(())
    }

    /// Samples per waveform cycle at `samples_per_second`.
    ///
    /// Integer division: rates that are not a multiple of `tone_hz` play
    /// slightly sharp (48000 / 256 gives 187, not 187.5).
    pub fn wave_period(&self, samples_per_second: u32) -> Result<u32, Error> {
        self.validate()?;
        match samples_per_second / self.tone_hz {
            0 => Err(Error::InvalidParameter(format!(
                "{} Hz tone cannot be sampled at {samples_per_second} Hz",
                self.tone_hz
            ))),
            period => Ok(period),
        }
    }
}

/// Sine oscillator with a phase that carries over between buffer fills.
#[derive(Clone, Debug)]
pub struct Oscillator {
    config: ToneConfig,
    /// Radians, kept in [0, TAU).
    phase: f32,
}

impl Default for Oscillator {
    fn default() -> Self {
        Self {
            config: ToneConfig::default(),
            phase: 0.0,
        }
    }
}

impl Oscillator {
    pub fn new(config: ToneConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { config, phase: 0.0 })
    }

    pub fn config(&self) -> ToneConfig {
        self.config
    }

    /// Swap tone parameters without restarting the waveform.
    pub fn set_config(&mut self, config: ToneConfig) -> Result<(), Error> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Write `sample_count` stereo frames of the tone into `buffer`.
    ///
    /// Each frame carries the same value left and right. The phase picks up
    /// where the previous call left off, so back-to-back fills form one
    /// continuous wave. A zero `sample_count` writes nothing and leaves the
    /// phase untouched.
    pub fn fill_audio(&mut self, buffer: &mut SoundBuffer<'_>) -> Result<(), Error> {
        buffer.validate()?;
        let wave_period = self.config.wave_period(buffer.samples_per_second)?;

        let step = TAU / wave_period as f32;
        let volume = self.config.tone_volume as f32;

        for frame in buffer.samples[..buffer.sample_count * 2].chunks_exact_mut(2) {
            // Truncates toward zero, same as a plain narrowing cast.
            let sample_value = (self.phase.sin() * volume) as i16;
            frame[0] = sample_value;
            frame[1] = sample_value;

            self.phase += step;
            if self.phase >= TAU {
                self.phase -= TAU;
            }
        }

        Ok(())
    }
}
