// Audio output using cpal.
//
// The oscillator is moved into the device callback, so its phase only ever
// changes on the audio thread. The video loop never sees it.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use tracing::{debug, error, info};

use handmade::{Error, Oscillator, SoundBuffer, output_sound};

/// Owns the oscillator and a stereo i16 scratch buffer the core fills.
struct Feeder {
    oscillator: Oscillator,
    scratch: Vec<i16>,
    samples_per_second: u32,
}

impl Feeder {
    /// Produce `frames` stereo frames of tone, or silence if the core refuses.
    fn render(&mut self, frames: usize) -> &[i16] {
        if self.scratch.len() < frames * 2 {
            self.scratch.resize(frames * 2, 0);
        }
        let mut sound = SoundBuffer {
            samples: &mut self.scratch[..frames * 2],
            sample_count: frames,
            samples_per_second: self.samples_per_second,
        };
        if output_sound(&mut self.oscillator, &mut sound).is_err() {
            sound.samples.fill(0);
        }
        &self.scratch[..frames * 2]
    }
}

/// Keeps the device stream alive; dropping it stops the tone.
pub struct AudioOutput {
    _stream: cpal::Stream,
    sample_rate: u32,
}

impl AudioOutput {
    /// Open the default output device and start feeding it from `oscillator`.
    pub fn start(oscillator: Oscillator) -> Result<Self, Error> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::AudioInit("no audio output device available".into()))?;
        let supported = device
            .default_output_config()
            .map_err(|e| Error::AudioInit(format!("default output config: {e}")))?;

        let sample_rate = supported.sample_rate().0;
        let channels = supported.channels() as usize;
        // Fails here rather than silently on the audio thread.
        oscillator.config().wave_period(sample_rate)?;

        let feeder = Feeder {
            oscillator,
            scratch: vec![0; 4096],
            samples_per_second: sample_rate,
        };

        let config: cpal::StreamConfig = supported.config();
        let stream = match supported.sample_format() {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, channels, feeder),
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, channels, feeder),
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, channels, feeder),
            other => {
                return Err(Error::AudioInit(format!("unsupported sample format: {other:?}")));
            }
        }?;

        stream
            .play()
            .map_err(|e| Error::AudioInit(format!("play stream: {e}")))?;

        info!(sample_rate, channels, "audio stream started");
        Ok(Self {
            _stream: stream,
            sample_rate,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    mut feeder: Feeder,
) -> Result<cpal::Stream, Error>
where
    T: SizedSample + FromSample<i16>,
{
    debug!(channels, "building output stream");
    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                let frames = data.len() / channels.max(1);
                write_frames(data, channels, feeder.render(frames));
            },
            |err| error!("Audio stream error: {}", err),
            None,
        )
        .map_err(|e| Error::AudioInit(format!("build stream: {e}")))
}

/// Spread stereo `lr` pairs over a device buffer with `channels` slots per frame.
///
/// Mono devices get the left slot; channels past the second repeat it.
/// Slots that don't make up a whole frame are set to silence.
fn write_frames<T>(data: &mut [T], channels: usize, stereo: &[i16])
where
    T: SizedSample + FromSample<i16>,
{
    let channels = channels.max(1);
    let whole = data.len() / channels * channels;
    let (frames, tail) = data.split_at_mut(whole);

    for (out, lr) in frames.chunks_exact_mut(channels).zip(stereo.chunks_exact(2)) {
        for (ch, slot) in out.iter_mut().enumerate() {
            let value = if ch == 1 { lr[1] } else { lr[0] };
            *slot = T::from_sample(value);
        }
    }
    tail.fill(T::EQUILIBRIUM);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feeder(scratch: usize) -> Feeder {
        Feeder {
            oscillator: Oscillator::default(),
            scratch: vec![0; scratch],
            samples_per_second: 48_000,
        }
    }

    #[test]
    fn mono_takes_the_left_slot() {
        let mut data = [0i16; 3];
        write_frames(&mut data, 1, &[10, -10, 20, -20, 30, -30]);
        assert_eq!(data, [10, 20, 30]);
    }

    #[test]
    fn stereo_keeps_left_and_right() {
        let mut data = [0i16; 4];
        write_frames(&mut data, 2, &[1, 2, 3, 4]);
        assert_eq!(data, [1, 2, 3, 4]);
    }

    #[test]
    fn surround_repeats_left_past_the_second_channel() {
        let mut data = [0i16; 12];
        write_frames(&mut data, 6, &[5, 6, 7, 8]);
        assert_eq!(data, [5, 6, 5, 5, 5, 5, 7, 8, 7, 7, 7, 7]);
    }

    #[test]
    fn partial_frame_is_silenced() {
        let mut data = [9.0f32; 5];
        write_frames(&mut data, 2, &[i16::MAX, i16::MAX, i16::MAX, i16::MAX]);
        assert!(data[..4].iter().all(|&s| s > 0.99));
        assert_eq!(data[4], 0.0);
    }

    #[test]
    fn unsigned_devices_center_on_silence() {
        let mut data = [0u16; 3];
        write_frames(&mut data, 2, &[0, 0]);
        assert_eq!(data[0], u16::EQUILIBRIUM);
        assert_eq!(data[2], u16::EQUILIBRIUM);
    }

    #[test]
    fn render_grows_scratch_and_fills_stereo() {
        let mut feeder = feeder(4);
        let out = feeder.render(100).to_vec();

        assert_eq!(out.len(), 200);
        assert!(feeder.scratch.len() >= 200);
        assert_eq!(out[0], 0);
        assert!(out.chunks_exact(2).all(|lr| lr[0] == lr[1]));
        assert!(out.iter().any(|&s| s != 0));
        assert!(feeder.oscillator.phase() > 0.0);
    }

    #[test]
    fn render_falls_back_to_silence() {
        let mut feeder = feeder(8);
        feeder.samples_per_second = 100; // below the 256 Hz tone
        let out = feeder.render(4).to_vec();
        assert_eq!(out, vec![0; 8]);
    }
}
