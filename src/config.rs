// Command-line settings for the platform stub.

use std::path::PathBuf;

use clap::Parser;

use handmade::{Error, ToneConfig};

#[derive(Parser, Debug)]
#[command(name = "handmade")]
#[command(author, version, about = "Procedural gradient and sine tone in a window")]
pub struct Args {
    /// Framebuffer width in pixels
    #[arg(long, default_value_t = 960)]
    pub width: usize,

    /// Framebuffer height in pixels
    #[arg(long, default_value_t = 540)]
    pub height: usize,

    /// Row stride in bytes (defaults to width * 4)
    #[arg(long)]
    pub pitch: Option<usize>,

    /// Window scale factor: 1, 2 or 4
    #[arg(long, short = 's', default_value_t = 1)]
    pub scale: u32,

    /// Target frames per second
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Tone frequency in Hz
    #[arg(long, default_value_t = handmade::tone::DEFAULT_TONE_HZ)]
    pub tone_hz: u32,

    /// Peak sample amplitude of the tone
    #[arg(long, default_value_t = handmade::tone::DEFAULT_TONE_VOLUME)]
    pub tone_volume: i16,

    /// Blue offset added every frame (scrolls the pattern sideways)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub blue_step: i32,

    /// Green offset added every frame (scrolls the pattern vertically)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub green_step: i32,

    /// Render this many frames without opening a window, then exit
    #[arg(long, value_name = "FRAMES")]
    pub headless: Option<u32>,

    /// Save the last rendered frame as PNG (F12 saves one while running)
    #[arg(long, value_name = "PATH")]
    pub screenshot: Option<PathBuf>,

    /// Sample rate used for headless audio
    #[arg(long, default_value_t = 48_000)]
    pub sample_rate: u32,

    /// Do not open an audio stream
    #[arg(long)]
    pub mute: bool,
}

impl Args {
    pub fn tone(&self) -> Result<ToneConfig, Error> {
        let tone = ToneConfig {
            tone_hz: self.tone_hz,
            tone_volume: self.tone_volume,
        };
        tone.validate()?;
        Ok(tone)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidParameter(format!(
                "window size {}x{} is empty",
                self.width, self.height
            )));
        }
        if self.fps == 0 {
            return Err(Error::InvalidParameter("fps must be non-zero".into()));
        }
        if self.sample_rate == 0 {
            return Err(Error::InvalidParameter("sample_rate must be non-zero".into()));
        }
        if !matches!(self.scale, 1 | 2 | 4) {
            return Err(Error::InvalidParameter(format!(
                "scale {} is not one of 1, 2, 4",
                self.scale
            )));
        }
        self.tone()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let args = Args::parse_from(["handmade"]);
        assert!(args.validate().is_ok());
        assert_eq!(args.tone().unwrap(), ToneConfig::default());
        assert_eq!(args.pitch, None);
    }

    #[test]
    fn zero_tone_is_rejected() {
        let args = Args::parse_from(["handmade", "--tone-hz", "0"]);
        assert!(matches!(args.validate(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn negative_steps_parse() {
        let args = Args::parse_from(["handmade", "--blue-step", "-3", "--headless", "10"]);
        assert_eq!(args.blue_step, -3);
        assert_eq!(args.headless, Some(10));
    }

    #[test]
    fn odd_scale_is_rejected() {
        let args = Args::parse_from(["handmade", "--scale", "3"]);
        assert!(args.validate().is_err());
    }
}
