// Platform-independent core: fills a framebuffer with a test pattern and an
// audio buffer with a sine tone. The platform owns every buffer.

pub mod error;
pub mod game;
pub mod gradient;
pub mod tone;
pub mod types;

pub use error::Error;
pub use game::{GameState, output_sound, update_and_render};
pub use gradient::{pattern_pixel, render_pattern};
pub use tone::{Oscillator, ToneConfig};
pub use types::{BYTES_PER_PIXEL, Bitmap, OffscreenBuffer, SoundBuffer};
