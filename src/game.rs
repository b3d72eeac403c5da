// Per-tick entry points the platform layer calls.
//
// Video and audio are separate calls on purpose: the window refresh and the
// audio device callback run on their own schedules (and usually threads).

use crate::error::Error;
use crate::gradient::render_pattern;
use crate::tone::Oscillator;
use crate::types::{OffscreenBuffer, SoundBuffer};

/// Render one frame of the static pattern (offsets 0,0).
pub fn update_and_render(buffer: &mut OffscreenBuffer<'_>) -> Result<(), Error> {
    render_pattern(buffer, 0, 0)
}

/// Fill one audio request. Call from whichever thread owns `oscillator`.
pub fn output_sound(oscillator: &mut Oscillator, buffer: &mut SoundBuffer<'_>) -> Result<(), Error> {
    oscillator.fill_audio(buffer)
}

/// Frame state for an animated pattern.
///
/// Each tick draws with the current offsets and then moves them by the step,
/// so zero steps give the same picture as [`update_and_render`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameState {
    pub blue_offset: i32,
    pub green_offset: i32,
    pub blue_step: i32,  // added to blue_offset after every frame
    pub green_step: i32, // added to green_offset after every frame
}

impl GameState {
    pub fn scrolling(blue_step: i32, green_step: i32) -> Self {
        Self {
            blue_step,
            green_step,
            ..Self::default()
        }
    }

    pub fn update_and_render(&mut self, buffer: &mut OffscreenBuffer<'_>) -> Result<(), Error> {
        render_pattern(buffer, self.blue_offset, self.green_offset)?;
        self.blue_offset = self.blue_offset.wrapping_add(self.blue_step);
        self.green_offset = self.green_offset.wrapping_add(self.green_step);
        Ok(())
    }
}
