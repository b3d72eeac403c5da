// Window that shows the framebuffer the core just filled.
// minifb wants one 0x00RRGGBB word per pixel; `Bitmap::copy_to_xrgb` produces that.

use handmade::{Bitmap, Error};
use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};

/// The on-screen window plus the scratch pixels handed to it each frame.
pub struct Drawer {
    window: Window,
    pixels: Vec<u32>, // tightly packed copy of the bitmap, reused every frame
}

impl Drawer {
    /// Open a window sized to the framebuffer, optionally scaled up.
    pub fn new(title: &str, width: usize, height: usize, scale: u32, fps: u32) -> Result<Self, Error> {
        let scale = match scale {
            2 => Scale::X2,
            4 => Scale::X4,
            _ => Scale::X1,
        };
        let options = WindowOptions {
            scale,
            ..WindowOptions::default()
        };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(fps as usize);

        Ok(Self {
            window,
            pixels: Vec::with_capacity(width * height),
        })
    }

    /// Push this frame to the screen. Also pumps the window's event queue.
    pub fn present(&mut self, bitmap: &Bitmap) -> Result<(), Error> {
        bitmap.copy_to_xrgb(&mut self.pixels);
        self.window
            .update_with_buffer(&self.pixels, bitmap.width(), bitmap.height())
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (the main loop exits on it).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// True once per F12 press; holding the key does not repeat.
    /// The main loop saves a PNG screenshot when this fires.
    pub fn f12_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::F12, KeyRepeat::No)
    }
}
