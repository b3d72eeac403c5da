// Buffer descriptors the platform layer lends to the core every tick.
// The core never allocates these; it only borrows them for one call.

use crate::error::Error;

/// One packed 32-bit pixel per framebuffer cell.
pub const BYTES_PER_PIXEL: usize = 4;

/// Framebuffer descriptor: a borrowed block of pixel memory plus its layout.
///
/// Rows start `pitch` bytes apart. Anything between `width * BYTES_PER_PIXEL`
/// and `pitch` is row padding and belongs to the platform.
#[derive(Debug)]
pub struct OffscreenBuffer<'a> {
    pub memory: &'a mut [u8],  // at least pitch * height bytes
    pub width: usize,          // visible pixels per row
    pub height: usize,         // number of rows
    pub pitch: usize,          // byte stride between row starts
    pub bytes_per_pixel: usize, // must be BYTES_PER_PIXEL
}

impl<'a> OffscreenBuffer<'a> {
    /// Describe `memory` as a `width` x `height` framebuffer with the given stride.
    pub fn new(memory: &'a mut [u8], width: usize, height: usize, pitch: usize) -> Self {
        Self {
            memory,
            width,
            height,
            pitch,
            bytes_per_pixel: BYTES_PER_PIXEL,
        }
    }

    /// Check the layout before anything is written through it.
    pub fn validate(&self) -> Result<(), Error> {
        if self.bytes_per_pixel != BYTES_PER_PIXEL {
            return Err(Error::InvalidDescriptor(format!(
                "bytes_per_pixel is {}, expected {BYTES_PER_PIXEL}",
                self.bytes_per_pixel
            )));
        }

        let row_bytes = self
            .width
            .checked_mul(BYTES_PER_PIXEL)
            .ok_or_else(|| Error::InvalidDescriptor(format!("width {} overflows", self.width)))?;
        if self.pitch < row_bytes {
            return Err(Error::InvalidDescriptor(format!(
                "pitch {} is smaller than a row of {row_bytes} bytes",
                self.pitch
            )));
        }

        let needed = self.pitch.checked_mul(self.height).ok_or_else(|| {
            Error::InvalidDescriptor(format!("pitch {} x height {} overflows", self.pitch, self.height))
        })?;
        if self.memory.len() < needed {
            return Err(Error::InvalidDescriptor(format!(
                "memory holds {} bytes, layout needs {needed}",
                self.memory.len()
            )));
        }

        Ok(())
    }

    /// Read the packed pixel at (x,y), or None outside the visible area.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        read_pixel(self.memory, self.width, self.height, self.pitch, x, y)
    }
}

/// Audio buffer descriptor: interleaved stereo i16 slots (L, R, L, R, ...).
#[derive(Debug)]
pub struct SoundBuffer<'a> {
    pub samples: &'a mut [i16], // at least sample_count * 2 slots
    pub sample_count: usize,    // stereo frames to fill, not raw slots
    pub samples_per_second: u32,
}

impl<'a> SoundBuffer<'a> {
    /// Wrap `samples` so that every slot gets filled.
    pub fn new(samples: &'a mut [i16], samples_per_second: u32) -> Self {
        let sample_count = samples.len() / 2;
        Self {
            samples,
            sample_count,
            samples_per_second,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.samples_per_second == 0 {
            return Err(Error::InvalidDescriptor("samples_per_second is 0".into()));
        }
        let slots = self.sample_count.checked_mul(2).ok_or_else(|| {
            Error::InvalidDescriptor(format!("sample_count {} overflows", self.sample_count))
        })?;
        if self.samples.len() < slots {
            return Err(Error::InvalidDescriptor(format!(
                "{} sample slots cannot hold {} stereo frames",
                self.samples.len(),
                self.sample_count
            )));
        }
        Ok(())
    }
}

/// Owned pixel memory the platform keeps alive between frames.
/// Lends itself to the core as an `OffscreenBuffer` once per tick.
#[derive(Clone, Debug)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pitch: usize,
    memory: Vec<u8>,
}

impl Bitmap {
    /// Tightly packed rows (pitch = width * 4).
    pub fn new(width: usize, height: usize) -> Result<Self, Error> {
        let pitch = width
            .checked_mul(BYTES_PER_PIXEL)
            .ok_or_else(|| Error::InvalidDescriptor(format!("width {width} overflows")))?;
        Self::with_pitch(width, height, pitch)
    }

    /// Rows padded out to `pitch` bytes, as some platform surfaces require.
    pub fn with_pitch(width: usize, height: usize, pitch: usize) -> Result<Self, Error> {
        let row_bytes = width
            .checked_mul(BYTES_PER_PIXEL)
            .ok_or_else(|| Error::InvalidDescriptor(format!("width {width} overflows")))?;
        if pitch < row_bytes {
            return Err(Error::InvalidDescriptor(format!(
                "pitch {pitch} is smaller than a row of {row_bytes} bytes"
            )));
        }
        let len = pitch.checked_mul(height).ok_or_else(|| {
            Error::InvalidDescriptor(format!("pitch {pitch} x height {height} overflows"))
        })?;
        Ok(Self {
            width,
            height,
            pitch,
            memory: vec![0; len],
        })
    }

    /// Visible pixels per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Byte stride between row starts (>= width * 4).
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Raw bytes, padding included.
    pub fn bytes(&self) -> &[u8] {
        &self.memory
    }

    /// Borrow the memory as a descriptor for one core call.
    pub fn as_offscreen(&mut self) -> OffscreenBuffer<'_> {
        OffscreenBuffer::new(&mut self.memory, self.width, self.height, self.pitch)
    }

    /// Read the packed pixel at (x,y), or None outside the visible area.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        read_pixel(&self.memory, self.width, self.height, self.pitch, x, y)
    }

    /// Repack the visible pixels into `out` as one u32 per pixel, no padding.
    /// minifb reads each word as 0x00RRGGBB, which is exactly our packing.
    pub fn copy_to_xrgb(&self, out: &mut Vec<u32>) {
        out.clear();
        out.reserve(self.width * self.height);
        let row_bytes = self.width * BYTES_PER_PIXEL;
        if row_bytes == 0 {
            return;
        }
        for row in self.memory.chunks(self.pitch).take(self.height) {
            out.extend(
                row[..row_bytes]
                    .chunks_exact(BYTES_PER_PIXEL)
                    .map(|px| u32::from_ne_bytes([px[0], px[1], px[2], px[3]])),
            );
        }
    }
}

#[inline]
fn read_pixel(
    memory: &[u8],
    width: usize,
    height: usize,
    pitch: usize,
    x: usize,
    y: usize,
) -> Option<u32> {
    if x >= width || y >= height {
        return None;
    }
    let idx = y * pitch + x * BYTES_PER_PIXEL;
    let px = memory.get(idx..idx + BYTES_PER_PIXEL)?;
    Some(u32::from_ne_bytes([px[0], px[1], px[2], px[3]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_pitch() {
        let mut memory = vec![0u8; 64];
        let buffer = OffscreenBuffer::new(&mut memory, 4, 2, 12);
        assert!(matches!(buffer.validate(), Err(Error::InvalidDescriptor(_))));
    }

    #[test]
    fn rejects_short_memory() {
        let mut memory = vec![0u8; 31];
        let buffer = OffscreenBuffer::new(&mut memory, 4, 2, 16);
        assert!(matches!(buffer.validate(), Err(Error::InvalidDescriptor(_))));
    }

    #[test]
    fn rejects_wrong_pixel_size() {
        let mut memory = vec![0u8; 32];
        let mut buffer = OffscreenBuffer::new(&mut memory, 4, 2, 16);
        buffer.bytes_per_pixel = 3;
        assert!(buffer.validate().is_err());
    }

    #[test]
    fn accepts_padded_rows() {
        let mut memory = vec![0u8; 40];
        memory[20..24].copy_from_slice(&7u32.to_ne_bytes());
        let buffer = OffscreenBuffer::new(&mut memory, 4, 2, 20);
        assert!(buffer.validate().is_ok());
        assert_eq!(buffer.pixel(0, 1), Some(7));
        assert_eq!(buffer.pixel(4, 0), None);
    }

    #[test]
    fn sound_buffer_needs_two_slots_per_frame() {
        let mut samples = vec![0i16; 7];
        let mut sound = SoundBuffer::new(&mut samples, 48_000);
        assert_eq!(sound.sample_count, 3);
        assert!(sound.validate().is_ok());

        sound.sample_count = 4;
        assert!(matches!(sound.validate(), Err(Error::InvalidDescriptor(_))));
    }

    #[test]
    fn sound_buffer_needs_a_rate() {
        let mut samples = vec![0i16; 8];
        let sound = SoundBuffer::new(&mut samples, 0);
        assert!(sound.validate().is_err());
    }

    #[test]
    fn bitmap_with_pitch_checks_stride() {
        assert!(Bitmap::with_pitch(10, 2, 39).is_err());
        let bitmap = Bitmap::with_pitch(10, 2, 48).unwrap();
        assert_eq!(bitmap.bytes().len(), 96);
        assert_eq!(bitmap.pitch(), 48);
    }

    #[test]
    fn bitmap_sizes_that_overflow_are_errors() {
        assert!(matches!(
            Bitmap::with_pitch(usize::MAX / 2, 1, 16),
            Err(Error::InvalidDescriptor(_))
        ));
        assert!(matches!(
            Bitmap::with_pitch(1, usize::MAX / 2, 16),
            Err(Error::InvalidDescriptor(_))
        ));
        assert!(matches!(Bitmap::new(usize::MAX / 2, 1), Err(Error::InvalidDescriptor(_))));
        assert!(matches!(Bitmap::new(4, usize::MAX / 8), Err(Error::InvalidDescriptor(_))));
    }

    #[test]
    fn bitmap_new_packs_rows_tightly() {
        let bitmap = Bitmap::new(3, 2).unwrap();
        assert_eq!(bitmap.pitch(), 12);
        assert_eq!(bitmap.bytes().len(), 24);
    }

    #[test]
    fn copy_to_xrgb_skips_padding() {
        let mut bitmap = Bitmap::with_pitch(2, 2, 12).unwrap();
        {
            let mut buffer = bitmap.as_offscreen();
            let values = [0x0000_0001u32, 0x0000_0002, 0xDEAD_BEEF, 0x0000_0003, 0x0000_0004, 0xDEAD_BEEF];
            for (chunk, v) in buffer.memory.chunks_exact_mut(4).zip(values) {
                chunk.copy_from_slice(&v.to_ne_bytes());
            }
        }
        let mut out = Vec::new();
        bitmap.copy_to_xrgb(&mut out);
        assert_eq!(out, vec![1, 2, 3, 4]);
        assert_eq!(bitmap.pixel(1, 1), Some(4));
        assert_eq!(bitmap.pixel(2, 1), None);
    }
}
