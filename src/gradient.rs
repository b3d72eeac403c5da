// Procedural test pattern: blue ramps across each row, green ramps down the
// columns, both wrapping every 256 pixels.

use crate::error::Error;
use crate::types::{BYTES_PER_PIXEL, OffscreenBuffer};

/// Packed pixel for (x,y): 0x0000GGBB, red and alpha left at 0.
///
/// Each channel keeps only the low 8 bits of `coordinate + offset`, so any
/// offset (negative included) wraps modulo 256.
#[inline]
pub fn pattern_pixel(x: usize, y: usize, blue_offset: i32, green_offset: i32) -> u32 {
    let blue = (x as i64 + blue_offset as i64) & 0xFF;
    let green = (y as i64 + green_offset as i64) & 0xFF;
    ((green as u32) << 8) | blue as u32
}

/// Fill the visible area of `buffer` with the gradient.
///
/// Rows are addressed `y * pitch`, so padding after each row is left alone
/// and nothing past `pitch * height` is touched. A zero width or height
/// writes nothing.
pub fn render_pattern(
    buffer: &mut OffscreenBuffer<'_>,
    blue_offset: i32,
    green_offset: i32,
) -> Result<(), Error> {
    buffer.validate()?;

    let row_bytes = buffer.width * BYTES_PER_PIXEL;
    if row_bytes == 0 || buffer.height == 0 {
        return Ok(());
    }

    for (y, row) in buffer.memory.chunks_mut(buffer.pitch).take(buffer.height).enumerate() {
        for (x, px) in row[..row_bytes].chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
            px.copy_from_slice(&pattern_pixel(x, y, blue_offset, green_offset).to_ne_bytes());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bitmap;

    #[test]
    fn channels_wrap_at_256() {
        assert_eq!(pattern_pixel(255, 0, 0, 0), 0x0000_00FF);
        assert_eq!(pattern_pixel(256, 0, 0, 0), 0x0000_0000);
        assert_eq!(pattern_pixel(0, 300, 0, 0), 0x0000_2C00);
    }

    #[test]
    fn negative_offsets_wrap() {
        assert_eq!(pattern_pixel(0, 0, -1, -1), 0x0000_FFFF);
        assert_eq!(pattern_pixel(3, 2, -259, i32::MIN), 2 << 8);
    }

    #[test]
    fn large_offsets_do_not_overflow() {
        assert_eq!(pattern_pixel(1, 1, i32::MAX, i32::MAX), 0x0000_0000);
    }

    #[test]
    fn offsets_shift_the_pattern() {
        let mut bitmap = Bitmap::new(4, 3).unwrap();
        render_pattern(&mut bitmap.as_offscreen(), 10, 20).unwrap();
        assert_eq!(bitmap.pixel(0, 0), Some((20 << 8) | 10));
        assert_eq!(bitmap.pixel(3, 2), Some((22 << 8) | 13));
    }

    #[test]
    fn invalid_descriptor_writes_nothing() {
        let mut memory = vec![0xAAu8; 16];
        let mut buffer = OffscreenBuffer::new(&mut memory, 4, 2, 8);
        assert!(matches!(
            render_pattern(&mut buffer, 0, 0),
            Err(Error::InvalidDescriptor(_))
        ));
        assert!(memory.iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn zero_width_with_zero_pitch_is_a_no_op() {
        let mut memory: Vec<u8> = Vec::new();
        let mut buffer = OffscreenBuffer::new(&mut memory, 0, 5, 0);
        assert!(render_pattern(&mut buffer, 1, 1).is_ok());
    }
}
