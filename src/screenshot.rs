// PNG export of the framebuffer, for checking the pattern without a window.

use std::path::Path;

use handmade::{Bitmap, Error};
use image::{ImageBuffer, Rgb, RgbImage};

/// Unpack 0x00RRGGBB pixels into an RGB image.
pub fn to_image(bitmap: &Bitmap) -> Result<RgbImage, Error> {
    let width = u32::try_from(bitmap.width())
        .map_err(|_| Error::Screenshot(format!("width {} too large", bitmap.width())))?;
    let height = u32::try_from(bitmap.height())
        .map_err(|_| Error::Screenshot(format!("height {} too large", bitmap.height())))?;

    Ok(ImageBuffer::from_fn(width, height, |x, y| {
        let px = bitmap.pixel(x as usize, y as usize).unwrap_or(0);
        Rgb([(px >> 16) as u8, (px >> 8) as u8, px as u8])
    }))
}

pub fn save_png(bitmap: &Bitmap, path: &Path) -> Result<(), Error> {
    to_image(bitmap)?
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| Error::Screenshot(format!("{}: {e}", path.display())))
}
