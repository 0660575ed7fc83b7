// Saves the canvas you are looking at as a PNG (the `P` key).

use crate::error::Error;
use crate::types::Canvas;
use image::{ImageBuffer, Rgb, RgbImage};
use log::info;
use std::path::Path;

/// Unpack 0x00RRGGBB pixels into an RGB image of the same size.
pub fn to_rgb_image(canvas: &Canvas) -> RgbImage {
    ImageBuffer::from_fn(canvas.width as u32, canvas.height as u32, |x, y| {
        let px = canvas.pixel(x as usize, y as usize).unwrap_or(0);
        Rgb([(px >> 16) as u8, (px >> 8) as u8, px as u8])
    })
}

pub fn save_png(canvas: &Canvas, path: &Path) -> Result<(), Error> {
    to_rgb_image(canvas)
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| Error::Export(format!("{}: {e}", path.display())))?;
    info!("saved plot to {}", path.display());
    Ok(())
}
