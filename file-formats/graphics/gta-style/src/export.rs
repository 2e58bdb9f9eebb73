//! PNG output for rendered surfaces

use std::io::Cursor;
use std::path::Path;

use ::image::error::ImageError;
use ::image::{ImageFormat, RgbaImage};
use thiserror::Error;

use crate::render::Surface;

/// Errors that can occur while exporting images
#[derive(Debug, Error)]
pub enum ExportError {
    /// The surface buffer does not match its dimensions
    #[error("Surface is {0}x{1} but holds {2} bytes")]
    MismatchSizes(u32, u32, usize),
    /// Encoding or writing the image failed
    #[error("Image error: {0}")]
    Image(#[from] ImageError),
}

impl Surface {
    pub fn to_image(&self) -> Result<RgbaImage, ExportError> {
        RgbaImage::from_raw(self.width, self.height, self.rgba.clone())
            .ok_or(ExportError::MismatchSizes(self.width, self.height, self.rgba.len()))
    }

    /// PNG-encoded bytes
    pub fn to_png(&self) -> Result<Vec<u8>, ExportError> {
        let mut bytes = Vec::new();
        self.to_image()?
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        self.to_image()?.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}
