//! Image encoding collaborator

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::error::Result;

/// Turns rendered pixels into file bytes
pub trait ImageEncoder {
    /// Encode the image
    fn encode(&self, image: &RgbaImage) -> Result<Vec<u8>>;
}

/// PNG encoding through the `image` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct PngEncoder;

impl ImageEncoder for PngEncoder {
    fn encode(&self, image: &RgbaImage) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}
