//! Grayscale image frames from the B-mode camera pipeline

use crate::error::{Error, Result};

/// An 8-bit grayscale image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFrame {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl ImageFrame {
    /// Create an image frame, validating the pixel buffer size
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .ok_or_else(|| Error::InvalidParameter("image dimensions overflow".into()))?;
        if pixels.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "image buffer is {} bytes, expected {}x{} = {}",
                pixels.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw pixel bytes, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Number of payload bytes
    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }
}
