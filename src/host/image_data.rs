//! Wire-format pixel blocks exchanged with a host surface.

use std::fmt;

/// Bytes per pixel in the wire format (R, G, B, A).
pub const BYTES_PER_PIXEL: usize = 4;

/// A `width x height` block of RGBA8 pixels in row-major order.
///
/// This is the unit of every host read and write. Row `y` starts at byte
/// `y * width * 4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl ImageData {
    /// Allocate a zeroed (transparent black) block.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0; byte_len(width, height)],
            width,
            height,
        }
    }

    /// Wrap existing bytes. The length must be exactly `width * height * 4`.
    pub fn from_data(data: Vec<u8>, width: u32, height: u32) -> Result<Self, ImageDataError> {
        let expected = byte_len(width, height);
        if data.len() != expected {
            return Err(ImageDataError::InvalidDataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Replace the whole block with `bytes`, which must cover it exactly.
    pub fn install(&mut self, bytes: &[u8]) -> Result<(), ImageDataError> {
        if bytes.len() != self.data.len() {
            return Err(ImageDataError::InvalidDataLength {
                expected: self.data.len(),
                actual: bytes.len(),
            });
        }
        self.data.copy_from_slice(bytes);
        Ok(())
    }

    /// The RGBA bytes at (x, y), or `None` outside the block.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[idx..idx + BYTES_PER_PIXEL]);
        Some(px)
    }
}

fn byte_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * BYTES_PER_PIXEL
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageDataError {
    InvalidDataLength { expected: usize, actual: usize },
}

impl fmt::Display for ImageDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDataLength { expected, actual } => {
                write!(f, "invalid data length: expected {}, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for ImageDataError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_block_is_transparent() {
        let img = ImageData::new(3, 2);
        assert_eq!(img.data().len(), 24);
        assert_eq!(img.pixel(2, 1), Some([0, 0, 0, 0]));
        assert_eq!(img.pixel(3, 0), None);
    }

    #[test]
    fn from_data_checks_length() {
        let err = ImageData::from_data(vec![0; 7], 1, 2).unwrap_err();
        assert_eq!(
            err,
            ImageDataError::InvalidDataLength {
                expected: 8,
                actual: 7
            }
        );
        assert!(ImageData::from_data(vec![0; 8], 1, 2).is_ok());
    }

    #[test]
    fn install_replaces_contents() {
        let mut img = ImageData::new(2, 1);
        img.install(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(img.pixel(1, 0), Some([5, 6, 7, 8]));
        assert!(img.install(&[0; 4]).is_err());
    }
}
