//! The host drawing-surface boundary.
//!
//! The core never talks to a display directly. It resolves a surface by id
//! through a [`SurfaceResolver`] and then moves pixels through the handful
//! of region calls on [`HostSurface`]. Every call on a `HostSurface` is a host
//! round-trip and assumed to be expensive.
//!
//! Two hosts ship with the crate:
//! - [`MemoryHost`]: in-process surfaces with call statistics
//! - [`SdlHost`] (feature `sdl`): real windows backed by SDL2 textures

mod image_data;
mod memory;
#[cfg(feature = "sdl")]
mod sdl;

pub use image_data::{ImageData, ImageDataError, BYTES_PER_PIXEL};
pub use memory::{HostStats, MemoryHost, MemorySurface};
#[cfg(feature = "sdl")]
pub use sdl::{SdlHost, SdlSurface, WindowEvent};

use crate::error::{HostError, ResolveError};
use crate::geometry::Rect;

/// Finds live drawing surfaces by identifier.
pub trait SurfaceResolver {
    type Surface: HostSurface;

    fn resolve(&self, id: &str) -> Result<Self::Surface, ResolveError>;
}

/// A handle to one host drawing surface.
///
/// Region semantics follow a 2D canvas: reads outside the surface come back
/// transparent, writes are clipped, and resizing clears the content.
pub trait HostSurface {
    /// Current size in pixels as `(width, height)`.
    fn dimensions(&self) -> Result<(u32, u32), HostError>;

    /// Change the pixel size. Content is not preserved.
    fn set_dimensions(&mut self, width: u32, height: u32) -> Result<(), HostError>;

    /// Allocate a host image block of the given size.
    fn create_image_data(&self, width: u32, height: u32) -> Result<ImageData, HostError>;

    /// Read a rectangular region.
    fn get_image_data(&self, x: u32, y: u32, width: u32, height: u32)
        -> Result<ImageData, HostError>;

    /// Write `image` with its top-left corner at (x, y).
    fn put_image_data(&mut self, image: &ImageData, x: u32, y: u32) -> Result<(), HostError>;
}

/// Reject zero-sized regions the way a canvas does.
pub(crate) fn check_region(x: u32, y: u32, width: u32, height: u32) -> Result<(), HostError> {
    if width == 0 || height == 0 {
        return Err(HostError::InvalidRegion {
            x,
            y,
            width,
            height,
        });
    }
    Ok(())
}

/// Copy `region` out of a row-major RGBA store covering `surface`.
/// Parts of the region outside the surface stay transparent.
pub(crate) fn read_region(pixels: &[u8], surface: Rect, region: Rect) -> ImageData {
    let mut image = ImageData::new(region.width(), region.height());
    let Some(visible) = surface.intersection(&region) else {
        return image;
    };

    let len = visible.width() as usize * BYTES_PER_PIXEL;
    for row in visible.y()..visible.y() + visible.height() {
        let src = (row as usize * surface.width() as usize + visible.x() as usize)
            * BYTES_PER_PIXEL;
        let dst = ((row - region.y()) as usize * region.width() as usize
            + (visible.x() - region.x()) as usize)
            * BYTES_PER_PIXEL;
        image.data_mut()[dst..dst + len].copy_from_slice(&pixels[src..src + len]);
    }
    image
}

/// Copy `image` into a row-major RGBA store covering `surface`, placing its
/// top-left corner at (x, y). Pixels that land outside are dropped.
pub(crate) fn write_region(pixels: &mut [u8], surface: Rect, image: &ImageData, x: u32, y: u32) {
    let target = Rect::new(x, y, image.width(), image.height());
    let Some(visible) = surface.intersection(&target) else {
        return;
    };

    let len = visible.width() as usize * BYTES_PER_PIXEL;
    for row in visible.y()..visible.y() + visible.height() {
        let src = ((row - y) as usize * image.width() as usize + (visible.x() - x) as usize)
            * BYTES_PER_PIXEL;
        let dst = (row as usize * surface.width() as usize + visible.x() as usize)
            * BYTES_PER_PIXEL;
        pixels[dst..dst + len].copy_from_slice(&image.data()[src..src + len]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: u32, height: u32) -> Vec<u8> {
        (0..width * height * 4).map(|i| i as u8).collect()
    }

    #[test]
    fn read_region_copies_rows() {
        let surface = Rect::from_size(3, 3);
        let pixels = numbered(3, 3);
        let img = read_region(&pixels, surface, Rect::new(1, 1, 2, 2));
        // (1,1) is pixel index 4 -> bytes 16..20
        assert_eq!(img.pixel(0, 0), Some([16, 17, 18, 19]));
        // (2,2) is pixel index 8 -> bytes 32..36
        assert_eq!(img.pixel(1, 1), Some([32, 33, 34, 35]));
    }

    #[test]
    fn read_region_outside_is_transparent() {
        let surface = Rect::from_size(2, 2);
        let pixels = vec![255; 16];
        let img = read_region(&pixels, surface, Rect::new(1, 1, 2, 2));
        assert_eq!(img.pixel(0, 0), Some([255; 4]));
        assert_eq!(img.pixel(1, 0), Some([0; 4]));
        assert_eq!(img.pixel(1, 1), Some([0; 4]));

        let far = read_region(&pixels, surface, Rect::new(10, 10, 1, 1));
        assert_eq!(far.pixel(0, 0), Some([0; 4]));
    }

    #[test]
    fn write_region_clips_at_edges() {
        let surface = Rect::from_size(2, 2);
        let mut pixels = vec![0; 16];
        let img = ImageData::from_data(vec![9; 16], 2, 2).unwrap();
        write_region(&mut pixels, surface, &img, 1, 1);
        assert_eq!(&pixels[..12], &[0; 12]);
        assert_eq!(&pixels[12..], &[9; 4]);
    }

    #[test]
    fn zero_sized_regions_are_rejected() {
        assert!(check_region(0, 0, 0, 1).is_err());
        assert!(check_region(0, 0, 1, 0).is_err());
        assert!(check_region(5, 5, 1, 1).is_ok());
    }
}
