//! Pixel-addressable drawing surfaces.
//!
//! - [`DirectSurface`]: every get/set is a host round-trip
//! - [`BufferedSurface`]: get/set hit an in-memory buffer that is flushed to
//!   the host in one bulk [`synchronize`](BufferedSurface::synchronize)

mod buffered;
mod direct;

pub use buffered::{BufferedSurface, PixelBuffer};
pub use direct::DirectSurface;

use crate::color::Color;
use crate::error::SurfaceError;
use crate::geometry::Rect;

/// Anything that can be drawn into pixel by pixel.
///
/// Implemented by both surface kinds so drawing code can take either one,
/// generically or as `&mut dyn Surface`.
pub trait Surface {
    /// The addressable area. Valid coordinates satisfy `bounds().contains(x, y)`.
    fn bounds(&self) -> Rect;

    fn get(&self, x: u32, y: u32) -> Result<Color, SurfaceError>;

    fn set(&mut self, x: u32, y: u32, color: Color) -> Result<(), SurfaceError>;
}
