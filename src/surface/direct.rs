//! Unbuffered access to a host surface.

use image::RgbaImage;

use super::Surface;
use crate::color::Color;
use crate::error::{HostError, SurfaceError};
use crate::geometry::Rect;
use crate::host::{HostSurface, SurfaceResolver};

/// A host surface with per-pixel get/set and no local caching.
///
/// Every [`get`](Surface::get) and [`set`](Surface::set) is a host
/// round-trip. Coordinates are not checked here: reads outside the extent
/// and clipped writes behave however the host behaves. For the bundled
/// hosts that means transparent reads and dropped writes.
pub struct DirectSurface<H> {
    host: H,
    extent: Rect,
}

impl<H: HostSurface> DirectSurface<H> {
    /// Resolve `id` and record the surface's current size.
    pub fn lookup<R>(resolver: &R, id: &str) -> Result<Self, SurfaceError>
    where
        R: SurfaceResolver<Surface = H>,
    {
        let host = resolver.resolve(id)?;
        let surface = Self::from_host(host)?;
        log::debug!("resolved surface '{}' with extent {}", id, surface.extent);
        Ok(surface)
    }

    /// Wrap an already-resolved handle.
    pub fn from_host(host: H) -> Result<Self, SurfaceError> {
        let (width, height) = host.dimensions()?;
        Ok(Self {
            host,
            extent: Rect::from_size(width, height),
        })
    }

    /// The last-known extent. Only `lookup` and `resize` refresh it.
    pub fn extent(&self) -> Rect {
        self.extent
    }

    /// Resize the host surface. Its content does not survive.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        self.host.set_dimensions(width, height)?;
        self.extent = Rect::from_size(width, height);
        log::debug!("resized surface to {}", self.extent);
        Ok(())
    }

    /// Read the whole extent in a single host call.
    pub fn capture(&self) -> Result<RgbaImage, SurfaceError> {
        let (width, height) = (self.extent.width(), self.extent.height());
        let data = self.host.get_image_data(0, 0, width, height)?;
        RgbaImage::from_raw(width, height, data.into_data()).ok_or_else(|| {
            SurfaceError::Host(HostError::Backend(
                "host returned a short pixel region".to_string(),
            ))
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}

impl<H: HostSurface> Surface for DirectSurface<H> {
    fn bounds(&self) -> Rect {
        self.extent
    }

    /// Decoded at 8-bit precision: sub-byte detail never comes back.
    fn get(&self, x: u32, y: u32) -> Result<Color, SurfaceError> {
        let data = self.host.get_image_data(x, y, 1, 1)?;
        let rgba = data.pixel(0, 0).ok_or_else(|| {
            SurfaceError::Host(HostError::Backend(
                "host returned an empty pixel region".to_string(),
            ))
        })?;
        Ok(Color::from(rgba))
    }

    fn set(&mut self, x: u32, y: u32, color: Color) -> Result<(), SurfaceError> {
        let mut data = self.host.create_image_data(1, 1)?;
        data.install(&color.to_rgba8())?;
        log::trace!("put pixel ({}, {}) = {:?}", x, y, color);
        self.host.put_image_data(&data, x, y)?;
        Ok(())
    }
}
