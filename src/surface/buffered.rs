//! Double-buffered host surface.
//!
//! Drawing goes into a [`PixelBuffer`] owned by the surface. Nothing reaches
//! the host until [`BufferedSurface::synchronize`], which serializes the
//! whole buffer and hands it over with a constant number of host calls,
//! however many pixels changed.

use image::{ImageBuffer, Rgba, RgbaImage};

use super::{DirectSurface, Surface};
use crate::color::Color;
use crate::error::SurfaceError;
use crate::geometry::Rect;
use crate::host::{HostSurface, SurfaceResolver, BYTES_PER_PIXEL};

/// In-memory pixels at full 16-bit channel precision.
pub type PixelBuffer = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// A [`DirectSurface`] with an in-memory back buffer.
///
/// The buffer is sized from the host when the surface is created. Resizing
/// through [`resize`](Self::resize) keeps the two in step. A resize made
/// through some other handle to the same host surface is not noticed, and
/// `synchronize` keeps writing the old extent.
pub struct BufferedSurface<H> {
    direct: DirectSurface<H>,
    buffer: PixelBuffer,
}

impl<H: HostSurface> BufferedSurface<H> {
    /// Resolve `id` and allocate a transparent buffer matching its size.
    pub fn create<R>(resolver: &R, id: &str) -> Result<Self, SurfaceError>
    where
        R: SurfaceResolver<Surface = H>,
    {
        Ok(Self::from_direct(DirectSurface::lookup(resolver, id)?))
    }

    pub fn from_direct(direct: DirectSurface<H>) -> Self {
        let extent = direct.extent();
        Self {
            buffer: PixelBuffer::new(extent.width(), extent.height()),
            direct,
        }
    }

    /// The wrapped unbuffered surface. Reads through it see the host, not
    /// this buffer.
    pub fn direct(&self) -> &DirectSurface<H> {
        &self.direct
    }

    pub fn direct_mut(&mut self) -> &mut DirectSurface<H> {
        &mut self.direct
    }

    pub fn into_direct(self) -> DirectSurface<H> {
        self.direct
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Fill the whole buffer with one color.
    pub fn clear(&mut self, color: Color) {
        let px: Rgba<u16> = color.into();
        for p in self.buffer.pixels_mut() {
            *p = px;
        }
    }

    /// Resize the host surface and reallocate the buffer to match.
    /// Previous buffer content is discarded, as it is on the host.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        self.direct.resize(width, height)?;
        self.buffer = PixelBuffer::new(width, height);
        Ok(())
    }

    /// The buffer serialized to wire format, row-major, 4 bytes per pixel.
    pub fn wire_bytes(&self) -> Vec<u8> {
        let (width, height) = self.buffer.dimensions();
        let stride = width as usize * BYTES_PER_PIXEL;
        let mut bytes = vec![0u8; stride * height as usize];

        for row in 0..height {
            for column in 0..width {
                let color = Color::from(*self.buffer.get_pixel(column, row));
                let base = row as usize * stride + column as usize * BYTES_PER_PIXEL;
                bytes[base..base + BYTES_PER_PIXEL].copy_from_slice(&color.to_rgba8());
            }
        }
        bytes
    }

    /// The buffer at wire precision, without touching the host.
    pub fn snapshot(&self) -> RgbaImage {
        let (width, height) = self.buffer.dimensions();
        RgbaImage::from_fn(width, height, |x, y| {
            Color::from(*self.buffer.get_pixel(x, y)).into()
        })
    }

    /// Copy the entire buffer to the host surface at (0, 0).
    ///
    /// Costs one image allocation and one region write on the host,
    /// independent of the surface size. An empty buffer is a no-op.
    pub fn synchronize(&mut self) -> Result<(), SurfaceError> {
        let (width, height) = self.buffer.dimensions();
        if width == 0 || height == 0 {
            log::debug!("skipping synchronize of empty surface");
            return Ok(());
        }

        let bytes = self.wire_bytes();
        let host = self.direct.host_mut();
        let mut image = host.create_image_data(width, height)?;
        image.install(&bytes)?;
        host.put_image_data(&image, 0, 0)?;

        log::debug!(
            "synchronized {}x{} surface ({} bytes)",
            width,
            height,
            bytes.len()
        );
        Ok(())
    }

    fn check(&self, x: u32, y: u32) -> Result<(), SurfaceError> {
        let bounds = self.bounds();
        if bounds.contains(x, y) {
            Ok(())
        } else {
            Err(SurfaceError::OutOfBounds { x, y, bounds })
        }
    }
}

impl<H: HostSurface> Surface for BufferedSurface<H> {
    /// The buffer's extent, which is fixed between resizes.
    fn bounds(&self) -> Rect {
        let (width, height) = self.buffer.dimensions();
        Rect::from_size(width, height)
    }

    fn get(&self, x: u32, y: u32) -> Result<Color, SurfaceError> {
        self.check(x, y)?;
        Ok(Color::from(*self.buffer.get_pixel(x, y)))
    }

    fn set(&mut self, x: u32, y: u32, color: Color) -> Result<(), SurfaceError> {
        self.check(x, y)?;
        self.buffer.put_pixel(x, y, color.into());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostError;
    use crate::host::{MemoryHost, MemorySurface};

    fn setup(width: u32, height: u32) -> (MemoryHost, MemorySurface) {
        let mut host = MemoryHost::new();
        let handle = host.add_surface("screen", width, height);
        (host, handle)
    }

    /// A distinct color per coordinate, with low bytes set so truncation
    /// is visible.
    fn distinct(x: u32, y: u32) -> Color {
        Color::new(
            ((x as u16) << 8) | 0xFF,
            ((y as u16) << 8) | 0x7F,
            ((((x + y * 16) & 0xFF) as u16) << 8) | 0x01,
            0xFFFF,
        )
    }

    fn paint_distinct(surface: &mut BufferedSurface<MemorySurface>) {
        let bounds = surface.bounds();
        for y in 0..bounds.height() {
            for x in 0..bounds.width() {
                surface.set(x, y, distinct(x, y)).unwrap();
            }
        }
    }

    #[test]
    fn fresh_buffer_is_transparent() {
        let (host, _handle) = setup(5, 3);
        let surface = BufferedSurface::create(&host, "screen").unwrap();

        assert_eq!(surface.bounds(), Rect::from_size(5, 3));
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(surface.get(x, y).unwrap(), Color::TRANSPARENT);
            }
        }
    }

    #[test]
    fn get_returns_full_precision() {
        let (host, _handle) = setup(2, 2);
        let mut surface = BufferedSurface::create(&host, "screen").unwrap();
        let color = Color::new(0x1234, 0x5678, 0x9ABC, 0xDEF0);

        surface.set(1, 1, color).unwrap();
        assert_eq!(surface.get(1, 1).unwrap(), color);
    }

    #[test]
    fn writes_stay_local_until_synchronize() {
        let (host, handle) = setup(3, 3);
        let mut surface = BufferedSurface::create(&host, "screen").unwrap();
        let probe = DirectSurface::lookup(&host, "screen").unwrap();
        handle.reset_stats();

        paint_distinct(&mut surface);
        assert_eq!(handle.stats().round_trips(), 0);
        assert_eq!(handle.pixels(), vec![0; 36]);
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(probe.get(x, y).unwrap(), Color::TRANSPARENT);
            }
        }
    }

    #[test]
    fn synchronize_materializes_every_pixel() {
        let (host, _handle) = setup(6, 5);
        let mut surface = BufferedSurface::create(&host, "screen").unwrap();
        let probe = DirectSurface::lookup(&host, "screen").unwrap();

        paint_distinct(&mut surface);
        surface.synchronize().unwrap();

        for y in 0..5 {
            for x in 0..6 {
                assert_eq!(probe.get(x, y).unwrap(), distinct(x, y).quantize());
            }
        }
    }

    #[test]
    fn non_square_surface_uses_width_as_stride() {
        let (host, handle) = setup(4, 2);
        let mut surface = BufferedSurface::create(&host, "screen").unwrap();
        let probe = DirectSurface::lookup(&host, "screen").unwrap();

        paint_distinct(&mut surface);
        surface.synchronize().unwrap();

        for y in 0..2 {
            for x in 0..4 {
                assert_eq!(
                    probe.get(x, y).unwrap().to_rgba8(),
                    distinct(x, y).to_rgba8(),
                    "pixel ({}, {}) landed in the wrong place",
                    x,
                    y
                );
            }
        }

        // Byte layout: pixel (x, y) starts at (y * 4 + x) * 4.
        let raw = handle.pixels();
        let (x, y, width) = (3, 1, 4);
        let offset = (y * width + x) * 4;
        assert_eq!(&raw[offset..offset + 4], &distinct(3, 1).to_rgba8());
    }

    #[test]
    fn tall_surface_uses_width_as_stride() {
        let (host, _handle) = setup(2, 5);
        let mut surface = BufferedSurface::create(&host, "screen").unwrap();
        paint_distinct(&mut surface);
        surface.synchronize().unwrap();

        let image = surface.direct().capture().unwrap();
        assert_eq!(image, surface.snapshot());
    }

    #[test]
    fn synchronize_is_constant_host_traffic() {
        let (host, handle) = setup(64, 48);
        let mut surface = BufferedSurface::create(&host, "screen").unwrap();
        paint_distinct(&mut surface);
        handle.reset_stats();

        surface.synchronize().unwrap();
        let stats = handle.stats();
        assert_eq!(stats.creates, 1);
        assert_eq!(stats.writes, 1);
        assert_eq!(stats.round_trips(), 2);
    }

    #[test]
    fn repeated_synchronize_is_idempotent() {
        let (host, handle) = setup(4, 3);
        let mut surface = BufferedSurface::create(&host, "screen").unwrap();
        paint_distinct(&mut surface);

        surface.synchronize().unwrap();
        let first = handle.pixels();
        surface.synchronize().unwrap();
        assert_eq!(handle.pixels(), first);
    }

    #[test]
    fn synchronize_overwrites_direct_writes() {
        let (host, _handle) = setup(2, 2);
        let mut surface = BufferedSurface::create(&host, "screen").unwrap();
        let mut probe = DirectSurface::lookup(&host, "screen").unwrap();

        probe.set(0, 0, Color::from_argb(0xFFFF0000)).unwrap();
        surface.synchronize().unwrap();
        assert_eq!(probe.get(0, 0).unwrap(), Color::TRANSPARENT);
    }

    #[test]
    fn wire_bytes_truncate_channels() {
        let (host, _handle) = setup(2, 1);
        let mut surface = BufferedSurface::create(&host, "screen").unwrap();
        surface.set(1, 0, Color::new(0, 255, 256, 65280)).unwrap();
        surface.set(0, 0, Color::new(65535, 0, 0, 0)).unwrap();

        assert_eq!(surface.wire_bytes(), vec![255, 0, 0, 0, 0, 0, 1, 255]);
    }

    #[test]
    fn out_of_bounds_access_fails_fast() {
        let (host, _handle) = setup(4, 2);
        let mut surface = BufferedSurface::create(&host, "screen").unwrap();
        let bounds = Rect::from_size(4, 2);

        assert_eq!(
            surface.get(4, 0),
            Err(SurfaceError::OutOfBounds { x: 4, y: 0, bounds })
        );
        assert_eq!(
            surface.set(0, 2, Color::TRANSPARENT),
            Err(SurfaceError::OutOfBounds { x: 0, y: 2, bounds })
        );
    }

    #[test]
    fn resize_reallocates_buffer() {
        let (host, handle) = setup(2, 2);
        let mut surface = BufferedSurface::create(&host, "screen").unwrap();
        surface.set(1, 1, Color::from_argb(0xFFFFFFFF)).unwrap();

        surface.resize(3, 1).unwrap();
        assert_eq!(surface.bounds(), Rect::from_size(3, 1));
        assert_eq!(surface.direct().extent(), Rect::from_size(3, 1));
        assert_eq!(surface.get(2, 0).unwrap(), Color::TRANSPARENT);
        assert!(surface.get(1, 1).is_err());

        surface.set(2, 0, Color::from_rgba8(9, 8, 7, 6)).unwrap();
        surface.synchronize().unwrap();
        assert_eq!(&handle.pixels()[8..12], &[9, 8, 7, 6]);
    }

    #[test]
    fn outside_resize_leaves_buffer_stale() {
        let (host, _handle) = setup(2, 2);
        let mut surface = BufferedSurface::create(&host, "screen").unwrap();
        let mut other = DirectSurface::lookup(&host, "screen").unwrap();

        other.resize(8, 8).unwrap();
        assert_eq!(surface.bounds(), Rect::from_size(2, 2));
        surface.synchronize().unwrap();
    }

    #[test]
    fn clear_fills_every_pixel() {
        let (host, _handle) = setup(3, 2);
        let mut surface = BufferedSurface::create(&host, "screen").unwrap();
        let color = Color::from_argb(0xFF102030);

        surface.clear(color);
        assert!(surface.buffer().pixels().all(|p| Color::from(*p) == color));
    }

    #[test]
    fn empty_surface_synchronizes_without_host_calls() {
        let (host, handle) = setup(0, 4);
        let mut surface = BufferedSurface::create(&host, "screen").unwrap();
        handle.reset_stats();

        surface.synchronize().unwrap();
        assert_eq!(handle.stats().round_trips(), 0);
    }

    #[test]
    fn detached_host_fails_synchronize() {
        let (mut host, _handle) = setup(2, 2);
        let mut surface = BufferedSurface::create(&host, "screen").unwrap();
        host.detach("screen");

        assert_eq!(
            surface.synchronize(),
            Err(SurfaceError::Host(HostError::Detached))
        );
        // The buffer itself is still usable.
        surface.set(0, 0, Color::from_argb(0xFFFFFFFF)).unwrap();
    }

    #[test]
    fn both_surfaces_work_through_dyn_surface() {
        fn fill(surface: &mut dyn Surface, color: Color) {
            let bounds = surface.bounds();
            for y in 0..bounds.height() {
                for x in 0..bounds.width() {
                    surface.set(x, y, color).unwrap();
                }
            }
        }

        let mut host = MemoryHost::new();
        let direct_handle = host.add_surface("direct", 2, 2);
        host.add_surface("buffered", 2, 2);

        let mut direct = DirectSurface::lookup(&host, "direct").unwrap();
        let mut buffered = BufferedSurface::create(&host, "buffered").unwrap();
        let color = Color::from_rgba8(10, 20, 30, 255);

        let targets: [&mut dyn Surface; 2] = [&mut direct, &mut buffered];
        for target in targets {
            fill(target, color);
        }

        assert_eq!(direct_handle.pixels(), [10u8, 20, 30, 255].repeat(4));
        assert_eq!(buffered.get(1, 1).unwrap(), color);
    }
}
