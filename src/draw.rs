//! Simple drawing operations over any [`Surface`].
//!
//! Shapes are clipped to the surface bounds. On a [`DirectSurface`] each
//! painted pixel costs a host round-trip; on a [`BufferedSurface`] nothing
//! reaches the host until it is synchronized.
//!
//! [`DirectSurface`]: crate::DirectSurface
//! [`BufferedSurface`]: crate::BufferedSurface

use crate::color::Color;
use crate::colors;
use crate::error::SurfaceError;
use crate::geometry::Rect;
use crate::surface::Surface;

/// Paint every pixel.
pub fn clear<S: Surface + ?Sized>(surface: &mut S, color: Color) -> Result<(), SurfaceError> {
    let bounds = surface.bounds();
    fill_rect(surface, bounds, color)
}

/// Paint the part of `rect` that lies on the surface.
pub fn fill_rect<S: Surface + ?Sized>(
    surface: &mut S,
    rect: Rect,
    color: Color,
) -> Result<(), SurfaceError> {
    let Some(area) = surface.bounds().intersection(&rect) else {
        return Ok(());
    };

    for y in area.y()..area.y() + area.height() {
        for x in area.x()..area.x() + area.width() {
            surface.set(x, y, color)?;
        }
    }
    Ok(())
}

/// Paint every pixel whose x or y is a multiple of `spacing`.
/// A spacing of zero draws nothing.
pub fn draw_grid<S: Surface + ?Sized>(
    surface: &mut S,
    spacing: u32,
    color: Color,
) -> Result<(), SurfaceError> {
    if spacing == 0 {
        return Ok(());
    }

    let bounds = surface.bounds();
    for y in 0..bounds.height() {
        for x in 0..bounds.width() {
            if x % spacing == 0 || y % spacing == 0 {
                surface.set(x, y, color)?;
            }
        }
    }
    Ok(())
}

/// Fill the bottom-right quadrant with [`colors::TEST_GREEN`].
pub fn fill_test_pattern<S: Surface + ?Sized>(surface: &mut S) -> Result<(), SurfaceError> {
    let bounds = surface.bounds();
    let (half_w, half_h) = (bounds.width() / 2, bounds.height() / 2);
    let quadrant = Rect::new(
        half_w,
        half_h,
        bounds.width() - half_w,
        bounds.height() - half_h,
    );
    fill_rect(surface, quadrant, colors::TEST_GREEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::surface::{BufferedSurface, DirectSurface};

    fn buffered(width: u32, height: u32) -> BufferedSurface<crate::host::MemorySurface> {
        let mut host = MemoryHost::new();
        host.add_surface("screen", width, height);
        BufferedSurface::create(&host, "screen").unwrap()
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut surface = buffered(4, 4);
        fill_rect(&mut surface, Rect::new(2, 3, 10, 10), colors::WHITE).unwrap();

        assert_eq!(surface.get(2, 3).unwrap(), colors::WHITE);
        assert_eq!(surface.get(3, 3).unwrap(), colors::WHITE);
        assert_eq!(surface.get(1, 3).unwrap(), Color::TRANSPARENT);
        assert_eq!(surface.get(2, 2).unwrap(), Color::TRANSPARENT);
    }

    #[test]
    fn fill_rect_off_surface_is_noop() {
        let mut surface = buffered(4, 4);
        fill_rect(&mut surface, Rect::new(10, 10, 2, 2), colors::WHITE).unwrap();
        assert!(surface.buffer().pixels().all(|p| p.0 == [0; 4]));
    }

    #[test]
    fn grid_marks_multiples_of_spacing() {
        let mut surface = buffered(5, 5);
        draw_grid(&mut surface, 2, colors::GRID).unwrap();

        assert_eq!(surface.get(0, 3).unwrap(), colors::GRID);
        assert_eq!(surface.get(3, 2).unwrap(), colors::GRID);
        assert_eq!(surface.get(4, 4).unwrap(), colors::GRID);
        assert_eq!(surface.get(1, 1).unwrap(), Color::TRANSPARENT);
        assert_eq!(surface.get(3, 3).unwrap(), Color::TRANSPARENT);
    }

    #[test]
    fn zero_spacing_grid_draws_nothing() {
        let mut surface = buffered(3, 3);
        draw_grid(&mut surface, 0, colors::GRID).unwrap();
        assert!(surface.buffer().pixels().all(|p| p.0 == [0; 4]));
    }

    #[test]
    fn test_pattern_covers_bottom_right_quadrant() {
        let mut surface = buffered(5, 4);
        fill_test_pattern(&mut surface).unwrap();

        for y in 0..4 {
            for x in 0..5 {
                let expected = if x >= 2 && y >= 2 {
                    colors::TEST_GREEN
                } else {
                    Color::TRANSPARENT
                };
                assert_eq!(surface.get(x, y).unwrap(), expected, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn clear_works_on_direct_surfaces() {
        let mut host = MemoryHost::new();
        let handle = host.add_surface("screen", 2, 1);
        let mut surface = DirectSurface::lookup(&host, "screen").unwrap();

        clear(&mut surface, colors::MAGENTA).unwrap();
        assert_eq!(handle.pixels(), [255u8, 0, 255, 255].repeat(2));
        assert_eq!(handle.stats().writes, 2);
    }

    #[test]
    fn helpers_accept_trait_objects() {
        let mut surface = buffered(2, 2);
        let target: &mut dyn Surface = &mut surface;
        clear(target, colors::BACKGROUND).unwrap();
        assert_eq!(surface.get(1, 1).unwrap(), colors::BACKGROUND);
    }
}
