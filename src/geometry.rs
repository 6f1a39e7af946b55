//! Surface geometry.

use std::fmt;

/// An axis-aligned pixel rectangle.
///
/// Surface extents always have their origin at (0, 0). Other rectangles
/// (for example fill regions) may sit anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle anchored at the origin.
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels covered.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether (x, y) lies inside. The right and bottom edges are exclusive.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x
            && y >= self.y
            && (x - self.x) < self.width
            && (y - self.y) < self.height
    }

    /// The overlapping part of two rectangles, or `None` if they don't touch.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x as u64 + self.width as u64).min(other.x as u64 + other.width as u64);
        let y1 = (self.y as u64 + self.height as u64).min(other.y as u64 + other.height as u64);

        if x1 <= x0 as u64 || y1 <= y0 as u64 {
            return None;
        }
        Some(Rect::new(x0, y0, (x1 - x0 as u64) as u32, (y1 - y0 as u64) as u32))
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_excludes_far_edges() {
        let r = Rect::from_size(4, 2);
        assert!(r.contains(0, 0));
        assert!(r.contains(3, 1));
        assert!(!r.contains(4, 0));
        assert!(!r.contains(0, 2));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let r = Rect::from_size(0, 10);
        assert!(r.is_empty());
        assert!(!r.contains(0, 0));
        assert_eq!(r.area(), 0);
    }

    #[test]
    fn intersection_clips_to_overlap() {
        let surface = Rect::from_size(10, 10);
        let fill = Rect::new(8, 5, 5, 10);
        assert_eq!(surface.intersection(&fill), Some(Rect::new(8, 5, 2, 5)));
    }

    #[test]
    fn disjoint_rects_have_no_intersection() {
        let a = Rect::from_size(4, 4);
        let b = Rect::new(4, 0, 4, 4);
        assert_eq!(a.intersection(&b), None);
    }
}
