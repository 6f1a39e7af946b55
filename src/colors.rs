use crate::color::Color;

pub const BACKGROUND: Color = Color::from_argb(0xFF1E1E1E);
pub const GRID: Color = Color::from_argb(0xFF333333);
pub const MAGENTA: Color = Color::from_argb(0xFFFF00FF);
pub const WHITE: Color = Color::from_argb(0xFFFFFFFF);

/// Fill used by [`fill_test_pattern`](crate::draw::fill_test_pattern).
pub const TEST_GREEN: Color = Color::from_rgba8(0, 128, 0, 255);
