//! Pixel color type and wire-format conversion.
//!
//! Colors are stored with 16 bits per channel. Hosts speak 8 bits per channel
//! (RGBA byte order), so every channel crossing the host boundary keeps only
//! its most significant byte.

use image::Rgba;

/// A non-premultiplied RGBA color with 16-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

/// Convert one 16-bit channel to its wire byte.
///
/// This is truncation, not rounding: `0x01FF` becomes `0x01`.
#[inline]
pub const fn wire_channel(value: u16) -> u8 {
    (value >> 8) as u8
}

/// Widen an 8-bit channel so that `wire_channel(widen_channel(b)) == b`.
#[inline]
pub const fn widen_channel(value: u8) -> u16 {
    value as u16 * 0x101
}

impl Color {
    /// Fully transparent black, the value of every freshly allocated pixel.
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from 8-bit channels.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            widen_channel(r),
            widen_channel(g),
            widen_channel(b),
            widen_channel(a),
        )
    }

    /// Build a color from a packed 0xAARRGGBB value.
    pub const fn from_argb(argb: u32) -> Self {
        Self::from_rgba8(
            (argb >> 16) as u8,
            (argb >> 8) as u8,
            argb as u8,
            (argb >> 24) as u8,
        )
    }

    /// The four wire bytes for this color, in RGBA order.
    #[inline]
    pub const fn to_rgba8(self) -> [u8; 4] {
        [
            wire_channel(self.r),
            wire_channel(self.g),
            wire_channel(self.b),
            wire_channel(self.a),
        ]
    }

    /// Drop sub-byte precision, yielding what a host round-trip gives back.
    pub const fn quantize(self) -> Self {
        let [r, g, b, a] = self.to_rgba8();
        Self::from_rgba8(r, g, b, a)
    }
}

impl From<Rgba<u16>> for Color {
    fn from(p: Rgba<u16>) -> Self {
        let [r, g, b, a] = p.0;
        Self::new(r, g, b, a)
    }
}

impl From<Color> for Rgba<u16> {
    fn from(c: Color) -> Self {
        Rgba([c.r, c.g, c.b, c.a])
    }
}

impl From<Rgba<u8>> for Color {
    fn from(p: Rgba<u8>) -> Self {
        let [r, g, b, a] = p.0;
        Self::from_rgba8(r, g, b, a)
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        Rgba(c.to_rgba8())
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::from_rgba8(r, g, b, a)
    }
}
