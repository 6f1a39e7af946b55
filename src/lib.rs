//! Pixel-addressable drawing surfaces with batched host synchronization.
//!
//! A host surface (a window, a canvas element) is expensive to talk to one
//! pixel at a time. This crate offers two views of such a surface:
//!
//! - [`DirectSurface`]: every get/set goes straight to the host
//! - [`BufferedSurface`]: get/set work on an in-memory buffer, and
//!   [`synchronize`](BufferedSurface::synchronize) pushes the whole buffer to
//!   the host in one transfer
//!
//! Hosts are reached only through the [`host::SurfaceResolver`] and
//! [`host::HostSurface`] traits, so the same drawing code runs against an
//! SDL2 window or the in-process [`host::MemoryHost`].
//!
//! # Quick Start
//!
//! ```
//! use pixsync::prelude::*;
//!
//! let mut host = MemoryHost::new();
//! host.add_surface("screen", 320, 240);
//!
//! let mut surface = BufferedSurface::create(&host, "screen")?;
//! draw::fill_test_pattern(&mut surface)?;
//! surface.synchronize()?;
//! # Ok::<(), pixsync::SurfaceError>(())
//! ```

// Public API - exposed to library consumers
pub mod color;
pub mod colors;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod host;
pub mod surface;

// Re-export commonly needed types at crate root for convenience
pub use color::Color;
pub use error::{HostError, ResolveError, SurfaceError};
pub use geometry::Rect;
pub use surface::{BufferedSurface, DirectSurface, PixelBuffer, Surface};

/// Default surface width used by the demo binary.
pub const DEFAULT_WIDTH: u32 = 640;
/// Default surface height used by the demo binary.
pub const DEFAULT_HEIGHT: u32 = 480;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use pixsync::prelude::*;
/// ```
pub mod prelude {
    // Surfaces
    pub use crate::surface::{BufferedSurface, DirectSurface, Surface};

    // Pixels & geometry
    pub use crate::color::Color;
    pub use crate::colors;
    pub use crate::geometry::Rect;

    // Drawing
    pub use crate::draw;

    // Hosts
    pub use crate::host::{HostSurface, MemoryHost, MemorySurface, SurfaceResolver};
    #[cfg(feature = "sdl")]
    pub use crate::host::{SdlHost, SdlSurface, WindowEvent};

    // Errors
    pub use crate::error::{HostError, ResolveError, SurfaceError};
}
