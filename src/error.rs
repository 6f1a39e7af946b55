//! Error types for surface resolution, host calls, and surface access.

use std::fmt;

use crate::geometry::Rect;
use crate::host::ImageDataError;

/// A surface identifier did not name a live drawing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Nothing is registered under this identifier.
    NotFound(String),
    /// The identifier exists but is not a drawing surface.
    NotASurface(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "no surface with id '{}'", id),
            Self::NotASurface(id) => write!(f, "'{}' is not a drawing surface", id),
        }
    }
}

impl std::error::Error for ResolveError {}

/// A host round-trip failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The surface was removed from the host after it was resolved.
    Detached,
    /// The host rejected the requested region (for example zero-sized).
    InvalidRegion {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    /// Pixel data had the wrong shape for the target image.
    ImageData(ImageDataError),
    /// The host backend reported an error of its own.
    Backend(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detached => write!(f, "surface is detached from its host"),
            Self::InvalidRegion {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "invalid region {}x{} at ({}, {})",
                width, height, x, y
            ),
            Self::ImageData(err) => write!(f, "image data error: {}", err),
            Self::Backend(msg) => write!(f, "host backend error: {}", msg),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageData(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ImageDataError> for HostError {
    fn from(err: ImageDataError) -> Self {
        Self::ImageData(err)
    }
}

/// Errors returned by [`Surface`](crate::Surface) implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    Resolve(ResolveError),
    Host(HostError),
    /// A coordinate outside the surface was passed to a checked access.
    OutOfBounds { x: u32, y: u32, bounds: Rect },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolve(err) => write!(f, "surface lookup failed: {}", err),
            Self::Host(err) => write!(f, "host call failed: {}", err),
            Self::OutOfBounds { x, y, bounds } => {
                write!(f, "pixel ({}, {}) is outside surface {}", x, y, bounds)
            }
        }
    }
}

impl std::error::Error for SurfaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Resolve(err) => Some(err),
            Self::Host(err) => Some(err),
            Self::OutOfBounds { .. } => None,
        }
    }
}

impl From<ResolveError> for SurfaceError {
    fn from(err: ResolveError) -> Self {
        Self::Resolve(err)
    }
}

impl From<HostError> for SurfaceError {
    fn from(err: HostError) -> Self {
        Self::Host(err)
    }
}

impl From<ImageDataError> for SurfaceError {
    fn from(err: ImageDataError) -> Self {
        Self::Host(HostError::ImageData(err))
    }
}
