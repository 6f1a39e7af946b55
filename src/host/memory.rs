//! An in-process host.
//!
//! Surfaces live in plain byte vectors. Handles share their surface, so two
//! lookups of the same id observe each other's writes, just like two
//! references to one canvas element. Every host call is counted.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{check_region, read_region, write_region, HostSurface, ImageData, SurfaceResolver};
use super::BYTES_PER_PIXEL;
use crate::error::{HostError, ResolveError};
use crate::geometry::Rect;

/// Host round-trips seen by one surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostStats {
    pub size_queries: usize,
    pub resizes: usize,
    pub reads: usize,
    pub creates: usize,
    pub writes: usize,
}

impl HostStats {
    /// Total number of host calls.
    pub fn round_trips(&self) -> usize {
        self.size_queries + self.resizes + self.reads + self.creates + self.writes
    }
}

struct SurfaceState {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    attached: bool,
    stats: HostStats,
}

impl SurfaceState {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
            attached: true,
            stats: HostStats::default(),
        }
    }

    fn extent(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    fn ensure_attached(&self) -> Result<(), HostError> {
        if self.attached {
            Ok(())
        } else {
            Err(HostError::Detached)
        }
    }
}

enum Entry {
    Surface(MemorySurface),
    Element,
}

/// A registry of in-memory surfaces, addressed by id.
#[derive(Default)]
pub struct MemoryHost {
    entries: HashMap<String, Entry>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transparent `width x height` surface under `id`, replacing
    /// whatever was there. Returns a handle to it.
    pub fn add_surface(&mut self, id: impl Into<String>, width: u32, height: u32) -> MemorySurface {
        let surface = MemorySurface {
            state: Rc::new(RefCell::new(SurfaceState::new(width, height))),
        };
        if let Some(Entry::Surface(old)) =
            self.entries.insert(id.into(), Entry::Surface(surface.clone()))
        {
            old.state.borrow_mut().attached = false;
        }
        surface
    }

    /// Register an id that exists but is not a drawing surface.
    pub fn add_element(&mut self, id: impl Into<String>) {
        if let Some(Entry::Surface(old)) = self.entries.insert(id.into(), Entry::Element) {
            old.state.borrow_mut().attached = false;
        }
    }

    /// Remove `id`. Handles that are still alive start failing with
    /// [`HostError::Detached`]. Returns whether anything was removed.
    pub fn detach(&mut self, id: &str) -> bool {
        match self.entries.remove(id) {
            Some(Entry::Surface(surface)) => {
                surface.state.borrow_mut().attached = false;
                true
            }
            Some(Entry::Element) => true,
            None => false,
        }
    }
}

impl SurfaceResolver for MemoryHost {
    type Surface = MemorySurface;

    fn resolve(&self, id: &str) -> Result<MemorySurface, ResolveError> {
        match self.entries.get(id) {
            Some(Entry::Surface(surface)) => Ok(surface.clone()),
            Some(Entry::Element) => Err(ResolveError::NotASurface(id.to_string())),
            None => Err(ResolveError::NotFound(id.to_string())),
        }
    }
}

/// A shared handle to one in-memory surface.
#[derive(Clone)]
pub struct MemorySurface {
    state: Rc<RefCell<SurfaceState>>,
}

impl MemorySurface {
    /// Calls made through any handle to this surface so far.
    pub fn stats(&self) -> HostStats {
        self.state.borrow().stats
    }

    pub fn reset_stats(&self) {
        self.state.borrow_mut().stats = HostStats::default();
    }

    /// A copy of the raw RGBA contents. Not counted as a host call.
    pub fn pixels(&self) -> Vec<u8> {
        self.state.borrow().pixels.clone()
    }

    pub fn is_attached(&self) -> bool {
        self.state.borrow().attached
    }
}

impl HostSurface for MemorySurface {
    fn dimensions(&self) -> Result<(u32, u32), HostError> {
        let mut state = self.state.borrow_mut();
        state.ensure_attached()?;
        state.stats.size_queries += 1;
        Ok((state.width, state.height))
    }

    fn set_dimensions(&mut self, width: u32, height: u32) -> Result<(), HostError> {
        let mut state = self.state.borrow_mut();
        state.ensure_attached()?;
        state.stats.resizes += 1;
        state.width = width;
        state.height = height;
        state.pixels = vec![0; width as usize * height as usize * BYTES_PER_PIXEL];
        Ok(())
    }

    fn create_image_data(&self, width: u32, height: u32) -> Result<ImageData, HostError> {
        let mut state = self.state.borrow_mut();
        state.ensure_attached()?;
        state.stats.creates += 1;
        check_region(0, 0, width, height)?;
        Ok(ImageData::new(width, height))
    }

    fn get_image_data(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<ImageData, HostError> {
        let mut state = self.state.borrow_mut();
        state.ensure_attached()?;
        state.stats.reads += 1;
        check_region(x, y, width, height)?;
        Ok(read_region(
            &state.pixels,
            state.extent(),
            Rect::new(x, y, width, height),
        ))
    }

    fn put_image_data(&mut self, image: &ImageData, x: u32, y: u32) -> Result<(), HostError> {
        let mut state = self.state.borrow_mut();
        state.ensure_attached()?;
        state.stats.writes += 1;
        let extent = state.extent();
        write_region(&mut state.pixels, extent, image, x, y);
        Ok(())
    }
}
