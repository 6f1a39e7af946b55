//! SDL2 windows as host surfaces.
//!
//! Each window owns an RGBA32 streaming texture the size of the window.
//! Streaming textures can't be read back, so the surface keeps a copy of the
//! bytes it last uploaded and serves reads from that copy.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};

use super::{check_region, read_region, write_region, HostSurface, ImageData, SurfaceResolver};
use super::BYTES_PER_PIXEL;
use crate::error::{HostError, ResolveError};
use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Resize(u32, u32),
}

/// The SDL video subsystem plus every window opened through it.
pub struct SdlHost {
    windows: HashMap<String, SdlSurface>,
    event_pump: sdl2::EventPump,
    video: sdl2::VideoSubsystem,
    _context: sdl2::Sdl,
}

impl SdlHost {
    pub fn new() -> Result<Self, HostError> {
        let context = sdl2::init().map_err(HostError::Backend)?;
        let video = context.video().map_err(HostError::Backend)?;
        let event_pump = context.event_pump().map_err(HostError::Backend)?;

        Ok(Self {
            windows: HashMap::new(),
            event_pump,
            video,
            _context: context,
        })
    }

    /// Open a resizable window and register it under `id`.
    pub fn open_window(
        &mut self,
        id: impl Into<String>,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<SdlSurface, HostError> {
        let window = self
            .video
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| HostError::Backend(e.to_string()))?;

        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| HostError::Backend(e.to_string()))?;
        let texture_creator = Box::new(canvas.texture_creator());
        let texture = create_texture(&texture_creator, width, height)?;

        let surface = SdlSurface {
            inner: Rc::new(RefCell::new(SdlWindow {
                texture,
                texture_creator,
                canvas,
                pixels: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
                width,
                height,
            })),
        };

        let id = id.into();
        log::debug!("opened SDL window '{}' ({}x{})", id, width, height);
        self.windows.insert(id, surface.clone());
        Ok(surface)
    }

    pub fn poll_events(&mut self) -> WindowEvent {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => return WindowEvent::Resize(w as u32, h as u32),
                _ => {}
            }
        }
        WindowEvent::None
    }
}

impl SurfaceResolver for SdlHost {
    type Surface = SdlSurface;

    fn resolve(&self, id: &str) -> Result<SdlSurface, ResolveError> {
        self.windows
            .get(id)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(id.to_string()))
    }
}

// Field order matters: `texture` borrows from `texture_creator` and must be
// dropped first.
struct SdlWindow {
    texture: Texture<'static>,
    texture_creator: Box<TextureCreator<WindowContext>>,
    canvas: Canvas<Window>,
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl SdlWindow {
    fn extent(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    fn present(&mut self) -> Result<(), HostError> {
        self.texture
            .update(None, &self.pixels, self.width as usize * BYTES_PER_PIXEL)
            .map_err(|e| HostError::Backend(e.to_string()))?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, None)
            .map_err(HostError::Backend)?;
        self.canvas.present();
        Ok(())
    }
}

fn create_texture(
    texture_creator: &TextureCreator<WindowContext>,
    width: u32,
    height: u32,
) -> Result<Texture<'static>, HostError> {
    // SAFETY: the creator is boxed and stored next to the texture in
    // `SdlWindow`, which drops the texture first.
    let texture_creator: &'static TextureCreator<WindowContext> =
        unsafe { &*(texture_creator as *const _) };
    texture_creator
        .create_texture_streaming(PixelFormatEnum::RGBA32, width.max(1), height.max(1))
        .map_err(|e| HostError::Backend(e.to_string()))
}

/// A shared handle to one SDL window.
#[derive(Clone)]
pub struct SdlSurface {
    inner: Rc<RefCell<SdlWindow>>,
}

impl HostSurface for SdlSurface {
    fn dimensions(&self) -> Result<(u32, u32), HostError> {
        let window = self.inner.borrow();
        Ok((window.width, window.height))
    }

    fn set_dimensions(&mut self, width: u32, height: u32) -> Result<(), HostError> {
        let mut window = self.inner.borrow_mut();
        window
            .canvas
            .window_mut()
            .set_size(width, height)
            .map_err(|e| HostError::Backend(e.to_string()))?;

        let texture = create_texture(&window.texture_creator, width, height)?;
        window.texture = texture;
        window.pixels = vec![0; width as usize * height as usize * BYTES_PER_PIXEL];
        window.width = width;
        window.height = height;
        log::debug!("resized SDL window to {}x{}", width, height);
        Ok(())
    }

    fn create_image_data(&self, width: u32, height: u32) -> Result<ImageData, HostError> {
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
        check_region(x, y, width, height)?;
        let window = self.inner.borrow();
        Ok(read_region(
            &window.pixels,
            window.extent(),
            Rect::new(x, y, width, height),
        ))
    }

    fn put_image_data(&mut self, image: &ImageData, x: u32, y: u32) -> Result<(), HostError> {
        let mut window = self.inner.borrow_mut();
        let extent = window.extent();
        write_region(&mut window.pixels, extent, image, x, y);
        window.present()
    }
}
