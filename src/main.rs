mod cli;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use pixsync::prelude::*;

use cli::{Cli, Pattern};

const FRAME_TIME: Duration = Duration::from_millis(16);

fn paint(surface: &mut dyn Surface, pattern: Pattern) -> Result<(), SurfaceError> {
    match pattern {
        Pattern::Test => {
            draw::clear(surface, Color::TRANSPARENT)?;
            draw::fill_test_pattern(surface)
        }
        Pattern::Grid => {
            let bounds = surface.bounds();
            draw::clear(surface, colors::BACKGROUND)?;
            draw::draw_grid(surface, 50, colors::GRID)?;
            let (w, h) = (bounds.width(), bounds.height());
            draw::fill_rect(surface, Rect::new(w / 4, h / 4, w / 2, h / 2), colors::MAGENTA)
        }
        Pattern::Gradient => {
            let bounds = surface.bounds();
            let (w, h) = (bounds.width().max(1) as u64, bounds.height().max(1) as u64);
            for y in 0..bounds.height() {
                for x in 0..bounds.width() {
                    let r = (x as u64 * 0xFFFF / w) as u16;
                    let g = (y as u64 * 0xFFFF / h) as u16;
                    surface.set(x, y, Color::new(r, g, 0x8000, 0xFFFF))?;
                }
            }
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut host = SdlHost::new().context("failed to initialise SDL")?;
    host.open_window(cli.id.as_str(), &cli.title, cli.width, cli.height)
        .context("failed to open window")?;

    let mut surface = BufferedSurface::create(&host, &cli.id)
        .with_context(|| format!("failed to resolve surface '{}'", cli.id))?;

    paint(&mut surface, cli.pattern)?;
    surface.synchronize().context("initial synchronize failed")?;

    if let Some(path) = &cli.output {
        surface
            .direct()
            .capture()?
            .save(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("saved capture to {}", path.display());
    }

    println!("pixsync - {:?} pattern, Escape to quit", cli.pattern);

    let mut frame: u64 = 0;
    loop {
        match host.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) => {
                surface.resize(w, h)?;
                paint(&mut surface, cli.pattern)?;
                surface.synchronize()?;
            }
            WindowEvent::None => {}
        }

        frame += 1;
        if cli.frames.is_some_and(|max| frame >= max) {
            break;
        }
        std::thread::sleep(FRAME_TIME);
    }

    Ok(())
}
