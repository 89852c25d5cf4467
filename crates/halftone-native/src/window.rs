use std::time::Instant;

use anyhow::Context as _;
use halftone_core::{command_for_key, App, Command, Viewport};
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::{Fullscreen, Window, WindowBuilder},
};

use crate::gpu::{GpuState, ShapeBatch};

const TITLE: &str = "halftone";

/// Translate a winit key into the `KeyboardEvent.key` name the bindings use.
pub fn key_name(key: &Key) -> Option<&str> {
    match key {
        Key::Character(c) => Some(c.as_str()),
        Key::Named(NamedKey::Space) => Some(" "),
        Key::Named(NamedKey::Enter) => Some("Enter"),
        Key::Named(NamedKey::Escape) => Some("Escape"),
        _ => None,
    }
}

fn logical_viewport(window: &Window, size: PhysicalSize<u32>) -> Viewport {
    let logical: LogicalSize<f32> = size.to_logical(window.scale_factor());
    Viewport::new(logical.width, logical.height)
}

fn update_title(window: &Window, app: &App) {
    if app.hint_visible() {
        window.set_title(&format!("{TITLE} · {}", app.status_line()));
    } else {
        window.set_title(TITLE);
    }
}

fn handle_command(window: &Window, app: &mut App, command: Command) {
    if !app.handle(command) {
        match command {
            Command::ToggleFullscreen => {
                let next = match window.fullscreen() {
                    Some(_) => None,
                    None => Some(Fullscreen::Borderless(None)),
                };
                window.set_fullscreen(next);
            }
            Command::ExitFullscreen => window.set_fullscreen(None),
            _ => {}
        }
    }
    update_title(window, app);
}

pub fn run(
    build_app: impl FnOnce(Viewport) -> anyhow::Result<App>,
    width: u32,
    height: u32,
) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("create event loop")?;
    let window = WindowBuilder::new()
        .with_title(TITLE)
        .with_inner_size(LogicalSize::new(width, height))
        .build(&event_loop)
        .context("create window")?;

    let mut app = build_app(logical_viewport(&window, window.inner_size()))?;
    let mut gpu = pollster::block_on(GpuState::new(&window))?;
    let mut batch = ShapeBatch::new();
    let mut last_frame = Instant::now();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => {
                gpu.resize(size);
                if size.width > 0 && size.height > 0 {
                    app.resize(logical_viewport(gpu.window, size));
                }
            }
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => elwt.exit(),
            Event::WindowEvent {
                event:
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                logical_key,
                                state: ElementState::Pressed,
                                repeat: false,
                                ..
                            },
                        ..
                    },
                ..
            } => {
                if let Some(command) = key_name(&logical_key).and_then(command_for_key) {
                    handle_command(gpu.window, &mut app, command);
                }
            }
            Event::AboutToWait => {
                let now = Instant::now();
                app.tick((now - last_frame).as_secs_f64());
                last_frame = now;
                app.draw(&mut batch);
                match gpu.render(&batch) {
                    Ok(_) => gpu.window.request_redraw(),
                    Err(wgpu::SurfaceError::Lost) => gpu.resize(gpu.window.inner_size()),
                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                    Err(e) => log::warn!("[gpu] frame skipped: {e:?}"),
                }
            }
            _ => {}
        })
        .context("event loop")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_keys_map_to_dom_names() {
        assert_eq!(key_name(&Key::Named(NamedKey::Space)), Some(" "));
        assert_eq!(key_name(&Key::Named(NamedKey::Enter)), Some("Enter"));
        assert_eq!(key_name(&Key::Named(NamedKey::Escape)), Some("Escape"));
        assert_eq!(key_name(&Key::Named(NamedKey::Tab)), None);
        let m = Key::Character("m".into());
        assert_eq!(key_name(&m).and_then(command_for_key), Some(Command::ToggleMode));
    }
}
