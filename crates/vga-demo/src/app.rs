//! Windowed mode (winit + pixels).

use ibm_vga::{Mode13h, SCREEN_HEIGHT, SCREEN_WIDTH};
use pixels::{Pixels, SurfaceTexture};
use tracing::debug;
use vga_raster::{Mouse, MouseState};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::config::RunnerConfig;
use crate::scenes;

pub struct App {
    vga: Mode13h,
    /// Present in paint mode only.
    mouse: Option<Mouse>,
    reading: MouseState,
    config: RunnerConfig,
    window: Option<&'static Window>,
    pixels: Option<Pixels<'static>>,
}

impl App {
    #[must_use]
    pub fn new(vga: Mode13h, mouse: Option<Mouse>, config: RunnerConfig) -> Self {
        Self {
            vga,
            mouse,
            reading: MouseState::default(),
            config,
            window: None,
            pixels: None,
        }
    }

    /// Take the screen back with the cursor removed.
    #[must_use]
    pub fn finish(mut self) -> Mode13h {
        if let Some(mouse) = self.mouse.as_mut()
            && self.window.is_some()
        {
            mouse.hide(&mut self.vga);
        }
        self.vga
    }

    fn update_pixels(&mut self) {
        if let Some(pixels) = self.pixels.as_mut() {
            self.vga.render_rgba(pixels.frame_mut());
        }
    }

    fn feed_mouse(&mut self) {
        if let Some(mouse) = self.mouse.as_mut() {
            scenes::paint_step(&mut self.vga, mouse, self.reading);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = (SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32);
        let window_size =
            winit::dpi::LogicalSize::new(width * self.config.scale, height * self.config.scale);
        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(window_size)
            .with_resizable(false);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let window: &'static Window = Box::leak(Box::new(window));
                let inner = window.inner_size();
                let surface = SurfaceTexture::new(inner.width, inner.height, window);
                match Pixels::new(width, height, surface) {
                    Ok(pixels) => {
                        self.pixels = Some(pixels);
                    }
                    Err(e) => {
                        eprintln!("Failed to create pixels: {e}");
                        event_loop.exit();
                        return;
                    }
                }
                if let Some(mouse) = self.mouse.as_mut() {
                    window.set_cursor_visible(false);
                    mouse.show(&mut self.vga);
                }
                self.window = Some(window);
            }
            Err(e) => {
                eprintln!("Failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key
                    && keycode == KeyCode::Escape
                    && event.state == ElementState::Pressed
                {
                    event_loop.exit();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let Some(pixels) = self.pixels.as_ref() else {
                    return;
                };
                // Positions outside the framebuffer clamp to its edge.
                let (x, y) = pixels
                    .window_pos_to_pixel((position.x as f32, position.y as f32))
                    .unwrap_or_else(|pos| pixels.clamp_pixel_pos(pos));
                self.reading.x = x as u16;
                self.reading.y = y as u16;
                self.feed_mouse();
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = state == ElementState::Pressed;
                match button {
                    MouseButton::Left => self.reading.left = pressed,
                    MouseButton::Right => self.reading.right = pressed,
                    MouseButton::Middle => self.reading.middle = pressed,
                    _ => return,
                }
                debug!(?button, pressed, "mouse button");
                self.feed_mouse();
            }
            WindowEvent::RedrawRequested => {
                self.update_pixels();
                if let Some(pixels) = self.pixels.as_ref()
                    && let Err(e) = pixels.render()
                {
                    eprintln!("Render error: {e}");
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window {
            window.request_redraw();
        }
    }
}
