//! Native hosting: a winit window whose redraw requests drive the frame
//! scheduler, with the canvas blitted to the surface each frame.

use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::ViewerConfig;
use crate::engine::Engine;
use crate::gpu::{CanvasBlit, GpuContext};
use crate::painter::PixelCanvas;
use crate::scheduler::{FrameHandle, FrameHost};
use crate::session::{ClickModifiers, Command, Session};

/// Open a window sized to the engine's grid and run the viewer until the
/// window closes. Playback starts immediately. Blocks the calling thread.
pub fn run<E: Engine>(engine: E, config: ViewerConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    let mut app = ViewerApp::new(engine, config);
    event_loop.run_app(&mut app)?;
    Ok(())
}

/// Application state. GPU resources and the session are created once the
/// event loop delivers `resumed`.
struct ViewerApp<E: Engine> {
    config: ViewerConfig,
    engine: Option<E>,
    window: Option<Arc<Window>>,
    host: Option<WindowHost>,
    gpu: Option<GpuContext>,
    blit: Option<CanvasBlit>,
    session: Option<Session<E, PixelCanvas>>,
    modifiers: ModifiersState,
    cursor: (f64, f64),
    speed_value: u32,
    last_title_refresh: Instant,
}

impl<E: Engine> ViewerApp<E> {
    fn new(engine: E, config: ViewerConfig) -> Self {
        let speed_value = config.speed_max;
        Self {
            config,
            engine: Some(engine),
            window: None,
            host: None,
            gpu: None,
            blit: None,
            session: None,
            modifiers: ModifiersState::empty(),
            cursor: (0.0, 0.0),
            speed_value,
            last_title_refresh: Instant::now(),
        }
    }

    fn dispatch(&mut self, command: Command) {
        let (Some(session), Some(host)) = (self.session.as_mut(), self.host.as_mut()) else {
            return;
        };
        session.dispatch(command, host);
        // Commands repaint the canvas synchronously; one redraw puts the
        // result on screen even while playback is paused.
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// Translate the tracked cursor position into a canvas-space click.
    fn click_command(&self) -> Option<Command> {
        let window = self.window.as_ref()?;
        let session = self.session.as_ref()?;
        let size = window.inner_size();
        let canvas = (session.painter().width(), session.painter().height());
        let (x, y) = scale_to_canvas(self.cursor, (size.width, size.height), canvas);
        Some(Command::Click {
            x,
            y,
            modifiers: ClickModifiers {
                primary: self.modifiers.control_key(),
                secondary: self.modifiers.shift_key(),
            },
        })
    }

    fn adjust_speed(&mut self, delta: i64) {
        let min = self.config.speed_min as i64;
        let max = self.config.speed_max as i64;
        let value = (self.speed_value as i64 + delta).clamp(min, max) as u32;
        if value == self.speed_value {
            return;
        }
        self.speed_value = value;
        log::info!("Speed: {}", value);
        self.dispatch(Command::SetSpeed(value));
    }

    fn refresh_title(&mut self) {
        let (Some(window), Some(session)) = (self.window.as_ref(), self.session.as_ref()) else {
            return;
        };
        let state = if session.is_paused() {
            "paused"
        } else {
            "playing"
        };
        window.set_title(&format!(
            "{} - {:.0} FPS - {}",
            self.config.title,
            session.fps().latest(),
            state
        ));
        self.last_title_refresh = Instant::now();
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Space => {
                self.dispatch(Command::TogglePlayback);
                self.refresh_title();
            }
            KeyCode::KeyT => self.dispatch(Command::Tick),
            KeyCode::KeyC => self.dispatch(Command::Clear),
            KeyCode::KeyR => self.dispatch(Command::Randomize),
            KeyCode::ArrowUp => self.adjust_speed(1),
            KeyCode::ArrowDown => self.adjust_speed(-1),
            _ => {}
        }
    }

    fn redraw(&mut self) {
        let (Some(session), Some(host), Some(gpu), Some(blit)) = (
            self.session.as_mut(),
            self.host.as_mut(),
            self.gpu.as_mut(),
            self.blit.as_mut(),
        ) else {
            return;
        };

        // Step the scheduler first so a firing frame paints before the
        // canvas is uploaded.
        session.on_frame(host);
        blit.upload(&gpu.queue, session.painter().bytes());

        let output = match gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        blit.draw(&mut encoder, &view);
        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if self.last_title_refresh.elapsed() >= Duration::from_secs(1) {
            self.refresh_title();
            if let Some(session) = &self.session {
                if session.fps().sample_count() > 0 {
                    log::debug!("{}", session.fps().report());
                }
            }
        }
    }
}

impl<E: Engine> ApplicationHandler for ViewerApp<E> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(engine) = self.engine.take() else {
            return;
        };

        let (canvas_w, canvas_h) = self.config.canvas_size(engine.width(), engine.height());
        log::info!(
            "Opening a {}x{} grid as a {}x{} canvas",
            engine.width(),
            engine.height(),
            canvas_w,
            canvas_h
        );

        let window_attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(canvas_w, canvas_h));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );

        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()));
        let blit = CanvasBlit::new(&gpu.device, gpu.format(), canvas_w, canvas_h);

        let canvas = PixelCanvas::new(canvas_w, canvas_h, self.config.dead_color);
        let mut session = Session::new(engine, canvas, &self.config);
        let mut host = WindowHost::new(window.clone());

        session.draw();
        session.play(&mut host);

        log::info!("Controls:");
        log::info!("  Space: Pause/resume playback");
        log::info!("  T: Advance one generation");
        log::info!("  C: Clear the grid");
        log::info!("  R: Randomize the grid");
        log::info!("  Up/Down: Adjust speed");
        log::info!("  Click: Toggle a cell (Ctrl: glider, Ctrl+Shift: pulsar)");
        log::info!("  Escape: Quit");

        self.window = Some(window);
        self.host = Some(host);
        self.gpu = Some(gpu);
        self.blit = Some(blit);
        self.session = Some(session);
        self.refresh_title();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x, position.y);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(command) = self.click_command() {
                    self.dispatch(command);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            log::info!("Escape pressed, exiting...");
                            event_loop.exit();
                        } else {
                            self.handle_key(key_code);
                        }
                    }
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    log::debug!("Window resized to {}x{}", new_size.width, new_size.height);
                    gpu.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }
}

/// Frame scheduling backed by winit redraw requests.
struct WindowHost {
    window: Arc<Window>,
    next_id: u64,
}

impl WindowHost {
    fn new(window: Arc<Window>) -> Self {
        Self { window, next_id: 0 }
    }
}

impl FrameHost for WindowHost {
    fn schedule(&mut self) -> FrameHandle {
        self.window.request_redraw();
        self.next_id += 1;
        FrameHandle::new(self.next_id)
    }

    fn cancel(&mut self, _handle: FrameHandle) {
        // Redraw requests cannot be retracted; the scheduler ignores the
        // one callback that may still land after a pause.
    }
}

/// Map a cursor position in window coordinates to canvas coordinates.
/// The blit stretches the canvas over the whole surface, so this is a
/// per-axis rescale.
fn scale_to_canvas(cursor: (f64, f64), window: (u32, u32), canvas: (u32, u32)) -> (f64, f64) {
    (
        cursor.0 * canvas.0 as f64 / window.0.max(1) as f64,
        cursor.1 * canvas.1 as f64 / window.1.max(1) as f64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_to_canvas_identity_when_sizes_match() {
        assert_eq!(
            scale_to_canvas((25.0, 13.0), (5501, 705), (5501, 705)),
            (25.0, 13.0)
        );
    }

    #[test]
    fn test_scale_to_canvas_rescales_each_axis() {
        let (x, y) = scale_to_canvas((10.0, 8.0), (100, 50), (200, 200));
        assert_eq!(x, 20.0, "x should scale by the width ratio");
        assert_eq!(y, 32.0, "y should scale by the height ratio");
    }

    #[test]
    fn test_scale_to_canvas_survives_zero_window() {
        let (x, y) = scale_to_canvas((10.0, 10.0), (0, 0), (200, 200));
        assert!(x.is_finite() && y.is_finite());
    }
}
