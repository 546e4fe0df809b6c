//! Winit graphical backend for mirrorgrid.
//!
//! Shows the sketch canvas in a native window using:
//! - [`winit`] for window creation and input events
//! - [`softbuffer`] for CPU-based pixel presentation
//!
//! # Usage
//!
//! ```rust,no_run
//! use mirrorgrid_core::{AppRunner, EventLoopDriver, Sketch, SketchConfig};
//! use mirrorgrid_winit::{WinitConfig, WinitDriver};
//!
//! let sketch = Sketch::new(SketchConfig::default()).unwrap();
//! let driver = WinitDriver::new(WinitConfig::default());
//! driver.run(AppRunner::new(Box::new(sketch))).unwrap();
//! ```

mod input;
mod renderer;

use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::Arc;

use log::{error, warn};
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalSize, Size},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use mirrorgrid_core::{AppRunner, Effect, EventLoopDriver, ModMask, Msg, Point};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the winit driver.
pub struct WinitConfig {
    /// Window title prefix; the sketch status is appended.
    pub title: String,
    /// Directory PNG exports are written to.
    pub export_dir: PathBuf,
}

impl Default for WinitConfig {
    fn default() -> Self {
        Self {
            title: "mirrorgrid".into(),
            export_dir: PathBuf::from("."),
        }
    }
}

// ---------------------------------------------------------------------------
// WinitDriver
// ---------------------------------------------------------------------------

/// Winit-based graphical driver.
///
/// Implements [`EventLoopDriver`]: it owns the main-thread event loop and
/// drives an [`AppRunner`].
pub struct WinitDriver {
    config: WinitConfig,
}

impl WinitDriver {
    pub fn new(config: WinitConfig) -> Self {
        Self { config }
    }
}

impl EventLoopDriver for WinitDriver {
    fn run(self, runner: AppRunner) -> Result<(), Box<dyn std::error::Error>> {
        let event_loop = EventLoop::new()?;
        let mut app = WinitApp::new(self.config, runner);
        event_loop.run_app(&mut app)?;
        match app.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// WinitApp: ApplicationHandler
// ---------------------------------------------------------------------------

struct WinitApp {
    config: WinitConfig,
    runner: AppRunner,
    state: Option<WinitState>,
    cursor: Point,
    modifiers: ModMask,
    failure: Option<Box<dyn std::error::Error>>,
}

struct WinitState {
    window: Arc<Window>,
    surface: softbuffer::Surface<Arc<Window>, Arc<Window>>,
    pixel_width: u32,
    pixel_height: u32,
}

fn non_zero(v: u32) -> NonZeroU32 {
    NonZeroU32::new(v).unwrap_or(NonZeroU32::MIN)
}

impl WinitApp {
    fn new(config: WinitConfig, runner: AppRunner) -> Self {
        Self {
            config,
            runner,
            state: None,
            cursor: Point::ZERO,
            modifiers: ModMask::NONE,
            failure: None,
        }
    }

    fn create_state(&self, event_loop: &ActiveEventLoop) -> Result<WinitState, Box<dyn std::error::Error>> {
        let canvas = self.runner.canvas();
        let pixel_w = canvas.width() as u32;
        let pixel_h = canvas.height() as u32;

        let window_attrs = Window::default_attributes()
            .with_title(self.window_title())
            .with_inner_size(Size::Physical(PhysicalSize::new(pixel_w, pixel_h)))
            .with_min_inner_size(Size::Physical(PhysicalSize::new(pixel_w, pixel_h)))
            .with_resizable(true);

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let context = softbuffer::Context::new(window.clone())?;
        let mut surface = softbuffer::Surface::new(&context, window.clone())?;
        surface.resize(non_zero(pixel_w), non_zero(pixel_h))?;

        Ok(WinitState {
            window,
            surface,
            pixel_width: pixel_w,
            pixel_height: pixel_h,
        })
    }

    fn window_title(&self) -> String {
        let status = self.runner.title();
        if status.is_empty() {
            self.config.title.clone()
        } else {
            format!("{}: {status}", self.config.title)
        }
    }

    /// Canvas placement in the current window.
    fn canvas_range(&self) -> mirrorgrid_core::Range {
        let (w, h) = self
            .state
            .as_ref()
            .map(|s| (s.pixel_width as usize, s.pixel_height as usize))
            .unwrap_or((0, 0));
        renderer::canvas_range(self.runner.canvas(), w, h)
    }

    fn render(&mut self) {
        let title = self.window_title();
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let width = state.pixel_width as usize;
        let height = state.pixel_height as usize;
        if width == 0 || height == 0 {
            return;
        }

        state.window.set_title(&title);
        let mut buf = match state.surface.buffer_mut() {
            Ok(b) => b,
            Err(e) => {
                warn!("surface buffer unavailable: {e}");
                return;
            }
        };
        renderer::blit_to_buffer(self.runner.canvas(), &mut buf, width, height);
        if let Err(e) = buf.present() {
            warn!("present failed: {e}");
        }
    }

    fn apply_effects(&mut self, effects: Vec<Effect>, event_loop: &ActiveEventLoop) {
        for effect in effects {
            match effect {
                Effect::Export => {
                    let path = mirrorgrid_export::timestamped_path(&self.config.export_dir);
                    if let Err(e) = mirrorgrid_export::save_png(self.runner.canvas(), &path) {
                        error!("{e}");
                    }
                }
                Effect::End => event_loop.exit(),
                Effect::Batch(_) => {}
            }
        }
    }

    /// Deliver a message and present the result in the same callback.
    fn dispatch(&mut self, msg: Msg, event_loop: &ActiveEventLoop) {
        let effects = self.runner.handle_msg(msg);
        self.apply_effects(effects, event_loop);
        if self.runner.should_quit() {
            event_loop.exit();
            return;
        }
        self.render();
    }

    /// Pointer message relative to the canvas, or a leave message when the
    /// pointer is outside it.
    fn pointer_msg(&self, msg: Msg) -> Msg {
        let range = self.canvas_range();
        if range.contains(self.cursor) {
            range.rel_msg(msg)
        } else {
            Msg::PointerLeave
        }
    }
}

impl ApplicationHandler for WinitApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return; // already initialized
        }

        match self.create_state(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                error!("window setup failed: {e}");
                self.failure = Some(e);
                event_loop.exit();
                return;
            }
        }

        let effects = self.runner.init();
        self.apply_effects(effects, event_loop);
        self.render();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.runner.handle_msg(Msg::Quit);
                event_loop.exit();
            }

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Some(state) = self.state.as_mut() {
                    state.pixel_width = width;
                    state.pixel_height = height;
                    if let Err(e) = state.surface.resize(non_zero(width), non_zero(height)) {
                        warn!("surface resize failed: {e}");
                    }
                }
                self.render();
            }

            WindowEvent::RedrawRequested => {
                self.render();
            }

            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = input::translate_modifiers(mods.state());
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(msg) = input::translate_keyboard(&event, self.modifiers) {
                    self.dispatch(msg, event_loop);
                }
            }

            WindowEvent::MouseInput { state: btn_state, button, .. } => {
                if let Some(msg) =
                    input::translate_mouse_button(btn_state, button, self.cursor, self.modifiers)
                {
                    let msg = self.pointer_msg(msg);
                    self.dispatch(msg, event_loop);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = input::window_point(position);
                let msg = self.pointer_msg(input::translate_cursor_moved(self.cursor, self.modifiers));
                self.dispatch(msg, event_loop);
            }

            WindowEvent::CursorLeft { .. } => {
                self.dispatch(Msg::PointerLeave, event_loop);
            }

            _ => {}
        }
    }
}
