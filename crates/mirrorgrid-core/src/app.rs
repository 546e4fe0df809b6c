//! The Elm-style application loop: [`Model`], [`Effect`], [`AppRunner`],
//! [`EventLoopDriver`].
//!
//! Unlike a cell-diffing UI, the model paints straight into the canvas while
//! it handles a message, so the picture is up to date as soon as `update`
//! returns.

use log::debug;

use crate::canvas::{Canvas, PixelBuffer};
use crate::geom::Point;
use crate::messages::Msg;

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`] for the driver to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Save a snapshot of the canvas.
    Export,
    /// Multiple effects batched together.
    Batch(Vec<Effect>),
    /// Signal the application loop to stop.
    End,
}

impl Effect {
    /// Flatten nested batches into `out`, in order.
    fn flatten_into(self, out: &mut Vec<Effect>) {
        match self {
            Self::Batch(effects) => {
                for e in effects {
                    e.flatten_into(out);
                }
            }
            other => out.push(other),
        }
    }
}

// ---------------------------------------------------------------------------
// Model trait
// ---------------------------------------------------------------------------

/// The application model.
pub trait Model {
    /// Process a message, repainting whatever it changed, and optionally
    /// return a side-effect.
    fn update(&mut self, msg: Msg, canvas: &mut dyn Canvas) -> Option<Effect>;

    /// Repaint the whole scene.
    fn draw(&self, canvas: &mut dyn Canvas);

    /// Canvas size the model wants.
    fn canvas_size(&self) -> Point;

    /// Short status line, e.g. for a window title.
    fn title(&self) -> String {
        String::new()
    }
}

// ---------------------------------------------------------------------------
// AppRunner
// ---------------------------------------------------------------------------

/// Owns a model and the pixel buffer it paints into. Drivers feed it
/// messages and present its canvas.
pub struct AppRunner {
    model: Box<dyn Model>,
    canvas: PixelBuffer,
    quit: bool,
}

impl AppRunner {
    pub fn new(model: Box<dyn Model>) -> Self {
        let size = model.canvas_size();
        Self {
            model,
            canvas: PixelBuffer::new(size.x, size.y),
            quit: false,
        }
    }

    /// Paint the initial scene and deliver [`Msg::Init`].
    pub fn init(&mut self) -> Vec<Effect> {
        self.model.draw(&mut self.canvas);
        self.handle_msg(Msg::Init)
    }

    /// Deliver one message. Returns the effects the driver must carry out;
    /// [`Effect::End`] is also recorded so that
    /// [`should_quit`](AppRunner::should_quit) reports it.
    pub fn handle_msg(&mut self, msg: Msg) -> Vec<Effect> {
        if matches!(msg, Msg::Quit) {
            self.quit = true;
        }
        let mut effects = Vec::new();
        if let Some(effect) = self.model.update(msg, &mut self.canvas) {
            effect.flatten_into(&mut effects);
        }
        if effects.contains(&Effect::End) {
            debug!("model requested end");
            self.quit = true;
        }
        effects
    }

    #[inline]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    #[inline]
    pub fn canvas(&self) -> &PixelBuffer {
        &self.canvas
    }

    pub fn title(&self) -> String {
        self.model.title()
    }
}

// ---------------------------------------------------------------------------
// EventLoopDriver trait
// ---------------------------------------------------------------------------

/// A back-end that owns the event loop (e.g. a native window) and drives an
/// [`AppRunner`] until it quits.
pub trait EventLoopDriver {
    fn run(self, runner: AppRunner) -> Result<(), Box<dyn std::error::Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Range;
    use crate::messages::{Command, Key};
    use crate::style::Color;

    /// Paints one pixel per key press; ends on `q`, exports on `e`.
    struct Counter {
        presses: i32,
    }

    impl Model for Counter {
        fn update(&mut self, msg: Msg, canvas: &mut dyn Canvas) -> Option<Effect> {
            match msg {
                Msg::KeyDown { key: Key::Char('q'), .. } => Some(Effect::End),
                Msg::KeyDown { key: Key::Char('e'), .. } => {
                    Some(Effect::Batch(vec![Effect::Batch(vec![Effect::Export])]))
                }
                Msg::KeyDown { .. } => {
                    canvas.fill_rect(Range::new(self.presses, 0, self.presses + 1, 1), Color::WHITE);
                    self.presses += 1;
                    None
                }
                _ => None,
            }
        }

        fn draw(&self, canvas: &mut dyn Canvas) {
            let size = canvas.size();
            canvas.fill_rect(Range::new(0, 0, size.x, size.y), Color::from_rgb(9, 9, 9));
        }

        fn canvas_size(&self) -> Point {
            Point::new(4, 1)
        }

        fn title(&self) -> String {
            format!("{} presses", self.presses)
        }
    }

    #[test]
    fn runner_paints_and_tracks_effects() {
        let mut runner = AppRunner::new(Box::new(Counter { presses: 0 }));
        assert!(runner.init().is_empty());
        assert_eq!(runner.canvas().pixel(Point::ZERO), Some(Color::from_rgb(9, 9, 9)));

        assert!(runner.handle_msg(Msg::key(Key::Char('x'))).is_empty());
        assert_eq!(runner.canvas().pixel(Point::ZERO), Some(Color::WHITE));
        assert_eq!(runner.title(), "1 presses");

        assert_eq!(runner.handle_msg(Msg::key(Key::Char('e'))), vec![Effect::Export]);
        assert!(!runner.should_quit());

        assert_eq!(runner.handle_msg(Msg::key(Key::Char('q'))), vec![Effect::End]);
        assert!(runner.should_quit());
    }

    #[test]
    fn quit_message_sets_quit() {
        let mut runner = AppRunner::new(Box::new(Counter { presses: 0 }));
        runner.handle_msg(Msg::Command(Command::Reset));
        assert!(!runner.should_quit());
        runner.handle_msg(Msg::Quit);
        assert!(runner.should_quit());
    }
}
