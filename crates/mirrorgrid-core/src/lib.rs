//! **mirrorgrid-core**: a mirrored, clickable grid of square cells drawn on
//! a pixel canvas.
//!
//! The [`Grid`] engine maps pixels to cells, pairs each cell with its
//! reflection across the vertical axis, and turns bit patterns (random, or
//! derived from a text digest) into active cells. [`Sketch`] wires the engine
//! to pointer and keyboard messages and paints into any [`Canvas`].

pub mod app;
pub mod canvas;
pub mod cell;
pub mod config;
pub mod error;
pub mod geom;
pub mod grid;
pub mod messages;
pub mod palette;
pub mod pattern;
pub mod sketch;
pub mod style;
pub mod text_entry;

pub use app::{AppRunner, Effect, EventLoopDriver, Model};
pub use canvas::{Canvas, PixelBuffer};
pub use cell::Cell;
pub use config::SketchConfig;
pub use error::GridError;
pub use geom::{Point, Range};
pub use grid::{Geometry, Grid};
pub use messages::*;
pub use sketch::Sketch;
pub use style::Color;
