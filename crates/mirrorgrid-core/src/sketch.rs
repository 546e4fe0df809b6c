//! The interactive sketch: a [`Grid`] plus hover state, the current pattern
//! colour and a text entry, painted incrementally into a [`Canvas`].
//!
//! Every handler repaints the cells it changed before returning. Moving the
//! hover highlight always repaints the previously hovered cells first and
//! the newly hovered ones second.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::app::{Effect, Model};
use crate::canvas::Canvas;
use crate::cell::Cell;
use crate::config::SketchConfig;
use crate::error::GridError;
use crate::geom::Point;
use crate::grid::Grid;
use crate::messages::{Command, Key, ModMask, MouseAction, Msg};
use crate::palette;
use crate::pattern;
use crate::style::Color;
use crate::text_entry::{TextEntry, TextEntryAction};

/// The mirrored grid sketch.
pub struct Sketch {
    config: SketchConfig,
    grid: Grid,
    /// Colour of active cells; changes with each generated pattern.
    color: Color,
    hovered: Option<usize>,
    entry: TextEntry,
    rng: StdRng,
}

impl Sketch {
    /// Build a sketch with an OS-seeded random generator.
    pub fn new(config: SketchConfig) -> Result<Self, GridError> {
        Self::with_rng(config, StdRng::from_rng(&mut rand::rng()))
    }

    /// Build a sketch with a deterministic random generator.
    pub fn with_seed(config: SketchConfig, seed: u64) -> Result<Self, GridError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SketchConfig, rng: StdRng) -> Result<Self, GridError> {
        let grid = Grid::new(config.geometry())?;
        Ok(Self {
            color: config.active_color,
            config,
            grid,
            hovered: None,
            entry: TextEntry::new(),
            rng,
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    /// Colour currently used for active cells.
    #[inline]
    pub fn active_color(&self) -> Color {
        self.color
    }

    /// Id of the cell under the pointer.
    #[inline]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    #[inline]
    pub fn entry(&self) -> &TextEntry {
        &self.entry
    }

    // -- painting -----------------------------------------------------------

    fn is_highlighted(&self, id: usize) -> bool {
        let Some(h) = self.hovered else {
            return false;
        };
        h == id
            || (self.config.mirror_enabled
                && self.grid.mirror_of(h).map(Cell::id) == Some(id))
    }

    fn paint_cell(&self, id: usize, canvas: &mut dyn Canvas) {
        let Some(cell) = self.grid.cell(id) else {
            return;
        };
        let rect = self.grid.cell_rect(cell);
        let base = if cell.is_active() {
            self.color
        } else {
            self.config.background_color
        };
        canvas.fill_rect(rect, base);
        if self.is_highlighted(id) {
            canvas.fill_rect(rect, self.config.highlight_color);
        }
    }

    /// Paint a cell and, with mirroring on, its mirror.
    fn paint_pair(&self, id: usize, canvas: &mut dyn Canvas) {
        self.paint_cell(id, canvas);
        if self.config.mirror_enabled {
            if let Some(m) = self.grid.mirror_of(id).map(Cell::id) {
                self.paint_cell(m, canvas);
            }
        }
    }

    // -- operations ---------------------------------------------------------

    /// Toggle the cell under `pos` (and its mirror with mirroring on).
    /// Returns the toggled cell's id.
    pub fn click(&mut self, pos: Point, canvas: &mut dyn Canvas) -> Option<usize> {
        let id = self.grid.cell_at(pos)?.id();
        let active = self.grid.toggle(id)?;
        if self.config.mirror_enabled {
            if let Some(m) = self.grid.mirror_of(id).map(Cell::id) {
                self.grid.toggle(m);
            }
        }
        debug!("click at {pos}: cell {id} now {}", if active { "on" } else { "off" });
        self.paint_pair(id, canvas);
        Some(id)
    }

    /// Move the hover highlight to the cell under `pos`; a point in the
    /// padding clears it.
    pub fn hover(&mut self, pos: Point, canvas: &mut dyn Canvas) {
        let next = self.grid.cell_at(pos).map(Cell::id);
        if next == self.hovered {
            return;
        }
        if let Some(prev) = self.hovered.take() {
            self.paint_pair(prev, canvas);
        }
        self.hovered = next;
        if let Some(id) = next {
            self.paint_pair(id, canvas);
        }
    }

    /// The pointer left the canvas.
    pub fn leave(&mut self, canvas: &mut dyn Canvas) {
        if let Some(prev) = self.hovered.take() {
            self.paint_pair(prev, canvas);
        }
    }

    /// Deactivate every cell and restore the configured colour.
    pub fn reset(&mut self, canvas: &mut dyn Canvas) {
        self.grid.reset_all();
        self.color = self.config.active_color;
        self.draw(canvas);
    }

    fn show_pattern(&mut self, bits: &[bool], color: Color, canvas: &mut dyn Canvas) -> Result<(), GridError> {
        let mut grid = self.grid.clone();
        grid.reset_all();
        grid.apply_bit_pattern(bits)?;
        self.grid = grid;
        self.color = color;
        self.draw(canvas);
        Ok(())
    }

    /// Replace the grid content with a random mirrored pattern in a random
    /// crayon colour.
    pub fn random_pattern(&mut self, canvas: &mut dyn Canvas) {
        let (name, color) = palette::random_crayon(&mut self.rng);
        let bits = pattern::random_bits(&mut self.rng, self.grid.pattern_len());
        match self.show_pattern(&bits, color, canvas) {
            Ok(()) => info!("random pattern in {name}, {} cells", self.grid.active_count()),
            Err(e) => warn!("random pattern rejected: {e}"),
        }
    }

    /// Replace the grid content with the pattern and colour derived from a
    /// digest of `text`. On error nothing changes.
    pub fn submit_text(&mut self, text: &str, canvas: &mut dyn Canvas) -> Result<(), GridError> {
        let n = self.grid.pattern_len();
        let digest = pattern::hash_text(text, pattern::digest_len(n));
        let bits = pattern::derive_bits_from_hash(&digest, n)?;
        let color = pattern::color_from_digest(&digest)?;
        self.show_pattern(&bits, color, canvas)?;
        info!("pattern for {text:?}: digest {digest}, colour {color}");
        Ok(())
    }

    /// Switch mirrored editing on or off, moving the highlight accordingly.
    pub fn toggle_mirror(&mut self, canvas: &mut dyn Canvas) {
        let hovered = self.hovered.take();
        if let Some(prev) = hovered {
            self.paint_pair(prev, canvas);
        }
        self.config.mirror_enabled = !self.config.mirror_enabled;
        self.hovered = hovered;
        if let Some(id) = hovered {
            self.paint_pair(id, canvas);
        }
        debug!("mirroring {}", if self.config.mirror_enabled { "on" } else { "off" });
    }

    fn command(&mut self, cmd: Command, canvas: &mut dyn Canvas) -> Option<Effect> {
        match cmd {
            Command::RandomPattern => self.random_pattern(canvas),
            Command::SubmitText(text) => {
                if let Err(e) = self.submit_text(&text, canvas) {
                    warn!("text pattern rejected: {e}");
                }
            }
            Command::Reset => self.reset(canvas),
            Command::ToggleMirror => self.toggle_mirror(canvas),
            Command::Export => return Some(Effect::Export),
        }
        None
    }

    fn key_binding(key: &Key, modifiers: ModMask) -> Option<Msg> {
        let cmd = match (key, modifiers.contains(ModMask::CTRL)) {
            (Key::Tab, _) => Command::RandomPattern,
            (Key::Char('r'), true) => Command::RandomPattern,
            (Key::Char('s'), true) => Command::Export,
            (Key::Char('m'), true) => Command::ToggleMirror,
            (Key::Char('q'), true) => return Some(Msg::Quit),
            _ => return None,
        };
        Some(Msg::Command(cmd))
    }
}

impl Model for Sketch {
    fn update(&mut self, msg: Msg, canvas: &mut dyn Canvas) -> Option<Effect> {
        match msg {
            Msg::Init | Msg::Mouse { action: MouseAction::Main | MouseAction::Secondary, .. } => {
                None
            }
            Msg::Mouse { action: MouseAction::Release, pos, .. } => {
                self.click(pos, canvas);
                None
            }
            Msg::Mouse { action: MouseAction::Move, pos, .. } => {
                self.hover(pos, canvas);
                None
            }
            Msg::PointerLeave => {
                self.leave(canvas);
                None
            }
            Msg::Command(cmd) => self.command(cmd, canvas),
            Msg::Quit => Some(Effect::End),
            Msg::KeyDown { ref key, modifiers, .. } => {
                if let Some(bound) = Self::key_binding(key, modifiers) {
                    return self.update(bound, canvas);
                }
                match self.entry.update(&msg) {
                    TextEntryAction::Confirm => {
                        let text = self.entry.content().to_string();
                        self.command(Command::SubmitText(text), canvas)
                    }
                    TextEntryAction::Cancel => {
                        self.entry.clear();
                        self.command(Command::Reset, canvas)
                    }
                    TextEntryAction::Change | TextEntryAction::Pass => None,
                }
            }
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.grid.geometry().bounds(), self.config.background_color);
        for id in 0..self.grid.len() {
            self.paint_cell(id, canvas);
        }
    }

    fn canvas_size(&self) -> Point {
        Point::new(self.grid.width(), self.grid.height())
    }

    fn title(&self) -> String {
        let mode = if self.config.mirror_enabled { "mirrored" } else { "free" };
        format!("mirrorgrid ({mode}) > {}", self.entry.content())
    }
}
