//! Sketch configuration.

use crate::error::GridError;
use crate::grid::Geometry;
use crate::style::Color;

/// Everything a sketch needs to know up front.
///
/// Canvas width and height are not configured directly; they follow from
/// the geometry (see [`Geometry::width`]).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SketchConfig {
    pub rows: i32,
    pub cols: i32,
    pub cell_width: i32,
    pub cell_height: i32,
    pub padding: i32,
    pub background_color: Color,
    pub active_color: Color,
    /// Overlay painted on the hovered cell; usually translucent.
    pub highlight_color: Color,
    /// Whether clicks and hover also affect the mirrored cell.
    pub mirror_enabled: bool,
}

impl SketchConfig {
    /// The grid geometry described by this configuration.
    pub fn geometry(&self) -> Geometry {
        Geometry {
            rows: self.rows,
            cols: self.cols,
            cell_width: self.cell_width,
            cell_height: self.cell_height,
            padding: self.padding,
        }
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> i32 {
        self.geometry().width()
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> i32 {
        self.geometry().height()
    }

    pub fn validate(&self) -> Result<(), GridError> {
        self.geometry().validate()
    }
}

impl Default for SketchConfig {
    fn default() -> Self {
        let geometry = Geometry::default();
        Self {
            rows: geometry.rows,
            cols: geometry.cols,
            cell_width: geometry.cell_width,
            cell_height: geometry.cell_height,
            padding: geometry.padding,
            background_color: Color::from_rgb(0xF0, 0xF0, 0xF0),
            active_color: Color::from_rgb(30, 144, 255),
            highlight_color: Color::from_rgba(30, 144, 255, 51),
            mirror_enabled: true,
        }
    }
}
