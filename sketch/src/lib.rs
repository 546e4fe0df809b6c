//! Shared pieces of the mirrorgrid binaries: configuration loading and
//! headless rendering.

use std::fmt;
use std::path::Path;

use log::debug;
use mirrorgrid_core::{GridError, Model, PixelBuffer, Sketch, SketchConfig};

/// Errors that can occur when loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(GridError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read config: {e}"),
            Self::Parse(e) => write!(f, "cannot parse config: {e}"),
            Self::Invalid(e) => write!(f, "bad config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(e) => Some(e),
        }
    }
}

/// Parse a JSON configuration. Missing fields take their defaults.
pub fn parse_config(json: &str) -> Result<SketchConfig, ConfigError> {
    let config: SketchConfig = serde_json::from_str(json).map_err(ConfigError::Parse)?;
    config.validate().map_err(ConfigError::Invalid)?;
    Ok(config)
}

/// Load a JSON configuration file.
pub fn load_config(path: &Path) -> Result<SketchConfig, ConfigError> {
    let json = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = parse_config(&json)?;
    debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Load `path` if given, otherwise use the default configuration.
pub fn config_or_default(path: Option<&Path>) -> Result<SketchConfig, ConfigError> {
    match path {
        Some(p) => load_config(p),
        None => Ok(SketchConfig::default()),
    }
}

/// Render the pattern for `text` without a window.
pub fn render_text(config: SketchConfig, text: &str) -> Result<PixelBuffer, GridError> {
    let mut sketch = Sketch::with_seed(config, 0)?;
    let size = sketch.canvas_size();
    let mut canvas = PixelBuffer::new(size.x, size.y);
    sketch.draw(&mut canvas);
    sketch.submit_text(text, &mut canvas)?;
    debug!("rendered {text:?}, {} cells active", sketch.grid().active_count());
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirrorgrid_core::{Color, Point};

    #[test]
    fn parse_partial_config() {
        let c = parse_config(r#"{"rows": 6, "cols": 6, "cell_width": 40, "cell_height": 40, "padding": 20}"#)
            .unwrap();
        assert_eq!(c.width(), 6 * 40 + 40);
        assert!(c.mirror_enabled);
    }

    #[test]
    fn parse_rejects_invalid_geometry() {
        assert!(matches!(parse_config(r#"{"rows": 0}"#), Err(ConfigError::Invalid(_))));
        assert!(matches!(parse_config("{not json"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn parse_rejects_overflowing_geometry() {
        let r = parse_config(r#"{"rows": 50000, "cols": 50000}"#);
        assert!(matches!(r, Err(ConfigError::Invalid(GridError::InvalidGeometry { .. }))));
        let r = parse_config(r#"{"cell_width": 600000000}"#);
        assert!(matches!(
            r,
            Err(ConfigError::Invalid(GridError::InvalidGeometry {
                field: "cell_width",
                ..
            }))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let r = load_config(Path::new("/definitely/not/here.json"));
        assert!(matches!(r, Err(ConfigError::Io(_))));
        assert_eq!(config_or_default(None).unwrap(), SketchConfig::default());
    }

    #[test]
    fn headless_render_is_deterministic_and_symmetric() {
        let a = render_text(SketchConfig::default(), "hello").unwrap();
        let b = render_text(SketchConfig::default(), "hello").unwrap();
        assert_eq!(a, b);
        assert_eq!((a.width(), a.height()), (420, 420));
        for y in (35..385).step_by(70) {
            for x in (35..385).step_by(70) {
                let p = Point::new(x + 35, y + 35);
                let mirrored = Point::new(419 - p.x, p.y);
                assert_eq!(a.pixel(p), a.pixel(mirrored));
            }
        }
        assert_eq!(a.pixel(Point::new(1, 1)), Some(Color::from_rgb(0xF0, 0xF0, 0xF0)));
    }

    #[test]
    fn headless_render_shows_text_pattern() {
        let config = SketchConfig::default();
        let canvas = render_text(config.clone(), "hello").unwrap();

        let mut sketch = Sketch::with_seed(config.clone(), 0).unwrap();
        let mut expected = PixelBuffer::new(420, 420);
        sketch.draw(&mut expected);
        sketch.submit_text("hello", &mut expected).unwrap();
        assert!(sketch.grid().active_count() > 0);
        assert_eq!(canvas, expected);

        let oversized = SketchConfig {
            rows: 50_000,
            ..config
        };
        assert!(matches!(
            render_text(oversized, "hello"),
            Err(GridError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn headless_render_png_round_trip() {
        let buf = render_text(SketchConfig::default(), "png").unwrap();
        let bytes = mirrorgrid_export::encode_png(&buf).unwrap();
        let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (420, 420));
        let c = buf.pixel(Point::new(200, 200)).unwrap();
        assert_eq!(img.get_pixel(200, 200).0, [c.r(), c.g(), c.b(), c.a()]);
    }
}
