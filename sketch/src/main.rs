//! mirrorgrid windowed sketch.
//!
//! Usage: `mirrorgrid [config.json]`
//!
//! Click a cell to toggle it (and its mirror), type text and press Enter to
//! draw its pattern, Tab for a random pattern, Escape to clear, Ctrl+S to
//! export a PNG, Ctrl+M to switch mirroring, Ctrl+Q to quit.

use std::path::PathBuf;

use mirrorgrid_core::{AppRunner, EventLoopDriver, Sketch};
use mirrorgrid_sketch::config_or_default;
use mirrorgrid_winit::{WinitConfig, WinitDriver};

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = config_or_default(config_path.as_deref())?;
    let sketch = Sketch::new(config)?;
    let driver = WinitDriver::new(WinitConfig::default());
    driver.run(AppRunner::new(Box::new(sketch)))
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
