//! Headless renderer: draws the pattern for a piece of text and saves it.
//!
//! Usage: `mirrorgrid-png <text> <out.png> [config.json]`

use std::path::PathBuf;

use log::info;
use mirrorgrid_sketch::{config_or_default, render_text};

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let (Some(text), Some(out)) = (args.next(), args.next()) else {
        return Err("usage: mirrorgrid-png <text> <out.png> [config.json]".into());
    };
    let config_path = args.next().map(PathBuf::from);
    let config = config_or_default(config_path.as_deref())?;
    let canvas = render_text(config, &text)?;
    mirrorgrid_export::save_png(&canvas, &PathBuf::from(&out))?;
    info!("wrote {out}");
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
