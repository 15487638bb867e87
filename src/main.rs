//! # Moon Widget Application Entry Point
//!
//! Two modes, mirroring the two render hosts:
//!
//! - default: the live clock widget. Once per tick it prints the current
//!   `HH:MM:SS`, the moon's age, and an ASCII preview of the 120×120
//!   widget frame. `--once` renders a single tick and exits.
//! - `--ogp`: the batch generator. Renders the 1200×630 share-preview card
//!   for the current instant and writes it to the configured path.
//!
//! Each tick is stateless; both modes go through the same phase math and
//! shader, so the baked card always matches the live widget for a date.

// Test modules
#[cfg(test)]
mod tests;

use std::env;
use std::path::Path;
use std::thread;
use std::time::Duration;

use chrono::{Local, Utc};
use moon_widget_lib::{config::Config, lunar, ogp, renderer, texture::SurfaceTexture};

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let ogp_mode = args.iter().any(|arg| arg == "--ogp");
    let run_once = args.iter().any(|arg| arg == "--once");

    let config = Config::load();

    if ogp_mode {
        return bake_share_image(&config);
    }

    run_widget(&config, run_once);
    Ok(())
}

/// The live clock widget loop.
fn run_widget(config: &Config, run_once: bool) {
    loop {
        let now = Local::now();
        let age = lunar::moon_age(now.with_timezone(&Utc));
        let phase = lunar::phase_from_age(age);

        let frame = renderer::widget_frame(&config.widget, phase);
        renderer::draw_ascii(&frame);
        println!(
            "{}  moon age {:.1} d  ({:.0}% through the cycle)",
            now.format("%H:%M:%S"),
            age,
            phase * 100.0
        );

        if run_once {
            break;
        }
        thread::sleep(Duration::from_secs(config.widget.tick_seconds.max(1)));
    }
}

/// Bake the share-preview card for the current instant.
fn bake_share_image(config: &Config) -> anyhow::Result<()> {
    // A missing or broken texture is expected (fresh checkouts have no
    // assets); fall back to the procedural surface rather than failing.
    let texture = config.ogp.texture_path.as_ref().and_then(|path| {
        match SurfaceTexture::load(path) {
            Ok(tex) => Some(tex),
            Err(error) => {
                eprintln!("Moon texture unavailable: {}", error);
                eprintln!("Falling back to procedural crater surface");
                None
            }
        }
    });

    let now = Utc::now();
    let frame = ogp::generate(&config.ogp, now, texture.as_ref(), now.timestamp() as u64);

    let output = Path::new(&config.ogp.output_path);
    ogp::write_png(output, &frame)?;
    eprintln!(
        "Share image generated: {} ({}x{}, moon age {:.1} d)",
        output.display(),
        frame.width(),
        frame.height(),
        lunar::moon_age(now)
    );
    Ok(())
}
