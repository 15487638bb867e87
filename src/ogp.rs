//! Batch share-image (OGP) generator
//!
//! Bakes the 1200×630 social-preview card: a dark backdrop with three soft
//! color blobs, a constellation of connected particles, and the moon at its
//! real phase for the given instant. The moon uses the textured shader when
//! a surface texture is supplied and the procedural crater surface
//! otherwise, so the card always matches what the live widget shows.
//!
//! The particle field is seeded, not wall-clock random, so a fixed seed and
//! instant reproduce the exact same PNG — that is what the tests pin down.

use crate::config::OgpConfig;
use crate::lunar;
use crate::renderer::{self, Frame};
use crate::shader;
use crate::texture::SurfaceTexture;

use anyhow::Context;
use chrono::{DateTime, Utc};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// Site backdrop color.
const BACKGROUND: [u8; 3] = [8, 9, 15];

const PARTICLE_COUNT: usize = 50;
const CONNECTION_DISTANCE: f64 = 150.0;

struct Particle {
    x: f64,
    y: f64,
    radius: f64,
    opacity: f64,
}

/// Render the complete share image for `instant`.
pub fn generate(
    config: &OgpConfig,
    instant: DateTime<Utc>,
    texture: Option<&SurfaceTexture>,
    seed: u64,
) -> Frame {
    let mut frame = Frame::filled(config.width, config.height, BACKGROUND);

    paint_backdrop_shapes(&mut frame);
    paint_particle_field(&mut frame, config, seed);
    paint_moon(&mut frame, config, lunar::moon_phase(instant), texture);

    frame
}

/// The three blurred color blobs behind everything else.
fn paint_backdrop_shapes(frame: &mut Frame) {
    // Purple, upper left
    renderer::paint_glow_shape(
        frame,
        100.0,
        80.0,
        450.0,
        ([118, 75, 162], 0.5),
        ([102, 126, 234], 0.25),
    );
    // Pink, lower right
    renderer::paint_glow_shape(
        frame,
        1100.0,
        550.0,
        400.0,
        ([245, 87, 108], 0.45),
        ([240, 147, 251], 0.2),
    );
    // Cyan, center
    renderer::paint_glow_shape(
        frame,
        650.0,
        350.0,
        350.0,
        ([0, 242, 254], 0.35),
        ([79, 172, 254], 0.15),
    );
}

/// Scattered particles joined by faint lines when they sit close together.
fn paint_particle_field(frame: &mut Frame, config: &OgpConfig, seed: u64) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let particles: Vec<Particle> = (0..PARTICLE_COUNT)
        .map(|_| Particle {
            x: rng.gen_range(0.0..config.width as f64),
            y: rng.gen_range(0.0..config.height as f64),
            radius: rng.gen_range(1.0..3.5),
            opacity: rng.gen_range(0.2..0.7),
        })
        .collect();

    // Connection lines first so the dots paint over their endpoints.
    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            let dx = particles[i].x - particles[j].x;
            let dy = particles[i].y - particles[j].y;
            let dist = dx.hypot(dy);
            if dist < CONNECTION_DISTANCE {
                let alpha = (1.0 - dist / CONNECTION_DISTANCE) * 0.25;
                renderer::draw_line(
                    frame,
                    particles[i].x,
                    particles[i].y,
                    particles[j].x,
                    particles[j].y,
                    [255, 255, 255],
                    alpha,
                );
            }
        }
    }

    for p in &particles {
        renderer::fill_circle(frame, p.x, p.y, p.radius, [255, 255, 255], p.opacity);
    }
}

/// Halo plus the phase-shaded disc at the configured position.
fn paint_moon(frame: &mut Frame, config: &OgpConfig, phase: f64, texture: Option<&SurfaceTexture>) {
    let r = config.moon_radius as f64;
    renderer::paint_radial_glow(
        frame,
        config.moon_x,
        config.moon_y,
        r * 0.8,
        r + 30.0,
        [255, 255, 230],
        0.1,
    );

    let disc = shader::render_moon(config.moon_radius, phase, texture);
    frame.composite_disc(
        &disc,
        (config.moon_x - r).round() as i64,
        (config.moon_y - r).round() as i64,
    );
}

/// Write a frame as a PNG, creating the parent directory if needed.
pub fn write_png(path: &Path, frame: &Frame) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output directory {}", parent.display()))?;
        }
    }

    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let writer = BufWriter::new(file);
    PngEncoder::new(writer)
        .write_image(frame.pixels(), frame.width(), frame.height(), ColorType::Rgba8)
        .with_context(|| format!("encode {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use chrono::TimeZone;

    fn fixed_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn generates_configured_dimensions() {
        let config = Config::default();
        let frame = generate(&config.ogp, fixed_instant(), None, 7);
        assert_eq!(frame.width(), 1200);
        assert_eq!(frame.height(), 630);
        assert_eq!(frame.pixels().len(), 1200 * 630 * 4);
    }

    #[test]
    fn output_is_fully_opaque() {
        let config = Config::default();
        let frame = generate(&config.ogp, fixed_instant(), None, 7);
        for y in [0, 314, 629] {
            for x in [0, 600, 1199] {
                assert_eq!(frame.pixel(x, y)[3], 255, "({x},{y})");
            }
        }
    }

    #[test]
    fn same_seed_and_instant_reproduce_the_frame() {
        let config = Config::default();
        let a = generate(&config.ogp, fixed_instant(), None, 42);
        let b = generate(&config.ogp, fixed_instant(), None, 42);
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn different_seeds_move_the_particles() {
        let config = Config::default();
        let a = generate(&config.ogp, fixed_instant(), None, 1);
        let b = generate(&config.ogp, fixed_instant(), None, 2);
        assert_ne!(a.pixels(), b.pixels());
    }

    #[test]
    fn full_moon_outshines_the_backdrop() {
        let config = Config::default();
        let frame = generate(&config.ogp, crate::lunar::reference_full_moon(), None, 7);
        let moon = frame.pixel(config.ogp.moon_x as u32, config.ogp.moon_y as u32);
        let corner = frame.pixel(5, config.ogp.height - 5);
        let luma = |p: [u8; 4]| p[0] as u32 + p[1] as u32 + p[2] as u32;
        assert!(
            luma(moon) > luma(corner),
            "moon {moon:?} vs corner {corner:?}"
        );
    }

    #[test]
    fn writes_a_decodable_png() {
        let config = Config::default();
        let frame = generate(&config.ogp, fixed_instant(), None, 7);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("og-image.png");
        write_png(&path, &frame).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (1200, 630));
    }
}
