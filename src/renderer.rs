//! Frame compositing and the ASCII development preview
//!
//! [`Frame`] is a plain RGBA8 canvas the hosts composite onto: the clock
//! widget builds a small transparent frame (glow + disc), the share-image
//! generator builds an opaque 1200×630 one. Painting helpers cover what the
//! hosts need: radial glow gradients, soft circles, thin constellation
//! lines, and alpha-over compositing of a rendered disc.
//!
//! `draw_ascii` renders any frame as text so the widget can be previewed
//! on stdout during development, without a graphical surface.

use crate::config::WidgetConfig;
use crate::shader::{self, DiscImage};
use crate::surface;

/// Brightness ramp for the ASCII preview, dark to bright.
const ASCII_RAMP: &[u8] = b" .:-=+*#%@";

/// A tightly packed RGBA8 canvas.
#[derive(Debug, Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Frame {
    /// Fully transparent frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    /// Opaque frame filled with `color`.
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            pixels.extend_from_slice(&[color[0], color[1], color[2], 255]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Source-over blend of `color` at coverage `alpha` onto `(x, y)`.
    ///
    /// Out-of-bounds coordinates are ignored so painters can run their
    /// bounding boxes right up to (and past) the frame edge.
    pub fn blend(&mut self, x: i64, y: i64, color: [u8; 3], alpha: f64) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let sa = alpha.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        let da = self.pixels[idx + 3] as f64 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a > 0.0 {
            for c in 0..3 {
                let src = color[c] as f64;
                let dst = self.pixels[idx + c] as f64;
                let out = (src * sa + dst * da * (1.0 - sa)) / out_a;
                self.pixels[idx + c] = out.clamp(0.0, 255.0) as u8;
            }
        }
        self.pixels[idx + 3] = (out_a * 255.0).clamp(0.0, 255.0) as u8;
    }

    /// Alpha-over composite of a rendered disc with its top-left corner at
    /// `(left, top)`.
    pub fn composite_disc(&mut self, disc: &DiscImage, left: i64, top: i64) {
        for y in 0..disc.size() {
            for x in 0..disc.size() {
                let [r, g, b, a] = disc.pixel(x, y);
                if a == 0 {
                    continue;
                }
                self.blend(left + x as i64, top + y as i64, [r, g, b], a as f64 / 255.0);
            }
        }
    }
}

/// Paint a two-stop radial glow: `inner_alpha` out to `inner` radius, then
/// fading linearly to transparent at `outer`.
pub fn paint_radial_glow(
    frame: &mut Frame,
    cx: f64,
    cy: f64,
    inner: f64,
    outer: f64,
    color: [u8; 3],
    inner_alpha: f64,
) {
    let (x0, x1) = ((cx - outer).floor() as i64, (cx + outer).ceil() as i64);
    let (y0, y1) = ((cy - outer).floor() as i64, (cy + outer).ceil() as i64);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dist = (x as f64 - cx).hypot(y as f64 - cy);
            if dist > outer {
                continue;
            }
            let alpha = if dist <= inner {
                inner_alpha
            } else {
                inner_alpha * (1.0 - (dist - inner) / (outer - inner))
            };
            frame.blend(x, y, color, alpha);
        }
    }
}

/// Paint a three-stop glow blob: `(color, alpha)` at the center, the second
/// stop at half radius, transparent at the edge.
pub fn paint_glow_shape(
    frame: &mut Frame,
    cx: f64,
    cy: f64,
    radius: f64,
    center: ([u8; 3], f64),
    mid: ([u8; 3], f64),
) {
    let (x0, x1) = ((cx - radius).floor() as i64, (cx + radius).ceil() as i64);
    let (y0, y1) = ((cy - radius).floor() as i64, (cy + radius).ceil() as i64);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let t = (x as f64 - cx).hypot(y as f64 - cy) / radius;
            if t > 1.0 {
                continue;
            }
            let (color, alpha) = if t <= 0.5 {
                let s = t / 0.5;
                (lerp_color(center.0, mid.0, s), center.1 + (mid.1 - center.1) * s)
            } else {
                let s = (t - 0.5) / 0.5;
                (mid.0, mid.1 * (1.0 - s))
            };
            frame.blend(x, y, color, alpha);
        }
    }
}

/// Fill a soft-edged circle at coverage `alpha`.
pub fn fill_circle(frame: &mut Frame, cx: f64, cy: f64, radius: f64, color: [u8; 3], alpha: f64) {
    let (x0, x1) = ((cx - radius).floor() as i64, (cx + radius).ceil() as i64);
    let (y0, y1) = ((cy - radius).floor() as i64, (cy + radius).ceil() as i64);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dist = (x as f64 - cx).hypot(y as f64 - cy);
            if dist > radius {
                continue;
            }
            // One-pixel antialias fringe at the rim.
            let coverage = (radius - dist).min(1.0);
            frame.blend(x, y, color, alpha * coverage);
        }
    }
}

/// Draw a thin line by stepping one pixel at a time.
pub fn draw_line(
    frame: &mut Frame,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    color: [u8; 3],
    alpha: f64,
) {
    let len = (x1 - x0).hypot(y1 - y0);
    let steps = len.ceil().max(1.0) as u32;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = (x0 + (x1 - x0) * t).round() as i64;
        let y = (y0 + (y1 - y0) * t).round() as i64;
        frame.blend(x, y, color, alpha);
    }
}

fn lerp_color(a: [u8; 3], b: [u8; 3], t: f64) -> [u8; 3] {
    let mut out = [0u8; 3];
    for c in 0..3 {
        out[c] = (a[c] as f64 + (b[c] as f64 - a[c] as f64) * t).clamp(0.0, 255.0) as u8;
    }
    out
}

/// Build one frame of the live clock widget: a transparent canvas with the
/// ambient glow halo painted behind the phase-shaded procedural disc.
pub fn widget_frame(widget: &WidgetConfig, phase: f64) -> Frame {
    let mut frame = Frame::new(widget.size, widget.size);
    let center = widget.size as f64 / 2.0;
    let r = widget.radius as f64;

    // Halo first so the disc paints over its inner edge.
    paint_radial_glow(&mut frame, center, center, r * 0.9, r + 8.0, [255, 255, 230], 0.05);

    let disc = shader::render_procedural(widget.radius, phase, &surface::CATALOG);
    let corner = (center - r).round() as i64;
    frame.composite_disc(&disc, corner, corner);
    frame
}

/// Render a frame as rows of ASCII, two pixel rows per text row.
pub fn ascii_rows(frame: &Frame) -> Vec<String> {
    let mut rows = Vec::with_capacity((frame.height() / 2 + 1) as usize);
    for y in (0..frame.height()).step_by(2) {
        let mut row = String::with_capacity(frame.width() as usize);
        for x in 0..frame.width() {
            let [r, g, b, a] = frame.pixel(x, y);
            let luma = (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64)
                * (a as f64 / 255.0);
            let idx = (luma / 255.0 * (ASCII_RAMP.len() - 1) as f64).round() as usize;
            row.push(ASCII_RAMP[idx.min(ASCII_RAMP.len() - 1)] as char);
        }
        rows.push(row);
    }
    rows
}

/// Print the ASCII preview to stdout.
pub fn draw_ascii(frame: &Frame) {
    for row in ascii_rows(frame) {
        println!("{}", row);
    }
}
