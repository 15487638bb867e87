//! Sphere illumination shader ("SphereShader")
//!
//! Rasterizes an illuminated sphere for a given lunar phase into a tightly
//! packed RGBA disc. Two variants share the normal/light math:
//!
//! - **procedural**: surface detail comes from the crater catalog in
//!   [`crate::surface`]; used by the live clock widget.
//! - **textured**: surface color is sampled from a real moon texture; used
//!   by the high-resolution share image, falling back to the procedural
//!   variant when no texture is available.
//!
//! Both are pure functions of `(radius, phase, surface data)`. The disc
//! buffer is `2·radius` square with alpha 0 outside the disc; the ambient
//! glow halo is painted separately onto the destination frame (see
//! [`crate::renderer`]) so it can extend past the disc bounds.

use crate::surface::{self, Crater};
use crate::texture::SurfaceTexture;

/// Half-width of the soft terminator band, in dot-product units.
///
/// A hard day/night edge reads as a visible seam at small pixel sizes;
/// this widens it into a smooth gradient.
pub const TERMINATOR_SOFTNESS: f64 = 0.1;

/// Lit-side surface color before crater/edge darkening.
pub const LIT_COLOR: [f64; 3] = [210.0, 208.0, 195.0];

/// Shadowed-side color; a deep blue-grey rather than pure black.
pub const DARK_COLOR: [f64; 3] = [18.0, 20.0, 32.0];

/// Minimum brightness floor for the textured variant's dark side.
const AMBIENT_LIGHT: f64 = 0.08;

/// A rendered moon disc: `size × size` RGBA8, `size = 2·radius`.
///
/// Alpha is 255 inside the disc and 0 outside.
#[derive(Debug, Clone)]
pub struct DiscImage {
    radius: u32,
    pixels: Vec<u8>,
}

impl DiscImage {
    fn new(radius: u32) -> Self {
        let size = (radius * 2) as usize;
        Self {
            radius,
            pixels: vec![0; size * size * 4],
        }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Width and height of the square buffer.
    pub fn size(&self) -> u32 {
        self.radius * 2
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.size() + x) * 4) as usize;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    fn put(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = ((y * self.size() + x) * 4) as usize;
        self.pixels[idx..idx + 4].copy_from_slice(&rgba);
    }
}

/// Light direction in the view plane for a normalized phase.
///
/// Returns `(light_x, light_z)`: at phase 0 (New) the light points away
/// from the viewer (`z = -1`, dark disc); at phase 0.5 (Full) it points at
/// the viewer (`z = +1`, lit disc). The y component is always zero; the
/// terminator sweeps horizontally.
pub fn light_direction(phase: f64) -> (f64, f64) {
    let angle = phase * std::f64::consts::TAU;
    (angle.sin(), -angle.cos())
}

/// Soft-terminator brightness for a normal/light dot product, in `[0, 1]`.
pub fn light_factor(dot: f64) -> f64 {
    ((dot + TERMINATOR_SOFTNESS) / (2.0 * TERMINATOR_SOFTNESS)).clamp(0.0, 1.0)
}

/// Front-facing unit normal for the pixel offset `(dx, dy)`, if the pixel
/// lies on the disc.
fn sphere_normal(dx: f64, dy: f64, radius: f64) -> Option<(f64, f64, f64)> {
    let dist = dx.hypot(dy);
    if dist > radius {
        return None;
    }
    let nx = dx / radius;
    let ny = dy / radius;
    let nz = (1.0 - nx * nx - ny * ny).max(0.0).sqrt();
    Some((nx, ny, nz))
}

/// Render the procedural (crater catalog) variant.
pub fn render_procedural(radius: u32, phase: f64, craters: &[Crater]) -> DiscImage {
    let mut disc = DiscImage::new(radius);
    let r = radius as f64;
    let (light_x, light_z) = light_direction(phase);

    for y in 0..disc.size() {
        for x in 0..disc.size() {
            let dx = x as f64 - r;
            let dy = y as f64 - r;
            let (nx, ny, nz) = match sphere_normal(dx, dy, r) {
                Some(n) => n,
                None => continue, // outside the disc, stays transparent
            };

            let dot = nx * light_x + nz * light_z;
            let lf = light_factor(dot);

            let crater_dark = surface::darkening(nx, ny, craters);
            let edge = 1.0 - 0.15 * (dx.hypot(dy) / r);
            let brightness = (1.0 - crater_dark) * edge;

            let mut rgba = [0u8; 4];
            for c in 0..3 {
                let lit = LIT_COLOR[c] * brightness;
                let dark = DARK_COLOR[c];
                rgba[c] = (dark + (lit - dark) * lf).clamp(0.0, 255.0) as u8;
            }
            rgba[3] = 255;
            disc.put(x, y, rgba);
        }
    }
    disc
}

/// Render the textured variant.
///
/// Same normal/light model as [`render_procedural`]; surface color comes
/// from the texture's mid-band mapping, with limb darkening, an ambient
/// floor so the dark side is never pure black, and a slight cool shift in
/// shadow (blue up, red down).
pub fn render_textured(radius: u32, phase: f64, texture: &SurfaceTexture) -> DiscImage {
    let mut disc = DiscImage::new(radius);
    let r = radius as f64;
    let (light_x, light_z) = light_direction(phase);

    for y in 0..disc.size() {
        for x in 0..disc.size() {
            let dx = x as f64 - r;
            let dy = y as f64 - r;
            let (nx, ny, nz) = match sphere_normal(dx, dy, r) {
                Some(n) => n,
                None => continue,
            };

            let dot = nx * light_x + nz * light_z;
            let lf = light_factor(dot);

            let limb_darkening = 0.85 + 0.15 * nz;
            let brightness = (AMBIENT_LIGHT + (1.0 - AMBIENT_LIGHT) * lf) * limb_darkening;

            let [tr, tg, tb] = texture.sample_normal(nx, ny);
            let shadow = 1.0 - lf;
            let red = (tr as f64 * brightness - 10.0 * shadow).clamp(0.0, 255.0);
            let green = (tg as f64 * brightness).clamp(0.0, 255.0);
            let blue = (tb as f64 * brightness + 14.0 * shadow).clamp(0.0, 255.0);

            disc.put(x, y, [red as u8, green as u8, blue as u8, 255]);
        }
    }
    disc
}

/// Render with the texture if one is available, else fall back to the
/// procedural catalog surface. Never fails.
pub fn render_moon(radius: u32, phase: f64, texture: Option<&SurfaceTexture>) -> DiscImage {
    match texture {
        Some(tex) => render_textured(radius, phase, tex),
        None => render_procedural(radius, phase, &surface::CATALOG),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Crater, CraterKind};

    const R: u32 = 45;

    fn center_pixel(disc: &DiscImage) -> [u8; 4] {
        disc.pixel(disc.radius(), disc.radius())
    }

    #[test]
    fn light_direction_extremes() {
        let (x0, z0) = light_direction(0.0);
        assert!(x0.abs() < 1e-12 && (z0 + 1.0).abs() < 1e-12, "new moon");
        let (x5, z5) = light_direction(0.5);
        assert!(x5.abs() < 1e-9 && (z5 - 1.0).abs() < 1e-9, "full moon");
    }

    #[test]
    fn full_moon_center_is_fully_lit() {
        let (lx, lz) = light_direction(0.5);
        // Center pixel: normal is (0, 0, 1).
        let lf = light_factor(0.0 * lx + 1.0 * lz);
        assert!((lf - 1.0).abs() < 1e-9);

        let disc = render_procedural(R, 0.5, &[]);
        let [red, green, blue, alpha] = center_pixel(&disc);
        assert_eq!(alpha, 255);
        // Lit color minus nothing (no craters, zero edge falloff at center).
        assert!(red > 200 && green > 200 && blue > 180, "{red},{green},{blue}");
    }

    #[test]
    fn new_moon_center_is_dark() {
        let (lx, lz) = light_direction(0.0);
        let lf = light_factor(1.0 * lz + 0.0 * lx);
        assert!(lf.abs() < 1e-9);

        let disc = render_procedural(R, 0.0, &[]);
        let [red, green, blue, _] = center_pixel(&disc);
        assert_eq!([red, green, blue], [18, 20, 32]);
    }

    #[test]
    fn alpha_is_opaque_inside_and_zero_outside() {
        let disc = render_procedural(R, 0.3, &surface::CATALOG);
        let r = R as f64;
        for y in 0..disc.size() {
            for x in 0..disc.size() {
                let dist = (x as f64 - r).hypot(y as f64 - r);
                let alpha = disc.pixel(x, y)[3];
                if dist > r {
                    assert_eq!(alpha, 0, "pixel ({x},{y}) outside disc");
                } else {
                    assert_eq!(alpha, 255, "pixel ({x},{y}) inside disc");
                }
            }
        }
    }

    #[test]
    fn opposite_phases_mirror_left_right() {
        // lightX flips sign between p and 1-p, lightZ is unchanged, so the
        // illumination pattern flips horizontally. Craters are not
        // symmetric, so compare bare spheres.
        let a = render_procedural(R, 0.25, &[]);
        let b = render_procedural(R, 0.75, &[]);
        let size = a.size();
        for y in 0..size {
            for x in 1..size {
                let mirrored_x = 2 * R - x;
                let pa = a.pixel(x, y);
                let pb = b.pixel(mirrored_x, y);
                for c in 0..4 {
                    let diff = (pa[c] as i32 - pb[c] as i32).abs();
                    assert!(diff <= 1, "({x},{y}) channel {c}: {pa:?} vs {pb:?}");
                }
            }
        }
    }

    #[test]
    fn pathological_crater_depth_clamps_instead_of_wrapping() {
        let absurd = [Crater { x: 0.0, y: 0.0, r: 1.5, depth: 50.0, kind: CraterKind::Mare }];
        let disc = render_procedural(R, 0.5, &absurd);
        let [red, green, blue, alpha] = center_pixel(&disc);
        assert_eq!(alpha, 255);
        // Darkening is capped at 0.4, so the center keeps ≥60% of the lit
        // color; nothing wraps to garbage values.
        assert!(red >= 100 && green >= 100 && blue >= 90, "{red},{green},{blue}");
    }

    #[test]
    fn textured_full_moon_center_is_full_brightness() {
        let white =
            crate::texture::SurfaceTexture::from_rgba8(8, 8, vec![255; 8 * 8 * 4]).unwrap();
        let disc = render_textured(R, 0.5, &white);
        let [red, green, blue, _] = center_pixel(&disc);
        // brightness = (0.08 + 0.92·1)·(0.85 + 0.15·1) = 1.0, no shadow tint.
        assert_eq!([red, green, blue], [255, 255, 255]);
    }

    #[test]
    fn textured_dark_side_keeps_ambient_floor_and_cool_tint() {
        let white =
            crate::texture::SurfaceTexture::from_rgba8(8, 8, vec![255; 8 * 8 * 4]).unwrap();
        let disc = render_textured(R, 0.0, &white);
        let [red, green, blue, _] = center_pixel(&disc);
        // brightness = 0.08·(0.85 + 0.15) = 0.08 → green ≈ 20.
        assert!(green > 0, "ambient floor keeps the dark side visible");
        assert!(blue > green, "shadow cools blue up");
        assert!(red < green, "shadow dims red down");
    }

    #[test]
    fn missing_texture_falls_back_to_procedural() {
        let fallback = render_moon(R, 0.5, None);
        let direct = render_procedural(R, 0.5, &surface::CATALOG);
        assert_eq!(fallback.pixels(), direct.pixels());
    }
}
